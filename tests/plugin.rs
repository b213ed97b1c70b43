//! Plugin tests with an in-memory backend.
//!
//! A [`Level`] resource of axis-aligned segments stands in for a physics
//! engine, so the full `Preparation → Movement → Sync` pipeline runs
//! deterministically without Rapier.

use bevy::prelude::*;
use msg_platformer_controller::prelude::*;
use msg_platformer_controller::systems::{advance_controller, fixed_delta};

/// Horizontal floors and vertical walls.
#[derive(Resource, Default)]
struct Level {
    floors: Vec<(f32, f32, f32, SurfaceKind)>,
    walls: Vec<(f32, f32, f32)>,
}

impl Level {
    fn with_floor(mut self, y: f32, x_min: f32, x_max: f32) -> Self {
        self.floors.push((y, x_min, x_max, SurfaceKind::Solid));
        self
    }

    fn with_one_way(mut self, y: f32, x_min: f32, x_max: f32) -> Self {
        self.floors.push((y, x_min, x_max, SurfaceKind::OneWayPlatform));
        self
    }

    fn with_wall(mut self, x: f32, y_min: f32, y_max: f32) -> Self {
        self.walls.push((x, y_min, y_max));
        self
    }

    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        let mut nearest: Option<ProbeHit> = None;
        let mut consider = |hit: ProbeHit| {
            if nearest.is_none_or(|best| hit.distance < best.distance) {
                nearest = Some(hit);
            }
        };

        if direction.y != 0.0 {
            for &(y, x_min, x_max, surface) in &self.floors {
                let t = (y - origin.y) / direction.y;
                let x = origin.x + direction.x * t;
                if (0.0..=max_distance).contains(&t) && (x_min..=x_max).contains(&x) {
                    let normal = Vec2::new(0.0, -direction.y.signum());
                    consider(ProbeHit::new(t, normal, Vec2::new(x, y), surface));
                }
            }
        }

        if direction.x != 0.0 {
            for &(x, y_min, y_max) in &self.walls {
                let t = (x - origin.x) / direction.x;
                let y = origin.y + direction.y * t;
                if (0.0..=max_distance).contains(&t) && (y_min..=y_max).contains(&y) {
                    let normal = Vec2::new(-direction.x.signum(), 0.0);
                    consider(ProbeHit::solid(t, normal, Vec2::new(x, y)));
                }
            }
        }

        nearest
    }
}

/// Backend that casts against the [`Level`] resource.
struct LevelBackend;

impl PlatformerBackend for LevelBackend {
    fn plugin() -> impl Plugin {
        LevelBackendPlugin
    }
}

struct LevelBackendPlugin;

impl Plugin for LevelBackendPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Level>();
        app.add_systems(
            FixedUpdate,
            refuse_unbounded.in_set(PlatformerControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            move_controllers.in_set(PlatformerControllerSet::Movement),
        );
    }
}

fn refuse_unbounded(
    mut commands: Commands,
    q_controllers: Query<Entity, (With<PlatformerController>, Without<BodyBounds>)>,
) {
    for entity in &q_controllers {
        commands.entity(entity).remove::<PlatformerController>();
    }
}

fn move_controllers(
    level: Res<Level>,
    time: Res<Time<Fixed>>,
    mut q_controllers: Query<(
        &ControllerConfig,
        &BodyBounds,
        &mut PlatformerController,
        &mut Transform,
        Option<&mut PlatformerIntent>,
    )>,
) {
    let dt = fixed_delta(&time);
    let caster = |origin: Vec2, direction: Vec2, max_distance: f32| {
        level.cast(origin, direction, max_distance)
    };

    for (config, bounds, mut controller, mut transform, mut intent) in &mut q_controllers {
        advance_controller(
            &mut controller,
            config,
            bounds,
            &mut transform,
            intent.as_deref_mut(),
            dt,
            &caster,
        );
    }
}

fn create_test_app(level: Level) -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(PlatformerControllerPlugin::<LevelBackend>::default());
    app.insert_resource(level);

    app.finish();
    app.cleanup();
    app
}

/// Run N fixed steps.
fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn spawn_character(app: &mut App, position: Vec2, config: ControllerConfig) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            PlatformerController::default(),
            config,
            BodyBounds::new(Vec2::new(0.5, 1.0)).unwrap(),
            PlatformerIntent::default(),
        ))
        .id()
}

fn position(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<Transform>(entity).unwrap().translation.xy()
}

fn intent_mut(app: &mut App, entity: Entity) -> Mut<'_, PlatformerIntent> {
    app.world_mut().get_mut::<PlatformerIntent>(entity).unwrap()
}

// ==================== Landing Tests ====================

#[test]
fn character_falls_and_lands_on_floor() {
    let mut app = create_test_app(Level::default().with_floor(0.0, -10.0, 10.0));
    let character = spawn_character(&mut app, Vec2::new(0.0, 3.0), ControllerConfig::default());

    run_frames(&mut app, 60);

    let pos = position(&app, character);
    assert!(
        (pos.y - 1.0).abs() < 0.05,
        "Body should rest with its bottom on the floor, y = {}",
        pos.y
    );
    assert!(app.world().get::<Grounded>(character).is_some());
    assert!(app.world().get::<Airborne>(character).is_none());

    let controller = app.world().get::<PlatformerController>(character).unwrap();
    assert_eq!(controller.vertical_speed(), 0.0);
    assert!(controller.motion().grounded);
}

#[test]
fn character_without_floor_stays_airborne() {
    let mut app = create_test_app(Level::default());
    let character = spawn_character(&mut app, Vec2::new(0.0, 3.0), ControllerConfig::default());

    run_frames(&mut app, 10);

    assert!(position(&app, character).y < 3.0);
    assert!(app.world().get::<Airborne>(character).is_some());
    assert!(app.world().get::<Grounded>(character).is_none());
}

// ==================== Wall Tests ====================

#[test]
fn walking_into_wall_stops_at_contact() {
    let level = Level::default()
        .with_floor(0.0, -10.0, 10.0)
        .with_wall(3.0, 0.0, 5.0);
    let mut app = create_test_app(level);
    let character = spawn_character(&mut app, Vec2::new(0.0, 1.0), ControllerConfig::player());

    intent_mut(&mut app, character).set_horizontal(1.0);
    run_frames(&mut app, 120);

    let pos = position(&app, character);
    assert!(
        (pos.x - 2.49).abs() < 0.05,
        "Leading edge should stop at the wall, x = {}",
        pos.x
    );

    let wall = app.world().get::<TouchingWall>(character).unwrap();
    assert!(wall.is_right());

    // Walking away clears the contact
    intent_mut(&mut app, character).set_horizontal(-1.0);
    run_frames(&mut app, 10);
    assert!(app.world().get::<TouchingWall>(character).is_none());
    assert!(position(&app, character).x < pos.x);
}

// ==================== Jump Tests ====================

#[test]
fn jump_press_launches_character() {
    let mut app = create_test_app(Level::default().with_floor(0.0, -10.0, 10.0));
    let character = spawn_character(&mut app, Vec2::new(0.0, 1.0), ControllerConfig::default());
    run_frames(&mut app, 5);

    intent_mut(&mut app, character).set_jump_pressed(true);
    run_frames(&mut app, 1);

    assert!(app.world().get::<Airborne>(character).is_some());
    let controller = app.world().get::<PlatformerController>(character).unwrap();
    assert_eq!(controller.jumps_used(), 1);
    assert!(controller.vertical_speed() > 0.0);

    // Default arc peaks 4 units up after half a second
    run_frames(&mut app, 29);
    let pos = position(&app, character);
    assert!(pos.y > 4.5, "Body should be near the apex, y = {}", pos.y);

    // Holding the button does not jump again, and the body comes back down
    run_frames(&mut app, 60);
    let pos = position(&app, character);
    assert!((pos.y - 1.0).abs() < 0.05, "Body should land again, y = {}", pos.y);
    assert!(app.world().get::<Grounded>(character).is_some());
}

#[test]
fn jump_through_one_way_platform_and_land_on_it() {
    let level = Level::default()
        .with_floor(0.0, -10.0, 10.0)
        .with_one_way(2.5, -2.0, 2.0);
    let mut app = create_test_app(level);
    let character = spawn_character(&mut app, Vec2::new(0.0, 1.0), ControllerConfig::default());
    run_frames(&mut app, 5);

    intent_mut(&mut app, character).set_jump_pressed(true);
    run_frames(&mut app, 120);

    let pos = position(&app, character);
    assert!(
        (pos.y - 3.5).abs() < 0.05,
        "Body should rest on the platform, y = {}",
        pos.y
    );
    assert!(app.world().get::<Grounded>(character).is_some());
    assert!(app.world().get::<TouchingCeiling>(character).is_none());
}

// ==================== Initialization Tests ====================

#[test]
fn controller_without_bounds_refuses_to_start() {
    let mut app = create_test_app(Level::default());
    let character = app
        .world_mut()
        .spawn((Transform::default(), PlatformerController::default()))
        .id();

    run_frames(&mut app, 1);

    assert!(app.world().get::<PlatformerController>(character).is_none());
    assert_eq!(position(&app, character), Vec2::ZERO);
}

#[test]
fn invalid_config_refuses_to_start() {
    let mut app = create_test_app(Level::default());
    let config = ControllerConfig::default().with_jump(4.0, 0.0);
    let character = spawn_character(&mut app, Vec2::new(0.0, 3.0), config);

    run_frames(&mut app, 1);

    assert!(app.world().get::<PlatformerController>(character).is_none());
    assert_eq!(position(&app, character), Vec2::new(0.0, 3.0));
}
