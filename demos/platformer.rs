//! Platformer Example
//!
//! A playable level featuring:
//! - A floor with walls on both sides
//! - A walkable 30° slope
//! - A steep 70° slope that blocks the player
//! - A one-way platform you can jump through from below
//! - A low ceiling block
//!
//! ## Controls
//! - **A/D** or **Left/Right**: Move horizontally
//! - **W/Up** or **Space**: Jump (hold for a higher jump, press again mid-air to double jump)
//!
//! The camera follows the player with a slight lag.

use bevy::prelude::*;
use bevy::sprite::ColorMaterial;
use bevy_rapier2d::prelude::*;
use msg_platformer_controller::prelude::*;

// ==================== Constants ====================

/// Pixels per world unit. The controller tunables are in world units.
const PX_PER_UNIT: f32 = 32.0;

const PLAYER_HALF_SIZE: Vec2 = Vec2::new(0.5 * PX_PER_UNIT, 1.0 * PX_PER_UNIT);

const LEVEL_WIDTH: f32 = 1600.0;
const LEVEL_HEIGHT: f32 = 640.0;
const WALL_THICKNESS: f32 = 32.0;

const FLOOR_Y: f32 = 0.0;

/// Marker for the player entity.
#[derive(Component)]
struct Player;

// ==================== Main ====================

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Platformer - Platformer Controller Example".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics (queries only, the controller moves kinematically)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PX_PER_UNIT,
        ))
        .add_plugins(RapierDebugRenderPlugin::default())
        // Platformer controller
        .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
        .add_systems(Startup, setup)
        .add_systems(Update, handle_input)
        .run();
}

// ==================== Setup ====================

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    spawn_level(&mut commands, &mut meshes, &mut materials);
    spawn_slopes(&mut commands, &mut meshes, &mut materials);

    let player = spawn_player(&mut commands, &mut meshes, &mut materials);

    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 100.0),
        FollowCamera::new(player)
            .with_lag(5.0)
            .with_offset(Vec2::new(-2.0, 2.0) * PX_PER_UNIT),
    ));

    commands.spawn((
        Text::new("A/D: Move | W/Space: Jump (hold for higher, press again to double jump)"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn spawn_level(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let half_width = LEVEL_WIDTH / 2.0;
    let half_wall = WALL_THICKNESS / 2.0;
    let gray = Color::srgb(0.3, 0.3, 0.3);

    // Floor, top surface at FLOOR_Y
    spawn_block(
        commands,
        meshes,
        materials,
        Vec2::new(0.0, FLOOR_Y - half_wall),
        Vec2::new(half_width, half_wall),
        gray,
    );

    // Left and right walls
    for x in [-half_width - half_wall, half_width + half_wall] {
        spawn_block(
            commands,
            meshes,
            materials,
            Vec2::new(x, FLOOR_Y + LEVEL_HEIGHT / 2.0),
            Vec2::new(half_wall, LEVEL_HEIGHT / 2.0),
            gray,
        );
    }

    // Low ceiling block to bump the head against
    spawn_block(
        commands,
        meshes,
        materials,
        Vec2::new(-400.0, FLOOR_Y + 112.0),
        Vec2::new(96.0, 16.0),
        Color::srgb(0.5, 0.3, 0.3),
    );

    // One-way platform
    let platform = spawn_block(
        commands,
        meshes,
        materials,
        Vec2::new(-50.0, FLOOR_Y + 96.0),
        Vec2::new(96.0, 4.0),
        Color::srgb(0.4, 0.5, 0.3),
    );
    commands.entity(platform).insert(OneWayPlatform);
}

fn spawn_slopes(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    // Walkable ramp rising to the right
    let run = 192.0;
    spawn_triangle(
        commands,
        meshes,
        materials,
        Vec2::new(200.0, FLOOR_Y),
        [
            Vec2::ZERO,
            Vec2::new(run, 0.0),
            Vec2::new(run, run * 30.0_f32.to_radians().tan()),
        ],
        Color::srgb(0.5, 0.4, 0.3),
    );

    // Steep slope rising to the right, beyond the walkable limit
    let run = 64.0;
    spawn_triangle(
        commands,
        meshes,
        materials,
        Vec2::new(550.0, FLOOR_Y),
        [
            Vec2::ZERO,
            Vec2::new(run, 0.0),
            Vec2::new(run, run * 70.0_f32.to_radians().tan()),
        ],
        Color::srgb(0.6, 0.3, 0.2),
    );
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    position: Vec2,
    half_size: Vec2,
    color: Color,
) -> Entity {
    let mesh = meshes.add(Rectangle::from_size(half_size * 2.0));
    let material = materials.add(ColorMaterial::from_color(color));

    commands
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(half_size.x, half_size.y),
            Mesh2d(mesh),
            MeshMaterial2d(material),
        ))
        .id()
}

fn spawn_triangle(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    position: Vec2,
    vertices: [Vec2; 3],
    color: Color,
) {
    let [a, b, c] = vertices;
    let mesh = meshes.add(Triangle2d::new(a, b, c));
    let material = materials.add(ColorMaterial::from_color(color));

    commands.spawn((
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Fixed,
        Collider::triangle(a, b, c),
        Mesh2d(mesh),
        MeshMaterial2d(material),
    ));
}

fn spawn_player(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) -> Entity {
    let mesh = meshes.add(Rectangle::from_size(PLAYER_HALF_SIZE * 2.0));
    let material = materials.add(ColorMaterial::from_color(Color::srgb(0.2, 0.6, 0.9)));

    commands
        .spawn((
            Player,
            Transform::from_xyz(-600.0, FLOOR_Y + 200.0, 1.0),
            Mesh2d(mesh),
            MeshMaterial2d(material),
        ))
        .insert((
            PlatformerController::default(),
            ControllerConfig::player().scaled(PX_PER_UNIT),
            PlatformerIntent::default(),
            Rapier2dPlatformerBundle::default(),
            Collider::cuboid(PLAYER_HALF_SIZE.x, PLAYER_HALF_SIZE.y),
        ))
        .id()
}

// ==================== Input ====================

/// Handles keyboard input for movement and jumping.
fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut q_player: Query<&mut PlatformerIntent, With<Player>>,
) {
    for mut intent in &mut q_player {
        let mut horizontal = 0.0;
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            horizontal -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            horizontal += 1.0;
        }
        intent.set_horizontal(horizontal);

        intent.set_jump_pressed(
            keyboard.pressed(KeyCode::KeyW)
                || keyboard.pressed(KeyCode::ArrowUp)
                || keyboard.pressed(KeyCode::Space),
        );
    }
}
