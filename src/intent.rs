//! Movement intent components.
//!
//! Intents represent the desired movement from player input or AI. The
//! controller reads them once per fixed step.

use bevy::prelude::*;

/// Input for a single controller step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Horizontal axis in `[-1, 1]`.
    pub horizontal: f32,
    /// Jump button went down since the last step.
    pub jump_pressed: bool,
    /// Jump button went up since the last step.
    pub jump_released: bool,
}

impl FrameInput {
    /// Input with only a horizontal axis value.
    pub fn horizontal(value: f32) -> Self {
        Self {
            horizontal: value.clamp(-1.0, 1.0),
            ..default()
        }
    }

    /// Input with a horizontal axis value and a jump press edge.
    pub fn jump(horizontal: f32) -> Self {
        Self {
            jump_pressed: true,
            ..Self::horizontal(horizontal)
        }
    }

    /// Input with a horizontal axis value and a jump release edge.
    pub fn release(horizontal: f32) -> Self {
        Self {
            jump_released: true,
            ..Self::horizontal(horizontal)
        }
    }
}

/// Movement intent of a platformer character.
///
/// Write to it from any schedule; the controller consumes it in
/// `FixedUpdate`. Jump edges are latched until the next controller step
/// so presses made between fixed steps are never lost.
///
/// # Example
///
/// ```rust
/// use msg_platformer_controller::prelude::*;
///
/// let mut intent = PlatformerIntent::new();
/// intent.set_horizontal(1.0);
/// intent.set_jump_pressed(true);
///
/// let input = intent.take_frame_input();
/// assert_eq!(input.horizontal, 1.0);
/// assert!(input.jump_pressed);
///
/// // Edges are consumed; holding the button does not jump again
/// assert!(!intent.take_frame_input().jump_pressed);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct PlatformerIntent {
    /// Horizontal movement intent (-1.0 = left, 1.0 = right).
    pub horizontal: f32,
    /// Whether the jump button is currently held.
    ///
    /// Set it through [`set_jump_pressed`](Self::set_jump_pressed) so that
    /// press and release edges are detected.
    pub jump_pressed: bool,
    /// A press edge not yet consumed by the controller.
    pub(crate) pending_jump: bool,
    /// A release edge not yet consumed by the controller.
    pub(crate) pending_release: bool,
}

impl PlatformerIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal direction (-1.0 = left, 1.0 = right).
    pub fn set_horizontal(&mut self, direction: f32) {
        self.horizontal = direction.clamp(-1.0, 1.0);
    }

    /// Clear the horizontal intent.
    pub fn clear_horizontal(&mut self) {
        self.horizontal = 0.0;
    }

    /// Set the jump button state.
    ///
    /// Call this every frame with the current state from any input source:
    /// keyboard, gamepad, touch, AI.
    ///
    /// ```rust,ignore
    /// intent.set_jump_pressed(keyboard.pressed(KeyCode::Space));
    /// ```
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        if pressed && !self.jump_pressed {
            self.pending_jump = true;
        } else if !pressed && self.jump_pressed {
            self.pending_release = true;
        }
        self.jump_pressed = pressed;
    }

    /// Check if the jump button is held.
    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    /// Check if there's a jump press waiting for the controller.
    pub fn has_pending_jump(&self) -> bool {
        self.pending_jump
    }

    /// Check if there is active horizontal input.
    pub fn is_moving(&self) -> bool {
        self.horizontal.abs() > 0.001
    }

    /// Build this step's input and consume the latched jump edges.
    pub fn take_frame_input(&mut self) -> FrameInput {
        FrameInput {
            horizontal: self.horizontal,
            jump_pressed: std::mem::take(&mut self.pending_jump),
            jump_released: std::mem::take(&mut self.pending_release),
        }
    }
}
