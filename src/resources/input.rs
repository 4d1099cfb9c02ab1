//! Per-step digital input.
//!
//! The simulation does not read hardware. Whoever drives it (a window loop,
//! the headless runner, a test) builds an [`InputSnapshot`] of what is held
//! this step and feeds it to [`InputState::update`], which derives the
//! press/release edges the player controller needs.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state with edge detection.
pub struct BoolState {
    /// Whether the key is held this step.
    pub active: bool,
    /// Whether the key went down this step.
    pub just_pressed: bool,
    /// Whether the key went up this step.
    pub just_released: bool,
}

impl BoolState {
    pub fn update(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// What is held during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

impl InputSnapshot {
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
    pub jump: BoolState,
}

impl InputState {
    pub fn update(&mut self, snapshot: InputSnapshot) {
        self.left.update(snapshot.left);
        self.right.update(snapshot.right);
        self.up.update(snapshot.up);
        self.down.update(snapshot.down);
        self.jump.update(snapshot.jump);
    }

    /// -1 for left, 1 for right, 0 for neither or both.
    pub fn horizontal(&self) -> f32 {
        (self.right.active as i8 - self.left.active as i8) as f32
    }

    /// -1 for up, 1 for down, 0 for neither or both.
    pub fn vertical(&self) -> f32 {
        (self.down.active as i8 - self.up.active as i8) as f32
    }
}
