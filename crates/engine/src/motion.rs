use crate::geometry::Vec2;

/// Shared platforming constants. Player and runner move with identical
/// numbers; the lobbed pickup reuses the gravity with its own launch arc.
pub const GRAVITY_FORCE: f32 = 0.2;
pub const RUN_SPEED: f32 = 3.0;
pub const JUMP_IMPULSE: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Grounded,
    Ascending,
    Descending,
    Dead,
}

#[derive(Debug, Clone, Copy)]
pub struct BodyParams {
    pub run_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY_FORCE,
        }
    }
}

/// Platforming movement state machine. The owner drives one tick as
/// `move_horizontal`, an `entering_descent` check (pose change or a runner's
/// ledge jump), then `apply_gravity`; landing is resolved later by the
/// platform pass calling `land`.
#[derive(Debug, Clone)]
pub struct Body {
    params: BodyParams,
    phase: Phase,
    direction: i32,
    velocity_y: f32,
}

impl Body {
    /// Bodies come to life mid-air; the first landing settles them.
    pub fn new(params: BodyParams) -> Self {
        Self {
            params,
            phase: Phase::Ascending,
            direction: 0,
            velocity_y: 0.0,
        }
    }

    /// Resolves held left/right into a facing; opposing holds cancel out.
    pub fn set_direction(&mut self, left: bool, right: bool) -> i32 {
        self.direction = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        self.direction
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn move_horizontal(&mut self, position: &mut Vec2) {
        position.x += self.direction as f32 * self.params.run_speed;
    }

    /// True on the tick a grounded body first picks up downward speed,
    /// which happens one tick after it walks off its platform.
    pub fn entering_descent(&self) -> bool {
        self.velocity_y > 0.0 && self.phase == Phase::Grounded
    }

    pub fn apply_gravity(&mut self, position: &mut Vec2) {
        if self.velocity_y > 0.0 {
            self.phase = Phase::Descending;
        }
        self.velocity_y += self.params.gravity;
        position.y += self.velocity_y;
    }

    /// Grounded bodies only; returns whether the jump was taken.
    pub fn jump(&mut self) -> bool {
        if self.is_airborne() || self.phase == Phase::Dead {
            return false;
        }
        self.phase = Phase::Ascending;
        self.velocity_y -= self.params.jump_impulse;
        true
    }

    /// Drop through a ledge: the body is treated as airborne so ledge
    /// collisions stop holding it up, without any upward impulse.
    pub fn throw_down(&mut self) {
        if self.phase == Phase::Dead {
            return;
        }
        self.phase = Phase::Ascending;
    }

    /// Settles on a surface; snaps the feet to it and kills vertical speed.
    /// Returns whether the body was airborne before, so the owner can run
    /// its touched-down pose change exactly once.
    pub fn land(&mut self, position: &mut Vec2, surface_y: f32, box_height: f32) -> bool {
        let was_airborne = self.is_airborne();
        self.phase = Phase::Grounded;
        self.velocity_y = 0.0;
        position.y = surface_y - box_height;
        was_airborne
    }

    /// Freezes the body for its death animation.
    pub fn halt(&mut self) {
        self.phase = Phase::Dead;
        self.direction = 0;
        self.velocity_y = 0.0;
        self.params.gravity = 0.0;
    }

    pub fn is_ascending(&self) -> bool {
        self.phase == Phase::Ascending
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.phase, Phase::Ascending | Phase::Descending)
    }

    #[cfg(test)]
    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }
}
