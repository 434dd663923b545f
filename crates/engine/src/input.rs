/// One tick's worth of control intent, already resolved from whatever
/// physical sources the embedder wires up (keyboard, touch zones, a script).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub shoot: bool,
}

impl ControlSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_left(mut self) -> Self {
        self.left = true;
        self
    }

    pub fn with_right(mut self) -> Self {
        self.right = true;
        self
    }

    pub fn with_up(mut self) -> Self {
        self.up = true;
        self
    }

    pub fn with_down(mut self) -> Self {
        self.down = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_shoot(mut self) -> Self {
        self.shoot = true;
        self
    }

    /// OR-combines two sources; a command is active if any source holds it.
    pub fn merge(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
            jump: self.jump || other.jump,
            shoot: self.shoot || other.shoot,
        }
    }
}
