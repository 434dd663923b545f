#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Half-open AABB intersection: rectangles that merely touch along an edge
/// do not count as overlapping.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisCollision {
    pub vertical: bool,
    pub horizontal: bool,
}

impl AxisCollision {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Classifies a collision between a moving rectangle and a static obstacle by
/// rolling the moving rectangle back to its start-of-tick y and re-testing.
/// If the overlap disappears the object fell (or rose) into the obstacle and
/// the collision is vertical; otherwise it entered from the side. Landing
/// resolution deliberately wins when both axes moved into the obstacle on the
/// same tick, so at most one flag is ever set.
pub fn resolve_axis_collision(moving: Rect, obstacle: Rect, previous: Vec2) -> AxisCollision {
    let mut result = AxisCollision::default();

    if !overlaps(moving, obstacle) {
        return result;
    }

    let rolled_back = Rect {
        y: previous.y,
        ..moving
    };
    if !overlaps(rolled_back, obstacle) {
        result.vertical = true;
        return result;
    }

    result.horizontal = true;
    result
}
