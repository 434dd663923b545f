use crate::geometry::{Rect, Vec2};

/// Ticks a burst animation plays before the carcass can be reaped.
pub const DEATH_ANIMATION_TICKS: u32 = 25;

/// Pose states. Most kinds only ever use `Idle`; the player and runner walk
/// through the richer set and `Dying` is shared by everything that explodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Idle,
    Stay,
    StayUp,
    Run,
    RunShoot,
    RunUp,
    RunDown,
    Lay,
    Jump,
    Fall,
    Dying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Player,
    Runner,
    Turret,
    Boss,
    BossGun,
    PowerupBox,
    SpreadGun,
    Shot,
    SpreadShot,
    LobShot,
    Platform,
}

/// Damage-receiving box, expressed as a size plus an offset from the
/// entity position. The player's box changes with pose (prone and jumping
/// poses shrink and move it).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitShape {
    pub width: f32,
    pub height: f32,
    pub shift_x: f32,
    pub shift_y: f32,
}

impl HitShape {
    const fn new(width: f32, height: f32, shift_x: f32, shift_y: f32) -> Self {
        Self {
            width,
            height,
            shift_x,
            shift_y,
        }
    }
}

/// Renderer-facing stand-in. The simulation owns pose, facing, box shapes
/// and the death-burst countdown; an embedder maps this onto real sprites.
/// `centered` kinds anchor their boxes on the entity position instead of the
/// top-left corner.
#[derive(Debug, Clone)]
pub struct ViewProxy {
    pub kind: ViewKind,
    visual: Visual,
    flipped: bool,
    visible: bool,
    detached: bool,
    centered: bool,
    collision_width: f32,
    collision_height: f32,
    hit: HitShape,
    muzzle_shift: Vec2,
    death_ticks: Option<u32>,
}

// Root-node pivot carried by the player and runner sprites; it offsets the
// muzzle point and mirrors with the facing.
const PIVOT_X: f32 = 10.0;

impl ViewProxy {
    pub fn new(kind: ViewKind) -> Self {
        let (w, h, centered) = match kind {
            ViewKind::Player | ViewKind::Runner => (20.0, 90.0, false),
            ViewKind::Turret => (128.0, 128.0, true),
            ViewKind::Boss => (64.0, 82.0, false),
            ViewKind::BossGun => (38.0, 18.0, true),
            ViewKind::PowerupBox | ViewKind::SpreadGun => (50.0, 20.0, false),
            ViewKind::Shot | ViewKind::SpreadShot | ViewKind::LobShot => (5.0, 5.0, false),
            ViewKind::Platform => (0.0, 0.0, false),
        };
        let hit = HitShape::new(w, h, 0.0, 0.0);
        Self {
            kind,
            visual: Visual::Idle,
            flipped: false,
            visible: true,
            detached: false,
            centered,
            collision_width: w,
            collision_height: h,
            hit,
            muzzle_shift: Vec2::default(),
            death_ticks: None,
        }
    }

    pub fn platform(width: f32, height: f32) -> Self {
        let mut view = Self::new(ViewKind::Platform);
        view.collision_width = width;
        view.collision_height = height;
        view
    }

    pub fn visual(&self) -> Visual {
        self.visual
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Switches pose and applies its box/muzzle table. Redundant calls with
    /// the current pose are no-ops.
    pub fn show(&mut self, visual: Visual) {
        if self.visual == visual || self.visual == Visual::Dying {
            return;
        }
        self.visual = visual;

        if self.kind != ViewKind::Player {
            return;
        }
        let standing = HitShape::new(20.0, 90.0, 0.0, 0.0);
        match visual {
            Visual::Stay | Visual::RunShoot => {
                self.hit = standing;
                self.muzzle_shift = Vec2::new(50.0, 29.0);
            }
            Visual::StayUp => {
                self.hit = standing;
                self.muzzle_shift = Vec2::new(18.0, -30.0);
            }
            Visual::Run => {
                self.hit = standing;
                self.muzzle_shift = Vec2::new(65.0, 30.0);
            }
            Visual::RunUp => {
                self.hit = standing;
                self.muzzle_shift = Vec2::new(40.0, 0.0);
            }
            Visual::RunDown => {
                self.hit = standing;
                self.muzzle_shift = Vec2::new(47.0, 50.0);
            }
            Visual::Lay => {
                self.hit = HitShape::new(90.0, 20.0, -45.0, 70.0);
                self.muzzle_shift = Vec2::new(50.0, 70.0);
            }
            Visual::Jump => {
                self.hit = HitShape::new(40.0, 40.0, -10.0, 25.0);
                self.muzzle_shift = Vec2::new(-2.0, 40.0);
            }
            // Falling keeps the previous muzzle so mid-air fire stays aimed.
            Visual::Fall => {
                self.hit = standing;
            }
            Visual::Idle | Visual::Dying => {}
        }
    }

    pub fn flip(&mut self, direction: i32) {
        match direction {
            1 => self.flipped = false,
            -1 => self.flipped = true,
            _ => {}
        }
    }

    /// Hides the sprite, zeroes both boxes and starts the burst countdown.
    pub fn start_death_animation(&mut self) {
        if self.death_ticks.is_some() {
            return;
        }
        self.visible = false;
        self.visual = Visual::Dying;
        self.collision_width = 0.0;
        self.collision_height = 0.0;
        self.hit = HitShape::default();
        self.death_ticks = Some(DEATH_ANIMATION_TICKS);
    }

    pub fn is_dying(&self) -> bool {
        self.death_ticks.is_some()
    }

    /// Advances the burst countdown; true once it has played out.
    pub fn tick_death_animation(&mut self) -> bool {
        match self.death_ticks.as_mut() {
            Some(0) => true,
            Some(ticks) => {
                *ticks -= 1;
                *ticks == 0
            }
            None => false,
        }
    }

    /// Marks the proxy as removed from the display tree; the embedder reaps
    /// the sprite on its next sync.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn collision_box(&self, position: Vec2) -> Rect {
        if self.centered {
            Rect::new(
                position.x - self.collision_width / 2.0,
                position.y - self.collision_height / 2.0,
                self.collision_width,
                self.collision_height,
            )
        } else {
            Rect::new(
                position.x,
                position.y,
                self.collision_width,
                self.collision_height,
            )
        }
    }

    pub fn hit_box(&self, position: Vec2) -> Rect {
        if self.centered {
            Rect::new(
                position.x - self.hit.width / 2.0,
                position.y - self.hit.height / 2.0,
                self.hit.width,
                self.hit.height,
            )
        } else {
            Rect::new(
                position.x + self.hit.shift_x,
                position.y + self.hit.shift_y,
                self.hit.width,
                self.hit.height,
            )
        }
    }

    /// World-space point projectiles leave from, mirrored across the pivot
    /// when facing left.
    pub fn muzzle_point(&self, position: Vec2) -> Vec2 {
        let x = if self.flipped {
            position.x + PIVOT_X - self.muzzle_shift.x
        } else {
            position.x + self.muzzle_shift.x + PIVOT_X
        };
        Vec2::new(x, position.y + self.muzzle_shift.y)
    }
}
