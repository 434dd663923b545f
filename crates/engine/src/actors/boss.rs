use rand::Rng;

use crate::entity::TickContext;
use crate::geometry::Vec2;
use crate::view::ViewProxy;
use crate::weapon::{ShotKind, ShotRequest};

const ACTIVATION_LEAD: f32 = 512.0;
const FIRE_PERIOD_TICKS: u32 = 50;
const HEALTH: u32 = 5;

// Guns may also fire early; each held tick has this chance of a surprise lob.
const EARLY_FIRE_CHANCE: f64 = 0.01;

/// The end-of-level core. It does nothing on its own; destroying it
/// (five hits) deactivates it, which the stage reads as the win condition.
#[derive(Debug, Clone)]
pub struct Boss {
    health: u32,
}

impl Boss {
    pub fn new() -> Self {
        Self { health: HEALTH }
    }

    pub fn take_damage(&mut self, view: &mut ViewProxy, active: &mut bool) {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            *active = false;
            view.start_death_animation();
        }
    }
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}

/// A mounted gun flanking the boss. Lobs arcing shells leftward on the same
/// period as a turret, with a small per-tick chance of firing early.
#[derive(Debug, Clone)]
pub struct BossGun {
    health: u32,
    fire_counter: u32,
}

impl BossGun {
    pub fn new() -> Self {
        Self {
            health: HEALTH,
            fire_counter: 0,
        }
    }

    pub fn tick(
        &mut self,
        position: Vec2,
        view: &ViewProxy,
        active: &mut bool,
        ctx: &mut TickContext,
    ) {
        let Some(target) = &ctx.target else {
            return;
        };
        if target.dead {
            return;
        }

        if !*active {
            let width = view.collision_box(position).width;
            if position.x - target.position.x < ACTIVATION_LEAD + width * 2.0 {
                *active = true;
            }
            return;
        }

        self.fire_counter += 1;
        if self.fire_counter < FIRE_PERIOD_TICKS && ctx.rng.gen::<f64>() > EARLY_FIRE_CHANCE {
            return;
        }
        ctx.shots.push(ShotRequest {
            position,
            angle_degrees: 180.0,
            kind: ShotKind::BossLob,
        });
        self.fire_counter = 0;
    }

    pub fn take_damage(&mut self, view: &mut ViewProxy) {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.fire_counter = 0;
            view.start_death_animation();
        }
    }
}

impl Default for BossGun {
    fn default() -> Self {
        Self::new()
    }
}
