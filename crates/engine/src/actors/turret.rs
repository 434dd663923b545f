use crate::entity::TickContext;
use crate::geometry::Vec2;
use crate::view::ViewProxy;
use crate::weapon::{ShotKind, ShotRequest};

const ACTIVATION_LEAD: f32 = 512.0;
const FIRE_PERIOD_TICKS: u32 = 50;
const HEALTH: u32 = 5;

/// Fixed emplacement. Tracks the player with its gun and fires a straight
/// shot every firing period; takes five hits to destroy.
#[derive(Debug, Clone)]
pub struct Turret {
    health: u32,
    fire_counter: u32,
    gun_rotation: f32,
}

impl Turret {
    pub fn new() -> Self {
        Self {
            health: HEALTH,
            fire_counter: 0,
            gun_rotation: 0.0,
        }
    }

    /// Radians, for the embedder to pose the gun sprite.
    pub fn gun_rotation(&self) -> f32 {
        self.gun_rotation
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

        let angle = (target.position.y - position.y).atan2(target.position.x - position.x);
        self.gun_rotation = angle;

        self.fire_counter += 1;
        if self.fire_counter < FIRE_PERIOD_TICKS {
            return;
        }
        ctx.shots.push(ShotRequest {
            position,
            angle_degrees: angle.to_degrees(),
            kind: ShotKind::TurretShot,
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

impl Default for Turret {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TargetInfo;
    use crate::view::ViewKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_ticks(
        turret: &mut Turret,
        position: Vec2,
        view: &ViewProxy,
        active: &mut bool,
        target: TargetInfo,
        ticks: u32,
    ) -> Vec<ShotRequest> {
        let mut shots = Vec::new();
        let mut pickups = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..ticks {
            let mut ctx = TickContext {
                target: Some(target),
                shots: &mut shots,
                pickups: &mut pickups,
                rng: &mut rng,
            };
            turret.tick(position, view, active, &mut ctx);
        }
        shots
    }

    #[test]
    fn fires_on_its_period_once_awake() {
        let mut turret = Turret::new();
        let view = ViewProxy::new(ViewKind::Turret);
        let mut active = false;
        let position = Vec2::new(1280.0, 670.0);
        let target = TargetInfo {
            position: Vec2::new(1000.0, 294.0),
            dead: false,
        };

        // One tick to wake, then 50 to reach the period.
        let shots = run_ticks(&mut turret, position, &view, &mut active, target, 101);
        assert!(active);
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].kind, ShotKind::TurretShot);
        assert_eq!(shots[0].position, position);
        // Target is up and to the left.
        assert!(shots[0].angle_degrees < -90.0);
    }

    #[test]
    fn holds_fire_while_target_dead() {
        let mut turret = Turret::new();
        let view = ViewProxy::new(ViewKind::Turret);
        let mut active = true;
        let target = TargetInfo {
            position: Vec2::new(1000.0, 294.0),
            dead: true,
        };
        let shots = run_ticks(
            &mut turret,
            Vec2::new(1280.0, 670.0),
            &view,
            &mut active,
            target,
            200,
        );
        assert!(shots.is_empty());
    }

    #[test]
    fn five_hits_to_destroy() {
        let mut turret = Turret::new();
        let mut view = ViewProxy::new(ViewKind::Turret);
        for _ in 0..4 {
            turret.take_damage(&mut view);
            assert!(!view.is_dying());
        }
        turret.take_damage(&mut view);
        assert!(view.is_dying());
    }
}
