use crate::entity::TickContext;
use crate::geometry::Vec2;
use crate::motion::GRAVITY_FORCE;
use crate::view::ViewProxy;

// The box wakes when it is more than half a screen plus its own width
// behind the player, so it overtakes from the left edge.
const ACTIVATION_LEAD: f32 = -512.0;
const FLY_SPEED: f32 = 4.0;
const WAVE_AMPLITUDE: f32 = 50.0;
const WAVE_FREQUENCY: f32 = 0.02;

/// The flying weapon box. Invisible and inert until the player pulls far
/// enough ahead, then glides rightward on a sine wave. Shooting it drops a
/// spread-gun pickup at its position.
#[derive(Debug, Clone)]
pub struct PowerupBox {
    fly_y: f32,
}

impl PowerupBox {
    pub fn new(fly_y: f32) -> Self {
        Self { fly_y }
    }

    pub fn tick(
        &mut self,
        position: &mut Vec2,
        view: &mut ViewProxy,
        active: &mut bool,
        ctx: &TickContext,
    ) {
        if !*active {
            let Some(target) = &ctx.target else {
                return;
            };
            let width = view.collision_box(*position).width;
            if position.x - target.position.x < ACTIVATION_LEAD - width {
                *active = true;
                view.set_visible(true);
            }
            return;
        }

        position.x += FLY_SPEED;
        position.y = self.fly_y + (position.x * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE;
    }

    /// Inactive boxes shrug hits off (the projectile still dies).
    pub fn take_damage(
        &mut self,
        position: Vec2,
        view: &mut ViewProxy,
        active: bool,
    ) -> Option<Vec2> {
        if !active {
            return None;
        }
        view.start_death_animation();
        Some(position)
    }
}

/// The dropped spread-gun pickup: launched up-right out of the box, it
/// decelerates, falls and comes to rest on whatever it lands on. Touching
/// it swaps the player's weapon.
#[derive(Debug, Clone)]
pub struct SpreadGunPickup {
    velocity: Vec2,
}

impl SpreadGunPickup {
    pub fn new() -> Self {
        Self {
            velocity: Vec2::new(4.0, -5.0),
        }
    }

    pub fn tick(&mut self, position: &mut Vec2) {
        self.velocity.x -= 0.05;
        if self.velocity.x < 0.0 {
            self.velocity.x = 0.0;
        }
        position.x += self.velocity.x;

        self.velocity.y += GRAVITY_FORCE;
        position.y += self.velocity.y;
    }

    pub fn land(&mut self, position: &mut Vec2, surface_y: f32, view: &ViewProxy) {
        self.velocity = Vec2::default();
        position.y = surface_y - view.collision_box(*position).height;
    }
}

impl Default for SpreadGunPickup {
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

    #[test]
    fn box_wakes_when_player_pulls_ahead() {
        let mut powerup = PowerupBox::new(150.0);
        let mut view = ViewProxy::new(ViewKind::PowerupBox);
        let mut active = false;
        let mut position = Vec2::new(640.0, 0.0);
        let mut shots = Vec::new();
        let mut pickups = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);

        // 640 - 1200 = -560 is not yet behind by 512 + 50.
        let ctx = TickContext {
            target: Some(TargetInfo {
                position: Vec2::new(1200.0, 294.0),
                dead: false,
            }),
            shots: &mut shots,
            pickups: &mut pickups,
            rng: &mut rng,
        };
        powerup.tick(&mut position, &mut view, &mut active, &ctx);
        assert!(!active);

        let ctx = TickContext {
            target: Some(TargetInfo {
                position: Vec2::new(1203.0, 294.0),
                dead: false,
            }),
            shots: &mut shots,
            pickups: &mut pickups,
            rng: &mut rng,
        };
        powerup.tick(&mut position, &mut view, &mut active, &ctx);
        assert!(active);
        assert!(view.is_visible());

        let ctx = TickContext {
            target: None,
            shots: &mut shots,
            pickups: &mut pickups,
            rng: &mut rng,
        };
        powerup.tick(&mut position, &mut view, &mut active, &ctx);
        assert_eq!(position.x, 644.0);
        let wave = 150.0 + (644.0f32 * 0.02).sin() * 50.0;
        assert!((position.y - wave).abs() < 1e-3);
    }

    #[test]
    fn inactive_box_ignores_damage() {
        let mut powerup = PowerupBox::new(150.0);
        let mut view = ViewProxy::new(ViewKind::PowerupBox);
        assert!(powerup
            .take_damage(Vec2::new(640.0, 150.0), &mut view, false)
            .is_none());
        assert!(!view.is_dying());

        let drop = powerup.take_damage(Vec2::new(640.0, 150.0), &mut view, true);
        assert_eq!(drop, Some(Vec2::new(640.0, 150.0)));
        assert!(view.is_dying());
    }

    #[test]
    fn pickup_arcs_then_rests() {
        let mut pickup = SpreadGunPickup::new();
        let view = ViewProxy::new(ViewKind::SpreadGun);
        let mut position = Vec2::new(640.0, 150.0);

        pickup.tick(&mut position);
        assert!(position.x > 640.0);
        assert!(position.y < 150.0);

        pickup.land(&mut position, 384.0, &view);
        assert_eq!(position.y, 364.0);
        let rest = position;
        // Horizontal glide has been cancelled; only gravity reaccumulates.
        pickup.tick(&mut position);
        assert_eq!(position.x, rest.x);
    }
}
