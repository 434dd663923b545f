use crate::geometry::Vec2;
use crate::motion::GRAVITY_FORCE;

/// Straight-line projectile; velocity is fixed at spawn from angle and
/// speed and never steered afterwards.
#[derive(Debug, Clone)]
pub struct Shot {
    velocity: Vec2,
}

impl Shot {
    pub fn new(angle_degrees: f32, speed: f32) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            velocity: Vec2::new(speed * radians.cos(), speed * radians.sin()),
        }
    }

    pub fn tick(&self, position: &mut Vec2) {
        position.x += self.velocity.x;
        position.y += self.velocity.y;
    }
}

/// Arcing shell from the boss guns: constant horizontal speed (leftward,
/// randomized at spawn) under gravity. It detonates on landing and sails
/// through walls.
#[derive(Debug, Clone)]
pub struct LobShot {
    speed_x: f32,
    velocity_y: f32,
}

impl LobShot {
    pub fn new(speed_x: f32) -> Self {
        Self {
            speed_x,
            velocity_y: 0.0,
        }
    }

    pub fn tick(&mut self, position: &mut Vec2) {
        position.x += self.speed_x;
        self.velocity_y += GRAVITY_FORCE;
        position.y += self.velocity_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_shot_flies_level() {
        let shot = Shot::new(0.0, 10.0);
        let mut position = Vec2::new(100.0, 100.0);
        shot.tick(&mut position);
        shot.tick(&mut position);
        assert_eq!(position, Vec2::new(120.0, 100.0));
    }

    #[test]
    fn mirrored_shot_flies_left() {
        let shot = Shot::new(180.0, 10.0);
        let mut position = Vec2::new(100.0, 100.0);
        shot.tick(&mut position);
        assert!((position.x - 90.0).abs() < 1e-4);
        assert!(position.y.abs() - 100.0 < 1e-4);
    }

    #[test]
    fn diagonal_shot_components() {
        let shot = Shot::new(45.0, 10.0);
        let mut position = Vec2::default();
        shot.tick(&mut position);
        let expected = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((position.x - expected).abs() < 1e-4);
        assert!((position.y - expected).abs() < 1e-4);
    }

    #[test]
    fn lob_arcs_down_while_drifting() {
        let mut lob = LobShot::new(-5.0);
        let mut position = Vec2::new(6600.0, 440.0);
        for _ in 0..10 {
            lob.tick(&mut position);
        }
        assert_eq!(position.x, 6550.0);
        // Gravity sum over ten ticks: 0.2 * (1 + 2 + ... + 10).
        assert!((position.y - 451.0).abs() < 1e-3);
    }
}
