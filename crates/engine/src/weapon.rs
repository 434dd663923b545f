use crate::geometry::Vec2;

/// Which gun the player carries. The interval belongs to the mode instead
/// of being a side effect of the last shot, so a freshly collected spread
/// gun fires on its own cadence immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    Single,
    Spread,
}

impl FireMode {
    pub fn interval_ticks(&self) -> u32 {
        match self {
            FireMode::Single => 10,
            FireMode::Spread => 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    PlayerDefault,
    PlayerSpread,
    TurretShot,
    BossLob,
}

impl ShotKind {
    pub fn fired_by_player(&self) -> bool {
        matches!(self, ShotKind::PlayerDefault | ShotKind::PlayerSpread)
    }
}

/// A projectile the spawning pass turns into a live entity next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub position: Vec2,
    pub angle_degrees: f32,
    pub kind: ShotKind,
}

/// Rate-limited trigger. While held, the counter climbs once per tick and a
/// volley leaves every `interval_ticks`; releasing resets the counter so the
/// next press pays the full warm-up again.
#[derive(Debug, Clone)]
pub struct Weapon {
    mode: FireMode,
    count: u32,
    firing: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            mode: FireMode::Single,
            count: 0,
            firing: false,
        }
    }
}

impl Weapon {
    pub fn mode(&self) -> FireMode {
        self.mode
    }

    /// Swapping guns keeps the warm-up already paid.
    pub fn set_mode(&mut self, mode: FireMode) {
        self.mode = mode;
    }

    pub fn start_fire(&mut self) {
        self.firing = true;
    }

    pub fn stop_fire(&mut self) {
        self.firing = false;
        self.count = 0;
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn tick(&mut self, muzzle: Vec2, angle_degrees: f32, out: &mut Vec<ShotRequest>) {
        if !self.firing {
            return;
        }
        self.count += 1;
        if self.count % self.mode.interval_ticks() != 0 {
            return;
        }
        match self.mode {
            FireMode::Single => out.push(ShotRequest {
                position: muzzle,
                angle_degrees,
                kind: ShotKind::PlayerDefault,
            }),
            FireMode::Spread => {
                let mut shift = -20.0;
                for _ in 0..5 {
                    out.push(ShotRequest {
                        position: muzzle,
                        angle_degrees: angle_degrees + shift,
                        kind: ShotKind::PlayerSpread,
                    });
                    shift += 10.0;
                }
            }
        }
    }
}

/// Resolves held directions into a firing angle, before facing is applied.
/// Straight down is only available mid-jump.
pub fn aim_angle_degrees(left: bool, right: bool, up: bool, down: bool, airborne: bool) -> f32 {
    if left || right {
        if up {
            -45.0
        } else if down {
            45.0
        } else {
            0.0
        }
    } else if up {
        -90.0
    } else if down && airborne {
        90.0
    } else {
        0.0
    }
}

/// Mirrors an aim angle across the vertical axis for a left-facing shooter.
pub fn mirror_for_facing(angle_degrees: f32, flipped: bool) -> f32 {
    if flipped {
        -angle_degrees + 180.0
    } else {
        angle_degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held_shots(weapon: &mut Weapon, ticks: u32) -> Vec<ShotRequest> {
        let mut out = Vec::new();
        weapon.start_fire();
        for _ in 0..ticks {
            weapon.tick(Vec2::default(), 0.0, &mut out);
        }
        out
    }

    #[test]
    fn single_fires_twice_in_25_held_ticks() {
        let mut weapon = Weapon::default();
        let shots = held_shots(&mut weapon, 25);
        assert_eq!(shots.len(), 2);
        assert!(shots.iter().all(|s| s.kind == ShotKind::PlayerDefault));
    }

    #[test]
    fn release_resets_warm_up() {
        let mut weapon = Weapon::default();
        let shots = held_shots(&mut weapon, 9);
        assert!(shots.is_empty());
        weapon.stop_fire();
        // Nine more ticks still is not enough after the reset.
        let shots = held_shots(&mut weapon, 9);
        assert!(shots.is_empty());
        let shots = held_shots(&mut weapon, 1);
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn spread_volley_fans_five() {
        let mut weapon = Weapon::default();
        weapon.set_mode(FireMode::Spread);
        let shots = held_shots(&mut weapon, 40);
        assert_eq!(shots.len(), 5);
        let angles: Vec<f32> = shots.iter().map(|s| s.angle_degrees).collect();
        assert_eq!(angles, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert!(shots.iter().all(|s| s.kind == ShotKind::PlayerSpread));
    }

    #[test]
    fn swapping_guns_keeps_warm_up() {
        let mut weapon = Weapon::default();
        let shots = held_shots(&mut weapon, 35);
        assert_eq!(shots.len(), 3);
        weapon.set_mode(FireMode::Spread);
        // Counter sits at 35; five more held ticks reach the spread cadence.
        let mut out = Vec::new();
        for _ in 0..5 {
            weapon.tick(Vec2::default(), 0.0, &mut out);
        }
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn aim_table() {
        assert_eq!(aim_angle_degrees(false, true, true, false, false), -45.0);
        assert_eq!(aim_angle_degrees(false, true, false, true, false), 45.0);
        assert_eq!(aim_angle_degrees(false, true, false, false, false), 0.0);
        assert_eq!(aim_angle_degrees(false, false, true, false, false), -90.0);
        // Straight down needs to be airborne.
        assert_eq!(aim_angle_degrees(false, false, false, true, false), 0.0);
        assert_eq!(aim_angle_degrees(false, false, false, true, true), 90.0);
    }

    #[test]
    fn facing_mirror() {
        assert_eq!(mirror_for_facing(0.0, false), 0.0);
        assert_eq!(mirror_for_facing(0.0, true), 180.0);
        assert_eq!(mirror_for_facing(-45.0, true), 225.0);
        assert_eq!(mirror_for_facing(45.0, true), 135.0);
    }
}
