use engine::ControlSnapshot;

// Jump cadence: held long enough to register an edge, with a gap so the
// next press is a fresh edge.
const JUMP_PERIOD_TICKS: u64 = 180;
const JUMP_HOLD_TICKS: u64 = 5;

// Re-press the trigger on a cycle; holding forever would fire too, but
// releasing exercises the warm-up reset the way a player does.
const FIRE_PERIOD_TICKS: u64 = 120;
const FIRE_HOLD_TICKS: u64 = 100;

/// Canned pilot for headless runs: hold right, fire in long bursts and hop
/// periodically. Purely a function of the tick index, so runs with the same
/// seed replay exactly.
#[derive(Debug, Default)]
pub struct ScriptedControls;

impl ScriptedControls {
    pub fn controls_for_tick(&self, tick: u64) -> ControlSnapshot {
        let mut snapshot = ControlSnapshot::empty().with_right();
        if tick % FIRE_PERIOD_TICKS < FIRE_HOLD_TICKS {
            snapshot = snapshot.with_shoot();
        }
        if tick % JUMP_PERIOD_TICKS < JUMP_HOLD_TICKS {
            snapshot = snapshot.with_jump();
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_pushes_right() {
        let script = ScriptedControls;
        for tick in 0..1000 {
            assert!(script.controls_for_tick(tick).right);
        }
    }

    #[test]
    fn jump_releases_between_presses() {
        let script = ScriptedControls;
        assert!(script.controls_for_tick(0).jump);
        assert!(!script.controls_for_tick(JUMP_HOLD_TICKS).jump);
        assert!(script.controls_for_tick(JUMP_PERIOD_TICKS).jump);
    }

    #[test]
    fn trigger_cycles() {
        let script = ScriptedControls;
        assert!(script.controls_for_tick(0).shoot);
        assert!(!script.controls_for_tick(FIRE_HOLD_TICKS).shoot);
        assert!(script.controls_for_tick(FIRE_PERIOD_TICKS).shoot);
    }
}
