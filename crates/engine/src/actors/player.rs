use crate::geometry::Vec2;
use crate::input::ControlSnapshot;
use crate::motion::{Body, BodyParams};
use crate::view::{ViewProxy, Visual};
use crate::weapon;

/// The controlled character: run/jump/prone movement, aim resolution and
/// pose selection. Firing itself lives in the stage-owned weapon; the player
/// only supplies muzzle and angle through its view.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    aim_degrees: f32,
    lay: bool,
    stay_up: bool,
    falling: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(BodyParams::default()),
            aim_degrees: 0.0,
            lay: false,
            stay_up: false,
            falling: false,
        }
    }

    /// Falling (walked off an edge or dropped through a ledge) locks the
    /// trigger until the next landing.
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn aim_degrees(&self, view: &ViewProxy) -> f32 {
        weapon::mirror_for_facing(self.aim_degrees, view.is_flipped())
    }

    /// Applies this tick's held directions: facing, aim and, when grounded,
    /// the matching pose.
    pub fn apply_intent(&mut self, controls: ControlSnapshot, view: &mut ViewProxy) {
        let direction = self.body.set_direction(controls.left, controls.right);
        view.flip(direction);
        self.lay = controls.down;
        self.stay_up = controls.up;

        self.aim_degrees = weapon::aim_angle_degrees(
            controls.left,
            controls.right,
            controls.up,
            controls.down,
            self.body.is_ascending(),
        );

        if self.body.is_airborne() {
            return;
        }
        self.select_grounded_pose(
            controls.left,
            controls.right,
            controls.up,
            controls.down,
            controls.shoot,
            view,
        );
    }

    pub fn jump(&mut self, view: &mut ViewProxy) {
        if self.body.jump() {
            view.show(Visual::Jump);
        }
    }

    /// Drop through the ledge underfoot.
    pub fn throw_down(&mut self, view: &mut ViewProxy) {
        self.body.throw_down();
        view.show(Visual::Fall);
        self.falling = true;
    }

    pub fn tick(&mut self, position: &mut Vec2, view: &mut ViewProxy) {
        self.body.move_horizontal(position);
        if self.body.entering_descent() {
            view.show(Visual::Fall);
            self.falling = true;
        }
        self.body.apply_gravity(position);
    }

    pub fn land(&mut self, position: &mut Vec2, surface_y: f32, view: &mut ViewProxy) {
        let box_height = view.collision_box(*position).height;
        let was_airborne = self.body.land(position, surface_y, box_height);
        if was_airborne {
            let direction = self.body.direction();
            self.select_grounded_pose(
                direction == -1,
                direction == 1,
                self.stay_up,
                self.lay,
                false,
                view,
            );
            self.falling = false;
        }
    }

    pub fn take_damage(&mut self, view: &mut ViewProxy) {
        self.body.halt();
        view.start_death_animation();
    }

    fn select_grounded_pose(
        &self,
        left: bool,
        right: bool,
        up: bool,
        down: bool,
        shoot: bool,
        view: &mut ViewProxy,
    ) {
        let visual = if left || right {
            if up {
                Visual::RunUp
            } else if down {
                Visual::RunDown
            } else if shoot {
                Visual::RunShoot
            } else {
                Visual::Run
            }
        } else if up {
            Visual::StayUp
        } else if down {
            Visual::Lay
        } else {
            Visual::Stay
        };
        view.show(visual);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
