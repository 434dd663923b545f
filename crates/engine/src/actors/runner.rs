use rand::Rng;

use crate::entity::TickContext;
use crate::geometry::Vec2;
use crate::motion::{Body, BodyParams};
use crate::view::{ViewProxy, Visual};

// Runners wake once they are within half a screen plus two body widths of
// the player, so they start moving just before scrolling in.
const ACTIVATION_LEAD: f32 = 512.0;

/// Left-marching infantry. Sleeps until the player approaches, then runs at
/// player speed and either jumps off ledges or drops, decided per edge by a
/// weighted coin flip.
#[derive(Debug, Clone)]
pub struct Runner {
    pub body: Body,
    jump_chance: f64,
}

impl Runner {
    pub fn new(always_jump: bool) -> Self {
        let mut body = Body::new(BodyParams::default());
        body.set_direction(true, false);
        Self {
            body,
            jump_chance: if always_jump { 1.0 } else { 0.4 },
        }
    }

    pub fn tick(
        &mut self,
        position: &mut Vec2,
        view: &mut ViewProxy,
        active: &mut bool,
        ctx: &mut TickContext,
    ) {
        if !*active {
            let Some(target) = &ctx.target else {
                return;
            };
            let width = view.collision_box(*position).width;
            if position.x - target.position.x < ACTIVATION_LEAD + width * 2.0 {
                *active = true;
            }
            return;
        }

        self.body.move_horizontal(position);
        if self.body.entering_descent() {
            if ctx.rng.gen::<f64>() > self.jump_chance {
                view.show(Visual::Fall);
            } else if self.body.jump() {
                view.show(Visual::Jump);
            }
        }
        self.body.apply_gravity(position);
    }

    pub fn land(&mut self, position: &mut Vec2, surface_y: f32, view: &mut ViewProxy) {
        let box_height = view.collision_box(*position).height;
        let was_airborne = self.body.land(position, surface_y, box_height);
        if was_airborne {
            view.flip(self.body.direction());
            view.show(Visual::Run);
        }
    }

    pub fn take_damage(&mut self, view: &mut ViewProxy) {
        self.body.halt();
        view.start_death_animation();
    }
}
