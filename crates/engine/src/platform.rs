use crate::entity::TickContext;
use crate::geometry::Vec2;
use crate::view::ViewProxy;

pub const PLATFORM_WIDTH: f32 = 128.0;
pub const PLATFORM_HEIGHT: f32 = 24.0;

/// How a platform surface behaves on contact. Ledges only catch falling
/// bodies from above; solids also block from the side; steps convert a side
/// hit into an instant step-up landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ledge,
    Solid,
    Step,
}

impl Surface {
    pub fn is_solid(&self) -> bool {
        matches!(self, Surface::Solid | Surface::Step)
    }
}

// Bridge sections blow up once the target is this far past them.
const COLLAPSE_LEAD: f32 = -50.0;

#[derive(Debug, Clone)]
pub struct PlatformBody {
    pub surface: Surface,
    collapses_behind_target: bool,
}

impl PlatformBody {
    pub fn fixed(surface: Surface) -> Self {
        Self {
            surface,
            collapses_behind_target: false,
        }
    }

    pub fn bridge() -> Self {
        Self {
            surface: Surface::Ledge,
            collapses_behind_target: true,
        }
    }

    pub fn tick(
        &mut self,
        position: Vec2,
        view: &mut ViewProxy,
        active: &mut bool,
        ctx: &TickContext,
    ) {
        if !self.collapses_behind_target || !*active {
            return;
        }
        let Some(target) = &ctx.target else {
            return;
        };
        if position.x - target.position.x < COLLAPSE_LEAD {
            *active = false;
            view.start_death_animation();
        }
    }
}
