//! Side-scroller simulation core: a fixed-tick world of platforms, a
//! run-and-gun player, enemies and projectiles, driven by per-tick control
//! snapshots. The crate owns no rendering or input devices; an embedder
//! feeds `Stage::tick` and reads entity positions and view proxies back.

pub mod actors;
pub mod camera;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod level;
pub mod motion;
pub mod platform;
pub mod stage;
pub mod view;
pub mod weapon;

pub use camera::CameraTracker;
pub use entity::{
    Behavior, Entity, EntityId, EntityKind, EntityProto, TargetInfo, TickContext, World,
};
pub use geometry::{overlaps, resolve_axis_collision, AxisCollision, Rect, Vec2};
pub use input::ControlSnapshot;
pub use level::{
    build_level, stock_level, LevelError, LevelHandles, SpawnCommand, SpawnKind, BLOCK_SIZE,
};
pub use motion::{Body, BodyParams, GRAVITY_FORCE, JUMP_IMPULSE, RUN_SPEED};
pub use platform::{PlatformBody, Surface, PLATFORM_HEIGHT, PLATFORM_WIDTH};
pub use stage::{Stage, StageOptions, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
pub use view::{HitShape, ViewKind, ViewProxy, Visual, DEATH_ANIMATION_TICKS};
pub use weapon::{
    aim_angle_degrees, mirror_for_facing, FireMode, ShotKind, ShotRequest, Weapon,
};
