use rand::{Rng, RngCore};
use tracing::debug;

use crate::actors::boss::{Boss, BossGun};
use crate::actors::bullet::{LobShot, Shot};
use crate::actors::player::Player;
use crate::actors::powerup::{PowerupBox, SpreadGunPickup};
use crate::actors::runner::Runner;
use crate::actors::turret::Turret;
use crate::geometry::{Rect, Vec2};
use crate::platform::PlatformBody;
use crate::view::{ViewKind, ViewProxy, Visual};
use crate::weapon::{ShotKind, ShotRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Category used by the damage pair rules and the screen-out policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerShot,
    EnemyShot,
    Platform,
    PowerupBox,
    SpreadGun,
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Player(Player),
    Runner(Runner),
    Turret(Turret),
    Boss(Boss),
    BossGun(BossGun),
    PowerupBox(PowerupBox),
    SpreadGun(SpreadGunPickup),
    Shot(Shot),
    LobShot(LobShot),
    Platform(PlatformBody),
}

/// Read-only facts about the player, snapshotted before the tick pass so
/// enemies all see the same target.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub position: Vec2,
    pub dead: bool,
}

/// Per-tick services handed to entity behaviors: the target snapshot, queues
/// for requested projectile and pickup spawns, and the stage RNG.
pub struct TickContext<'a> {
    pub target: Option<TargetInfo>,
    pub shots: &'a mut Vec<ShotRequest>,
    pub pickups: &'a mut Vec<Vec2>,
    pub rng: &'a mut dyn RngCore,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub prev_position: Vec2,
    pub dead: bool,
    pub active: bool,
    pub gravitable: bool,
    pub view: ViewProxy,
    pub behavior: Behavior,
}

impl Entity {
    pub fn collision_box(&self) -> Rect {
        self.view.collision_box(self.position)
    }

    pub fn hit_box(&self) -> Rect {
        self.view.hit_box(self.position)
    }

    /// One-way; reaped by the orchestrator at end of tick.
    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Ascending bodies pass through ledges; everything else interacts.
    pub fn skips_ledges(&self) -> bool {
        match &self.behavior {
            Behavior::Player(player) => player.body.is_ascending(),
            Behavior::Runner(runner) => runner.body.is_ascending(),
            _ => false,
        }
    }

    pub fn tick(&mut self, ctx: &mut TickContext) {
        if self.dead {
            return;
        }
        if self.view.is_dying() {
            if self.view.tick_death_animation() {
                self.dead = true;
            }
            return;
        }

        self.prev_position = self.position;

        let Entity {
            position,
            view,
            behavior,
            active,
            ..
        } = self;
        match behavior {
            Behavior::Player(player) => player.tick(position, view),
            Behavior::Runner(runner) => runner.tick(position, view, active, ctx),
            Behavior::Turret(turret) => turret.tick(*position, view, active, ctx),
            Behavior::Boss(_) => {}
            Behavior::BossGun(gun) => gun.tick(*position, view, active, ctx),
            Behavior::PowerupBox(powerup) => powerup.tick(position, view, active, ctx),
            Behavior::SpreadGun(pickup) => pickup.tick(position),
            Behavior::Shot(shot) => shot.tick(position),
            Behavior::LobShot(lob) => lob.tick(position),
            Behavior::Platform(platform) => platform.tick(*position, view, active, ctx),
        }
    }

    /// Category-specific damage reaction. Returns a drop position when the
    /// hit popped a weapon box open.
    pub fn take_damage(&mut self) -> Option<Vec2> {
        let Entity {
            position,
            view,
            behavior,
            active,
            dead,
            ..
        } = self;
        match behavior {
            Behavior::Player(player) => {
                player.take_damage(view);
                None
            }
            Behavior::Runner(runner) => {
                runner.take_damage(view);
                None
            }
            Behavior::Turret(turret) => {
                turret.take_damage(view);
                None
            }
            Behavior::Boss(boss) => {
                boss.take_damage(view, active);
                None
            }
            Behavior::BossGun(gun) => {
                gun.take_damage(view);
                None
            }
            Behavior::PowerupBox(powerup) => powerup.take_damage(*position, view, *active),
            Behavior::SpreadGun(_) => {
                *dead = true;
                None
            }
            Behavior::Shot(_) | Behavior::LobShot(_) | Behavior::Platform(_) => None,
        }
    }

    /// Vertical-collision resolution outcome: settle on the surface.
    pub fn land(&mut self, surface_y: f32) {
        let Entity {
            position,
            view,
            behavior,
            dead,
            ..
        } = self;
        match behavior {
            Behavior::Player(player) => player.land(position, surface_y, view),
            Behavior::Runner(runner) => runner.land(position, surface_y, view),
            Behavior::SpreadGun(pickup) => pickup.land(position, surface_y, view),
            // Shells detonate on touchdown.
            Behavior::LobShot(_) => *dead = true,
            _ => {}
        }
    }
}

/// Blueprint handed to `World::spawn`; the arena assigns the id.
#[derive(Debug, Clone)]
pub struct EntityProto {
    pub kind: EntityKind,
    pub position: Vec2,
    pub active: bool,
    pub gravitable: bool,
    pub view: ViewProxy,
    pub behavior: Behavior,
}

impl EntityProto {
    pub fn player(position: Vec2) -> Self {
        let mut view = ViewProxy::new(ViewKind::Player);
        view.show(Visual::Jump);
        Self {
            kind: EntityKind::Player,
            position,
            active: true,
            gravitable: true,
            view,
            behavior: Behavior::Player(Player::new()),
        }
    }

    pub fn runner(position: Vec2, always_jump: bool) -> Self {
        let mut view = ViewProxy::new(ViewKind::Runner);
        view.show(Visual::Jump);
        Self {
            kind: EntityKind::Enemy,
            position,
            active: false,
            gravitable: true,
            view,
            behavior: Behavior::Runner(Runner::new(always_jump)),
        }
    }

    pub fn turret(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Enemy,
            position,
            active: false,
            gravitable: false,
            view: ViewProxy::new(ViewKind::Turret),
            behavior: Behavior::Turret(Turret::new()),
        }
    }

    pub fn boss(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Enemy,
            position,
            active: true,
            gravitable: false,
            view: ViewProxy::new(ViewKind::Boss),
            behavior: Behavior::Boss(Boss::new()),
        }
    }

    pub fn boss_gun(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Enemy,
            position,
            active: false,
            gravitable: false,
            view: ViewProxy::new(ViewKind::BossGun),
            behavior: Behavior::BossGun(BossGun::new()),
        }
    }

    /// The box enters at the world's top edge and swoops to its flight line
    /// once active.
    pub fn powerup_box(x: f32, fly_y: f32) -> Self {
        let mut view = ViewProxy::new(ViewKind::PowerupBox);
        view.set_visible(false);
        Self {
            kind: EntityKind::PowerupBox,
            position: Vec2::new(x, 0.0),
            active: false,
            gravitable: false,
            view,
            behavior: Behavior::PowerupBox(PowerupBox::new(fly_y)),
        }
    }

    pub fn spread_gun(position: Vec2) -> Self {
        Self {
            kind: EntityKind::SpreadGun,
            position,
            active: true,
            gravitable: true,
            view: ViewProxy::new(ViewKind::SpreadGun),
            behavior: Behavior::SpreadGun(SpreadGunPickup::new()),
        }
    }

    pub fn platform(position: Vec2, width: f32, height: f32, body: PlatformBody) -> Self {
        Self {
            kind: EntityKind::Platform,
            position,
            active: true,
            gravitable: false,
            view: ViewProxy::platform(width, height),
            behavior: Behavior::Platform(body),
        }
    }

    pub fn from_shot(request: ShotRequest, rng: &mut dyn RngCore) -> Self {
        match request.kind {
            ShotKind::PlayerDefault => Self::straight_shot(
                request.position,
                request.angle_degrees,
                10.0,
                EntityKind::PlayerShot,
                ViewKind::Shot,
            ),
            ShotKind::PlayerSpread => Self::straight_shot(
                request.position,
                request.angle_degrees,
                7.0,
                EntityKind::PlayerShot,
                ViewKind::SpreadShot,
            ),
            ShotKind::TurretShot => Self::straight_shot(
                request.position,
                request.angle_degrees,
                10.0,
                EntityKind::EnemyShot,
                ViewKind::Shot,
            ),
            ShotKind::BossLob => {
                let speed_x = rng.gen::<f32>() * -6.0 - 2.0;
                Self {
                    kind: EntityKind::EnemyShot,
                    position: request.position,
                    active: true,
                    gravitable: true,
                    view: ViewProxy::new(ViewKind::LobShot),
                    behavior: Behavior::LobShot(LobShot::new(speed_x)),
                }
            }
        }
    }

    fn straight_shot(
        position: Vec2,
        angle_degrees: f32,
        speed: f32,
        kind: EntityKind,
        view_kind: ViewKind,
    ) -> Self {
        Self {
            kind,
            position,
            active: true,
            gravitable: false,
            view: ViewProxy::new(view_kind),
            behavior: Behavior::Shot(Shot::new(angle_degrees, speed)),
        }
    }
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Entity arena with deferred lifecycle: spawns and despawns queue up during
/// a tick and take effect at the next `apply_pending`, so iteration never
/// observes a half-updated list.
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl World {
    pub fn spawn(&mut self, proto: EntityProto) -> EntityId {
        let id = self.allocator.allocate();
        debug!(id = id.0, kind = ?proto.kind, "entity_spawn_queued");
        self.pending_spawns.push(Entity {
            id,
            kind: proto.kind,
            position: proto.position,
            prev_position: proto.position,
            dead: false,
            active: proto.active,
            gravitable: proto.gravitable,
            view: proto.view,
            behavior: proto.behavior,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        debug!(id = id.0, "entity_despawn_queued");
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            let not_despawned = |id: EntityId| {
                pending.binary_search_by_key(&id.0, |id| id.0).is_err()
            };
            self.entities.retain(|entity| not_despawned(entity.id));
            // A despawn may target an entity that never left the spawn queue.
            self.pending_spawns.retain(|entity| not_despawned(entity.id));
            self.pending_despawns.clear();
        }

        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|entity| entity.id).collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|entity| entity.kind == kind)
            .count()
    }
}
