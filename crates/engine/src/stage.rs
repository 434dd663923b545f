use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::camera::CameraTracker;
use crate::entity::{
    Behavior, Entity, EntityId, EntityKind, EntityProto, TargetInfo, TickContext, World,
};
use crate::geometry::{overlaps, resolve_axis_collision, Rect, Vec2};
use crate::input::ControlSnapshot;
use crate::level::{build_level, LevelError, SpawnCommand};
use crate::platform::Surface;
use crate::weapon::{FireMode, ShotRequest, Weapon};

pub const VIEWPORT_WIDTH: f32 = 1024.0;
pub const VIEWPORT_HEIGHT: f32 = 768.0;

// Respawn drops the player this far into the view, back at the top.
const RESPAWN_SHIFT_X: f32 = 160.0;
const RESPAWN_Y: f32 = 100.0;

// The trigger goes quiet while more player shots than this are in flight.
// A permission gate, not a population bound: a volley granted at the cap
// still spawns whole, so a spread burst can briefly push the count past it.
const PLAYER_SHOT_CAP: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct StageOptions {
    pub back_scroll_allowed: bool,
    pub seed: u64,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            back_scroll_allowed: false,
            seed: 0,
        }
    }
}

struct PlatformRef {
    rect: Rect,
    surface: Surface,
    top_y: f32,
}

/// The per-tick orchestrator: applies player commands, ticks every entity,
/// resolves damage and platform contact, prunes carcasses and off-screen
/// strays, follows with the camera, runs the player's weapon and watches for
/// the win and respawn conditions.
pub struct Stage {
    world: World,
    player_id: EntityId,
    boss_id: EntityId,
    camera: CameraTracker,
    weapon: Weapon,
    rng: StdRng,
    prev_controls: ControlSnapshot,
    shot_requests: Vec<ShotRequest>,
    player_dead: bool,
    end_reached: bool,
    player_deaths: u32,
    tick_count: u64,
}

impl Stage {
    pub fn from_level(
        commands: &[SpawnCommand],
        options: StageOptions,
    ) -> Result<Self, LevelError> {
        let mut world = World::default();
        let handles = build_level(&mut world, commands)?;
        info!(
            entities = world.entity_count(),
            world_width = handles.world_width,
            "stage_built"
        );
        Ok(Self {
            world,
            player_id: handles.player_id,
            boss_id: handles.boss_id,
            camera: CameraTracker::new(
                VIEWPORT_WIDTH,
                handles.world_width,
                options.back_scroll_allowed,
            ),
            weapon: Weapon::default(),
            rng: StdRng::seed_from_u64(options.seed),
            prev_controls: ControlSnapshot::empty(),
            shot_requests: Vec::new(),
            player_dead: false,
            end_reached: false,
            player_deaths: 0,
            tick_count: 0,
        })
    }

    pub fn tick(&mut self, controls: ControlSnapshot) {
        self.apply_player_commands(controls);
        self.tick_entities();
        self.resolve_damage();
        self.resolve_platforms();
        self.prune();
        if let Some(x) = self.live_player().map(|p| p.position.x) {
            self.camera.update(x);
        }
        self.run_weapon();
        self.check_stage_status();
        self.world.apply_pending();
        self.prev_controls = controls;
        self.tick_count += 1;
    }

    pub fn is_cleared(&self) -> bool {
        self.end_reached
    }

    pub fn player_deaths(&self) -> u32 {
        self.player_deaths
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    pub fn weapon_mode(&self) -> FireMode {
        self.weapon.mode()
    }

    pub fn scroll_x(&self) -> f32 {
        self.camera.scroll_x()
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.live_player().map(|p| p.position)
    }

    fn live_player(&self) -> Option<&Entity> {
        self.world
            .find_entity(self.player_id)
            .filter(|entity| !entity.dead)
    }

    fn apply_player_commands(&mut self, controls: ControlSnapshot) {
        let jump_edge = controls.jump && !self.prev_controls.jump;
        let shoot_pressed = controls.shoot && !self.prev_controls.shoot;
        let shoot_released = !controls.shoot && self.prev_controls.shoot;

        let mut start_fire = false;
        let mut stop_fire = false;

        if let Some(entity) = self
            .world
            .find_entity_mut(self.player_id)
            .filter(|entity| !entity.dead)
        {
            let Entity { view, behavior, .. } = entity;
            if let Behavior::Player(player) = behavior {
                player.apply_intent(controls, view);
                if jump_edge {
                    // Down with no horizontal hold means drop through.
                    if controls.down && !controls.left && !controls.right {
                        player.throw_down(view);
                    } else {
                        player.jump(view);
                    }
                }
                if !player.is_falling() {
                    start_fire = shoot_pressed;
                    stop_fire = shoot_released;
                }
            }
        }

        if start_fire {
            self.weapon.start_fire();
        }
        if stop_fire {
            self.weapon.stop_fire();
        }
    }

    fn target_snapshot(&self) -> Option<TargetInfo> {
        self.world.find_entity(self.player_id).map(|entity| TargetInfo {
            position: entity.position,
            dead: entity.dead,
        })
    }

    /// The player moves first so everything else reads its post-move
    /// position this tick.
    fn tick_entities(&mut self) {
        let mut pickups = Vec::new();
        let mut shots = std::mem::take(&mut self.shot_requests);

        if let Some(entity) = self.world.find_entity_mut(self.player_id) {
            let mut ctx = TickContext {
                target: None,
                shots: &mut shots,
                pickups: &mut pickups,
                rng: &mut self.rng,
            };
            entity.tick(&mut ctx);
        }

        let target = self.target_snapshot();
        for id in self.world.ids() {
            if id == self.player_id {
                continue;
            }
            let Some(entity) = self.world.find_entity_mut(id) else {
                continue;
            };
            let mut ctx = TickContext {
                target,
                shots: &mut shots,
                pickups: &mut pickups,
                rng: &mut self.rng,
            };
            entity.tick(&mut ctx);
        }

        for request in shots.drain(..) {
            self.world
                .spawn(EntityProto::from_shot(request, &mut self.rng));
        }
        self.shot_requests = shots;
        for position in pickups {
            self.world.spawn(EntityProto::spread_gun(position));
        }
    }

    fn damager_matches(victim: EntityKind, damager: EntityKind) -> bool {
        match victim {
            EntityKind::Enemy | EntityKind::PowerupBox => damager == EntityKind::PlayerShot,
            EntityKind::Player => {
                damager == EntityKind::EnemyShot || damager == EntityKind::Enemy
            }
            _ => false,
        }
    }

    /// First matching damager wins; overlapping a stack of hazards costs a
    /// single hit per tick.
    fn resolve_damage(&mut self) {
        for id in self.world.ids() {
            let Some(victim) = self.world.find_entity(id) else {
                continue;
            };
            if victim.dead || victim.view.is_dying() {
                continue;
            }
            let victim_kind = victim.kind;
            if !matches!(
                victim_kind,
                EntityKind::Player | EntityKind::Enemy | EntityKind::PowerupBox
            ) {
                continue;
            }
            let victim_hit = victim.hit_box();

            let hit = self.world.entities().iter().find_map(|damager| {
                (!damager.dead
                    && !damager.view.is_dying()
                    && damager.id != id
                    && Self::damager_matches(victim_kind, damager.kind)
                    && overlaps(damager.hit_box(), victim_hit))
                .then_some((damager.id, damager.kind))
            });

            if let Some((damager_id, damager_kind)) = hit {
                let drop = self
                    .world
                    .find_entity_mut(id)
                    .and_then(|entity| entity.take_damage());
                if let Some(position) = drop {
                    self.world.spawn(EntityProto::spread_gun(position));
                }
                // Persistent enemy bodies survive the contact; projectiles
                // are spent.
                if damager_kind != EntityKind::Enemy {
                    if let Some(damager) = self.world.find_entity_mut(damager_id) {
                        damager.mark_dead();
                    }
                }
            }

            if victim_kind == EntityKind::Player {
                self.collect_pickups(id);
            }
        }
    }

    fn collect_pickups(&mut self, player_id: EntityId) {
        let Some(player) = self.world.find_entity(player_id) else {
            return;
        };
        if player.dead || player.view.is_dying() {
            return;
        }
        let player_hit = player.hit_box();
        let pickup = self
            .world
            .entities()
            .iter()
            .find(|entity| {
                entity.kind == EntityKind::SpreadGun
                    && !entity.dead
                    && overlaps(entity.hit_box(), player_hit)
            })
            .map(|entity| entity.id);
        if let Some(pickup_id) = pickup {
            if let Some(entity) = self.world.find_entity_mut(pickup_id) {
                entity.take_damage();
            }
            self.weapon.set_mode(FireMode::Spread);
            info!("spread_gun_collected");
        }
    }

    fn platform_snapshot(&self) -> Vec<PlatformRef> {
        self.world
            .entities()
            .iter()
            .filter(|entity| entity.kind == EntityKind::Platform && !entity.dead && entity.active)
            .filter_map(|entity| match &entity.behavior {
                Behavior::Platform(body) => Some(PlatformRef {
                    rect: entity.collision_box(),
                    surface: body.surface,
                    top_y: entity.position.y,
                }),
                _ => None,
            })
            .collect()
    }

    fn resolve_platforms(&mut self) {
        let platforms = self.platform_snapshot();
        let scroll_x = self.camera.scroll_x();

        for id in self.world.ids() {
            let Some(entity) = self.world.find_entity(id) else {
                continue;
            };
            if entity.dead || !entity.gravitable {
                continue;
            }
            let skips_ledges = entity.skips_ledges();
            let is_player = entity.kind == EntityKind::Player;
            // Arcing shells pass through walls; landings still detonate them.
            let ignores_walls = matches!(entity.behavior, Behavior::LobShot(_));

            for platform in &platforms {
                if skips_ledges && !platform.surface.is_solid() {
                    continue;
                }
                let Some(entity) = self.world.find_entity_mut(id) else {
                    break;
                };
                let result = resolve_axis_collision(
                    entity.collision_box(),
                    platform.rect,
                    entity.prev_position,
                );
                if result.vertical {
                    entity.position.y = entity.prev_position.y;
                    entity.land(platform.top_y);
                }
                if result.horizontal && platform.surface.is_solid() && !ignores_walls {
                    if platform.surface == Surface::Step {
                        entity.land(platform.top_y);
                    } else {
                        entity.position.x = entity.prev_position.x;
                    }
                }
            }

            if is_player {
                if let Some(entity) = self.world.find_entity_mut(id) {
                    // The scrolled-past edge of the world is a wall.
                    if entity.position.x < scroll_x {
                        entity.position.x = entity.prev_position.x;
                    }
                }
            }
        }
    }

    fn is_screen_out(&self, entity: &Entity, scroll_x: f32) -> bool {
        match entity.kind {
            EntityKind::PlayerShot | EntityKind::EnemyShot => {
                entity.position.x > scroll_x + VIEWPORT_WIDTH
                    || entity.position.x < scroll_x
                    || entity.position.y > VIEWPORT_HEIGHT
                    || entity.position.y < 0.0
            }
            EntityKind::Player | EntityKind::Enemy => {
                entity.position.x < scroll_x || entity.position.y > VIEWPORT_HEIGHT
            }
            _ => false,
        }
    }

    fn prune(&mut self) {
        let scroll_x = self.camera.scroll_x();
        let removals: Vec<EntityId> = self
            .world
            .entities()
            .iter()
            .filter(|entity| entity.dead || self.is_screen_out(entity, scroll_x))
            .map(|entity| entity.id)
            .collect();

        for id in removals {
            let Some(entity) = self.world.find_entity_mut(id) else {
                continue;
            };
            let lost_player = entity.kind == EntityKind::Player && entity.dead;
            entity.view.detach();
            self.world.despawn(id);
            if lost_player {
                self.player_dead = true;
                self.weapon.stop_fire();
                info!(tick = self.tick_count, "player_lost");
            }
        }
    }

    fn run_weapon(&mut self) {
        let Some(player) = self.live_player() else {
            return;
        };
        if player.view.is_dying() {
            return;
        }
        if self.world.count_kind(EntityKind::PlayerShot) > PLAYER_SHOT_CAP {
            return;
        }
        let (muzzle, angle) = match &player.behavior {
            Behavior::Player(state) => (
                player.view.muzzle_point(player.position),
                state.aim_degrees(&player.view),
            ),
            _ => return,
        };

        let mut requests = std::mem::take(&mut self.shot_requests);
        self.weapon.tick(muzzle, angle, &mut requests);
        for request in requests.drain(..) {
            self.world
                .spawn(EntityProto::from_shot(request, &mut self.rng));
        }
        self.shot_requests = requests;
    }

    /// Win latch and respawn. Both are skipped forever once the stage is
    /// cleared; destroying the boss core kills everything else outright.
    fn check_stage_status(&mut self) {
        if self.end_reached {
            return;
        }

        let boss_down = self
            .world
            .find_entity(self.boss_id)
            .map_or(true, |boss| !boss.active);
        if boss_down {
            let boss_id = self.boss_id;
            for entity in self.world.entities_mut() {
                if entity.kind == EntityKind::Enemy && entity.id != boss_id && !entity.dead {
                    entity.mark_dead();
                }
            }
            self.end_reached = true;
            info!(tick = self.tick_count, "stage_clear");
            return;
        }

        if self.player_dead && self.world.find_entity(self.player_id).is_none() {
            let position = Vec2::new(self.camera.scroll_x() + RESPAWN_SHIFT_X, RESPAWN_Y);
            self.player_id = self.world.spawn(EntityProto::player(position));
            self.weapon = Weapon::default();
            self.player_dead = false;
            self.player_deaths += 1;
            info!(
                x = position.x,
                deaths = self.player_deaths,
                "player_respawned"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{stock_level, SpawnKind};
    use crate::view::ViewKind;
    use crate::weapon::ShotKind;

    fn stage_with(commands: &[SpawnCommand]) -> Stage {
        Stage::from_level(commands, StageOptions::default()).unwrap()
    }

    /// A short strip of ground, the player, and a far-away boss.
    fn test_commands() -> Vec<SpawnCommand> {
        let mut commands: Vec<SpawnCommand> = (0..8)
            .map(|i| SpawnCommand {
                kind: SpawnKind::Ledge,
                x: 128.0 * i as f32,
                y: 384.0,
            })
            .collect();
        commands.push(SpawnCommand {
            kind: SpawnKind::Boss,
            x: 128.0 * 52.0,
            y: 440.0,
        });
        commands.push(SpawnCommand {
            kind: SpawnKind::Player,
            x: 160.0,
            y: 100.0,
        });
        commands
    }

    fn settle(stage: &mut Stage, ticks: u32) {
        for _ in 0..ticks {
            stage.tick(ControlSnapshot::empty());
        }
    }

    #[test]
    fn player_falls_to_the_ground_and_lands() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        let position = stage.player_position().unwrap();
        assert_eq!(position.y, 294.0);
        assert_eq!(position.x, 160.0);
    }

    #[test]
    fn held_trigger_fires_on_the_warm_up_cadence() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        for _ in 0..25 {
            stage.tick(ControlSnapshot::empty().with_shoot());
        }
        assert_eq!(stage.world.count_kind(EntityKind::PlayerShot), 2);
    }

    #[test]
    fn trigger_release_resets_the_warm_up() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        for _ in 0..9 {
            stage.tick(ControlSnapshot::empty().with_shoot());
        }
        stage.tick(ControlSnapshot::empty());
        for _ in 0..9 {
            stage.tick(ControlSnapshot::empty().with_shoot());
        }
        assert_eq!(stage.world.count_kind(EntityKind::PlayerShot), 0);
    }

    #[test]
    fn shot_cap_suppresses_the_trigger() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        for _ in 0..11 {
            let request = ShotRequest {
                position: Vec2::new(400.0, 10.0),
                angle_degrees: 0.0,
                kind: ShotKind::PlayerDefault,
            };
            stage
                .world
                .spawn(EntityProto::from_shot(request, &mut stage.rng));
        }
        stage.world.apply_pending();
        for _ in 0..25 {
            stage.tick(ControlSnapshot::empty().with_shoot());
        }
        // The seeded shots drift right but stay on screen; no new ones join.
        assert_eq!(stage.world.count_kind(EntityKind::PlayerShot), 11);
    }

    #[test]
    fn drop_through_a_ledge() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        stage.tick(
            ControlSnapshot::empty().with_down().with_jump(),
        );
        settle(&mut stage, 10);
        let position = stage.player_position().unwrap();
        assert!(position.y > 294.0);
    }

    #[test]
    fn jump_rises_then_relands() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        stage.tick(ControlSnapshot::empty().with_jump());
        settle(&mut stage, 10);
        assert!(stage.player_position().unwrap().y < 294.0);
        settle(&mut stage, 120);
        assert_eq!(stage.player_position().unwrap().y, 294.0);
    }

    #[test]
    fn default_gun_kills_an_approaching_runner() {
        let mut commands = test_commands();
        commands.push(SpawnCommand {
            kind: SpawnKind::Runner { always_jump: false },
            x: 500.0,
            y: 290.0,
        });
        let mut stage = stage_with(&commands);
        settle(&mut stage, 40);
        assert_eq!(stage.world.count_kind(EntityKind::Enemy), 4);

        for _ in 0..200 {
            stage.tick(ControlSnapshot::empty().with_shoot());
        }
        // Runner shot down and reaped; boss trio untouched.
        assert_eq!(stage.world.count_kind(EntityKind::Enemy), 3);
        assert_eq!(stage.player_deaths(), 0);
        assert!(stage.player_position().is_some());
    }

    #[test]
    fn touching_an_enemy_kills_and_respawns_the_player() {
        let mut commands = test_commands();
        commands.push(SpawnCommand {
            kind: SpawnKind::Runner { always_jump: false },
            x: 500.0,
            y: 290.0,
        });
        let mut stage = stage_with(&commands);

        let mut respawned = false;
        for _ in 0..600 {
            stage.tick(ControlSnapshot::empty());
            if stage.player_deaths() == 1 {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        let position = stage.player_position().unwrap();
        assert_eq!(position, Vec2::new(stage.scroll_x() + 160.0, 100.0));
        assert_eq!(stage.weapon_mode(), FireMode::Single);
    }

    #[test]
    fn one_hit_per_tick_even_under_stacked_hazards() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        let player_position = stage.player_position().unwrap();
        for _ in 0..2 {
            let request = ShotRequest {
                position: Vec2::new(player_position.x + 5.0, player_position.y + 40.0),
                angle_degrees: 0.0,
                kind: ShotKind::TurretShot,
            };
            // Zero-speed hazards that sit on the player.
            let mut proto = EntityProto::from_shot(request, &mut stage.rng);
            proto.behavior = Behavior::Shot(crate::actors::bullet::Shot::new(0.0, 0.0));
            stage.world.spawn(proto);
        }
        stage.world.apply_pending();

        stage.tick(ControlSnapshot::empty());
        // One hazard was spent on the hit, the other is still live.
        assert_eq!(stage.world.count_kind(EntityKind::EnemyShot), 1);
        let player = stage.world.find_entity(stage.player_id).unwrap();
        assert!(player.view.is_dying());
    }

    #[test]
    fn boss_defeat_clears_the_stage_and_kills_the_rest() {
        let mut commands = test_commands();
        commands.push(SpawnCommand {
            kind: SpawnKind::Runner { always_jump: false },
            x: 128.0 * 45.0,
            y: 290.0,
        });
        let mut stage = stage_with(&commands);
        settle(&mut stage, 10);

        let boss_id = stage.boss_id;
        for _ in 0..5 {
            stage
                .world
                .find_entity_mut(boss_id)
                .unwrap()
                .take_damage();
        }
        stage.tick(ControlSnapshot::empty());
        assert!(stage.is_cleared());

        // The cascade marked the guns and the far runner; one more tick
        // reaps them while the boss core plays out its burst.
        stage.tick(ControlSnapshot::empty());
        assert_eq!(stage.world.count_kind(EntityKind::Enemy), 1);
        let boss = stage.world.find_entity(boss_id).unwrap();
        assert_eq!(boss.view.kind, ViewKind::Boss);
        assert!(!boss.active);
    }

    #[test]
    fn no_respawn_after_the_stage_is_cleared() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);

        for _ in 0..5 {
            stage
                .world
                .find_entity_mut(stage.boss_id)
                .unwrap()
                .take_damage();
        }
        stage.tick(ControlSnapshot::empty());
        assert!(stage.is_cleared());

        let player_id = stage.player_id;
        stage.world.find_entity_mut(player_id).unwrap().take_damage();
        settle(&mut stage, 100);
        assert!(stage.player_position().is_none());
        assert_eq!(stage.player_deaths(), 0);
    }

    #[test]
    fn spread_pickup_swaps_the_weapon() {
        let mut stage = stage_with(&test_commands());
        settle(&mut stage, 300);
        let player_position = stage.player_position().unwrap();
        stage.world.spawn(EntityProto::spread_gun(Vec2::new(
            player_position.x,
            player_position.y + 40.0,
        )));
        stage.world.apply_pending();

        stage.tick(ControlSnapshot::empty());
        assert_eq!(stage.weapon_mode(), FireMode::Spread);
        assert_eq!(stage.world.count_kind(EntityKind::SpreadGun), 0);
    }

    #[test]
    fn stock_level_smoke_run() {
        let mut stage = Stage::from_level(
            &stock_level(),
            StageOptions {
                back_scroll_allowed: false,
                seed: 7,
            },
        )
        .unwrap();
        // Run right and fire for a while; the sim must stay coherent.
        for _ in 0..2000 {
            stage.tick(ControlSnapshot::empty().with_right().with_shoot());
        }
        assert!(stage.tick_count() == 2000);
        assert!(stage.entity_count() > 0);
        let scroll = stage.scroll_x();
        assert!(scroll >= 0.0);
        if let Some(position) = stage.player_position() {
            assert!(position.x >= scroll);
        }
    }
}
