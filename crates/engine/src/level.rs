use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{EntityId, EntityProto, World};
use crate::geometry::Vec2;
use crate::platform::{PlatformBody, Surface, PLATFORM_HEIGHT, PLATFORM_WIDTH};

pub const BLOCK_SIZE: f32 = 128.0;

const BOSS_WALL_WIDTH: f32 = PLATFORM_WIDTH * 3.0;
const BOSS_WALL_HEIGHT: f32 = 768.0;

/// One placement request. Levels are a flat ordered list of these, consumed
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnCommand {
    pub kind: SpawnKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnKind {
    Ledge,
    SolidBox,
    StepBox,
    Water,
    BossWall,
    Bridge,
    Runner {
        always_jump: bool,
    },
    Turret,
    PowerupBox,
    Boss,
    Player,
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no player spawn")]
    MissingPlayer,
    #[error("level has more than one player spawn")]
    DuplicatePlayer,
    #[error("level has no boss spawn")]
    MissingBoss,
    #[error("level has more than one boss spawn")]
    DuplicateBoss,
}

/// Entities of note created while populating the world.
#[derive(Debug)]
pub struct LevelHandles {
    pub player_id: EntityId,
    pub boss_id: EntityId,
    pub platform_ids: Vec<EntityId>,
    pub world_width: f32,
}

/// Populates the arena from a command list. The world's width is derived
/// from the rightmost platform edge, which bounds the camera.
pub fn build_level(world: &mut World, commands: &[SpawnCommand]) -> Result<LevelHandles, LevelError> {
    let mut player_id = None;
    let mut boss_id = None;
    let mut platform_ids = Vec::new();
    let mut world_width: f32 = 0.0;

    for command in commands {
        let position = Vec2::new(command.x, command.y);
        match command.kind {
            SpawnKind::Ledge => {
                platform_ids.push(world.spawn(EntityProto::platform(
                    position,
                    PLATFORM_WIDTH,
                    PLATFORM_HEIGHT,
                    PlatformBody::fixed(Surface::Ledge),
                )));
                world_width = world_width.max(command.x + PLATFORM_WIDTH);
            }
            SpawnKind::SolidBox | SpawnKind::Water => {
                platform_ids.push(world.spawn(EntityProto::platform(
                    position,
                    PLATFORM_WIDTH,
                    PLATFORM_HEIGHT,
                    PlatformBody::fixed(Surface::Solid),
                )));
                world_width = world_width.max(command.x + PLATFORM_WIDTH);
            }
            SpawnKind::StepBox => {
                platform_ids.push(world.spawn(EntityProto::platform(
                    position,
                    PLATFORM_WIDTH,
                    PLATFORM_HEIGHT,
                    PlatformBody::fixed(Surface::Step),
                )));
                world_width = world_width.max(command.x + PLATFORM_WIDTH);
            }
            SpawnKind::BossWall => {
                let wall_position = Vec2::new(command.x - 64.0, command.y - 45.0);
                platform_ids.push(world.spawn(EntityProto::platform(
                    wall_position,
                    BOSS_WALL_WIDTH,
                    BOSS_WALL_HEIGHT,
                    PlatformBody::fixed(Surface::Solid),
                )));
                world_width = world_width.max(wall_position.x + BOSS_WALL_WIDTH);
            }
            SpawnKind::Bridge => {
                platform_ids.push(world.spawn(EntityProto::platform(
                    position,
                    PLATFORM_WIDTH,
                    PLATFORM_HEIGHT,
                    PlatformBody::bridge(),
                )));
                world_width = world_width.max(command.x + PLATFORM_WIDTH);
            }
            SpawnKind::Runner { always_jump } => {
                world.spawn(EntityProto::runner(position, always_jump));
            }
            SpawnKind::Turret => {
                world.spawn(EntityProto::turret(position));
            }
            SpawnKind::PowerupBox => {
                world.spawn(EntityProto::powerup_box(command.x, command.y));
            }
            SpawnKind::Boss => {
                // The core sits low between its two mounted guns.
                let id = world.spawn(EntityProto::boss(Vec2::new(
                    command.x - 35.0,
                    command.y + 95.0,
                )));
                world.spawn(EntityProto::boss_gun(Vec2::new(command.x - 56.0, command.y)));
                world.spawn(EntityProto::boss_gun(Vec2::new(command.x + 34.0, command.y)));
                if boss_id.replace(id).is_some() {
                    return Err(LevelError::DuplicateBoss);
                }
            }
            SpawnKind::Player => {
                let id = world.spawn(EntityProto::player(position));
                if player_id.replace(id).is_some() {
                    return Err(LevelError::DuplicatePlayer);
                }
            }
        }
    }

    world.apply_pending();

    Ok(LevelHandles {
        player_id: player_id.ok_or(LevelError::MissingPlayer)?,
        boss_id: boss_id.ok_or(LevelError::MissingBoss)?,
        platform_ids,
        world_width,
    })
}

fn push(commands: &mut Vec<SpawnCommand>, kind: SpawnKind, x: f32, y: f32) {
    commands.push(SpawnCommand { kind, x, y });
}

fn row(commands: &mut Vec<SpawnCommand>, kind: SpawnKind, indexes: &[u32], y: f32) {
    for &i in indexes {
        commands.push(SpawnCommand {
            kind,
            x: BLOCK_SIZE * i as f32,
            y,
        });
    }
}

/// The shipped jungle stage.
pub fn stock_level() -> Vec<SpawnCommand> {
    let mut commands = Vec::new();

    row(
        &mut commands,
        SpawnKind::Ledge,
        &[24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34],
        276.0,
    );
    row(
        &mut commands,
        SpawnKind::Ledge,
        &[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 20, 21, 22, 23, 24, 25, 34, 35,
            36, 45, 46, 47, 48,
        ],
        384.0,
    );
    row(&mut commands, SpawnKind::Ledge, &[5, 6, 7, 13, 14, 31, 32, 49], 492.0);
    row(&mut commands, SpawnKind::Ledge, &[46, 47, 48], 578.0);
    row(&mut commands, SpawnKind::Ledge, &[8, 11, 28, 29, 30], 600.0);
    row(&mut commands, SpawnKind::Ledge, &[50], 624.0);

    row(
        &mut commands,
        SpawnKind::StepBox,
        &[9, 10, 25, 26, 27, 32, 33, 34],
        720.0,
    );
    row(&mut commands, SpawnKind::SolidBox, &[36, 37, 39, 40], 600.0);
    row(&mut commands, SpawnKind::SolidBox, &[42, 43], 492.0);
    row(
        &mut commands,
        SpawnKind::SolidBox,
        &[35, 45, 46, 47, 48, 49, 50, 51, 52],
        720.0,
    );

    row(
        &mut commands,
        SpawnKind::Water,
        &[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
            28, 29, 30, 31,
        ],
        768.0,
    );

    row(&mut commands, SpawnKind::BossWall, &[52], 170.0);
    row(&mut commands, SpawnKind::Bridge, &[16, 17, 18, 19], 384.0);

    let runner = SpawnKind::Runner { always_jump: false };
    for i in [9, 10, 11] {
        push(&mut commands, runner, BLOCK_SIZE * i as f32, 290.0);
    }
    push(&mut commands, runner, BLOCK_SIZE * 13.0, 290.0);
    push(&mut commands, runner, BLOCK_SIZE * 13.0 + 50.0, 290.0);
    push(&mut commands, runner, BLOCK_SIZE * 13.0 + 100.0, 290.0);
    push(&mut commands, runner, BLOCK_SIZE * 16.0, 290.0);
    for i in [20, 21, 29, 30] {
        push(&mut commands, runner, BLOCK_SIZE * i as f32, 290.0);
    }
    let jumper = SpawnKind::Runner { always_jump: true };
    push(&mut commands, jumper, BLOCK_SIZE * 40.0, 400.0);
    push(&mut commands, jumper, BLOCK_SIZE * 42.0, 400.0);

    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 10.0, 670.0);
    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 22.0 + 50.0, 500.0);
    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 29.0 + 64.0, 550.0);
    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 35.0 + 64.0, 550.0);
    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 45.0 + 64.0, 670.0);
    push(&mut commands, SpawnKind::Turret, BLOCK_SIZE * 48.0 + 64.0, 670.0);

    push(&mut commands, SpawnKind::PowerupBox, BLOCK_SIZE * 5.0, 150.0);
    push(&mut commands, SpawnKind::PowerupBox, BLOCK_SIZE * 15.0, 150.0);
    push(&mut commands, SpawnKind::PowerupBox, BLOCK_SIZE * 25.0, 150.0);

    push(&mut commands, SpawnKind::Boss, BLOCK_SIZE * 52.0, 440.0);
    push(&mut commands, SpawnKind::Player, 160.0, 100.0);

    commands
}
