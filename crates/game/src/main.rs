use engine::{stock_level, Stage, StageOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod script;

use script::ScriptedControls;

fn main() {
    init_tracing();
    info!("=== Side-Scroller Sim Startup ===");

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "config_load_failed");
            std::process::exit(1);
        }
    };
    info!(
        seed = config.seed,
        max_ticks = config.max_ticks,
        back_scroll_allowed = config.back_scroll_allowed,
        "run_config"
    );

    let mut stage = match Stage::from_level(
        &stock_level(),
        StageOptions {
            back_scroll_allowed: config.back_scroll_allowed,
            seed: config.seed,
        },
    ) {
        Ok(stage) => stage,
        Err(err) => {
            error!(error = %err, "stage_build_failed");
            std::process::exit(1);
        }
    };

    let script = ScriptedControls;
    while stage.tick_count() < config.max_ticks && !stage.is_cleared() {
        stage.tick(script.controls_for_tick(stage.tick_count()));

        if config.log_every_ticks > 0 && stage.tick_count() % config.log_every_ticks == 0 {
            info!(
                tick = stage.tick_count(),
                scroll_x = stage.scroll_x(),
                entities = stage.entity_count(),
                deaths = stage.player_deaths(),
                "progress"
            );
        }
    }

    info!(
        ticks = stage.tick_count(),
        cleared = stage.is_cleared(),
        deaths = stage.player_deaths(),
        scroll_x = stage.scroll_x(),
        "run_finished"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
