//! Dungeon battle client binary.
//!
//! Composition root that assembles:
//! 1. Content (engine config and dungeon definitions) via `ContentFactory`
//! 2. The battle simulator for the chosen dungeon
//! 3. Playback: real-time through `BattleDriver`, or headless when
//!    `TICK_PERIOD_MS=0`
//!
//! The battle log streams to stdout as it happens, followed by the final
//! report. Diagnostics go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Watch the default dungeon at 4x speed
//! PLAYBACK_SPEED=4 cargo run -p dungeon-client
//!
//! # Resolve a seeded run instantly and emit JSON lines
//! TICK_PERIOD_MS=0 BATTLE_SEED=42 REPORT_JSON=true DUNGEON_NAME=ember_halls cargo run -p dungeon-client
//! ```

mod config;
mod logging;
mod render;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;

use battle_content::ContentFactory;
use battle_core::{BattleEvent, BattleReport, BattleSimulator};
use battle_runtime::{BattleDriver, PlaybackConfig};

use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    let sim = build_simulator(&config)?;
    let report = match config.tick_period {
        Some(tick_period) => play(sim, &config, tick_period).await?,
        None => resolve_headless(sim, config.report_json)?,
    };

    println!("{}", render::report_line(&report, config.report_json)?);
    Ok(())
}

fn build_simulator(config: &ClientConfig) -> Result<BattleSimulator> {
    let factory = ContentFactory::new(config.data_dir.clone());
    let mut battle_config = factory.load_config()?;

    let name = match &config.dungeon {
        Some(name) => name.clone(),
        None => factory
            .list_dungeons()?
            .into_iter()
            .next()
            .with_context(|| format!("no dungeons found in {}", factory.data_dir().display()))?,
    };
    let dungeon = factory.load_dungeon(&name)?;
    dungeon.apply_to(&mut battle_config);

    tracing::info!(
        dungeon = %dungeon.name,
        seed = config.seed,
        stages = battle_config.total_stages,
        "Starting dungeon run"
    );

    BattleSimulator::new(battle_config, &dungeon.allies, &dungeon.enemies, config.seed)
        .with_context(|| format!("invalid roster in dungeon '{}'", dungeon.name))
}

fn resolve_headless(mut sim: BattleSimulator, json: bool) -> Result<BattleReport> {
    let report = sim.run_to_completion()?;
    for event in sim.log().iter() {
        println!("{}", render::event_line(event, json)?);
    }
    Ok(report)
}

async fn play(
    sim: BattleSimulator,
    config: &ClientConfig,
    tick_period: std::time::Duration,
) -> Result<BattleReport> {
    let playback = PlaybackConfig {
        tick_period,
        speed: config.speed,
        start_paused: true,
        ..PlaybackConfig::default()
    };
    let driver = BattleDriver::spawn(sim, playback)?;
    let mut events = driver.subscribe();

    let json = config.report_json;
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    match render::event_line(&event, json) {
                        Ok(line) => println!("{line}"),
                        Err(e) => tracing::warn!("Failed to render event: {e}"),
                    }
                    if matches!(event, BattleEvent::BattleEnd { .. }) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Output fell behind; events skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    driver.handle().resume().await?;
    let report = driver.wait().await?;
    printer.await?;
    Ok(report)
}
