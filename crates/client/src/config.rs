//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Everything the `dungeon` binary needs to pick and play a run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    /// Dungeon file stem; the first dungeon in the data directory when unset.
    pub dungeon: Option<String>,
    pub seed: u64,
    /// Wall-clock time between ticks. `None` resolves the run headlessly.
    pub tick_period: Option<Duration>,
    pub speed: f64,
    /// Emit events and the report as JSON lines instead of text.
    pub report_json: bool,
    /// Also write logs to `dungeon.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 100;
    pub const DEFAULT_SPEED: f64 = 1.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `DUNGEON_NAME` - Dungeon to play (default: first available)
    /// - `BATTLE_SEED` - Run seed (default: derived from the clock)
    /// - `TICK_PERIOD_MS` - Milliseconds per tick, `0` for headless (default: 100)
    /// - `PLAYBACK_SPEED` - Gauge-gain multiplier (default: 1.0)
    /// - `REPORT_JSON` - JSON lines output (default: false)
    /// - `LOG_DIR` - Directory for a log file (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = read_string(&lookup, "DUNGEON_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let tick_period = match read_env::<u64>(&lookup, "TICK_PERIOD_MS") {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => Some(Duration::from_millis(Self::DEFAULT_TICK_PERIOD_MS)),
        };

        let speed = read_env::<f64>(&lookup, "PLAYBACK_SPEED")
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .unwrap_or(Self::DEFAULT_SPEED);

        Self {
            data_dir,
            dungeon: read_string(&lookup, "DUNGEON_NAME"),
            seed: read_env(&lookup, "BATTLE_SEED").unwrap_or_else(clock_seed),
            tick_period,
            speed,
            report_json: read_env(&lookup, "REPORT_JSON").unwrap_or(false),
            log_dir: read_string(&lookup, "LOG_DIR").map(PathBuf::from),
        }
    }
}

fn read_string(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn read_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = read_string(lookup, key)?;
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %value, "ignoring unparsable environment value");
    }
    parsed
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
