//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`BattleConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.gauge_divisor == 0 {
            anyhow::bail!("Invalid config: gauge_divisor must be positive");
        }
        if !config.carryover_gauge_cap.is_finite() || config.carryover_gauge_cap < 0.0 {
            anyhow::bail!(
                "Invalid config: carryover_gauge_cap must be a non-negative number, got {}",
                config.carryover_gauge_cap
            );
        }

        Ok(config)
    }
}
