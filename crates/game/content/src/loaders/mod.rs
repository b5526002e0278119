//! Content loaders for reading dungeon data from files.

pub mod config;
pub mod dungeon;
pub mod factory;

pub use config::ConfigLoader;
pub use dungeon::{Dungeon, DungeonLoader};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
