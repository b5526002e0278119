//! Data-driven content for dungeon runs.
//!
//! Provides the authoring formats for dungeons and loaders for the data
//! directory:
//! - Engine configuration (TOML)
//! - Dungeon definitions: party and enemy line-up (RON)
//!
//! Loaders resolve specs into `battle-core` templates; content never appears
//! in battle state directly.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{DungeonSpec, SkillSpec, SkillsSpec, UnitSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Dungeon, DungeonLoader, LoadResult};
