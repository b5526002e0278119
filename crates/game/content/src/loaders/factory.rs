//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{ConfigLoader, Dungeon, DungeonLoader, LoadResult};

/// Content factory that loads all dungeon content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── dungeons/
///     ├── forgotten_crypt.ron
///     └── ember_halls.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    const DUNGEON_DIR: &'static str = "dungeons";
    const DUNGEON_EXT: &'static str = "ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load a dungeon from `dungeons/{name}.ron`.
    pub fn load_dungeon(&self, name: &str) -> LoadResult<Dungeon> {
        DungeonLoader::load(&self.dungeon_path(name))
    }

    /// Names of every dungeon file in `dungeons/`, sorted.
    pub fn list_dungeons(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join(Self::DUNGEON_DIR);
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            anyhow::anyhow!("Failed to read dungeon directory {}: {}", dir.display(), e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == Self::DUNGEON_EXT)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn dungeon_path(&self, name: &str) -> PathBuf {
        self.data_dir
            .join(Self::DUNGEON_DIR)
            .join(format!("{}.{}", name, Self::DUNGEON_EXT))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MINIMAL: &str = r#"(
    name: "Cellar",
    party: [(name: "Hero", skills: (basic: Some((name: "Slash"))))],
    enemies: [(name: "Rat", skills: (basic: Some((name: "Bite"))))],
)"#;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dungeons")).unwrap();
        fs::write(dir.path().join("config.toml"), "total_stages = 2\n").unwrap();
        fs::write(dir.path().join("dungeons/cellar.ron"), MINIMAL).unwrap();
        fs::write(dir.path().join("dungeons/attic.ron"), MINIMAL).unwrap();
        fs::write(dir.path().join("dungeons/notes.txt"), "not a dungeon").unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.dungeon_path("crypt"),
            Path::new("/tmp/data/dungeons/crypt.ron")
        );
    }

    #[test]
    fn loads_config_and_dungeon_from_disk() {
        let dir = data_dir();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap().total_stages, 2);
        let dungeon = factory.load_dungeon("cellar").unwrap();
        assert_eq!(dungeon.name, "Cellar");
        assert_eq!(dungeon.allies.len(), 1);
    }

    #[test]
    fn lists_only_ron_files_sorted() {
        let dir = data_dir();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.list_dungeons().unwrap(), vec!["attic", "cellar"]);
    }

    #[test]
    fn missing_dungeon_names_the_path() {
        let dir = data_dir();
        let factory = ContentFactory::new(dir.path());
        let err = factory.load_dungeon("nowhere").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to read file"));
        assert!(message.contains("nowhere.ron"));
    }
}
