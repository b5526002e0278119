//! Dungeon definition loader.
//!
//! A dungeon file is a single RON [`DungeonSpec`]. Skill behaviors and effect
//! families the file leaves out are inferred here, once, from the skill name.

use std::path::Path;

use battle_core::{BattleConfig, UnitTemplate};

use crate::loaders::{LoadResult, read_file};
use crate::specs::DungeonSpec;

/// A loaded dungeon, ready to hand to the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Dungeon {
    pub name: String,
    /// Overrides `BattleConfig::total_stages` when set.
    pub stages: Option<u32>,
    pub allies: Vec<UnitTemplate>,
    /// Stage-0 enemies; later stages scale these.
    pub enemies: Vec<UnitTemplate>,
}

impl Dungeon {
    /// Applies the dungeon's own overrides to an engine configuration.
    pub fn apply_to(&self, config: &mut BattleConfig) {
        if let Some(stages) = self.stages {
            config.total_stages = stages;
        }
    }
}

/// Loader for dungeon definitions from RON files.
pub struct DungeonLoader;

impl DungeonLoader {
    /// Load a dungeon from a RON file.
    pub fn load(path: &Path) -> LoadResult<Dungeon> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load dungeon {}: {}", path.display(), e))
    }

    pub(crate) fn parse(content: &str) -> LoadResult<Dungeon> {
        let spec: DungeonSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeon RON: {}", e))?;
        Self::resolve(spec)
    }

    fn resolve(spec: DungeonSpec) -> LoadResult<Dungeon> {
        if spec.party.is_empty() {
            anyhow::bail!("dungeon '{}' has no party members", spec.name);
        }
        if spec.enemies.is_empty() {
            anyhow::bail!("dungeon '{}' has no enemies", spec.name);
        }
        if spec.stages == Some(0) {
            anyhow::bail!("dungeon '{}' must have at least one stage", spec.name);
        }
        if let Some(unit) = spec
            .party
            .iter()
            .chain(spec.enemies.iter())
            .find(|unit| unit.skills.basic.is_none())
        {
            anyhow::bail!("unit '{}' in dungeon '{}' has no basic skill", unit.name, spec.name);
        }

        let allies = spec.party.iter().map(|unit| unit.resolve()).collect();
        let enemies = spec.enemies.iter().map(|unit| unit.resolve()).collect();
        tracing::debug!(dungeon = %spec.name, "dungeon resolved");

        Ok(Dungeon {
            name: spec.name,
            stages: spec.stages,
            allies,
            enemies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{EffectFamily, SkillBehavior};

    const CRYPT: &str = r#"#![enable(implicit_some)]
(
    name: "Crypt",
    stages: 3,
    party: [
        (
            name: "Cleric",
            vitality: 60,
            aura: (vitality_pct: 15),
            skills: (
                basic: (name: "Smite"),
                advanced: (name: "Mending Prayer", multiplier: 0.5, cooldown: 3),
            ),
        ),
    ],
    enemies: [
        (
            name: "Ghoul",
            skills: (
                basic: (name: "Claw"),
                ultimate: (name: "Grave Curse", cooldown: 4, behavior: weaken),
            ),
        ),
    ],
)
"#;

    #[test]
    fn parses_and_resolves_dungeon() {
        let dungeon = DungeonLoader::parse(CRYPT).unwrap();

        assert_eq!(dungeon.name, "Crypt");
        assert_eq!(dungeon.stages, Some(3));

        let cleric = &dungeon.allies[0];
        assert_eq!(cleric.vitality, Some(60));
        assert_eq!(cleric.attack, None);
        assert_eq!(cleric.aura.map(|a| a.vitality_pct), Some(15));

        let prayer = cleric.skills.advanced.as_ref().unwrap();
        assert_eq!(prayer.behavior, SkillBehavior::Heal);
        assert_eq!(prayer.cooldown, 3);
        assert_eq!(prayer.multiplier, 0.5);

        let curse = dungeon.enemies[0].skills.ultimate.as_ref().unwrap();
        assert_eq!(curse.behavior, SkillBehavior::Weaken);
        assert_eq!(curse.family, EffectFamily::Generic);
    }

    #[test]
    fn stage_override_applies_to_config() {
        let dungeon = DungeonLoader::parse(CRYPT).unwrap();
        let mut config = BattleConfig::default();
        dungeon.apply_to(&mut config);
        assert_eq!(config.total_stages, 3);
    }

    #[test]
    fn missing_basic_skill_is_rejected() {
        let source = r#"
(
    name: "Broken",
    party: [(name: "Mute")],
    enemies: [(name: "Rat", skills: (basic: Some((name: "Bite"))))],
)
"#;
        let err = DungeonLoader::parse(source).unwrap_err();
        assert!(err.to_string().contains("'Mute'"));
    }

    #[test]
    fn empty_enemy_list_is_rejected() {
        let source = r#"(name: "Empty", party: [(name: "Solo", skills: (basic: Some((name: "Hit"))))])"#;
        let err = DungeonLoader::parse(source).unwrap_err();
        assert!(err.to_string().contains("no enemies"));
    }
}
