//! Authoring formats for dungeon content.
//!
//! Specs mirror the shape of the data files. Anything a data file may leave
//! out (skill behavior, effect family, stats) is optional here and resolved
//! exactly once when the spec is turned into core templates.

use battle_core::{
    AuraModifier, EffectFamily, Skill, SkillBehavior, SkillTemplate, UnitTemplate,
};

/// A skill as written in a data file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "SkillSpec::default_multiplier"))]
    pub multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default = "SkillSpec::default_cooldown"))]
    pub cooldown: u32,
    /// Inferred from `name` when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<SkillBehavior>,
    /// Inferred from `name` when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub family: Option<EffectFamily>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_duration: Option<u32>,
}

impl SkillSpec {
    fn default_multiplier() -> f64 {
        1.0
    }

    fn default_cooldown() -> u32 {
        1
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiplier: Self::default_multiplier(),
            cooldown: Self::default_cooldown(),
            behavior: None,
            family: None,
            status_duration: None,
        }
    }

    /// Resolves the spec into a core skill, filling in behavior and family
    /// from the display name where the data file left them out.
    pub fn resolve(&self) -> Skill {
        let behavior = self
            .behavior
            .unwrap_or_else(|| SkillBehavior::infer_from_name(&self.name));
        let family = self
            .family
            .unwrap_or_else(|| EffectFamily::infer_from_name(&self.name));

        let skill = Skill::new(self.name.clone(), self.multiplier)
            .with_cooldown(self.cooldown)
            .with_behavior(behavior)
            .with_family(family);

        match self.status_duration {
            Some(turns) => skill.with_status_duration(turns),
            None => skill,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillsSpec {
    pub basic: Option<SkillSpec>,
    pub advanced: Option<SkillSpec>,
    pub ultimate: Option<SkillSpec>,
}

impl SkillsSpec {
    pub fn resolve(&self) -> SkillTemplate {
        SkillTemplate {
            basic: self.basic.as_ref().map(SkillSpec::resolve),
            advanced: self.advanced.as_ref().map(SkillSpec::resolve),
            ultimate: self.ultimate.as_ref().map(SkillSpec::resolve),
        }
    }
}

/// A party member or enemy as written in a data file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitSpec {
    pub name: String,
    pub attack: Option<u32>,
    pub vitality: Option<u32>,
    pub speed: Option<u32>,
    pub aura: Option<AuraModifier>,
    pub skills: SkillsSpec,
}

impl UnitSpec {
    pub fn resolve(&self) -> UnitTemplate {
        UnitTemplate {
            name: self.name.clone(),
            attack: self.attack,
            vitality: self.vitality,
            speed: self.speed,
            aura: self.aura,
            skills: self.skills.resolve(),
        }
    }
}

/// A dungeon file: the party, the stage-0 enemy line-up and an optional
/// stage count overriding the engine configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DungeonSpec {
    pub name: String,
    pub stages: Option<u32>,
    pub party: Vec<UnitSpec>,
    pub enemies: Vec<UnitSpec>,
}
