//! Skill definitions attached to units.
//!
//! A unit carries up to three skills. Which one fires is decided by the
//! unit's action counter: advanced and ultimate skills fire "every Nth
//! action" rather than on a real-time cooldown.
//!
//! Special behaviors and effect families are explicit fields resolved once
//! when content is loaded; display names are never inspected during combat.

/// Skill slot on a unit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillTier {
    Basic,
    Advanced,
    Ultimate,
}

/// Bespoke resolution rules that override the generic status roll.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillBehavior {
    /// Damage plus the generic 30% family roll on non-basic tiers.
    #[default]
    Standard,
    /// Also heals the most wounded living ally for a share of the caster's max HP.
    Heal,
    /// Always strikes a second opposing target, 25% chance for a third.
    MultiHit,
    /// Always strikes exactly one additional opposing target.
    DualHit,
    /// Targets a debuffed ally; 10% chance to remove one of its harmful effects.
    Cleanse,
    /// 10% chance to apply a 1-turn, 20% speed debuff.
    Slow,
    /// 20% chance to apply a 2-turn, 10% attack debuff.
    Weaken,
    /// 10% chance to knock 10 points off the target's action gauge.
    Gust,
}

impl SkillBehavior {
    /// Legacy display-name keywords, checked in order.
    const NAME_KEYWORDS: [(&'static [&'static str], Self); 7] = [
        (&["heal", "mend", "renew"], Self::Heal),
        (&["cleanse", "purify"], Self::Cleanse),
        (&["chain", "multi"], Self::MultiHit),
        (&["twin", "dual", "double"], Self::DualHit),
        (&["gust", "gale"], Self::Gust),
        (&["slow", "frost", "chill"], Self::Slow),
        (&["weaken", "sunder"], Self::Weaken),
    ];

    /// Infers a behavior from a legacy display name.
    ///
    /// Like [`EffectFamily::infer_from_name`], only content loaders call this.
    pub fn infer_from_name(name: &str) -> Self {
        let lowered = name.to_ascii_lowercase();
        Self::NAME_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map_or(Self::Standard, |(_, behavior)| *behavior)
    }
}

/// Status family applied by the generic roll of a standard skill.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectFamily {
    /// Uniform choice between a weakening and a slowing debuff.
    #[default]
    Generic,
    /// Burn damage-over-time with a skill-specific 1-3 turn duration.
    Fire,
    /// Poison damage-over-time for 3 turns.
    Poison,
}

impl EffectFamily {
    const FIRE_KEYWORDS: [&'static str; 4] = ["fire", "flame", "burn", "blaze"];
    const POISON_KEYWORDS: [&'static str; 3] = ["poison", "venom", "toxic"];

    /// Infers a family from a legacy display name.
    ///
    /// Only content loaders call this, once per skill, for data files that do
    /// not declare a family explicitly.
    pub fn infer_from_name(name: &str) -> Self {
        let lowered = name.to_ascii_lowercase();
        if Self::FIRE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Self::Fire
        } else if Self::POISON_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            Self::Poison
        } else {
            Self::Generic
        }
    }
}

/// A single skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    /// Damage multiplier applied to effective attack.
    pub multiplier: f64,
    /// Fires on actions where `action_counter % cooldown == 0`. Ignored for basic skills.
    pub cooldown: u32,
    pub behavior: SkillBehavior,
    pub family: EffectFamily,
    /// Duration override for the family effect (burn uses 1-3 turns).
    pub status_duration: Option<u32>,
}

impl Skill {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
            cooldown: 1,
            behavior: SkillBehavior::Standard,
            family: EffectFamily::Generic,
            status_duration: None,
        }
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown.max(1);
        self
    }

    pub fn with_behavior(mut self, behavior: SkillBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_family(mut self, family: EffectFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_status_duration(mut self, turns: u32) -> Self {
        self.status_duration = Some(turns);
        self
    }

    fn fires_on(&self, action_counter: u32) -> bool {
        action_counter % self.cooldown.max(1) == 0
    }
}

/// Skills as declared by content; the basic skill may be missing in malformed data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub basic: Option<Skill>,
    pub advanced: Option<Skill>,
    pub ultimate: Option<Skill>,
}

/// Validated skill set of a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSet {
    pub basic: Skill,
    pub advanced: Option<Skill>,
    pub ultimate: Option<Skill>,
}

impl SkillSet {
    pub fn new(basic: Skill) -> Self {
        Self {
            basic,
            advanced: None,
            ultimate: None,
        }
    }

    pub fn with_advanced(mut self, skill: Skill) -> Self {
        self.advanced = Some(skill);
        self
    }

    pub fn with_ultimate(mut self, skill: Skill) -> Self {
        self.ultimate = Some(skill);
        self
    }

    /// Selects the skill for the given (already incremented) action counter.
    ///
    /// Ultimate takes precedence over advanced when both are due.
    pub fn select(&self, action_counter: u32) -> (SkillTier, &Skill) {
        if let Some(ultimate) = self.ultimate.as_ref().filter(|s| s.fires_on(action_counter)) {
            return (SkillTier::Ultimate, ultimate);
        }
        if let Some(advanced) = self.advanced.as_ref().filter(|s| s.fires_on(action_counter)) {
            return (SkillTier::Advanced, advanced);
        }
        (SkillTier::Basic, &self.basic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        core::iter::once(&self.basic)
            .chain(self.advanced.iter())
            .chain(self.ultimate.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_set() -> SkillSet {
        SkillSet::new(Skill::new("Strike", 1.0))
            .with_advanced(Skill::new("Cleave", 1.5).with_cooldown(3))
            .with_ultimate(Skill::new("Ruin", 3.0).with_cooldown(5))
    }

    #[test]
    fn selection_follows_action_counter() {
        let skills = skill_set();
        let tiers: Vec<SkillTier> = (1..=15).map(|n| skills.select(n).0).collect();

        assert_eq!(tiers[0], SkillTier::Basic);
        assert_eq!(tiers[2], SkillTier::Advanced);
        assert_eq!(tiers[4], SkillTier::Ultimate);
        assert_eq!(tiers[5], SkillTier::Advanced);
        // 15 is a multiple of both cooldowns; ultimate wins
        assert_eq!(tiers[14], SkillTier::Ultimate);
    }

    #[test]
    fn basic_only_set_always_uses_basic() {
        let skills = SkillSet::new(Skill::new("Strike", 1.0));
        for n in 1..20 {
            assert_eq!(skills.select(n).0, SkillTier::Basic);
        }
    }

    #[test]
    fn zero_cooldown_is_normalized() {
        let skill = Skill::new("Flurry", 1.0).with_cooldown(0);
        assert_eq!(skill.cooldown, 1);
        let skills = SkillSet::new(Skill::new("Strike", 1.0)).with_advanced(skill);
        assert_eq!(skills.select(7).0, SkillTier::Advanced);
    }

    #[test]
    fn family_inference_matches_keywords() {
        assert_eq!(EffectFamily::infer_from_name("Fireball"), EffectFamily::Fire);
        assert_eq!(EffectFamily::infer_from_name("Searing Flame"), EffectFamily::Fire);
        assert_eq!(EffectFamily::infer_from_name("Venom Fang"), EffectFamily::Poison);
        assert_eq!(EffectFamily::infer_from_name("Shadow Bolt"), EffectFamily::Generic);
    }

    #[test]
    fn behavior_inference_falls_back_to_standard() {
        assert_eq!(SkillBehavior::infer_from_name("Healing Light"), SkillBehavior::Heal);
        assert_eq!(SkillBehavior::infer_from_name("Chain Lightning"), SkillBehavior::MultiHit);
        assert_eq!(SkillBehavior::infer_from_name("Frost Bind"), SkillBehavior::Slow);
        assert_eq!(SkillBehavior::infer_from_name("Fireball"), SkillBehavior::Standard);
    }

    #[test]
    fn behavior_parses_from_snake_case() {
        assert_eq!("multi_hit".parse::<SkillBehavior>(), Ok(SkillBehavior::MultiHit));
        assert_eq!(SkillBehavior::DualHit.to_string(), "dual_hit");
    }
}
