/// Battle configuration constants and tunable parameters.
///
/// Every formula constant used by the engine lives here so a dungeon
/// collaborator can override stage scaling or roll chances without touching
/// the resolution code. Missing keys in a loaded file fall back to
/// [`BattleConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of encounters in a dungeon run.
    pub total_stages: u32,

    /// Per-stage growth of enemy attack, vitality and max HP, in percent.
    pub stat_scaling_pct: u32,

    /// Per-stage growth of enemy speed, in percent.
    pub speed_scaling_pct: u32,

    /// Gauge gain per tick is `effective_speed / gauge_divisor × multiplier`.
    pub gauge_divisor: u32,

    /// Highest gauge value an ally keeps when a new stage begins.
    pub carryover_gauge_cap: f64,

    /// Max HP granted per point of effective vitality.
    pub hp_per_vitality: u32,

    /// Chance (percent) that a non-basic standard skill applies its family effect.
    pub generic_status_chance: u32,

    /// Damage-over-time magnitude as a percentage of the target's max HP.
    pub dot_pct_of_max_hp: u32,

    /// Heal amount as a percentage of the caster's max HP.
    pub heal_pct_of_caster_max_hp: u32,

    /// Safety bound on ticks for headless resolution.
    pub max_ticks: u64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per [`StatusEffectKind`](crate::StatusEffectKind); kinds never stack.
    pub const MAX_STATUS_EFFECTS: usize = 5;

    /// Gauge value at which a unit takes its turn.
    pub const GAUGE_THRESHOLD: f64 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TOTAL_STAGES: u32 = 8;
    pub const DEFAULT_STAT_SCALING_PCT: u32 = 12;
    pub const DEFAULT_SPEED_SCALING_PCT: u32 = 5;
    pub const DEFAULT_GAUGE_DIVISOR: u32 = 40;
    pub const DEFAULT_CARRYOVER_GAUGE_CAP: f64 = 95.0;
    pub const DEFAULT_HP_PER_VITALITY: u32 = 10;
    pub const DEFAULT_GENERIC_STATUS_CHANCE: u32 = 30;
    pub const DEFAULT_DOT_PCT_OF_MAX_HP: u32 = 5;
    pub const DEFAULT_HEAL_PCT_OF_CASTER_MAX_HP: u32 = 5;
    pub const DEFAULT_MAX_TICKS: u64 = 200_000;

    pub fn new() -> Self {
        Self {
            total_stages: Self::DEFAULT_TOTAL_STAGES,
            stat_scaling_pct: Self::DEFAULT_STAT_SCALING_PCT,
            speed_scaling_pct: Self::DEFAULT_SPEED_SCALING_PCT,
            gauge_divisor: Self::DEFAULT_GAUGE_DIVISOR,
            carryover_gauge_cap: Self::DEFAULT_CARRYOVER_GAUGE_CAP,
            hp_per_vitality: Self::DEFAULT_HP_PER_VITALITY,
            generic_status_chance: Self::DEFAULT_GENERIC_STATUS_CHANCE,
            dot_pct_of_max_hp: Self::DEFAULT_DOT_PCT_OF_MAX_HP,
            heal_pct_of_caster_max_hp: Self::DEFAULT_HEAL_PCT_OF_CASTER_MAX_HP,
            max_ticks: Self::DEFAULT_MAX_TICKS,
        }
    }

    pub fn with_total_stages(total_stages: u32) -> Self {
        Self {
            total_stages,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
