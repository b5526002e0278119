//! Stat model.
//!
//! Effective attack and speed are derived on demand from base stats, the
//! optional aura and active debuffs; nothing derived is cached on the unit.
//! All layers share [`BonusStack`] so rounding is identical everywhere.

pub mod bonus;
pub mod effective;

pub use bonus::{Bonus, BonusStack};
pub use effective::{effective_attack, effective_speed, effective_vitality, max_hp};

/// Percentage scaling with round-half-up integer arithmetic.
///
/// Used for stage scaling: `round(value × (100 + pct) / 100)`.
pub fn scale_rounded(value: u32, pct: u32) -> u32 {
    let scaled = (value as u64 * (100 + pct as u64) + 50) / 100;
    scaled.min(u32::MAX as u64) as u32
}
