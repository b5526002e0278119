//! Damage and healing amounts.

/// `floor(effective_attack × multiplier)`, never negative.
///
/// Non-finite or negative multipliers yield 0; results beyond `u32::MAX`
/// saturate.
pub fn calculate_damage(effective_attack: u32, multiplier: f64) -> u32 {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return 0;
    }
    let raw = (effective_attack as f64 * multiplier).floor();
    if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        raw as u32
    }
}

/// Share of `max_hp` in whole points, with `max_hp` floored to 1.
pub fn percent_of_max_hp(max_hp: u32, pct: u32) -> u32 {
    (max_hp.max(1) as u64 * pct as u64 / 100).min(u32::MAX as u64) as u32
}

/// Damage-over-time per turn; always at least 1.
pub fn dot_damage(target_max_hp: u32, pct: u32) -> u32 {
    percent_of_max_hp(target_max_hp, pct).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_floored() {
        assert_eq!(calculate_damage(100, 1.0), 100);
        assert_eq!(calculate_damage(57, 1.5), 85);
        assert_eq!(calculate_damage(3, 0.3), 0);
    }

    #[test]
    fn damage_is_never_negative() {
        assert_eq!(calculate_damage(100, -2.0), 0);
        assert_eq!(calculate_damage(100, f64::NAN), 0);
        assert_eq!(calculate_damage(u32::MAX, 4.0), u32::MAX);
    }

    #[test]
    fn heal_share_of_caster_max_hp() {
        assert_eq!(percent_of_max_hp(800, 5), 40);
        assert_eq!(percent_of_max_hp(0, 5), 0);
    }

    #[test]
    fn dot_has_a_floor_of_one() {
        assert_eq!(dot_damage(10, 5), 1);
        assert_eq!(dot_damage(1_000, 5), 50);
    }
}
