//! Percentage bonus stack shared by every effective stat.
//!
//! Application order is fixed and order-sensitive:
//! `%Inc (summed) → floor → each Less in activation order → floor → clamp ≥ 0`

/// A single percentage adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Percentage increase, summed with other increases (20 = +20%).
    Increased(i32),

    /// Sequential reduction, floored after each step (10 = ×0.9).
    Less(u32),
}

/// Ordered collection of bonuses.
///
/// # Example
/// ```
/// # use battle_core::stats::BonusStack;
/// let value = BonusStack::new()
///     .increased(20)  // aura
///     .less(10)       // weaken
///     .less(15)       // slow
///     .apply(57);
/// // floor(57 × 1.2) = 68 → floor(68 × 0.9) = 61 → floor(61 × 0.85) = 51
/// assert_eq!(value, 51);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Applies the stack to `base` with integer floor arithmetic.
    pub fn apply(&self, base: u32) -> u32 {
        let inc_sum: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p as i64),
                Bonus::Less(_) => None,
            })
            .sum();

        let after_inc = if inc_sum == 0 {
            base as i64
        } else {
            (base as i64 * (100 + inc_sum)).div_euclid(100)
        };

        let after_less = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Less(p) => Some(*p as i64),
                Bonus::Increased(_) => None,
            })
            .fold(after_inc.max(0), |acc, less_percent| {
                let multiplier = (100 - less_percent).max(0);
                (acc * multiplier) / 100
            });

        after_less.clamp(0, u32::MAX as i64) as u32
    }
}

/// Builder methods.
impl BonusStack {
    pub fn increased(mut self, percent: i32) -> Self {
        self.add(Bonus::Increased(percent));
        self
    }

    pub fn less(mut self, percent: u32) -> Self {
        self.add(Bonus::Less(percent));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        assert_eq!(BonusStack::new().apply(73), 73);
    }

    #[test]
    fn increases_are_summed_before_flooring() {
        // floor(10 × 1.15) = 11, whereas flooring per bonus would give 10
        assert_eq!(BonusStack::new().increased(5).increased(10).apply(10), 11);
    }

    #[test]
    fn reductions_floor_after_each_step() {
        // floor(floor(99 × 0.9) × 0.85) = floor(89 × 0.85) = 75
        assert_eq!(BonusStack::new().less(10).less(15).apply(99), 75);
        // single combined factor would give floor(99 × 0.765) = 75 here,
        // but diverges for 33: floor(floor(29.7) × 0.85) = 24 vs floor(25.2) = 25
        assert_eq!(BonusStack::new().less(10).less(15).apply(33), 24);
    }

    #[test]
    fn result_never_goes_negative() {
        assert_eq!(BonusStack::new().increased(-250).apply(40), 0);
        assert_eq!(BonusStack::new().less(150).apply(40), 0);
    }
}
