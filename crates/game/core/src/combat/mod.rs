//! Pure combat helpers.
//!
//! - `calculate_damage`: `floor(effective_attack × multiplier)`
//! - `select_primary` / `select_additional`: uniform picks over living units
//! - `lowest_hp_ally`: heal target ranking

pub mod damage;
pub mod targeting;

pub use damage::{calculate_damage, dot_damage, percent_of_max_hp};
pub use targeting::{has_additional, lowest_hp_ally, select_additional, select_primary};
