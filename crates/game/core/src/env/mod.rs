//! Injected collaborators consumed by the engine.
//!
//! The simulator owns no source of nondeterminism itself; randomness is
//! supplied through the [`RngOracle`] trait.

pub mod rng;

pub use rng::{ActionRolls, PcgRng, RngOracle, RollContext, compute_seed};
