//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a battle (target picks, status rolls, multi-hit
//! chances) is drawn through [`RngOracle`]. Seeds are derived from the run
//! seed, the action nonce, the acting unit and a [`RollContext`], so a run is
//! fully reproducible and tests can inject a scripted oracle.

use crate::state::UnitId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Percentage check: succeeds when a d100 roll is at most `pct`.
    ///
    /// `pct = 0` never succeeds, `pct >= 100` always does.
    fn chance(&self, seed: u64, pct: u32) -> bool {
        self.roll_d100(seed) <= pct
    }

    /// Uniform index in `0..len`. Returns 0 for empty or single-element ranges.
    fn pick(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.next_u32(seed) as usize % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from battle state components.
///
/// * `run_seed` - Base seed set at run start (for replay/determinism)
/// * `nonce` - Action sequence number (increments each resolved action)
/// * `actor_id` - Unit performing the action
/// * `context` - Distinguishes independent rolls within the same action
pub fn compute_seed(run_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = run_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Identifies one independent roll within a single action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollContext {
    /// Primary target pick.
    PrimaryTarget,
    /// Additional target pick; the index separates successive extra hits.
    ExtraTarget(u8),
    /// Multi-hit chance to strike a third target.
    ThirdHit,
    /// Generic or bespoke status application chance.
    StatusChance,
    /// Choice between generic debuffs.
    StatusChoice,
    /// Cleanse: which effect is removed.
    CleanseEffect,
}

impl RollContext {
    const fn as_u32(self) -> u32 {
        match self {
            Self::PrimaryTarget => 0,
            Self::ThirdHit => 1,
            Self::StatusChance => 2,
            Self::StatusChoice => 3,
            Self::CleanseEffect => 4,
            Self::ExtraTarget(index) => 16 + index as u32,
        }
    }
}

/// Roll source bound to a single action (run seed + nonce + actor).
pub struct ActionRolls<'a, R: RngOracle + ?Sized> {
    rng: &'a R,
    run_seed: u64,
    nonce: u64,
    actor: UnitId,
}

impl<'a, R: RngOracle + ?Sized> ActionRolls<'a, R> {
    pub fn new(rng: &'a R, run_seed: u64, nonce: u64, actor: UnitId) -> Self {
        Self {
            rng,
            run_seed,
            nonce,
            actor,
        }
    }

    fn seed(&self, context: RollContext) -> u64 {
        compute_seed(self.run_seed, self.nonce, self.actor.0, context.as_u32())
    }

    pub fn chance(&self, context: RollContext, pct: u32) -> bool {
        self.rng.chance(self.seed(context), pct)
    }

    pub fn pick(&self, context: RollContext, len: usize) -> usize {
        self.rng.pick(self.seed(context), len)
    }
}
