//! Real-time playback driver for battle simulations.
//!
//! `battle-core` is synchronous and never keeps time; this crate supplies the
//! external fixed-period driver. A [`BattleDriver`] moves a
//! [`battle_core::BattleSimulator`] onto a tokio task, ticks it on an interval,
//! and lets callers pause, resume, change playback speed and take snapshots
//! through a cloneable [`DriverHandle`]. Every new [`battle_core::BattleEvent`]
//! is broadcast to subscribers as soon as the tick that produced it completes.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`driver`] hosts the entry point and its configuration
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod driver;

mod workers;

pub use api::{DriverHandle, Result, RuntimeError};
pub use driver::{BattleDriver, PlaybackConfig};
