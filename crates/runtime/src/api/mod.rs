//! Public API surface of the runtime.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::DriverHandle;
