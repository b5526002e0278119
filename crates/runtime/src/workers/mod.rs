//! Background tasks owned by the runtime.
mod playback;

pub(crate) use playback::{Command, PlaybackWorker};
