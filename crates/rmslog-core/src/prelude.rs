//! Prelude for common imports used throughout the RMS Log Outline crates

pub use crate::error::{Error, Result, ResultExt};
pub use tracing::{debug, error, info, instrument, trace, warn};
