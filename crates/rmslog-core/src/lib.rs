//! # rmslog-core - Job Block Parser and Outline Builder
//!
//! Foundation crate for RMS Log Outline. Turns an RMS HTML log (a document
//! embedding `<pre>`-wrapped job records) into a navigable outline of jobs
//! grouped by realization, with elapsed times rolled up the tree.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, regex, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`block`, `hierarchy`, `outline`)
//! - [`Block`] - One job record with level, title, offsets and timing
//! - [`Level`] - Markup depth, `Unknown` ranking below every known depth
//! - [`Node`] - Outline node carrying the subtree's aggregated elapsed time
//! - [`Outline`] - The grouped forest plus title, range and line queries
//!
//! ### Parsing (`extract`, `preprocess`, `remap`)
//! - [`preprocess()`] - Close unterminated deactivated-job records
//! - [`BlockExtractor`] - Extract blocks from scanned text, remapping offsets
//!   into the original document
//! - [`parse_job_blocks()`] - Extraction with the default configuration
//!
//! ### Building (`hierarchy`)
//! - [`assemble()`], [`group_by_realization()`], [`aggregate()`]
//! - [`build_outline()`] - All three passes
//!
//! ### Helpers
//! - [`decode_entities()`] - HTML entity decoding
//! - [`parse_duration()`], [`format_seconds()`] - `H:MM:SS.F` durations
//! - [`infer_depth()`] - Tag-counting depth at an offset
//! - [`DepthScanner`], [`LineCounter`] - Resumable depth and line counts for
//!   ascending offsets
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use rmslog_core::prelude::*;
//! ```

pub mod block;
pub mod depth;
pub mod duration;
pub mod entities;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod logging;
pub mod message;
pub mod outline;
pub mod prelude;
pub mod preprocess;
pub mod remap;

// Re-export commonly used types at crate root for convenience
pub use block::{Block, BlockKind, Level};
pub use depth::{infer_depth, DepthScanner};
pub use duration::{format_seconds, parse_duration};
pub use entities::decode_entities;
pub use error::{Error, Result, ResultExt};
pub use extract::{parse_job_blocks, BlockExtractor, ExtractConfig, DEFAULT_DURATION_WINDOW};
pub use hierarchy::{
    aggregate, assemble, build_outline, build_ungrouped_outline, group_by_realization, Node,
    UNASSIGNED_GROUP_TITLE,
};
pub use message::ViewMessage;
pub use outline::{Outline, TitleMatches};
pub use preprocess::preprocess;
pub use remap::{LineCounter, Remapped, Remapper};
