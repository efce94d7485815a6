//! Text fix-ups applied before scanning for job blocks
//!
//! RMS writes deactivated jobs as a single `... - deactivated` line inside a
//! `<pre>` that is never closed. Closing it right after the marker lets the
//! block scanner delimit the record.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A ` - deactivated` marker that ends a line or the whole text.
static DEACTIVATED_MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"( - deactivated)(\r?\n|$)").expect("Deactivated marker regex pattern is valid")
});

/// Close the `<pre>` of every deactivated-job marker line.
///
/// Returns the input unchanged (borrowed) when no marker is present.
pub fn preprocess(text: &str) -> Cow<'_, str> {
    DEACTIVATED_MARKER_PATTERN.replace_all(text, "${1}</pre>${2}")
}
