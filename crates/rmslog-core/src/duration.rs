//! Elapsed-time parsing and formatting
//!
//! RMS logs print elapsed times in a fixed `H:MM:SS.F` shape
//! (e.g. `0:00:01.0`). Anything else is treated as "no duration".

use regex::Regex;
use std::sync::LazyLock;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+):([0-5][0-9]):([0-5][0-9])\.([0-9]+)$")
        .expect("Duration regex pattern is valid")
});

/// Parse an `H:MM:SS.F` duration into seconds.
///
/// Hours may have any number of digits, minutes and seconds must be two
/// digits in `00..=59`, and the fraction needs at least one digit.
///
/// # Examples
///
/// ```
/// use rmslog_core::duration::parse_duration;
///
/// assert_eq!(parse_duration("0:00:01.5"), Some(1.5));
/// assert_eq!(parse_duration("1:2:3.4"), None);
/// ```
pub fn parse_duration(text: &str) -> Option<f64> {
    let caps = DURATION_PATTERN.captures(text.trim())?;

    let hours: f64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    let fraction: f64 = format!("0.{}", &caps[4]).parse().ok()?;

    let total = hours * 3600.0 + (minutes * 60 + seconds) as f64 + fraction;
    total.is_finite().then_some(total)
}

/// Render seconds as a short human-readable label.
///
/// - `>= 3600`: `"1 hr 01 mins 1.25s"`
/// - `>= 60`: `"2 mins 5.5s"`
/// - otherwise: `"1.25s"` (6 decimals below one millisecond, e.g. `"0.0005s"`)
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return secs.to_string();
    }

    let abs = secs.abs();
    if abs >= 60.0 {
        // Round to milliseconds first so the seconds field never reads 60
        let rounded = (secs * 1000.0).round() / 1000.0;

        if abs >= 3600.0 {
            let hours = (rounded / 3600.0).floor();
            let rem = rounded - hours * 3600.0;
            let minutes = (rem / 60.0).floor();
            let seconds = rem - minutes * 60.0;
            return format!(
                "{} hr {:02} mins {}s",
                hours,
                minutes as i64,
                trim_decimals(&format!("{:.3}", seconds))
            );
        }

        let minutes = (rounded / 60.0).floor();
        let seconds = rounded - minutes * 60.0;
        return format!(
            "{} mins {}s",
            minutes,
            trim_decimals(&format!("{:.3}", seconds))
        );
    }

    let precision = if abs < 1e-3 { 6 } else { 3 };
    format!("{}s", trim_decimals(&format!("{:.*}", precision, secs)))
}

/// Drop trailing zeros and a dangling decimal point: `"10.500"` -> `"10.5"`.
fn trim_decimals(fixed: &str) -> &str {
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.')
}
