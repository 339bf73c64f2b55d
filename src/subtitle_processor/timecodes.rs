/*!
 * Time normalization.
 *
 * Every format's native timestamp is rewritten into the canonical
 * `HH:MM:SS,mmm` text form. The conversions are textual: SRT passes through,
 * WebVTT swaps its decimal separator, ASS widens hours and turns centiseconds
 * into milliseconds. Nothing here fails; an ASS value that does not look like a
 * timestamp is returned untouched.
 */

use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

/// ASS/SSA time: variable-width hours, centiseconds
static ASS_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+):(\d{2}):(\d{2})\.(\d{2})").unwrap()
});

/// SRT timestamps are already canonical.
pub fn srt_to_canonical(timestamp: &str) -> String {
    timestamp.to_string()
}

/// `00:01:02.345` becomes `00:01:02,345`. Only the separator changes.
pub fn vtt_to_canonical(timestamp: &str) -> String {
    timestamp.replacen('.', ",", 1)
}

/// `0:01:02.34` becomes `00:01:02,340`.
///
/// Hours are zero-padded to at least two digits and the two-digit centisecond
/// field is scaled to milliseconds. Input that does not match the ASS layout
/// comes back unmodified.
pub fn ass_to_canonical(timestamp: &str) -> String {
    let Some(caps) = ASS_TIME_REGEX.captures(timestamp.trim()) else {
        return timestamp.to_string();
    };

    let hours = &caps[1];
    let minutes = &caps[2];
    let seconds = &caps[3];
    // Two ASCII digits always parse
    let centiseconds: u32 = caps[4].parse().unwrap_or(0);

    format!(
        "{:0>2}:{}:{},{:03}",
        hours,
        minutes,
        seconds,
        centiseconds * 10
    )
}

/// Parse a canonical `HH:MM:SS,mmm` timestamp to milliseconds
pub fn canonical_to_ms(timestamp: &str) -> Result<u64> {
    let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
        .ok_or_else(|| anyhow!("Timestamp out of range: {}", timestamp))
}

/// Format milliseconds as a canonical timestamp
pub fn format_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
