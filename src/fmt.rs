//! Shared formatting utilities for deltas and console output

use console::Emoji;

/// Chart emoji for comparison tables
pub const CHART: Emoji = Emoji("📊", "~");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for improvements
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Trophy emoji for leaderboards
pub const TROPHY: Emoji = Emoji("🏆", "#");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Environment variable that forces the plain-text fallbacks
pub const NO_EMOJI_ENV: &str = "NO_EMOJI";

/// Render `emoji`, honoring `NO_EMOJI` and terminal capabilities
pub fn icon(emoji: Emoji<'_, '_>) -> String {
    if std::env::var_os(NO_EMOJI_ENV).is_some() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

/// Format a signed count with an explicit sign, `0` unsigned
///
/// # Examples
///
/// ```
/// use oobee_scan::fmt::format_signed;
///
/// assert_eq!(format_signed(5), "+5");
/// assert_eq!(format_signed(-3), "-3");
/// assert_eq!(format_signed(0), "0");
/// ```
pub fn format_signed(value: i64) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{:+}", value)
    }
}

/// Format a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM` UTC
pub fn format_timestamp(secs: u64) -> String {
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60
    )
}

// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Truncate string to max length
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
