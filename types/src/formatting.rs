//! Display formatting for report content.
//!
//! Numbers the results page prints itself go through here so the header
//! and cast efficiency table agree on precision and on European-style
//! separators (`,` for decimals, `.` for grouping).

/// Swap `.` and `,` in an already formatted number.
fn swap_separators(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            other => other,
        })
        .collect()
}

#[inline]
fn localize(s: String, european: bool) -> String {
    if european { swap_separators(&s) } else { s }
}

/// Format a fight duration given in milliseconds as `M:SS`.
///
/// Sub-second remainders are truncated, matching how fight lengths are
/// shown in the report header.
///
/// # Examples
/// ```
/// use baras_report_types::formatting::format_fight_duration;
/// assert_eq!(format_fight_duration(125_400), "2:05");
/// assert_eq!(format_fight_duration(0), "0:00");
/// ```
pub fn format_fight_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a 0..=1 ratio as a whole percentage.
///
/// # Examples
/// ```
/// use baras_report_types::formatting::format_ratio_pct;
/// assert_eq!(format_ratio_pct(0.876, false), "88%");
/// assert_eq!(format_ratio_pct(1.2, false), "120%");
/// ```
pub fn format_ratio_pct(ratio: f64, european: bool) -> String {
    localize(format!("{:.0}%", ratio * 100.0), european)
}

/// Format a cooldown in milliseconds as seconds, e.g. `"45s"` or `"1.5s"`.
pub fn format_cooldown(ms: u64, european: bool) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        localize(format!("{:.1}s", ms as f64 / 1000.0), european)
    }
}
