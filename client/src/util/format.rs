//! Display formatting for feed values.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Shorten an RFC 3339 timestamp to `YYYY-MM-DD HH:MM`.
///
/// Values that do not look like RFC 3339 are returned unchanged.
pub fn short_timestamp(ts: &str) -> String {
    let bytes = ts.as_bytes();
    let looks_rfc3339 = bytes.len() >= 16
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && (bytes[10] == b'T' || bytes[10] == b' ')
        && bytes[13] == b':';
    if !looks_rfc3339 {
        return ts.to_owned();
    }
    match (ts.get(..10), ts.get(11..16)) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        _ => ts.to_owned(),
    }
}

/// Points label, e.g. `1 pt` / `15 pts`.
pub fn points_label(points: u32) -> String {
    if points == 1 {
        "1 pt".to_owned()
    } else {
        format!("{points} pts")
    }
}

/// `n/m solved` label.
pub fn solved_label(solved: usize, total: usize) -> String {
    format!("{solved}/{total} solved")
}
