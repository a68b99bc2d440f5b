//! Small shared helpers: date display formatting and width-aware truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a wire-format reminder/created date for display as `DD Mon YYYY`.
///
/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates. Anything that
/// fails to parse is passed through unchanged so the user still sees what
/// the server sent.
#[must_use]
pub fn display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%d %b %Y").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%d %b %Y").to_string();
    }
    trimmed.to_string()
}

/// Truncate `s` to at most `max_width` terminal cells, appending `…` when
/// anything was cut.
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a distance in kilometers for list display.
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.1} km")
    }
}

#[cfg(test)]
mod tests {
    use super::{display_date, format_distance_km, truncate_to_width};

    #[test]
    /// What: Wire dates render as `DD Mon YYYY`, junk passes through.
    ///
    /// - Input: RFC 3339, bare date, and unparsable strings
    /// - Output: Formatted display date, or the input untouched
    fn display_date_formats_known_shapes() {
        assert_eq!(display_date("2024-03-12T08:30:00+00:00"), "12 Mar 2024");
        assert_eq!(display_date("2024-03-12"), "12 Mar 2024");
        assert_eq!(display_date("someday"), "someday");
        assert_eq!(display_date("  2024-12-01  "), "01 Dec 2024");
    }

    #[test]
    /// What: Truncation respects display width and marks cut text.
    ///
    /// - Input: Short and long strings with a narrow budget
    /// - Output: Short strings untouched; long ones end with `…` within budget
    fn truncate_respects_width() {
        assert_eq!(truncate_to_width("home", 10), "home");
        let cut = truncate_to_width("a rather long place name", 10);
        assert!(cut.ends_with('…'));
        assert!(unicode_width::UnicodeWidthStr::width(cut.as_str()) <= 10);
    }

    #[test]
    /// What: Sub-kilometer distances switch to meters.
    ///
    /// - Input: 0.25 km and 12.34 km
    /// - Output: `250 m` and `12.3 km`
    fn distance_formatting() {
        assert_eq!(format_distance_km(0.25), "250 m");
        assert_eq!(format_distance_km(12.34), "12.3 km");
    }
}
