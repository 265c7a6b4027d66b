use chrono::{DateTime, NaiveDateTime};

pub const UNKNOWN_DATE: &str = "Unknown date";

/// Locale-style rendering of server timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `vi-VN`: `14:05:09 17/2/2026`
    #[default]
    Vietnamese,
    /// `en-US`: `2/17/2026, 2:05:09 PM`
    UsEnglish,
    Iso,
}

impl DateStyle {
    pub fn from_locale(locale: &str) -> Option<Self> {
        match locale.trim().to_ascii_lowercase().as_str() {
            "vi" | "vi-vn" => Some(Self::Vietnamese),
            "en" | "en-us" => Some(Self::UsEnglish),
            "iso" => Some(Self::Iso),
            _ => None,
        }
    }

    /// Timestamps are shown in the offset they were sent with; unparseable
    /// values are shown as-is.
    pub fn format(self, raw: Option<&str>) -> String {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return UNKNOWN_DATE.to_string();
        };
        match parse_timestamp(raw) {
            Some(timestamp) => timestamp.format(self.pattern()).to_string(),
            None => raw.to_string(),
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Vietnamese => "%H:%M:%S %-d/%-m/%Y",
            Self::UsEnglish => "%-m/%-d/%Y, %-I:%M:%S %p",
            Self::Iso => "%Y-%m-%d %H:%M:%S",
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
