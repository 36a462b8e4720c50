//! Status taxonomy.
//!
//! Maps the vendor's textual status tokens onto the fixed numeric codes
//! exported by every gauge. The mapping is total: unrecognized tokens become
//! [`StatusCode::Unknown`] so a schema change upstream degrades a single value
//! instead of failing the probe.

use std::fmt;

/// Normalized health of a service or one of its components.
///
/// The numbering is categorical. No `Ord` is derived: consumers compare codes
/// by identity, never by magnitude.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCode {
    #[default]
    Unknown = 0,
    Operational = 1,
    PlannedMaintenance = 2,
    DegradedPerformance = 3,
    PartialOutage = 4,
    MajorOutage = 5,
    SecurityIssue = 6,
}

impl StatusCode {
    /// Legend appended to the help text of the status gauges.
    pub const HELP: &'static str = "0 - Unknown, 1 - Operational, 2 - Planned Maintenance, \
         3 - Degraded Performance, 4 - Partial Outage, 5 - Major Outage, 6 - Security Issue";

    /// Interpret a status token.
    ///
    /// Accepts both component statuses (`operational`, `major_outage`, ...)
    /// and the page-level indicator vocabulary (`none`, `minor`, `major`,
    /// `critical`). Matching is case-insensitive and ignores surrounding
    /// whitespace.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "operational" | "none" => StatusCode::Operational,
            "under_maintenance" | "maintenance" | "planned_maintenance" => {
                StatusCode::PlannedMaintenance
            }
            "degraded_performance" | "minor" => StatusCode::DegradedPerformance,
            "partial_outage" | "major" => StatusCode::PartialOutage,
            "major_outage" | "critical" => StatusCode::MajorOutage,
            "security_issue" | "security_event" | "security" => StatusCode::SecurityIssue,
            _ => StatusCode::Unknown,
        }
    }

    /// Numeric value written to the gauges.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Unknown => "Unknown",
            StatusCode::Operational => "Operational",
            StatusCode::PlannedMaintenance => "Planned Maintenance",
            StatusCode::DegradedPerformance => "Degraded Performance",
            StatusCode::PartialOutage => "Partial Outage",
            StatusCode::MajorOutage => "Major Outage",
            StatusCode::SecurityIssue => "Security Issue",
        }
    }
}

impl From<Option<&str>> for StatusCode {
    fn from(token: Option<&str>) -> Self {
        token.map(StatusCode::from_token).unwrap_or_default()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_tokens() {
        let cases = [
            ("operational", 1),
            ("under_maintenance", 2),
            ("degraded_performance", 3),
            ("partial_outage", 4),
            ("major_outage", 5),
            ("security_issue", 6),
        ];
        for (token, code) in cases {
            assert_eq!(StatusCode::from_token(token).code(), code, "token {token}");
        }
    }

    #[test]
    fn test_indicator_tokens() {
        assert_eq!(StatusCode::from_token("none"), StatusCode::Operational);
        assert_eq!(StatusCode::from_token("minor"), StatusCode::DegradedPerformance);
        assert_eq!(StatusCode::from_token("major"), StatusCode::PartialOutage);
        assert_eq!(StatusCode::from_token("critical"), StatusCode::MajorOutage);
        assert_eq!(StatusCode::from_token("maintenance"), StatusCode::PlannedMaintenance);
    }

    #[test]
    fn test_unknown_tokens_degrade() {
        for token in ["", "   ", "on_fire", "operational!", "1"] {
            assert_eq!(StatusCode::from_token(token), StatusCode::Unknown, "token {token:?}");
        }
        assert_eq!(StatusCode::from(None), StatusCode::Unknown);
    }

    #[test]
    fn test_tokens_are_normalized() {
        assert_eq!(StatusCode::from_token(" Major_Outage\n"), StatusCode::MajorOutage);
        assert_eq!(StatusCode::from_token("OPERATIONAL"), StatusCode::Operational);
    }
}
