//! Shared data constants for Sysmon event filtering.
//!
//! Centralises the event-type → EventID table and the match-type
//! descriptions used when annotating reports.
//!
//! Reference: <https://learn.microsoft.com/en-us/sysinternals/downloads/sysmon>

use crate::ast::MatchType;

/// Filterable Sysmon event types: `(tag, event IDs)`.
///
/// Event types that map to several EventIDs (registry, pipe, and WMI
/// events) carry a comma-separated list. Service state changes (ID 4)
/// and configuration changes (ID 16) cannot be filtered and are absent.
pub const EVENT_IDS: &[(&str, &str)] = &[
    ("ProcessCreate", "1"),
    ("FileCreateTime", "2"),
    ("NetworkConnect", "3"),
    ("ProcessTerminate", "5"),
    ("DriverLoad", "6"),
    ("ImageLoad", "7"),
    ("CreateRemoteThread", "8"),
    ("RawAccessRead", "9"),
    ("ProcessAccess", "10"),
    ("FileCreate", "11"),
    ("RegistryEvent", "12,13,14"),
    ("FileCreateStreamHash", "15"),
    ("PipeEvent", "17,18"),
    ("WmiEvent", "19,20,21"),
    ("DNSQuery", "22"),
    ("FileDelete", "23"),
    ("ClipboardChange", "24"),
    ("ProcessTampering", "25"),
    ("FileDeleteDetected", "26"),
];

/// Numeric EventID(s) for an event-type tag, if known.
pub fn event_ids(event_type: &str) -> Option<&'static str> {
    EVENT_IDS
        .iter()
        .find(|(tag, _)| *tag == event_type)
        .map(|(_, ids)| *ids)
}

/// Human-readable description of a match type, for report annotations.
pub fn match_type_description(match_type: &MatchType) -> &'static str {
    match match_type {
        MatchType::Include => "Values included by the configuration",
        MatchType::Exclude => "Values excluded by the configuration",
        MatchType::None => "No rule explicitly applies to these values",
        MatchType::Other(_) => "Custom match type",
    }
}
