//! XML rendering of classification reports.
//!
//! Buckets and event sections carry annotative comments: the match-type
//! description and the numeric Sysmon EventID(s) of each event type.
//! Test cases print back the way they were declared: a single field
//! element for scalar cases, a `Rule` wrapper for composite ones.

use std::fmt::Write;

use filtercheck_config::{TestCase, event_ids, match_type_description};
use filtercheck_eval::Report;
use quick_xml::escape::escape;

const INDENT: &str = "   ";

/// Render a report as a pretty-printed XML document.
pub fn render_xml(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<Results>\n");

    for bucket in &report.buckets {
        let mt = bucket.match_type.as_str();
        let _ = writeln!(
            out,
            "{INDENT}<!--Match type \"{mt}\" : {}-->",
            match_type_description(&bucket.match_type)
        );
        if bucket.events.is_empty() {
            let _ = writeln!(out, "{INDENT}<{mt}></{mt}>");
            continue;
        }
        let _ = writeln!(out, "{INDENT}<{mt}>");
        for event in &bucket.events {
            let ids = event_ids(&event.event_type).unwrap_or("unknown");
            let _ = writeln!(
                out,
                "{INDENT}{INDENT}<!--Sysmon event {} - EventID {ids}-->",
                event.event_type
            );
            let _ = writeln!(out, "{INDENT}{INDENT}<{}>", event.event_type);
            for case in &event.cases {
                render_case(&mut out, case);
            }
            let _ = writeln!(out, "{INDENT}{INDENT}</{}>", event.event_type);
        }
        let _ = writeln!(out, "{INDENT}</{mt}>");
    }

    out.push_str("</Results>\n");
    out
}

fn render_case(out: &mut String, case: &TestCase) {
    let scalar = case.values.len() == 1 && case.values[0].values.len() == 1;
    let depth = if scalar { 3 } else { 4 };
    if !scalar {
        let _ = writeln!(out, "{}<Rule>", INDENT.repeat(3));
    }
    for fv in &case.values {
        for value in &fv.values {
            let _ = writeln!(
                out,
                "{}<{field}>{}</{field}>",
                INDENT.repeat(depth),
                escape(value.as_str()),
                field = fv.field
            );
        }
    }
    if !scalar {
        let _ = writeln!(out, "{}</Rule>", INDENT.repeat(3));
    }
}
