//! XML → data-model parsers for the two input documents.
//!
//! Handles:
//! - Filter configurations: `EventFiltering` → `RuleGroup` → event-type
//!   elements (`onmatch` attribute) → `Rule` elements or bare filters
//! - Test documents: event-type elements → bare field elements or `Rule`
//!   composites carrying several fields of one observation
//!
//! Structural problems (missing `EventFiltering`, missing `onmatch`, a
//! `Rule` with no conditions, unparseable XML) are hard errors. Unknown
//! condition operators and unknown `onmatch` values are not: the former
//! degrade to `is`, the latter pass through as custom match types.

use std::fs;
use std::path::Path;

use crate::ast::{BoolOp, Condition, ConditionOp, FieldValue, MatchType, Rule, RuleStore, TestCase, TestStore};
use crate::error::{ParseError, Result};
use crate::xml::{XmlNode, parse_document};

// =============================================================================
// Configuration documents
// =============================================================================

/// Parse a filter configuration from an XML string.
///
/// The returned store maps `EventType -> MatchType -> Vec<Rule>` in
/// document order. The `groupRelation` attribute of `RuleGroup` itself is
/// ignored: match-type groups are combined with OR semantics regardless.
pub fn parse_config_str(xml: &str) -> Result<RuleStore> {
    let root = parse_document(xml)?;
    let filtering = root
        .child("EventFiltering")
        .ok_or_else(|| ParseError::MissingElement("EventFiltering".to_string()))?;

    let mut store = RuleStore::new();
    for rule_group in filtering.children_named("RuleGroup") {
        for event_el in &rule_group.children {
            let event_type = event_el.name.as_str();
            let onmatch = event_el.attr("onmatch").ok_or_else(|| {
                ParseError::MissingAttribute {
                    element: event_type.to_string(),
                    attribute: "onmatch".to_string(),
                }
            })?;
            let match_type = MatchType::from_onmatch(onmatch);

            for entry in &event_el.children {
                let rule = if entry.name == "Rule" {
                    // Sysmon defaults groupRelation to "or" when absent
                    let operator =
                        BoolOp::from_token(entry.attr("groupRelation").unwrap_or("or"));
                    if entry.children.is_empty() {
                        return Err(ParseError::EmptyRule {
                            event_type: event_type.to_string(),
                            match_type: match_type.as_str().to_string(),
                        });
                    }
                    let conditions = entry.children.iter().map(condition_from).collect();
                    Rule::new(operator, conditions)
                } else {
                    // A bare filter is a single-condition rule
                    Rule::new(BoolOp::Or, vec![condition_from(entry)])
                };
                store.add_rule(event_type, match_type.clone(), rule);
            }
        }
    }
    Ok(store)
}

/// Parse a filter configuration from a file.
pub fn parse_config_file(path: &Path) -> Result<RuleStore> {
    let xml = fs::read_to_string(path)?;
    parse_config_str(&xml)
}

fn condition_from(el: &XmlNode) -> Condition {
    Condition {
        field: el.name.clone(),
        // Default comparison is "is"
        op: el
            .attr("condition")
            .map(ConditionOp::from_token)
            .unwrap_or(ConditionOp::Is),
        pattern: el.text.clone(),
    }
}

// =============================================================================
// Test documents
// =============================================================================

/// Parse a test document from an XML string.
///
/// A bare field element is a single-field test case. A `Rule` element
/// groups several field elements into one composite observation, the
/// same way the configuration groups filters into a rule.
pub fn parse_tests_str(xml: &str) -> Result<TestStore> {
    let root = parse_document(xml)?;
    let mut store = TestStore::new();
    for event_el in &root.children {
        for entry in &event_el.children {
            let case = if entry.name == "Rule" {
                TestCase::new(
                    entry
                        .children
                        .iter()
                        .map(|f| FieldValue::scalar(&f.name, &f.text))
                        .collect(),
                )
            } else {
                TestCase::new(vec![FieldValue::scalar(&entry.name, &entry.text)])
            };
            store.add_case(&event_el.name, case);
        }
    }
    Ok(store)
}

/// Parse a test document from a file.
pub fn parse_tests_file(path: &Path) -> Result<TestStore> {
    let xml = fs::read_to_string(path)?;
    parse_tests_str(&xml)
}
