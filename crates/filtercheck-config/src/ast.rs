//! Data model for filter configurations and test documents: condition
//! operators, rules, rule stores, test cases, and test stores.
//!
//! Reference: Sysmon event filtering,
//! <https://learn.microsoft.com/en-us/sysinternals/downloads/sysmon>

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

// =============================================================================
// Enumerations
// =============================================================================

/// Comparison semantics between a configured pattern and an observed value.
///
/// An operator token outside the recognized set maps to [`ConditionOp::Unrecognized`],
/// which behaves exactly like `is`. Unknown operators are never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionOp {
    /// Pattern is a substring of the observed value.
    #[serde(rename = "contains")]
    Contains,
    /// Pattern is not a substring of the observed value.
    #[serde(rename = "excludes")]
    Excludes,
    /// Exact equality (the default when no condition is given).
    #[serde(rename = "is")]
    Is,
    /// Exact inequality.
    #[serde(rename = "is not")]
    IsNot,
    /// Observed value starts with the pattern.
    #[serde(rename = "begin with")]
    BeginWith,
    /// Observed value ends with the pattern.
    #[serde(rename = "end with")]
    EndWith,
    /// Exact equality, or equality against the text after the last `\`.
    #[serde(rename = "image")]
    Image,
    /// Observed value equals one of the `;`-delimited pattern segments.
    #[serde(rename = "is any")]
    IsAny,
    /// Observed value contains at least one `;`-delimited segment.
    #[serde(rename = "contains any")]
    ContainsAny,
    /// Observed value is missing at least one `;`-delimited segment.
    #[serde(rename = "excludes any")]
    ExcludesAny,
    /// Observed value contains every `;`-delimited segment.
    #[serde(rename = "contains all")]
    ContainsAll,
    /// Observed value contains none of the `;`-delimited segments.
    #[serde(rename = "excludes all")]
    ExcludesAll,
    /// Observed value is lexicographically greater than the pattern
    /// (case-sensitive).
    #[serde(rename = "more than")]
    MoreThan,
    /// Observed value is lexicographically less than the pattern
    /// (case-sensitive).
    #[serde(rename = "less than")]
    LessThan,
    /// Anything else. Evaluates as `is`.
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl ConditionOp {
    /// Parse a condition token, case-insensitively.
    ///
    /// Never fails: an unknown token yields [`ConditionOp::Unrecognized`].
    pub fn from_token(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "contains" => ConditionOp::Contains,
            "excludes" => ConditionOp::Excludes,
            "is" => ConditionOp::Is,
            "is not" => ConditionOp::IsNot,
            "begin with" => ConditionOp::BeginWith,
            "end with" => ConditionOp::EndWith,
            "image" => ConditionOp::Image,
            "is any" => ConditionOp::IsAny,
            "contains any" => ConditionOp::ContainsAny,
            "excludes any" => ConditionOp::ExcludesAny,
            "contains all" => ConditionOp::ContainsAll,
            "excludes all" => ConditionOp::ExcludesAll,
            "more than" => ConditionOp::MoreThan,
            "less than" => ConditionOp::LessThan,
            _ => ConditionOp::Unrecognized,
        }
    }
}

/// How the conditions of a rule are combined.
///
/// Anything that is not `or` (case-insensitive) means `and`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn from_token(s: &str) -> Self {
        if s.eq_ignore_ascii_case("or") {
            BoolOp::Or
        } else {
            BoolOp::And
        }
    }
}

/// The configured disposition of a rule group.
///
/// `Include` and `Exclude` are the documented values of the `onmatch`
/// attribute; any other value passes through unchanged as `Other`.
/// `None` is synthetic: it is produced by classification when no group
/// matched, never by the configuration parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchType {
    Include,
    Exclude,
    None,
    Other(String),
}

impl MatchType {
    /// Parse an `onmatch` attribute value.
    pub fn from_onmatch(s: &str) -> Self {
        match s {
            "include" => MatchType::Include,
            "exclude" => MatchType::Exclude,
            other => MatchType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchType::Include => "include",
            MatchType::Exclude => "exclude",
            MatchType::None => "none",
            MatchType::Other(s) => s,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Rules
// =============================================================================

/// An atomic predicate: one field, one operator, one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: String,
    pub op: ConditionOp,
    pub pattern: String,
}

/// A boolean combination of conditions over one or more fields.
///
/// `required_fields` is derived from the conditions at construction time
/// and used by the evaluator to skip rules that cannot apply to a test
/// case. A rule with a single condition is the degenerate case of a bare
/// filter; its operator is irrelevant.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub operator: BoolOp,
    pub conditions: Vec<Condition>,
    pub required_fields: HashSet<String>,
}

impl Rule {
    pub fn new(operator: BoolOp, conditions: Vec<Condition>) -> Self {
        let required_fields = conditions.iter().map(|c| c.field.clone()).collect();
        Rule {
            operator,
            conditions,
            required_fields,
        }
    }
}

/// All rules of one configured match type for one event type.
#[derive(Debug, Clone, Serialize)]
pub struct RuleGroup {
    pub match_type: MatchType,
    pub rules: Vec<Rule>,
}

/// All rule groups configured for one event type.
#[derive(Debug, Clone, Serialize)]
pub struct EventRules {
    pub event_type: String,
    pub groups: Vec<RuleGroup>,
}

/// The parsed configuration: `EventType -> MatchType -> Vec<Rule>`,
/// insertion-ordered on both levels.
///
/// Built once by the configuration parser (several documents may be
/// merged into one store) and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleStore {
    entries: Vec<EventRules>,
}

impl RuleStore {
    pub fn new() -> Self {
        RuleStore::default()
    }

    /// Append a rule under `event_type`/`match_type`, creating the entry
    /// and group on first use.
    pub fn add_rule(&mut self, event_type: &str, match_type: MatchType, rule: Rule) {
        let ei = match self.entries.iter().position(|e| e.event_type == event_type) {
            Some(i) => i,
            None => {
                self.entries.push(EventRules {
                    event_type: event_type.to_string(),
                    groups: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[ei];
        let gi = match entry.groups.iter().position(|g| g.match_type == match_type) {
            Some(i) => i,
            None => {
                entry.groups.push(RuleGroup {
                    match_type,
                    rules: Vec::new(),
                });
                entry.groups.len() - 1
            }
        };
        entry.groups[gi].rules.push(rule);
    }

    /// Fold another parsed configuration into this one.
    pub fn merge(&mut self, other: RuleStore) {
        for entry in other.entries {
            for group in entry.groups {
                for rule in group.rules {
                    self.add_rule(&entry.event_type, group.match_type.clone(), rule);
                }
            }
        }
    }

    pub fn get(&self, event_type: &str) -> Option<&EventRules> {
        self.entries.iter().find(|e| e.event_type == event_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRules> {
        self.entries.iter()
    }

    /// Number of event types with at least one rule group.
    pub fn event_type_count(&self) -> usize {
        self.entries.len()
    }

    pub fn group_count(&self) -> usize {
        self.entries.iter().map(|e| e.groups.len()).sum()
    }

    pub fn rule_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.groups)
            .map(|g| g.rules.len())
            .sum()
    }

    pub fn condition_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.groups)
            .flat_map(|g| &g.rules)
            .map(|r| r.conditions.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Test cases
// =============================================================================

/// One observed field of a test case.
///
/// The value side is always an ordered sequence of strings, length 1 for
/// scalar observations. Operators are applied uniformly over the
/// sequence: a condition on the field matches if any value satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub field: String,
    pub values: Vec<String>,
}

impl FieldValue {
    /// A single-value observation.
    pub fn scalar(field: &str, value: &str) -> Self {
        FieldValue {
            field: field.to_string(),
            values: vec![value.to_string()],
        }
    }
}

/// One synthetic observation to classify.
///
/// Multi-field cases model a single composite observation: several
/// attribute values that are evaluated together against multi-field
/// rules. `required_fields` mirrors the fields present in `values`.
#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    pub values: Vec<FieldValue>,
    pub required_fields: HashSet<String>,
}

impl TestCase {
    pub fn new(values: Vec<FieldValue>) -> Self {
        let required_fields = values.iter().map(|v| v.field.clone()).collect();
        TestCase {
            values,
            required_fields,
        }
    }
}

/// All test cases declared for one event type.
#[derive(Debug, Clone, Serialize)]
pub struct EventTests {
    pub event_type: String,
    pub cases: Vec<TestCase>,
}

/// The parsed test corpus: `EventType -> Vec<TestCase>`, insertion-ordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestStore {
    entries: Vec<EventTests>,
}

impl TestStore {
    pub fn new() -> Self {
        TestStore::default()
    }

    pub fn add_case(&mut self, event_type: &str, case: TestCase) {
        match self.entries.iter_mut().find(|e| e.event_type == event_type) {
            Some(entry) => entry.cases.push(case),
            None => self.entries.push(EventTests {
                event_type: event_type.to_string(),
                cases: vec![case],
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventTests> {
        self.entries.iter()
    }

    /// Total number of test cases across all event types.
    pub fn case_count(&self) -> usize {
        self.entries.iter().map(|e| e.cases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
