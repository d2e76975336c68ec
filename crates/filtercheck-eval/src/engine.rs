//! Classification engine.
//!
//! The `Engine` compiles a rule store once and classifies test cases
//! against it. Classification is stateless and read-only: repeated runs
//! over the same stores produce identical reports.

use filtercheck_config::{MatchType, RuleStore, TestCase, TestStore};

use crate::compiler::{CompiledRule, compile_rule, evaluate_rule};
use crate::error::{EvalError, Result};
use crate::result::Report;

/// The classification engine.
///
/// Holds the compiled rule groups of one configuration, grouped by
/// event type and match type in configuration order.
///
/// # Example
///
/// ```rust
/// use filtercheck_config::{MatchType, parse_config_str, parse_tests_str};
/// use filtercheck_eval::Engine;
///
/// let config = parse_config_str(r#"
/// <Sysmon>
///   <EventFiltering>
///     <RuleGroup>
///       <ProcessCreate onmatch="include">
///         <CommandLine condition="contains">whoami</CommandLine>
///       </ProcessCreate>
///     </RuleGroup>
///   </EventFiltering>
/// </Sysmon>
/// "#).unwrap();
/// let tests = parse_tests_str(r#"
/// <Tests>
///   <ProcessCreate>
///     <CommandLine>cmd /c whoami</CommandLine>
///   </ProcessCreate>
/// </Tests>
/// "#).unwrap();
///
/// let engine = Engine::from_store(&config).unwrap();
/// let report = engine.run(&tests);
/// let include = report.bucket(&MatchType::Include).unwrap();
/// assert_eq!(include.events[0].event_type, "ProcessCreate");
/// ```
pub struct Engine {
    entries: Vec<EventEntry>,
}

struct EventEntry {
    event_type: String,
    groups: Vec<CompiledGroup>,
}

struct CompiledGroup {
    match_type: MatchType,
    rules: Vec<CompiledRule>,
}

impl Engine {
    /// Compile every rule of a store.
    ///
    /// Fails on a rule with no conditions: such a rule can never match
    /// and always indicates a store built in violation of the data
    /// model (the XML parser rejects it upfront).
    pub fn from_store(store: &RuleStore) -> Result<Self> {
        let mut entries = Vec::new();
        for event in store.iter() {
            let mut groups = Vec::new();
            for group in &event.groups {
                for rule in &group.rules {
                    if rule.conditions.is_empty() {
                        return Err(EvalError::EmptyRule {
                            event_type: event.event_type.clone(),
                            match_type: group.match_type.as_str().to_string(),
                        });
                    }
                }
                groups.push(CompiledGroup {
                    match_type: group.match_type.clone(),
                    rules: group.rules.iter().map(compile_rule).collect(),
                });
            }
            entries.push(EventEntry {
                event_type: event.event_type.clone(),
                groups,
            });
        }
        Ok(Engine { entries })
    }

    /// Classify one test case for the given event type.
    ///
    /// Returns the match types whose groups contain at least one
    /// matching rule, in configuration order. Empty when no group
    /// matched or when the event type has no configuration; the caller
    /// maps an empty outcome to `none`. A case may land in several
    /// match types at once (configurations are not required to be
    /// mutually exclusive).
    pub fn classify(&self, event_type: &str, case: &TestCase) -> Vec<MatchType> {
        let Some(entry) = self.entries.iter().find(|e| e.event_type == event_type) else {
            return Vec::new();
        };
        entry
            .groups
            .iter()
            .filter(|g| g.rules.iter().any(|r| evaluate_rule(r, case)))
            .map(|g| g.match_type.clone())
            .collect()
    }

    /// Classify a whole test corpus into a report.
    ///
    /// Cases with an empty outcome are filed under the synthetic `none`
    /// bucket, which is always present.
    pub fn run(&self, tests: &TestStore) -> Report {
        let mut report = Report::new();
        for event in tests.iter() {
            for case in &event.cases {
                let outcome = self.classify(&event.event_type, case);
                if outcome.is_empty() {
                    report.push(MatchType::None, &event.event_type, case.clone());
                } else {
                    for match_type in outcome {
                        report.push(match_type, &event.event_type, case.clone());
                    }
                }
            }
        }
        report
    }

    /// Number of compiled rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.groups)
            .map(|g| g.rules.len())
            .sum()
    }

    /// Number of event types with configuration.
    pub fn event_type_count(&self) -> usize {
        self.entries.len()
    }
}
