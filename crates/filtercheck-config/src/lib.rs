//! # filtercheck-config
//!
//! Data model and XML adapters for Sysmon-style filter configurations
//! and their test documents.
//!
//! This crate parses the two input documents of a test campaign into
//! strongly-typed, insertion-ordered stores:
//!
//! - **Filter configurations**: `EventFiltering` rule groups, `onmatch`
//!   dispositions, `Rule` combinations, and bare filters with their
//!   condition operators
//! - **Test documents**: per-event-type synthetic observations, single
//!   field or `Rule` composites
//!
//! The stores are plain immutable values handed to the evaluator; this
//! crate makes no matching decisions.
//!
//! ## Quick Start
//!
//! ```rust
//! use filtercheck_config::parse_config_str;
//!
//! let xml = r#"
//! <Sysmon schemaversion="4.50">
//!   <EventFiltering>
//!     <RuleGroup groupRelation="or">
//!       <ProcessCreate onmatch="include">
//!         <CommandLine condition="contains">whoami</CommandLine>
//!       </ProcessCreate>
//!     </RuleGroup>
//!   </EventFiltering>
//! </Sysmon>
//! "#;
//!
//! let store = parse_config_str(xml).unwrap();
//! assert_eq!(store.rule_count(), 1);
//! assert!(store.get("ProcessCreate").is_some());
//! ```

pub mod ast;
pub mod data;
pub mod error;
pub mod parser;
pub mod xml;

// Re-export the most commonly used types and functions at crate root
pub use ast::{
    BoolOp, Condition, ConditionOp, EventRules, EventTests, FieldValue, MatchType, Rule,
    RuleGroup, RuleStore, TestCase, TestStore,
};
pub use data::{EVENT_IDS, event_ids, match_type_description};
pub use error::{ParseError, Result};
pub use parser::{parse_config_file, parse_config_str, parse_tests_file, parse_tests_str};
