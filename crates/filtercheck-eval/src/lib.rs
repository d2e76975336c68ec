//! # filtercheck-eval
//!
//! Classification engine for Sysmon-style filter configurations.
//!
//! This crate consumes the stores produced by [`filtercheck_config`] and
//! answers, for every synthetic test case, which match types of the
//! configuration would capture it.
//!
//! ## Architecture
//!
//! - **Condition matcher** ([`matcher`]): one pre-compiled matcher per
//!   condition operator; pure, total, case-insensitive except for the
//!   lexicographic pair.
//! - **Rule evaluator** ([`compiler`]): compiles rules once, then
//!   evaluates them with a required-fields fast-reject, OR over observed
//!   values per field, and short-circuiting AND/OR aggregation.
//! - **Classification engine** ([`engine`]): runs every rule group of a
//!   test case's event type and files the case under each matching
//!   disposition, or under the synthetic `none`.
//!
//! Classification never fails: unknown operators degrade to `is`,
//! absent fields are a non-match, and unconfigured event types classify
//! to `none`. The only error is a structurally broken store (a rule
//! with no conditions), rejected when the engine is built.
//!
//! ## Quick Start
//!
//! ```rust
//! use filtercheck_config::{MatchType, parse_config_str, parse_tests_str};
//! use filtercheck_eval::Engine;
//!
//! let config = parse_config_str(r#"
//! <Sysmon>
//!   <EventFiltering>
//!     <RuleGroup>
//!       <NetworkConnect onmatch="include">
//!         <DestinationPort condition="is any">4444;1337</DestinationPort>
//!       </NetworkConnect>
//!     </RuleGroup>
//!   </EventFiltering>
//! </Sysmon>
//! "#).unwrap();
//!
//! let tests = parse_tests_str(r#"
//! <Tests>
//!   <NetworkConnect>
//!     <DestinationPort>1337</DestinationPort>
//!     <DestinationPort>443</DestinationPort>
//!   </NetworkConnect>
//! </Tests>
//! "#).unwrap();
//!
//! let engine = Engine::from_store(&config).unwrap();
//! let report = engine.run(&tests);
//! assert_eq!(report.bucket(&MatchType::Include).unwrap().events[0].cases.len(), 1);
//! assert_eq!(report.bucket(&MatchType::None).unwrap().events[0].cases.len(), 1);
//! ```

pub mod compiler;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod result;

// Re-export the most commonly used types and functions at crate root
pub use compiler::{CompiledCondition, CompiledRule, compile_rule, evaluate_rule};
pub use engine::Engine;
pub use error::{EvalError, Result};
pub use matcher::CompiledMatcher;
pub use result::{Bucket, EventResults, Report};
