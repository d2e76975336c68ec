//! Compiled matchers for condition evaluation.
//!
//! Each `CompiledMatcher` variant is pre-compiled at store load time:
//! the pattern is lowercased once (all comparisons except the
//! lexicographic pair are case-insensitive) and the `*any`/`*all` family
//! is pre-split on `;`. At evaluation time, `matches()` performs the
//! comparison against one observed string.

use filtercheck_config::ConditionOp;

/// A pre-compiled matcher for a single condition.
///
/// String payloads are stored lowercased except for `MoreThan`/`LessThan`,
/// which compare raw codepoints against the original-case pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledMatcher {
    /// Pattern is a substring of the observed value.
    Contains(String),
    /// Pattern is not a substring of the observed value.
    Excludes(String),
    /// Exact equality. Also the fallback for unrecognized operators.
    Is(String),
    /// Exact inequality.
    IsNot(String),
    /// Observed value starts with the pattern.
    BeginWith(String),
    /// Observed value ends with the pattern.
    EndWith(String),
    /// Equality against the full value or its last `\`-separated segment.
    Image(String),
    /// Observed value equals at least one segment.
    IsAny(Vec<String>),
    /// Observed value contains at least one segment.
    ContainsAny(Vec<String>),
    /// Observed value is missing at least one segment.
    ExcludesAny(Vec<String>),
    /// Observed value contains every segment.
    ContainsAll(Vec<String>),
    /// Observed value contains none of the segments.
    ExcludesAll(Vec<String>),
    /// Lexicographically greater than the pattern (case-sensitive).
    MoreThan(String),
    /// Lexicographically less than the pattern (case-sensitive).
    LessThan(String),
}

impl CompiledMatcher {
    /// Compile an operator + pattern pair.
    pub fn compile(op: ConditionOp, pattern: &str) -> Self {
        let folded = pattern.to_lowercase();
        match op {
            ConditionOp::Contains => CompiledMatcher::Contains(folded),
            ConditionOp::Excludes => CompiledMatcher::Excludes(folded),
            ConditionOp::Is | ConditionOp::Unrecognized => CompiledMatcher::Is(folded),
            ConditionOp::IsNot => CompiledMatcher::IsNot(folded),
            ConditionOp::BeginWith => CompiledMatcher::BeginWith(folded),
            ConditionOp::EndWith => CompiledMatcher::EndWith(folded),
            ConditionOp::Image => CompiledMatcher::Image(folded),
            ConditionOp::IsAny => CompiledMatcher::IsAny(segments(&folded)),
            ConditionOp::ContainsAny => CompiledMatcher::ContainsAny(segments(&folded)),
            ConditionOp::ExcludesAny => CompiledMatcher::ExcludesAny(segments(&folded)),
            ConditionOp::ContainsAll => CompiledMatcher::ContainsAll(segments(&folded)),
            ConditionOp::ExcludesAll => CompiledMatcher::ExcludesAll(segments(&folded)),
            ConditionOp::MoreThan => CompiledMatcher::MoreThan(pattern.to_string()),
            ConditionOp::LessThan => CompiledMatcher::LessThan(pattern.to_string()),
        }
    }

    /// Check the matcher against one observed value.
    ///
    /// Pure and total: no matcher can fail.
    pub fn matches(&self, observed: &str) -> bool {
        match self {
            // Lexicographic comparisons keep the case intact
            CompiledMatcher::MoreThan(p) => observed > p.as_str(),
            CompiledMatcher::LessThan(p) => observed < p.as_str(),
            other => other.matches_folded(&observed.to_lowercase()),
        }
    }

    fn matches_folded(&self, v: &str) -> bool {
        match self {
            CompiledMatcher::Contains(p) => v.contains(p.as_str()),
            CompiledMatcher::Excludes(p) => !v.contains(p.as_str()),
            CompiledMatcher::Is(p) => v == p,
            CompiledMatcher::IsNot(p) => v != p,
            CompiledMatcher::BeginWith(p) => v.starts_with(p.as_str()),
            CompiledMatcher::EndWith(p) => v.ends_with(p.as_str()),
            CompiledMatcher::Image(p) => {
                v == p || v.rsplit('\\').next().is_some_and(|base| base == p)
            }
            CompiledMatcher::IsAny(ps) => ps.iter().any(|p| v == p),
            CompiledMatcher::ContainsAny(ps) => ps.iter().any(|p| v.contains(p.as_str())),
            CompiledMatcher::ExcludesAny(ps) => ps.iter().any(|p| !v.contains(p.as_str())),
            CompiledMatcher::ContainsAll(ps) => ps.iter().all(|p| v.contains(p.as_str())),
            CompiledMatcher::ExcludesAll(ps) => ps.iter().all(|p| !v.contains(p.as_str())),
            // Handled in matches() before folding
            CompiledMatcher::MoreThan(_) | CompiledMatcher::LessThan(_) => false,
        }
    }
}

/// Split a pattern on `;` with no trimming. A pattern without `;` yields
/// one segment.
fn segments(folded: &str) -> Vec<String> {
    folded.split(';').map(str::to_string).collect()
}
