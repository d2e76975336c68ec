//! Compile parsed rules into evaluable forms and evaluate them against
//! test cases.
//!
//! The compiler transforms the configuration AST (`Rule`, `Condition`)
//! into compiled forms (`CompiledRule`, `CompiledCondition`) whose
//! patterns are pre-normalized by [`CompiledMatcher::compile`].

use std::collections::HashSet;

use filtercheck_config::{BoolOp, Rule, TestCase};

use crate::matcher::CompiledMatcher;

/// A compiled condition: a field name and its pre-compiled matcher.
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub field: String,
    pub matcher: CompiledMatcher,
}

/// A compiled rule, ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub operator: BoolOp,
    pub conditions: Vec<CompiledCondition>,
    /// Fields referenced by the conditions, for the fast-reject check.
    pub required_fields: HashSet<String>,
}

/// Compile a parsed rule.
pub fn compile_rule(rule: &Rule) -> CompiledRule {
    CompiledRule {
        operator: rule.operator,
        conditions: rule
            .conditions
            .iter()
            .map(|c| CompiledCondition {
                field: c.field.clone(),
                matcher: CompiledMatcher::compile(c.op, &c.pattern),
            })
            .collect(),
        required_fields: rule.required_fields.clone(),
    }
}

/// Evaluate a compiled rule against one test case.
///
/// A condition matches the case if ANY observed value for its field
/// satisfies the matcher (uniformly over value sequences). Condition
/// results are aggregated with the rule's operator: `or` short-circuits
/// to true on the first match, `and` (anything else) short-circuits to
/// false on the first miss.
pub fn evaluate_rule(rule: &CompiledRule, case: &TestCase) -> bool {
    // Rules that share no field with the test case cannot apply
    if rule.required_fields.is_disjoint(&case.required_fields) {
        return false;
    }
    // A rule without conditions matches nothing
    if rule.conditions.is_empty() {
        return false;
    }

    let field_match = |cond: &CompiledCondition| {
        case.values
            .iter()
            .filter(|fv| fv.field == cond.field)
            .any(|fv| fv.values.iter().any(|v| cond.matcher.matches(v)))
    };

    match rule.operator {
        BoolOp::Or => rule.conditions.iter().any(field_match),
        BoolOp::And => rule.conditions.iter().all(field_match),
    }
}
