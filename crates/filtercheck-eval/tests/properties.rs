//! Property tests for the matcher and evaluator laws.

use filtercheck_config::{BoolOp, Condition, ConditionOp, FieldValue, Rule, TestCase};
use filtercheck_eval::{CompiledMatcher, compile_rule, evaluate_rule};
use proptest::prelude::*;

/// Every operator except the lexicographic pair.
fn case_insensitive_ops() -> impl Strategy<Value = ConditionOp> {
    prop_oneof![
        Just(ConditionOp::Contains),
        Just(ConditionOp::Excludes),
        Just(ConditionOp::Is),
        Just(ConditionOp::IsNot),
        Just(ConditionOp::BeginWith),
        Just(ConditionOp::EndWith),
        Just(ConditionOp::Image),
        Just(ConditionOp::IsAny),
        Just(ConditionOp::ContainsAny),
        Just(ConditionOp::ExcludesAny),
        Just(ConditionOp::ContainsAll),
        Just(ConditionOp::ExcludesAll),
        Just(ConditionOp::Unrecognized),
    ]
}

proptest! {
    /// Case of the observed value never changes the outcome.
    #[test]
    fn matching_ignores_value_case(
        op in case_insensitive_ops(),
        pattern in "[a-zA-Z0-9;\\\\. ]{0,20}",
        value in "[a-zA-Z0-9;\\\\. ]{0,20}",
    ) {
        let matcher = CompiledMatcher::compile(op, &pattern);
        prop_assert_eq!(
            matcher.matches(&value),
            matcher.matches(&value.to_uppercase())
        );
        prop_assert_eq!(
            matcher.matches(&value),
            matcher.matches(&value.to_lowercase())
        );
    }

    /// Case of the pattern never changes the outcome either.
    #[test]
    fn matching_ignores_pattern_case(
        op in case_insensitive_ops(),
        pattern in "[a-zA-Z0-9;\\\\. ]{0,20}",
        value in "[a-zA-Z0-9;\\\\. ]{0,20}",
    ) {
        let lower = CompiledMatcher::compile(op, &pattern);
        let upper = CompiledMatcher::compile(op, &pattern.to_uppercase());
        prop_assert_eq!(lower.matches(&value), upper.matches(&value));
    }

    /// A rule sharing no field with a test case never matches,
    /// whatever its conditions say.
    #[test]
    fn fast_reject_on_disjoint_fields(
        op in case_insensitive_ops(),
        operator in prop_oneof![Just(BoolOp::And), Just(BoolOp::Or)],
        pattern in "[a-zA-Z0-9]{0,10}",
        value in "[a-zA-Z0-9]{0,10}",
    ) {
        let rule = compile_rule(&Rule::new(
            operator,
            vec![Condition {
                field: "CommandLine".into(),
                op,
                pattern,
            }],
        ));
        let case = TestCase::new(vec![FieldValue::scalar("Image", &value)]);
        prop_assert!(!evaluate_rule(&rule, &case));
    }

    /// Unknown operators behave exactly like `is`.
    #[test]
    fn unrecognized_equals_is(
        pattern in "[a-zA-Z0-9]{0,10}",
        value in "[a-zA-Z0-9]{0,10}",
    ) {
        let is = CompiledMatcher::compile(ConditionOp::Is, &pattern);
        let unk = CompiledMatcher::compile(ConditionOp::Unrecognized, &pattern);
        prop_assert_eq!(is.matches(&value), unk.matches(&value));
    }

    /// AND over two conditions is commutative.
    #[test]
    fn and_aggregation_is_commutative(
        p1 in "[a-z0-9]{0,8}",
        p2 in "[a-z0-9]{0,8}",
        v1 in "[a-z0-9]{0,8}",
        v2 in "[a-z0-9]{0,8}",
    ) {
        let a = Condition { field: "Image".into(), op: ConditionOp::Contains, pattern: p1 };
        let b = Condition { field: "CommandLine".into(), op: ConditionOp::Contains, pattern: p2 };
        let case = TestCase::new(vec![
            FieldValue::scalar("Image", &v1),
            FieldValue::scalar("CommandLine", &v2),
        ]);
        let fwd = compile_rule(&Rule::new(BoolOp::And, vec![a.clone(), b.clone()]));
        let rev = compile_rule(&Rule::new(BoolOp::And, vec![b, a]));
        prop_assert_eq!(evaluate_rule(&fwd, &case), evaluate_rule(&rev, &case));
    }
}
