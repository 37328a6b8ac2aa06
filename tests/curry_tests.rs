//! Integration tests for the curry adapter.
//!
//! Covers incremental application, branch independence, both satisfaction
//! policies, keyword handling, native callables, and construction failures.

use std::cell::RefCell;
use std::rc::Rc;

use currying::{
    Arguments, BoundArguments, CallError, Callable, Curried, CurryError, Function,
    InvalidTargetError, Metadata, Outcome, Parameter, SatisfactionPolicy, SharedList, Signature,
    Value, args, builtins, curry, curry_with_defaults,
};
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

/// `func(a, b, *, c, d) -> ((a, b), {"c": c, "d": d})`
#[fixture]
fn func() -> Function {
    Function::new(
        "func",
        Signature::new([
            Parameter::positional("a"),
            Parameter::positional("b"),
            Parameter::keyword_only("c"),
            Parameter::keyword_only("d"),
        ]),
        |arguments| {
            let pair = Value::tuple([arguments.require("a")?.clone(), arguments.require("b")?.clone()]);
            let options = Value::dict([
                ("c", arguments.require("c")?.clone()),
                ("d", arguments.require("d")?.clone()),
            ]);
            Ok(Value::tuple([pair, options]))
        },
    )
    .with_doc("Pairs positional values with keyword options.")
}

fn add_bound(arguments: &BoundArguments) -> Result<Value, CallError> {
    let a: i64 = arguments.require("a")?.extract()?;
    let b: i64 = arguments.require("b")?.extract()?;
    Ok(Value::from(a + b))
}

/// `add(a, b) -> a + b`
#[fixture]
fn add() -> Function {
    Function::new(
        "add",
        Signature::new([Parameter::positional("a"), Parameter::positional("b")]),
        add_bound,
    )
}

/// `add_default(a, b=10) -> a + b`
#[fixture]
fn add_default() -> Function {
    Function::new(
        "add_default",
        Signature::new([
            Parameter::positional("a"),
            Parameter::positional("b").with_default(10),
        ]),
        add_bound,
    )
}

fn expected_func_result(a: impl Into<Value>, b: impl Into<Value>, c: impl Into<Value>, d: impl Into<Value>) -> Value {
    Value::tuple([
        Value::tuple([a.into(), b.into()]),
        Value::dict([("c", c.into()), ("d", d.into())]),
    ])
}

fn ready(outcome: Result<Outcome, CallError>) -> Value {
    outcome
        .expect("call failed")
        .into_value()
        .expect("expected the target to be invoked")
}

fn pending(outcome: Result<Outcome, CallError>) -> Curried {
    outcome
        .expect("call failed")
        .into_pending()
        .expect("expected a pending adapter")
}

// =============================================================================
// Incremental application
// =============================================================================

#[rstest]
fn test_basic_example(func: Function) {
    let curried = curry(func).unwrap();
    let result = curried
        .call(args![1])
        .and_then(|outcome| outcome.call(args![2]))
        .and_then(|outcome| outcome.call(args![; c = 10]))
        .and_then(|outcome| outcome.call(args![; d = 20]));

    assert_eq!(ready(result), expected_func_result(1, 2, 10, 20));
}

#[rstest]
fn test_all_at_once_matches_direct_call(func: Function) {
    let direct = func.invoke(args![1, 2; c = 10, d = 20]).unwrap();
    let curried = curry(func).unwrap();

    assert_eq!(ready(curried.call(args![1, 2; c = 10, d = 20])), direct);
}

#[rstest]
fn test_accumulated_state_is_inspectable(func: Function) {
    let curried = curry(func).unwrap();
    let partial = pending(
        curried
            .call(args![1])
            .and_then(|outcome| outcome.call(args![2]))
            .and_then(|outcome| outcome.call(args![; c = 10])),
    );

    assert_eq!(partial.positional(), &[Value::from(1), Value::from(2)]);
    assert_eq!(partial.keyword().len(), 1);
    assert_eq!(partial.keyword().get("c"), Some(&Value::from(10)));
    assert_eq!(partial.target().metadata().name, "func");
    assert_eq!(partial.arity(), 4);
    assert_eq!(partial.supplied_count(), 3);
}

// =============================================================================
// Branch independence
// =============================================================================

#[rstest]
fn test_args_dont_persist(func: Function) {
    let curried = curry(func).unwrap();

    let first = pending(
        curried
            .call(args![1])
            .and_then(|outcome| outcome.call(args![2]))
            .and_then(|outcome| outcome.call(args![; c = 10])),
    );
    let second = pending(
        curried
            .call(args!["a"])
            .and_then(|outcome| outcome.call(args!["b"]))
            .and_then(|outcome| outcome.call(args![; c = "c"])),
    );

    assert_eq!(ready(first.call(args![; d = 20])), expected_func_result(1, 2, 10, 20));
    assert_eq!(
        ready(second.call(args![; d = "d"])),
        expected_func_result("a", "b", "c", "d")
    );
}

#[rstest]
fn test_args_dont_persist_after_first() {
    let three = Function::new(
        "three",
        Signature::new([
            Parameter::positional("a"),
            Parameter::positional("b"),
            Parameter::positional("c"),
        ]),
        |arguments| Ok(Value::list(arguments.values().cloned())),
    );
    let curried = pending(curry(three).unwrap().call(args![1]));

    let given_b = pending(curried.call(args![2]));
    let given_c = pending(curried.call(args![3]));

    assert_eq!(given_b.positional(), &[Value::from(1), Value::from(2)]);
    assert_eq!(given_c.positional(), &[Value::from(1), Value::from(3)]);
    assert_eq!(ready(given_c.call(args![4])), Value::list([1, 3, 4]));
}

#[rstest]
fn test_kwargs_dont_persist() {
    let optional = Function::new(
        "optional",
        Signature::new([
            Parameter::positional("a").with_default(Value::None),
            Parameter::positional("b").with_default(Value::None),
            Parameter::positional("c").with_default(Value::None),
        ]),
        |arguments| Ok(Value::list(arguments.values().cloned())),
    );
    let curried = pending(curry(optional).unwrap().call(args![; a = 1]));

    let given_b = pending(curried.call(args![; b = 2]));
    let given_c = pending(curried.call(args![; c = 3]));

    assert!(given_b.keyword().get("c").is_none());
    assert!(given_c.keyword().get("b").is_none());
    assert_eq!(
        ready(given_c.call(args![; b = 4])),
        Value::list([1, 4, 3])
    );
}

// =============================================================================
// Keyword handling
// =============================================================================

#[rstest]
#[case::keyword_in_second_call(vec![args![1], args![; b = 2]])]
#[case::mixed_single_call(vec![args![1; b = 2]])]
#[case::keywords_only(vec![args![; a = 1, b = 2]])]
#[case::keywords_reversed(vec![args![; b = 2], args![; a = 1]])]
fn test_keyword_positional_equivalence(add: Function, #[case] calls: Vec<Arguments>) {
    let mut outcome = Outcome::Pending(curry(add).unwrap());
    for arguments in calls {
        outcome = outcome.call(arguments).unwrap();
    }
    assert_eq!(outcome.into_value(), Some(Value::from(3)));
}

#[rstest]
fn test_later_keyword_overrides_earlier(add: Function) {
    let partial = pending(curry(add).unwrap().call(args![; a = 1]));
    let overridden = pending(partial.call(args![; a = 5]));

    assert_eq!(overridden.keyword().get("a"), Some(&Value::from(5)));
    assert_eq!(overridden.supplied_count(), 1);
    assert_eq!(ready(overridden.call(args![; b = 1])), Value::from(6));
}

#[rstest]
fn test_wrong_keyword_fails_at_final_call(add: Function) {
    let partial = pending(curry(add).unwrap().call(args![1]));
    let result = partial.call(args![; z = 2]);

    assert_eq!(
        result.unwrap_err(),
        CallError::UnexpectedKeyword {
            callable: "add".into(),
            keyword: "z".into()
        }
    );
}

#[rstest]
fn test_duplicate_fails_at_final_call(add: Function) {
    let partial = pending(curry(add).unwrap().call(args![1]));
    let result = partial.call(args![; a = 2]);

    assert_eq!(
        result.unwrap_err(),
        CallError::DuplicateArgument {
            callable: "add".into(),
            parameter: "a".into()
        }
    );
}

// =============================================================================
// Satisfaction policies
// =============================================================================

#[rstest]
fn test_positional_kwargs_strict(add_default: Function) {
    let curried = curry(add_default).unwrap();
    assert_eq!(curried.policy(), SatisfactionPolicy::Strict);

    let partial = curried.call(args![1]).unwrap();
    assert!(partial.is_pending());
    assert_eq!(ready(partial.call(args![2])), Value::from(3));
}

#[rstest]
fn test_defaults_aware_invokes_early(add_default: Function) {
    let curried = curry_with_defaults(add_default).unwrap();
    assert_eq!(curried.default_count(), 1);
    assert_eq!(ready(curried.call(args![1])), Value::from(11));
}

#[rstest]
fn test_defaults_aware_still_accepts_all(add_default: Function) {
    let curried = curry_with_defaults(add_default).unwrap();
    assert_eq!(ready(curried.call(args![1, 2])), Value::from(3));
}

#[rstest]
fn test_builder_use_defaults_flag(add_default: Function) {
    let curried = Curried::builder(add_default)
        .use_defaults(true)
        .build()
        .unwrap();
    assert_eq!(curried.policy(), SatisfactionPolicy::DefaultsAware);
}

#[rstest]
fn test_policy_inherited_by_descendants() {
    let scale = Function::new(
        "scale",
        Signature::new([
            Parameter::positional("value"),
            Parameter::positional("factor"),
            Parameter::positional("offset").with_default(0),
        ]),
        |arguments| {
            let value: i64 = arguments.require("value")?.extract()?;
            let factor: i64 = arguments.require("factor")?.extract()?;
            let offset: i64 = arguments.require("offset")?.extract()?;
            Ok(Value::from(value * factor + offset))
        },
    );
    let curried = curry_with_defaults(scale).unwrap();
    let partial = pending(curried.call(args![3]));

    assert_eq!(partial.policy(), SatisfactionPolicy::DefaultsAware);
    assert_eq!(ready(partial.call(args![4])), Value::from(12));
}

#[rstest]
fn test_defaults_aware_pends_between_required_and_full() {
    let offset = Function::new(
        "offset",
        Signature::new([
            Parameter::positional("a"),
            Parameter::positional("b").with_default(1),
            Parameter::positional("c").with_default(2),
        ]),
        |arguments| {
            let mut total = 0;
            for value in arguments.values() {
                total += value.extract::<i64>()?;
            }
            Ok(Value::from(total))
        },
    );
    let curried = curry_with_defaults(offset).unwrap();
    assert_eq!(curried.default_count(), 2);

    let partial = pending(curried.call(args![1, 2]));
    assert_eq!(partial.supplied_count(), 2);
    assert_eq!(ready(partial.call(args![; c = 30])), Value::from(33));
}

#[rstest]
fn test_over_supply_keeps_pending(add: Function) {
    let partial = pending(curry(add).unwrap().call(args![1]));
    let over = pending(partial.call(args![; a = 2, b = 3]));

    assert_eq!(over.supplied_count(), 3);
    assert_eq!(over.positional(), &[Value::from(1)]);
}

#[rstest]
fn test_strict_fewer_than_arity_always_pending(func: Function) {
    let mut current = curry(func).unwrap();
    for expected in 1..=3_usize {
        current = pending(current.call(args![0]));
        assert_eq!(current.supplied_count(), expected);
    }
}

// =============================================================================
// Mutable arguments
// =============================================================================

#[rstest]
fn test_mutable_args() {
    let concat = Function::new(
        "concat",
        Signature::new([Parameter::positional("a"), Parameter::positional("b")]),
        |arguments| {
            let mut joined: Vec<Value> = arguments.require("a")?.extract()?;
            joined.extend(arguments.require("b")?.extract::<Vec<Value>>()?);
            Ok(Value::from(joined))
        },
    );
    let curried = curry(concat).unwrap();
    let result = curried
        .call(args![Value::list([1, 2])])
        .and_then(|outcome| outcome.call(args![Value::list([3, 4])]));

    assert_eq!(ready(result), Value::list([1, 2, 3, 4]));
}

#[rstest]
fn test_mutation_visible_to_caller() {
    let append = Function::new(
        "append",
        Signature::new([Parameter::positional("items"), Parameter::positional("item")]),
        |arguments| {
            let items: SharedList = arguments.require("items")?.extract()?;
            items.borrow_mut().push(arguments.require("item")?.clone());
            Ok(Value::None)
        },
    );
    let items: SharedList = Rc::new(RefCell::new(vec![Value::from(1)]));
    let partial = pending(curry(append).unwrap().call(args![Value::List(Rc::clone(&items))]));

    assert_eq!(ready(partial.call(args![2])), Value::None);
    assert_eq!(*items.borrow(), vec![Value::from(1), Value::from(2)]);
}

// =============================================================================
// Native callables and explicit arity
// =============================================================================

#[rstest]
fn test_builtins() {
    let increment = Function::new(
        "increment",
        Signature::new([Parameter::positional("x")]),
        |arguments| Ok(Value::from(arguments.require("x")?.extract::<i64>()? + 1)),
    );
    let mapped = curry(builtins::map())
        .unwrap()
        .call(args![increment])
        .and_then(|outcome| outcome.call(args![Value::list([1, 2, 3, 4])]));

    assert_eq!(ready(mapped), Value::list([2, 3, 4, 5]));

    let square_base = pending(curry(builtins::pow()).unwrap().call(args![2]));
    let power: f64 = ready(square_base.call(args![4])).extract().unwrap();
    assert!((power - 16.0).abs() < f64::EPSILON);
}

#[rstest]
fn test_variadic_target_rejected() {
    let error = curry(builtins::max()).unwrap_err();
    assert_eq!(
        error,
        CurryError::VariadicTarget {
            name: "max".into(),
            parameter: "args".into()
        }
    );
}

#[rstest]
fn test_explicit_arity_on_variadic_native() {
    let curried = Curried::builder(builtins::max()).arity(3).build().unwrap();
    let result = curried
        .call(args![4])
        .and_then(|outcome| outcome.call(args![9, 2]));

    assert_eq!(ready(result), Value::from(9));
}

#[rstest]
fn test_explicit_arity_overrides_signature(add_default: Function) {
    let curried = Curried::builder(add_default).arity(1).build().unwrap();
    assert_eq!(ready(curried.call(args![5])), Value::from(15));
}

struct Opaque {
    metadata: Metadata,
}

impl Callable for Opaque {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn signature(&self) -> Option<&Signature> {
        None
    }

    fn invoke(&self, arguments: Arguments) -> Result<Value, CallError> {
        Ok(Value::from(i64::try_from(arguments.len()).unwrap_or(i64::MAX)))
    }
}

#[rstest]
fn test_unresolvable_arity() {
    let opaque = Opaque {
        metadata: Metadata::named("opaque"),
    };
    let error = curry(Value::callable(opaque)).unwrap_err();
    assert_eq!(
        error,
        CurryError::UnresolvableArity {
            name: "opaque".into()
        }
    );
}

#[rstest]
fn test_unresolvable_arity_with_explicit_arity() {
    let opaque = Opaque {
        metadata: Metadata::named("opaque"),
    };
    let curried = Curried::builder(Value::callable(opaque))
        .arity(2)
        .build()
        .unwrap();
    let partial = pending(curried.call(args!["x"]));
    assert_eq!(ready(partial.call(args!["y"])), Value::from(2));
}

// =============================================================================
// Construction failures and target errors
// =============================================================================

#[rstest]
#[case(Value::from(1), "int")]
#[case(Value::from("add"), "str")]
#[case(Value::None, "none")]
fn test_argument_check(#[case] target: Value, #[case] type_name: &'static str) {
    assert_eq!(
        curry(target).unwrap_err(),
        CurryError::InvalidTarget(InvalidTargetError { type_name })
    );
}

#[rstest]
fn test_target_error_propagates_unchanged() {
    let divide = Function::new(
        "divide",
        Signature::new([
            Parameter::positional("numerator"),
            Parameter::positional("denominator"),
        ]),
        |arguments| {
            let numerator: i64 = arguments.require("numerator")?.extract()?;
            let denominator: i64 = arguments.require("denominator")?.extract()?;
            numerator
                .checked_div(denominator)
                .map(Value::from)
                .ok_or_else(|| CallError::failed("division by zero"))
        },
    );
    let partial = pending(curry(divide).unwrap().call(args![1]));

    assert_eq!(
        partial.call(args![0]).unwrap_err(),
        CallError::failed("division by zero")
    );
}

// =============================================================================
// Metadata propagation
// =============================================================================

#[rstest]
fn test_metadata_propagates_through_chain(func: Function) {
    let root = curry(func).unwrap();
    let child = pending(root.call(args![1]));
    let grandchild = pending(child.call(args![2]));

    for adapter in [&root, &child, &grandchild] {
        assert_eq!(adapter.metadata().name, "func");
        assert_eq!(
            adapter.metadata().doc.as_deref(),
            Some("Pairs positional values with keyword options.")
        );
        assert_eq!(adapter.signature().map(Signature::arity), Some(4));
    }
}

#[rstest]
fn test_curried_as_argument(add: Function) {
    let add_ten = Value::from(pending(curry(add).unwrap().call(args![10])));
    let mapped = builtins::map().invoke(args![add_ten, Value::list([1, 2])]);

    assert_eq!(mapped, Ok(Value::list([11, 12])));
}
