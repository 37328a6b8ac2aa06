//! A few ready-made callables.
//!
//! - [`map`]: native; its parameters are only visible on its call operator.
//! - [`pow`]: an ordinary function with positional-only parameters.
//! - [`max`]: native with a variadic call operator, so it can only be curried
//!   with an explicit arity.

use crate::callable::{Function, Native};
use crate::error::CallError;
use crate::signature::{BoundArguments, Parameter, Signature};
use crate::value::Value;

/// Applies a callable to every element of a list or tuple, returning a new
/// list.
///
/// # Examples
///
/// ```rust
/// use currying::{Function, Parameter, Signature, Value, args, builtins, curry};
///
/// let increment = Function::new("increment", Signature::new([Parameter::positional("x")]), |arguments| {
///     Ok(Value::from(arguments.require("x")?.extract::<i64>()? + 1))
/// });
///
/// let mapped = curry(builtins::map())
///     .unwrap()
///     .call(args![increment])
///     .unwrap()
///     .call(args![Value::list([1, 2, 3, 4])])
///     .unwrap();
///
/// assert_eq!(mapped.into_value(), Some(Value::list([2, 3, 4, 5])));
/// ```
pub fn map() -> Native {
    let operator = Function::new(
        "map",
        Signature::new([
            Parameter::positional("function"),
            Parameter::positional("iterable"),
        ]),
        |arguments| {
            let function = arguments.require("function")?;
            let items: Vec<Value> = arguments.require("iterable")?.extract()?;
            let mapped = items
                .into_iter()
                .map(|item| function.call(crate::Arguments::new().with_positional(item)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::from(mapped))
        },
    );
    Native::new("map", operator).with_doc("Apply a function to every item of an iterable.")
}

/// Raises `base` to the power `exponent`, as a float.
///
/// # Examples
///
/// ```rust
/// use currying::{Callable, Value, args, builtins};
///
/// assert_eq!(builtins::pow().invoke(args![2, 4]), Ok(Value::from(16.0)));
/// ```
pub fn pow() -> Function {
    Function::new(
        "pow",
        Signature::new([
            Parameter::positional_only("base"),
            Parameter::positional_only("exponent"),
        ]),
        |arguments| {
            let base: f64 = arguments.require("base")?.extract()?;
            let exponent: f64 = arguments.require("exponent")?.extract()?;
            Ok(Value::from(base.powf(exponent)))
        },
    )
    .with_doc("Return base raised to the power exponent.")
}

/// Returns the largest of any number of numeric values.
pub fn max() -> Native {
    let operator = Function::new(
        "max",
        Signature::new([Parameter::variadic("args")]),
        largest,
    );
    Native::new("max", operator).with_doc("Return the largest argument.")
}

#[allow(clippy::cast_precision_loss)]
fn numeric(value: &Value) -> Result<f64, CallError> {
    match value {
        Value::Int(inner) => Ok(*inner as f64),
        Value::Float(inner) => Ok(*inner),
        other => Err(CallError::TypeMismatch {
            expected: "number",
            found: other.type_name(),
        }),
    }
}

fn largest(arguments: &BoundArguments) -> Result<Value, CallError> {
    let mut values = arguments.surplus_positional().iter();
    let mut best = values
        .next()
        .ok_or_else(|| CallError::failed("max expected at least 1 argument, got 0"))?;
    let mut best_number = numeric(best)?;

    for value in values {
        let number = numeric(value)?;
        if number > best_number {
            best = value;
            best_number = number;
        }
    }

    Ok(best.clone())
}
