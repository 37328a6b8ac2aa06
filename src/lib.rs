//! # currying
//!
//! Incremental argument application for callables.
//!
//! ## Overview
//!
//! [`curry`] wraps a callable so that its arguments can be supplied across any
//! number of calls, as positional values, keyword values, or a mix of both.
//! The target is invoked only once enough arguments have arrived:
//!
//! - **Strict** ([`curry`]): exactly as many values as the target has named
//!   parameters.
//! - **Defaults-aware** ([`curry_with_defaults`]): as soon as every parameter
//!   without a default has a value.
//!
//! Arity comes from the target's [`Signature`]. Callables that cannot describe
//! their own parameters (see [`Native`]) are introspected through their call
//! operator, and any callable can be given an explicit arity through
//! [`CurryBuilder::arity`].
//!
//! ## Feature Flags
//!
//! - `derive` (default): the [`callable`] attribute, deriving a [`Function`]
//!   from an ordinary Rust function
//! - `serde`: `Serialize` for [`Value`] and [`Arguments`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use currying::{Function, Parameter, Signature, Value, args, curry};
//!
//! // fn(a, b, *, c, d)
//! let func = Function::new(
//!     "func",
//!     Signature::new([
//!         Parameter::positional("a"),
//!         Parameter::positional("b"),
//!         Parameter::keyword_only("c"),
//!         Parameter::keyword_only("d"),
//!     ]),
//!     |arguments| Ok(Value::list(arguments.values().cloned())),
//! );
//!
//! let result = curry(func)
//!     .unwrap()
//!     .call(args![1])
//!     .and_then(|outcome| outcome.call(args![2]))
//!     .and_then(|outcome| outcome.call(args![; c = 10]))
//!     .and_then(|outcome| outcome.call(args![; d = 20]))
//!     .unwrap();
//!
//! assert_eq!(result.into_value(), Some(Value::list([1, 2, 10, 20])));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use currying::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arguments::Arguments;
    pub use crate::callable::{Callable, Function, Native};
    pub use crate::curry::{Curried, Outcome, SatisfactionPolicy, curry, curry_with_defaults};
    pub use crate::error::{CallError, CurryError};
    pub use crate::signature::{Parameter, Signature};
    pub use crate::value::Value;

    pub use crate::args;

    #[cfg(feature = "derive")]
    pub use crate::callable;
}

mod args_macro;

pub mod arguments;
pub mod builtins;
pub mod callable;
pub mod curry;
pub mod error;
pub mod signature;
pub mod value;

pub use arguments::Arguments;
pub use callable::{Callable, Function, Metadata, Native, introspect};
pub use curry::{
    CurryBuilder, Curried, Outcome, SatisfactionPolicy, curry, curry_with_defaults,
};
pub use error::{CallError, CurryError, InvalidTargetError};
pub use signature::{BoundArguments, Parameter, ParameterKind, Signature};
pub use value::{FromValue, SharedList, Value};

/// Derives a [`Function`] from an ordinary Rust function.
///
/// See the `currying-derive` crate for the supported parameter attributes.
#[cfg(feature = "derive")]
pub use currying_derive::callable;
