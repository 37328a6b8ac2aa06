//! Procedural macros for the `currying` crate.
//!
//! # Available Attribute Macros
//!
//! - [`callable`]: Derives a curryable `Function` from an ordinary Rust
//!   function, including its name, documentation, defaults and keyword-only
//!   parameters
//!
//! # Example
//!
//! ```rust,ignore
//! use currying::{args, callable, curry, Value};
//!
//! /// Adds two numbers.
//! #[callable]
//! fn add(a: i64, #[default(10)] b: i64) -> i64 {
//!     a + b
//! }
//!
//! let curried = currying::curry_with_defaults(add_callable()).unwrap();
//! assert_eq!(curried.call(args![1]).unwrap().into_value(), Some(Value::from(11)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod callable;

use proc_macro::TokenStream;

/// Derives a `currying::Function` from a free function.
///
/// The function itself is left in place. Next to it, a constructor named
/// `{function_name}_callable()` is generated that returns a
/// `currying::Function` whose signature mirrors the Rust parameters and whose
/// metadata carries the function's name and doc comment.
///
/// # Parameter Attributes
///
/// - `#[default(expr)]`: the parameter takes `expr` when no value is supplied
/// - `#[keyword]`: the parameter can only be supplied by keyword
/// - `#[positional]`: the parameter can only be supplied by position
///
/// Parameters without an attribute accept a value by position or by keyword.
/// `#[positional]` parameters come first, positional parameters may not follow
/// keyword-only ones, and a positional
/// parameter without a default may not follow one with a default.
///
/// # Macro Arguments
///
/// - `name = "..."`: overrides the reported name
///
/// # Types
///
/// Every parameter type must implement `currying::FromValue`. The return type
/// must convert into `currying::Value`; a `Result<T, E>` return is unwrapped
/// with `?`, so `E` must convert into `currying::CallError`.
///
/// # Example
///
/// ```rust,ignore
/// use currying::callable;
///
/// /// Joins two words.
/// #[callable(name = "join")]
/// fn join_words(first: String, second: String, #[keyword] separator: String) -> String {
///     format!("{first}{separator}{second}")
/// }
///
/// let function = join_words_callable();
/// ```
///
/// # Unsupported Forms
///
/// Methods with a receiver, generic functions, `async` functions and
/// destructuring parameter patterns produce a compile error.
#[proc_macro_attribute]
pub fn callable(attribute: TokenStream, item: TokenStream) -> TokenStream {
    callable::callable_impl(attribute, item)
}
