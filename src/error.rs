//! Error types for currying and invocation.
//!
//! Two families of errors exist:
//!
//! - [`CurryError`]: raised while *constructing* an adapter (the target is not
//!   callable, or its arity cannot be determined).
//! - [`CallError`]: raised while *invoking* a callable. The adapter never
//!   produces these itself; it forwards whatever the wrapped target returns.

use std::fmt;

/// The supplied target of [`curry`](crate::curry) is not callable.
///
/// # Examples
///
/// ```rust
/// use currying::InvalidTargetError;
///
/// let error = InvalidTargetError { type_name: "int" };
/// assert_eq!(format!("{error}"), "first argument must be callable, got int");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTargetError {
    /// The type name of the value that was supplied instead of a callable.
    pub type_name: &'static str,
}

impl fmt::Display for InvalidTargetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "first argument must be callable, got {}",
            self.type_name
        )
    }
}

impl std::error::Error for InvalidTargetError {}

/// Errors raised while constructing a curried adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    /// The target is not callable.
    InvalidTarget(InvalidTargetError),
    /// Neither the target nor its call operator exposes a parameter list.
    UnresolvableArity {
        /// Name of the target.
        name: String,
    },
    /// The target declares a variadic catch-all parameter.
    VariadicTarget {
        /// Name of the target.
        name: String,
        /// Name of the catch-all parameter.
        parameter: String,
    },
}

impl fmt::Display for CurryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(error) => write!(formatter, "{error}"),
            Self::UnresolvableArity { name } => write!(
                formatter,
                "cannot determine the parameters of {name}; supply an explicit arity"
            ),
            Self::VariadicTarget { name, parameter } => write!(
                formatter,
                "{name} accepts an unbounded catch-all parameter `{parameter}`; supply an explicit arity"
            ),
        }
    }
}

impl std::error::Error for CurryError {}

impl From<InvalidTargetError> for CurryError {
    fn from(error: InvalidTargetError) -> Self {
        Self::InvalidTarget(error)
    }
}

/// Errors raised by invoking a callable.
///
/// Binding variants are produced by [`Signature::bind`](crate::Signature::bind)
/// when the supplied arguments do not fit the declared parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// A required parameter received no value.
    MissingArgument {
        /// Name of the callable.
        callable: String,
        /// Name of the parameter.
        parameter: String,
    },
    /// A keyword argument names no parameter of the callable.
    UnexpectedKeyword {
        /// Name of the callable.
        callable: String,
        /// The unknown keyword.
        keyword: String,
    },
    /// A parameter received a value both positionally and by keyword.
    DuplicateArgument {
        /// Name of the callable.
        callable: String,
        /// Name of the parameter.
        parameter: String,
    },
    /// More positional values than positional parameters.
    TooManyPositional {
        /// Name of the callable.
        callable: String,
        /// Number of positional parameters accepted.
        expected: usize,
        /// Number of positional values supplied.
        given: usize,
    },
    /// A value could not be converted to the type a parameter requires.
    TypeMismatch {
        /// The type that was expected.
        expected: &'static str,
        /// The type that was found.
        found: &'static str,
    },
    /// A value that is not callable was called.
    NotCallable {
        /// The type name of the value.
        type_name: &'static str,
    },
    /// The callable's body reported a failure.
    Failed(String),
}

impl CallError {
    /// Creates a [`CallError::Failed`] from any displayable message.
    pub fn failed(message: impl fmt::Display) -> Self {
        Self::Failed(message.to_string())
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument {
                callable,
                parameter,
            } => write!(
                formatter,
                "{callable}() missing required argument: '{parameter}'"
            ),
            Self::UnexpectedKeyword { callable, keyword } => write!(
                formatter,
                "{callable}() got an unexpected keyword argument '{keyword}'"
            ),
            Self::DuplicateArgument {
                callable,
                parameter,
            } => write!(
                formatter,
                "{callable}() got multiple values for argument '{parameter}'"
            ),
            Self::TooManyPositional {
                callable,
                expected,
                given,
            } => write!(
                formatter,
                "{callable}() takes {expected} positional arguments but {given} were given"
            ),
            Self::TypeMismatch { expected, found } => {
                write!(formatter, "expected {expected}, found {found}")
            }
            Self::NotCallable { type_name } => {
                write!(formatter, "'{type_name}' object is not callable")
            }
            Self::Failed(message) => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for CallError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_invalid_target_display() {
        let error = CurryError::from(InvalidTargetError { type_name: "int" });
        assert_eq!(
            format!("{error}"),
            "first argument must be callable, got int"
        );
    }

    #[rstest]
    #[case(
        CallError::MissingArgument { callable: "add".into(), parameter: "b".into() },
        "add() missing required argument: 'b'"
    )]
    #[case(
        CallError::UnexpectedKeyword { callable: "add".into(), keyword: "z".into() },
        "add() got an unexpected keyword argument 'z'"
    )]
    #[case(
        CallError::DuplicateArgument { callable: "add".into(), parameter: "a".into() },
        "add() got multiple values for argument 'a'"
    )]
    #[case(
        CallError::TooManyPositional { callable: "add".into(), expected: 2, given: 3 },
        "add() takes 2 positional arguments but 3 were given"
    )]
    #[case(CallError::NotCallable { type_name: "int" }, "'int' object is not callable")]
    #[case(CallError::failed("division by zero"), "division by zero")]
    fn test_call_error_display(#[case] error: CallError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_variadic_target_display() {
        let error = CurryError::VariadicTarget {
            name: "max".into(),
            parameter: "args".into(),
        };
        assert_eq!(
            error.to_string(),
            "max accepts an unbounded catch-all parameter `args`; supply an explicit arity"
        );
    }
}
