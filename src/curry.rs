//! The curry adapter.
//!
//! [`curry`] wraps any callable [`Value`] in a [`Curried`] adapter that
//! accepts arguments incrementally. Each call merges the new arguments into a
//! fresh copy of the accumulated ones and either returns a new pending adapter
//! or, once enough arguments have arrived, invokes the target.
//!
//! # Design Decisions
//!
//! - Arity is resolved once at the root of a chain and carried unchanged.
//! - Adapters are immutable. Calling the same adapter twice produces two
//!   independent descendants; neither sees the other's arguments.
//! - The target and its metadata are shared through `Rc`, so adapters are
//!   cheap to clone but confined to one thread.
//! - Target failures are returned unchanged.
//!
//! # Examples
//!
//! ```rust
//! use currying::{Function, Parameter, Signature, Value, args, curry};
//!
//! let add = Function::new(
//!     "add",
//!     Signature::new([Parameter::positional("a"), Parameter::positional("b")]),
//!     |arguments| {
//!         let a: i64 = arguments.require("a")?.extract()?;
//!         let b: i64 = arguments.require("b")?.extract()?;
//!         Ok(Value::from(a + b))
//!     },
//! );
//!
//! let curried = curry(add).unwrap();
//! let add_five = curried.call(args![5]).unwrap();
//! assert!(add_five.is_pending());
//!
//! assert_eq!(add_five.call(args![3]).unwrap().into_value(), Some(Value::from(8)));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::arguments::{Arguments, Keyword};
use crate::callable::{Callable, Metadata, introspect};
use crate::error::{CallError, CurryError, InvalidTargetError};
use crate::signature::Signature;
use crate::value::Value;

/// The rule deciding when enough arguments have been supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SatisfactionPolicy {
    /// Invoke once exactly `arity` arguments are supplied.
    #[default]
    Strict,
    /// Invoke once `arity` arguments, or all non-defaulted ones
    /// (`arity - default_count`), are supplied.
    DefaultsAware,
}

impl SatisfactionPolicy {
    /// Decides whether `supplied` arguments satisfy a target of `arity`
    /// parameters, `default_count` of which carry defaults.
    pub const fn is_satisfied(self, supplied: usize, arity: usize, default_count: usize) -> bool {
        match self {
            Self::Strict => supplied == arity,
            Self::DefaultsAware => {
                supplied == arity || supplied == arity.saturating_sub(default_count)
            }
        }
    }
}

/// Builder for a [`Curried`] adapter.
///
/// # Examples
///
/// ```rust
/// use currying::{Curried, SatisfactionPolicy, builtins};
///
/// // `max` accepts any number of values; fix it at three.
/// let max_of_three = Curried::builder(builtins::max()).arity(3).build().unwrap();
/// assert_eq!(max_of_three.arity(), 3);
/// assert_eq!(max_of_three.policy(), SatisfactionPolicy::Strict);
/// ```
#[derive(Debug, Clone)]
pub struct CurryBuilder {
    target: Value,
    arity: Option<usize>,
    policy: SatisfactionPolicy,
}

impl CurryBuilder {
    /// Starts a builder around `target`.
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target.into(),
            arity: None,
            policy: SatisfactionPolicy::Strict,
        }
    }

    /// Overrides arity resolution with an explicit parameter count.
    #[must_use]
    pub const fn arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Selects the satisfaction policy.
    #[must_use]
    pub const fn policy(mut self, policy: SatisfactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Selects [`SatisfactionPolicy::DefaultsAware`] when `true`, otherwise
    /// [`SatisfactionPolicy::Strict`].
    #[must_use]
    pub const fn use_defaults(self, use_defaults: bool) -> Self {
        self.policy(if use_defaults {
            SatisfactionPolicy::DefaultsAware
        } else {
            SatisfactionPolicy::Strict
        })
    }

    /// Resolves the arity and builds the root adapter.
    ///
    /// # Errors
    ///
    /// - [`CurryError::InvalidTarget`] if the target is not callable.
    /// - [`CurryError::UnresolvableArity`] if no explicit arity was given and
    ///   neither the target nor its call operator exposes a signature.
    /// - [`CurryError::VariadicTarget`] if no explicit arity was given and the
    ///   resolved signature has a catch-all parameter.
    pub fn build(self) -> Result<Curried, CurryError> {
        let target = match self.target {
            Value::Callable(callable) => callable,
            other => {
                return Err(InvalidTargetError {
                    type_name: other.type_name(),
                }
                .into());
            }
        };

        let signature = introspect(target.as_ref());
        let default_count = signature.map_or(0, Signature::default_count);
        let arity = match self.arity {
            Some(arity) => arity,
            None => resolve_arity(target.metadata(), signature)?,
        };

        tracing::debug!(
            target_name = %target.metadata().name,
            arity,
            default_count,
            policy = ?self.policy,
            "curried adapter created"
        );

        Ok(Curried {
            state: Rc::new(Chain {
                target,
                arity,
                default_count,
                policy: self.policy,
            }),
            arguments: Arguments::new(),
        })
    }
}

fn resolve_arity(metadata: &Metadata, signature: Option<&Signature>) -> Result<usize, CurryError> {
    let signature = signature.ok_or_else(|| CurryError::UnresolvableArity {
        name: metadata.name.clone(),
    })?;

    if let Some(parameter) = signature.variadic() {
        return Err(CurryError::VariadicTarget {
            name: metadata.name.clone(),
            parameter: parameter.name().to_owned(),
        });
    }

    Ok(signature.arity())
}

/// Wraps `target` in a strict curried adapter.
///
/// # Errors
///
/// See [`CurryBuilder::build`].
///
/// # Examples
///
/// ```rust
/// use currying::{CurryError, InvalidTargetError, Value, curry};
///
/// let error = curry(Value::from(1)).unwrap_err();
/// assert_eq!(error, CurryError::InvalidTarget(InvalidTargetError { type_name: "int" }));
/// ```
pub fn curry(target: impl Into<Value>) -> Result<Curried, CurryError> {
    CurryBuilder::new(target).build()
}

/// Wraps `target` in a curried adapter that invokes as soon as every
/// parameter without a default has a value.
///
/// # Errors
///
/// See [`CurryBuilder::build`].
pub fn curry_with_defaults(target: impl Into<Value>) -> Result<Curried, CurryError> {
    CurryBuilder::new(target).use_defaults(true).build()
}

/// State shared unchanged by every adapter of one chain.
struct Chain {
    target: Rc<dyn Callable>,
    arity: usize,
    default_count: usize,
    policy: SatisfactionPolicy,
}

/// A callable accepting its target's arguments across several calls.
///
/// A `Curried` never changes once built; [`call`](Curried::call) returns a new
/// adapter or the target's result.
#[derive(Clone)]
pub struct Curried {
    state: Rc<Chain>,
    arguments: Arguments,
}

static_assertions::assert_impl_all!(Curried: Clone, Callable);
static_assertions::assert_not_impl_any!(Curried: Send, Sync);

impl Curried {
    /// Starts a [`CurryBuilder`] around `target`.
    pub fn builder(target: impl Into<Value>) -> CurryBuilder {
        CurryBuilder::new(target)
    }

    /// Supplies more arguments.
    ///
    /// Returns [`Outcome::Ready`] with the target's result when the merged
    /// arguments satisfy the policy, otherwise [`Outcome::Pending`] with a new
    /// adapter holding the merged arguments. More values than the arity never
    /// satisfy either policy, so such an adapter stays pending.
    ///
    /// # Errors
    ///
    /// Whatever the target returns when invoked.
    pub fn call(&self, arguments: Arguments) -> Result<Outcome, CallError> {
        let merged = self.arguments.merge(arguments);
        let supplied = merged.len();
        let chain = self.state.as_ref();
        let satisfied = chain
            .policy
            .is_satisfied(supplied, chain.arity, chain.default_count);

        if satisfied {
            tracing::trace!(
                target_name = %chain.target.metadata().name,
                supplied,
                arity = chain.arity,
                "invoking target"
            );
            return chain.target.invoke(merged).map(Outcome::Ready);
        }

        tracing::trace!(
            target_name = %chain.target.metadata().name,
            supplied,
            arity = chain.arity,
            "awaiting more arguments"
        );
        Ok(Outcome::Pending(Self {
            state: Rc::clone(&self.state),
            arguments: merged,
        }))
    }

    /// The wrapped callable.
    pub fn target(&self) -> &Rc<dyn Callable> {
        &self.state.target
    }

    /// The parameter count resolved at the root of the chain.
    pub fn arity(&self) -> usize {
        self.state.arity
    }

    /// The number of defaulted parameters of the target.
    pub fn default_count(&self) -> usize {
        self.state.default_count
    }

    /// The satisfaction policy of the chain.
    pub fn policy(&self) -> SatisfactionPolicy {
        self.state.policy
    }

    /// Positional values accumulated so far.
    pub fn positional(&self) -> &[Value] {
        self.arguments.positional()
    }

    /// Keyword values accumulated so far.
    pub fn keyword(&self) -> &Keyword {
        self.arguments.keyword()
    }

    /// Number of values accumulated so far.
    pub fn supplied_count(&self) -> usize {
        self.arguments.len()
    }
}

impl Callable for Curried {
    fn metadata(&self) -> &Metadata {
        self.state.target.metadata()
    }

    fn signature(&self) -> Option<&Signature> {
        self.state.target.signature()
    }

    fn call_operator(&self) -> Option<&dyn Callable> {
        self.state.target.call_operator()
    }

    fn invoke(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.call(arguments).map(Outcome::into_callable_value)
    }
}

impl fmt::Debug for Curried {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curried")
            .field("target", &self.state.target.metadata().name)
            .field("arity", &self.state.arity)
            .field("policy", &self.state.policy)
            .field("arguments", &self.arguments)
            .finish()
    }
}

impl From<Curried> for Value {
    fn from(curried: Curried) -> Self {
        Self::Callable(Rc::new(curried))
    }
}

/// The result of a curried call.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// More arguments are needed.
    Pending(Curried),
    /// The target was invoked and returned this value.
    Ready(Value),
}

impl Outcome {
    /// Returns `true` if more arguments are needed.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns `true` if the target has been invoked.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The target's result, if it has been invoked.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// The pending adapter, if more arguments are needed.
    pub fn into_pending(self) -> Option<Curried> {
        match self {
            Self::Pending(curried) => Some(curried),
            Self::Ready(_) => None,
        }
    }

    /// Converts the outcome into a value, wrapping a pending adapter as a
    /// callable.
    pub fn into_callable_value(self) -> Value {
        match self {
            Self::Pending(curried) => Value::from(curried),
            Self::Ready(value) => value,
        }
    }

    /// Continues the chain with more arguments.
    ///
    /// A pending outcome forwards to its adapter. A ready outcome holding a
    /// callable invokes it, so a target returning a function can be called
    /// straight through.
    ///
    /// # Errors
    ///
    /// [`CallError::NotCallable`] if the outcome holds a non-callable value,
    /// otherwise whatever the invoked callable returns.
    pub fn call(&self, arguments: Arguments) -> Result<Self, CallError> {
        match self {
            Self::Pending(curried) => curried.call(arguments),
            Self::Ready(value) => value.call(arguments).map(Self::Ready),
        }
    }
}
