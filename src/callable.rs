//! The callable abstraction and its introspection.
//!
//! Everything that can be curried implements [`Callable`]. Two concrete kinds
//! are provided:
//!
//! - [`Function`]: carries its own [`Signature`] and binds incoming arguments
//!   against it before running its body.
//! - [`Native`]: exposes no parameter list of its own and forwards both
//!   introspection and invocation to a call operator. This models builtins and
//!   constructor types whose parameters live on their invocation mechanism.
//!
//! [`introspect`] resolves the parameter list of any callable, consulting the
//! call operator first when one exists.

use std::fmt;
use std::rc::Rc;

use crate::arguments::Arguments;
use crate::error::CallError;
use crate::signature::{BoundArguments, Signature};
use crate::value::Value;

/// Identity of a callable as seen by tooling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// The callable's name.
    pub name: String,
    /// The callable's documentation, if any.
    pub doc: Option<String>,
}

impl Metadata {
    /// Creates metadata with a name and no documentation.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }
}

/// Something that can be invoked with [`Arguments`].
///
/// Implementors report their identity through [`metadata`](Callable::metadata)
/// and, when possible, their parameters through
/// [`signature`](Callable::signature). A callable that cannot describe its own
/// parameters may instead expose a [`call_operator`](Callable::call_operator)
/// that does.
pub trait Callable {
    /// The callable's identity.
    fn metadata(&self) -> &Metadata;

    /// The callable's own parameter list, if it has an introspectable one.
    fn signature(&self) -> Option<&Signature>;

    /// The mechanism through which this callable is actually invoked, if it
    /// is distinct from the callable itself.
    fn call_operator(&self) -> Option<&dyn Callable> {
        None
    }

    /// Invokes the callable.
    ///
    /// # Errors
    ///
    /// Whatever the callable reports; binding failures are reported as the
    /// binding variants of [`CallError`].
    fn invoke(&self, arguments: Arguments) -> Result<Value, CallError>;
}

/// Resolves the parameter list of `callable`.
///
/// When the callable is invoked through a separate call operator, the call
/// operator's parameters are used. Otherwise the callable's own signature is
/// used. Returns `None` when neither exposes one.
///
/// # Examples
///
/// ```rust
/// use currying::{builtins, introspect};
///
/// let map = builtins::map();
/// assert!(currying::Callable::signature(&map).is_none());
/// assert_eq!(introspect(&map).map(|signature| signature.arity()), Some(2));
/// ```
pub fn introspect(callable: &dyn Callable) -> Option<&Signature> {
    match callable.call_operator() {
        Some(operator) => introspect(operator),
        None => callable.signature(),
    }
}

type Body = dyn Fn(&BoundArguments) -> Result<Value, CallError>;

/// A callable with an introspectable signature.
///
/// # Examples
///
/// ```rust
/// use currying::{Callable, Function, Parameter, Signature, Value, args};
///
/// let add = Function::new(
///     "add",
///     Signature::new([Parameter::positional("a"), Parameter::positional("b")]),
///     |arguments| {
///         let a: i64 = arguments.require("a")?.extract()?;
///         let b: i64 = arguments.require("b")?.extract()?;
///         Ok(Value::from(a + b))
///     },
/// );
///
/// assert_eq!(add.invoke(args![1; b = 2]), Ok(Value::from(3)));
/// ```
#[derive(Clone)]
pub struct Function {
    metadata: Metadata,
    signature: Signature,
    body: Rc<Body>,
}

impl Function {
    /// Creates a function from a name, a signature and a body that receives
    /// the bound arguments.
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Value, CallError> + 'static,
    {
        Self {
            metadata: Metadata::named(name),
            signature,
            body: Rc::new(body),
        }
    }

    /// Attaches documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.metadata.doc = Some(doc.into());
        self
    }
}

impl Callable for Function {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn invoke(&self, arguments: Arguments) -> Result<Value, CallError> {
        let bound = self.signature.bind(&self.metadata.name, arguments)?;
        (self.body)(&bound)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}{}>", self.metadata.name, self.signature)
    }
}

/// A callable whose parameters are only visible on its call operator.
#[derive(Clone)]
pub struct Native {
    metadata: Metadata,
    operator: Rc<dyn Callable>,
}

impl Native {
    /// Creates a native callable invoked through `operator`.
    pub fn new(name: impl Into<String>, operator: impl Callable + 'static) -> Self {
        Self {
            metadata: Metadata::named(name),
            operator: Rc::new(operator),
        }
    }

    /// Attaches documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.metadata.doc = Some(doc.into());
        self
    }
}

impl Callable for Native {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn signature(&self) -> Option<&Signature> {
        None
    }

    fn call_operator(&self) -> Option<&dyn Callable> {
        Some(self.operator.as_ref())
    }

    fn invoke(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.operator.invoke(arguments)
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<built-in {}>", self.metadata.name)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Callable(Rc::new(function))
    }
}

impl From<Native> for Value {
    fn from(native: Native) -> Self {
        Self::Callable(Rc::new(native))
    }
}
