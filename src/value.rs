//! The dynamic value carried through curried calls.
//!
//! Callables accept and return [`Value`]s so that argument bags of mixed types
//! can be accumulated across calls. Scalars and strings are immutable; lists
//! are shared by reference ([`SharedList`]) so a callable that mutates a list
//! argument is observed by the caller.
//!
//! # Examples
//!
//! ```rust
//! use currying::Value;
//!
//! let list = Value::list([1, 2, 3]);
//! let alias = list.clone();
//!
//! if let Value::List(items) = &alias {
//!     items.borrow_mut().push(Value::from(4));
//! }
//! assert_eq!(list, Value::list([1, 2, 3, 4]));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::arguments::Arguments;
use crate::callable::Callable;
use crate::error::CallError;

/// A list shared by reference between every holder of the value.
pub type SharedList = Rc<RefCell<Vec<Value>>>;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A mutable list shared by reference.
    List(SharedList),
    /// An immutable fixed-size sequence.
    Tuple(Rc<[Value]>),
    /// An immutable string-keyed mapping.
    Dict(Rc<BTreeMap<String, Value>>),
    /// Anything that can be invoked.
    Callable(Rc<dyn Callable>),
}

impl Value {
    /// Creates a [`Value::List`] from any sequence of convertible items.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(Rc::new(RefCell::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Creates a [`Value::Tuple`] from any sequence of convertible items.
    pub fn tuple<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Creates a [`Value::Dict`] from name/value pairs.
    pub fn dict<K: Into<String>, T: Into<Self>>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        Self::Dict(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Wraps a callable.
    pub fn callable(callable: impl Callable + 'static) -> Self {
        Self::Callable(Rc::new(callable))
    }

    /// A short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
            Self::Callable(_) => "callable",
        }
    }

    /// Returns `true` if the value can be invoked.
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Returns the wrapped callable, if any.
    pub const fn as_callable(&self) -> Option<&Rc<dyn Callable>> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    /// Invokes the value with `arguments`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::NotCallable`] when the value is not a callable, or
    /// whatever the callable itself returns.
    pub fn call(&self, arguments: Arguments) -> Result<Self, CallError> {
        match self {
            Self::Callable(callable) => callable.invoke(arguments),
            other => Err(CallError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Converts the value into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::TypeMismatch`] when the variant does not fit `T`.
    pub fn extract<T: FromValue>(&self) -> Result<T, CallError> {
        T::from_value(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) => {
                Rc::ptr_eq(left, right) || *left.borrow() == *right.borrow()
            }
            (Self::Tuple(left), Self::Tuple(right)) => left == right,
            (Self::Dict(left), Self::Dict(right)) => left == right,
            (Self::Callable(left), Self::Callable(right)) => {
                std::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(value) => write!(formatter, "{value:?}"),
            Self::List(items) => formatter.debug_list().entries(items.borrow().iter()).finish(),
            Self::Tuple(items) => {
                let mut tuple = formatter.debug_tuple("");
                for item in items.iter() {
                    tuple.field(item);
                }
                tuple.finish()
            }
            Self::Dict(entries) => formatter.debug_map().entries(entries.iter()).finish(),
            Self::Callable(callable) => write!(formatter, "<callable {}>", callable.metadata().name),
        }
    }
}

// =============================================================================
// Conversions into Value
// =============================================================================

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<SharedList> for Value {
    fn from(value: SharedList) -> Self {
        Self::List(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(value)))
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Dict(Rc::new(value))
    }
}

impl From<Rc<dyn Callable>> for Value {
    fn from(value: Rc<dyn Callable>) -> Self {
        Self::Callable(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Self::Tuple(Rc::from([first.into(), second.into()]))
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>> From<(A, B, C)> for Value {
    fn from((first, second, third): (A, B, C)) -> Self {
        Self::Tuple(Rc::from([first.into(), second.into(), third.into()]))
    }
}

// =============================================================================
// Conversions out of Value
// =============================================================================

/// Conversion from a borrowed [`Value`] into a concrete parameter type.
///
/// Used by the code generated by `#[callable]` to unpack bound arguments.
pub trait FromValue: Sized {
    /// Converts `value` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::TypeMismatch`] when the variant does not fit.
    fn from_value(value: &Value) -> Result<Self, CallError>;
}

fn mismatch(expected: &'static str, found: &Value) -> CallError {
    CallError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Bool(inner) => Ok(*inner),
            other => Err(mismatch("bool", other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Int(inner) => Ok(*inner),
            other => Err(mismatch("int", other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Int(inner) => Self::try_from(*inner).map_err(|_| mismatch("i32", value)),
            other => Err(mismatch("int", other)),
        }
    }
}

impl FromValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Float(inner) => Ok(*inner),
            Value::Int(inner) => Ok(*inner as Self),
            other => Err(mismatch("float", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Str(inner) => Ok(inner.to_string()),
            other => Err(mismatch("str", other)),
        }
    }
}

impl FromValue for SharedList {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::List(inner) => Ok(Rc::clone(inner)),
            other => Err(mismatch("list", other)),
        }
    }
}

/// Snapshots a list or tuple into an owned vector.
impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::List(inner) => Ok(inner.borrow().clone()),
            Value::Tuple(inner) => Ok(inner.to_vec()),
            other => Err(mismatch("list", other)),
        }
    }
}

impl FromValue for Rc<dyn Callable> {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Callable(inner) => Ok(Rc::clone(inner)),
            other => Err(mismatch("callable", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::None => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::List(items) => {
                let items = items.borrow();
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Tuple(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Dict(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Callable(callable) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("callable", &callable.metadata().name)?;
                map.end()
            }
        }
    }
}
