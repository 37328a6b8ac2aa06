//! Positional and keyword argument bags.
//!
//! [`Arguments`] is what every call carries: an ordered list of positional
//! values and a map of keyword values. Curried adapters accumulate these across
//! calls with [`Arguments::merge`], which never mutates either input.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::value::Value;

/// Inline capacity for positional values before spilling to the heap.
const INLINE_POSITIONAL: usize = 4;

/// The positional storage of [`Arguments`].
pub type Positional = SmallVec<[Value; INLINE_POSITIONAL]>;

/// The keyword storage of [`Arguments`].
pub type Keyword = FxHashMap<String, Value>;

/// A bag of positional and keyword arguments.
///
/// Usually built with the [`args!`](crate::args) macro.
///
/// # Examples
///
/// ```rust
/// use currying::{Arguments, Value, args};
///
/// let arguments = args![1, 2; c = 10];
/// assert_eq!(arguments.positional(), &[Value::from(1), Value::from(2)]);
/// assert_eq!(arguments.keyword().get("c"), Some(&Value::from(10)));
/// assert_eq!(arguments.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Positional,
    keyword: Keyword,
}

impl Arguments {
    /// Creates an empty argument bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument bag from its parts.
    pub const fn from_parts(positional: Positional, keyword: Keyword) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    /// Appends a positional value.
    #[must_use]
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a keyword value, replacing any earlier value for the same name.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// The positional values, in order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// The keyword values.
    pub const fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    /// Total number of supplied values, positional plus keyword.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Returns `true` if no value has been supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Combines `self` with a later call's arguments.
    ///
    /// Positional values of `newer` are appended after those of `self`;
    /// keyword values of `newer` override those of `self` with the same name.
    /// `self` is left untouched so sibling calls never observe each other.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use currying::{Value, args};
    ///
    /// let earlier = args![1; c = 10];
    /// let merged = earlier.merge(args![2; c = 30, d = 40]);
    ///
    /// assert_eq!(merged.positional(), &[Value::from(1), Value::from(2)]);
    /// assert_eq!(merged.keyword().get("c"), Some(&Value::from(30)));
    /// assert_eq!(earlier.keyword().get("c"), Some(&Value::from(10)));
    /// ```
    #[must_use]
    pub fn merge(&self, newer: Self) -> Self {
        let mut positional = self.positional.clone();
        positional.extend(newer.positional);

        let mut keyword = self.keyword.clone();
        keyword.extend(newer.keyword);

        Self {
            positional,
            keyword,
        }
    }

    /// Splits the bag into its parts.
    pub fn into_parts(self) -> (Positional, Keyword) {
        (self.positional, self.keyword)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Arguments {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        use std::collections::BTreeMap;

        let keyword: BTreeMap<&str, &Value> = self
            .keyword
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();

        let mut state = serializer.serialize_struct("Arguments", 2)?;
        state.serialize_field("positional", self.positional.as_slice())?;
        state.serialize_field("keyword", &keyword)?;
        state.end()
    }
}
