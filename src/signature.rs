//! Declared parameter lists and argument binding.
//!
//! A [`Signature`] is the introspectable description of what a callable
//! accepts. It answers two questions:
//!
//! - How many named parameters exist ([`Signature::arity`]) and how many carry
//!   defaults ([`Signature::default_count`]); the curry adapter decides
//!   satisfaction from these counts alone.
//! - Which parameter receives which value ([`Signature::bind`]); this is the
//!   callable's own call semantics, and is where wrong names, duplicates and
//!   missing values are reported.
//!
//! # Examples
//!
//! ```rust
//! use currying::{Parameter, Signature, Value, args};
//!
//! // fn(a, b=10, *, c)
//! let signature = Signature::new([
//!     Parameter::positional("a"),
//!     Parameter::positional("b").with_default(10),
//!     Parameter::keyword_only("c"),
//! ]);
//!
//! assert_eq!(signature.arity(), 3);
//! assert_eq!(signature.default_count(), 1);
//!
//! let bound = signature.bind("f", args![1; c = 3]).unwrap();
//! assert_eq!(bound.get("b"), Some(&Value::from(10)));
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::arguments::Arguments;
use crate::error::CallError;
use crate::value::Value;

/// How a parameter accepts its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Only by position.
    PositionalOnly,
    /// By position or by keyword.
    PositionalOrKeyword,
    /// Only by keyword.
    KeywordOnly,
    /// Catch-all for surplus positional values.
    VariadicPositional,
    /// Catch-all for surplus keyword values.
    VariadicKeyword,
}

impl ParameterKind {
    /// Returns `true` for the unbounded catch-all kinds.
    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::VariadicPositional | Self::VariadicKeyword)
    }

    const fn accepts_position(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }

    const fn accepts_keyword(self) -> bool {
        matches!(self, Self::PositionalOrKeyword | Self::KeywordOnly)
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    default: Option<Value>,
}

impl Parameter {
    /// Creates a parameter of the given kind without a default.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// A positional-or-keyword parameter.
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::PositionalOrKeyword)
    }

    /// A positional-only parameter.
    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::PositionalOnly)
    }

    /// A keyword-only parameter.
    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::KeywordOnly)
    }

    /// A catch-all for surplus positional values.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::VariadicPositional)
    }

    /// A catch-all for surplus keyword values.
    pub fn variadic_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::VariadicKeyword)
    }

    /// Attaches a default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter kind.
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The default value, if any.
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::VariadicPositional => write!(formatter, "*{}", self.name)?,
            ParameterKind::VariadicKeyword => write!(formatter, "**{}", self.name)?,
            _ => formatter.write_str(&self.name)?,
        }
        if let Some(default) = &self.default {
            write!(formatter, "={default:?}")?;
        }
        Ok(())
    }
}

/// An ordered list of declared parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    parameters: SmallVec<[Parameter; 4]>,
}

impl Signature {
    /// Creates a signature from parameters in declaration order.
    pub fn new(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
        }
    }

    /// The declared parameters, in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of named parameters, excluding catch-alls.
    pub fn arity(&self) -> usize {
        self.named().count()
    }

    /// Number of named parameters that carry a default value.
    pub fn default_count(&self) -> usize {
        self.named()
            .filter(|parameter| parameter.default.is_some())
            .count()
    }

    /// The first catch-all parameter, if any.
    pub fn variadic(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.kind.is_variadic())
    }

    fn named(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| !parameter.kind.is_variadic())
    }

    /// Assigns `arguments` to parameters.
    ///
    /// Positional values fill positional parameters in order, surplus values
    /// going to a positional catch-all. Keyword values fill parameters by name,
    /// unknown names going to a keyword catch-all. Parameters left without a
    /// value take their default.
    ///
    /// # Errors
    ///
    /// - [`CallError::TooManyPositional`] for surplus positional values with
    ///   no catch-all.
    /// - [`CallError::DuplicateArgument`] when a keyword names a parameter
    ///   already filled by position.
    /// - [`CallError::UnexpectedKeyword`] for unknown names with no catch-all,
    ///   or a keyword naming a positional-only parameter.
    /// - [`CallError::MissingArgument`] for required parameters left empty.
    pub fn bind(&self, callable: &str, arguments: Arguments) -> Result<BoundArguments, CallError> {
        let (positional, mut keyword) = arguments.into_parts();
        let mut slots: SmallVec<[Option<Value>; 4]> = SmallVec::from_elem(None, self.parameters.len());
        let mut surplus_positional = Vec::new();
        let mut surplus_keyword = FxHashMap::default();

        let positional_slots: SmallVec<[usize; 4]> = self
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, parameter)| parameter.kind.accepts_position())
            .map(|(index, _)| index)
            .collect();
        let accepts_surplus_positional = self
            .parameters
            .iter()
            .any(|parameter| parameter.kind == ParameterKind::VariadicPositional);

        let given = positional.len();
        for (position, value) in positional.into_iter().enumerate() {
            match positional_slots.get(position) {
                Some(&index) => slots[index] = Some(value),
                None if accepts_surplus_positional => surplus_positional.push(value),
                None => {
                    return Err(CallError::TooManyPositional {
                        callable: callable.to_owned(),
                        expected: positional_slots.len(),
                        given,
                    });
                }
            }
        }

        for (index, parameter) in self.parameters.iter().enumerate() {
            if !parameter.kind.accepts_keyword() {
                continue;
            }
            if let Some(value) = keyword.remove(&parameter.name) {
                if slots[index].is_some() {
                    return Err(CallError::DuplicateArgument {
                        callable: callable.to_owned(),
                        parameter: parameter.name.clone(),
                    });
                }
                slots[index] = Some(value);
            }
        }

        let accepts_surplus_keyword = self
            .parameters
            .iter()
            .any(|parameter| parameter.kind == ParameterKind::VariadicKeyword);
        let mut leftover: Vec<_> = keyword.into_iter().collect();
        leftover.sort_by(|(left, _), (right, _)| left.cmp(right));
        for (name, value) in leftover {
            if !accepts_surplus_keyword {
                return Err(CallError::UnexpectedKeyword {
                    callable: callable.to_owned(),
                    keyword: name,
                });
            }
            surplus_keyword.insert(name, value);
        }

        let mut values = SmallVec::with_capacity(self.parameters.len());
        for (parameter, slot) in self.parameters.iter().zip(slots) {
            if parameter.kind.is_variadic() {
                continue;
            }
            let value = match slot.or_else(|| parameter.default.clone()) {
                Some(value) => value,
                None => {
                    return Err(CallError::MissingArgument {
                        callable: callable.to_owned(),
                        parameter: parameter.name.clone(),
                    });
                }
            };
            values.push((parameter.name.clone(), value));
        }

        Ok(BoundArguments {
            values,
            surplus_positional,
            surplus_keyword,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("(")?;
        let mut keyword_marker_written = false;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            if parameter.kind == ParameterKind::KeywordOnly && !keyword_marker_written {
                let after_variadic = self.parameters[..index]
                    .iter()
                    .any(|previous| previous.kind == ParameterKind::VariadicPositional);
                if !after_variadic {
                    formatter.write_str("*, ")?;
                }
                keyword_marker_written = true;
            }
            write!(formatter, "{parameter}")?;
        }
        formatter.write_str(")")
    }
}

/// Arguments assigned to the parameters of a [`Signature`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    values: SmallVec<[(String, Value); 4]>,
    surplus_positional: Vec<Value>,
    surplus_keyword: FxHashMap<String, Value>,
}

impl BoundArguments {
    /// The value bound to the named parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(parameter, _)| parameter == name)
            .map(|(_, value)| value)
    }

    /// The value bound to the named parameter, for use inside callable bodies.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Failed`] if no parameter of that name exists.
    pub fn require(&self, name: &str) -> Result<&Value, CallError> {
        self.get(name)
            .ok_or_else(|| CallError::failed(format!("no parameter named '{name}'")))
    }

    /// Bound values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().map(|(_, value)| value)
    }

    /// Values absorbed by the positional catch-all.
    pub fn surplus_positional(&self) -> &[Value] {
        &self.surplus_positional
    }

    /// Values absorbed by the keyword catch-all.
    pub const fn surplus_keyword(&self) -> &FxHashMap<String, Value> {
        &self.surplus_keyword
    }
}
