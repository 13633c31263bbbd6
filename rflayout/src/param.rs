//! Component parameter sets.

use std::collections::HashMap;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A typed scalar parameter value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(ArcStr),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(ArcStr::from(value))
    }
}

/// An error accessing a component parameter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParamError {
    /// A required parameter was not supplied.
    #[error("missing required parameter `{0}`")]
    Missing(ArcStr),

    /// A parameter was supplied with an unusable type.
    #[error("parameter `{name}` must be {expected}")]
    Mismatch { name: ArcStr, expected: &'static str },
}

/// The named parameters of one component instance.
///
/// Parameter sets are immutable once a component is instantiated.
/// Generators look up the parameters they document; unknown extras are
/// ignored, and a missing required parameter fails naming the parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Params {
    values: HashMap<ArcStr, Value>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder-style.
    pub fn with(mut self, name: impl Into<ArcStr>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` if the set contains a parameter named `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// A required real-valued parameter. Integer values coerce.
    pub fn require_f64(&self, name: &str) -> Result<f64, ParamError> {
        match self.values.get(name) {
            Some(Value::Float(v)) => Ok(*v),
            Some(Value::Int(v)) => Ok(*v as f64),
            Some(_) => Err(ParamError::Mismatch {
                name: ArcStr::from(name),
                expected: "a number",
            }),
            None => Err(ParamError::Missing(ArcStr::from(name))),
        }
    }

    /// An optional real-valued parameter with a documented default.
    ///
    /// Absence yields `default`; a present value of the wrong type is still
    /// an error.
    pub fn f64_or(&self, name: &str, default: f64) -> Result<f64, ParamError> {
        if self.contains(name) {
            self.require_f64(name)
        } else {
            Ok(default)
        }
    }

    /// A required count parameter: a non-negative integer.
    pub fn require_usize(&self, name: &str) -> Result<usize, ParamError> {
        match self.values.get(name) {
            Some(Value::Int(v)) if *v >= 0 => Ok(*v as usize),
            Some(_) => Err(ParamError::Mismatch {
                name: ArcStr::from(name),
                expected: "a non-negative integer",
            }),
            None => Err(ParamError::Missing(ArcStr::from(name))),
        }
    }
}
