//! Typed query values.
//!
//! Fields are stored as strings; queries interpret them. `coerce` turns
//! a raw string into the most specific type that parses, and `compare`
//! orders two values or refuses with a typed error.

use std::cmp::Ordering;

use crate::error::{Result, RosterError};

/// A coerced query value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// Coerce a raw string, trying integer, then float, then boolean
    /// (case-insensitive `true`/`false`), and falling back to string.
    pub fn coerce(raw: &str) -> Value {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
        match raw.to_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Str(raw.to_string()),
        }
    }

    /// Human-readable type name, used in comparison errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
        }
    }

    /// Order two values.
    ///
    /// Integers and floats compare numerically with each other; every
    /// other cross-type pair is an error rather than a silent mismatch.
    /// NaN refuses to order, so it lands in the same error.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        use Value::*;

        let ordering = match (self, other) {
            (Int(a), Int(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (Bool(a), Bool(b)) => a.partial_cmp(b),
            (Str(a), Str(b)) => a.partial_cmp(b),
            _ => None,
        };

        ordering.ok_or_else(|| RosterError::IncomparableTypes {
            lhs: self.type_name(),
            rhs: other.type_name(),
        })
    }
}
