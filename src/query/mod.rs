//! Query Module
//!
//! Field queries over records: a comparison operator applied between a
//! stored field and a caller-supplied value, both coerced to typed
//! values first.
//!
//! ## Coercion
//! `"5"` is an integer, `"5.5"` a float, `"true"` a boolean, anything
//! else a string. This means `department >= "5"` compares numerically
//! even though departments are stored as strings.

mod value;

pub use value::Value;

use std::cmp::Ordering;

use crate::error::{Result, RosterError};

/// Comparison operators accepted by field queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    /// Parse an operator token (`==`, `!=`, `<`, `<=`, `>`, `>=`)
    pub fn parse(raw: &str) -> Result<Operator> {
        match raw {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            _ => Err(RosterError::InvalidOperator(raw.to_string())),
        }
    }

    /// Apply the operator to two coerced values
    pub fn evaluate(&self, lhs: &Value, rhs: &Value) -> Result<bool> {
        let ordering = lhs.compare(rhs)?;
        Ok(match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
        })
    }
}
