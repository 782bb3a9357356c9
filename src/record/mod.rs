//! Record Module
//!
//! The employee record type and its generation machinery.
//!
//! ## Responsibilities
//! - Define the employee record and its field set
//! - Name-based field access for updates and queries
//! - Enforce the read-only fields (`id`, `birth_date`, `email`)
//! - Generate fully populated candidate records
//!
//! ## Field Model
//! Every queryable field is stored as a string, matching what operators
//! see at query time. Typed interpretation happens at the query layer,
//! not here.

mod factory;
mod names;

pub use factory::RecordFactory;
pub use names::{BuiltinNames, NameSource};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, RosterError};

/// A single employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier, assigned at creation
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Department number rendered as a string ("1" through "10" when generated)
    pub department: String,

    /// Salary rendered with two decimal places (e.g. "12345.00")
    pub salary: String,

    /// Birth date in `YYYY-MM-DD` form
    pub birth_date: String,

    /// Derived from the name and the company email domain
    pub email: String,
}

impl Record {
    /// Every addressable field, in declaration order
    pub const FIELD_NAMES: [&'static str; 7] = [
        "id",
        "first_name",
        "last_name",
        "department",
        "salary",
        "birth_date",
        "email",
    ];

    /// Fields that can never be updated after creation
    pub const READ_ONLY_FIELDS: [&'static str; 3] = ["id", "birth_date", "email"];

    /// Whether `name` addresses a record field
    pub fn is_field(name: &str) -> bool {
        Self::FIELD_NAMES.contains(&name)
    }

    /// Whether `name` addresses a read-only field
    pub fn is_read_only(name: &str) -> bool {
        Self::READ_ONLY_FIELDS.contains(&name)
    }

    /// Read a field by name, rendered as a string
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "department" => Some(self.department.clone()),
            "salary" => Some(self.salary.clone()),
            "birth_date" => Some(self.birth_date.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }

    /// Overwrite a mutable field by name.
    ///
    /// The value is stored exactly as given; no interpretation or
    /// validation applies on write. Read-only fields are rejected
    /// before unknown names are diagnosed.
    pub fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "department" => self.department = value,
            "salary" => self.salary = value,
            other if Self::is_read_only(other) => {
                return Err(RosterError::ReadOnlyField(other.to_string()));
            }
            other => return Err(RosterError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
