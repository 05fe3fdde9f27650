pub mod api;
pub mod command;
pub mod config;
pub mod controller;
pub mod notify;
pub mod render;
pub mod state;
pub mod utils;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Department shown for users loaded from the remote collection, which has no such field.
pub const DEFAULT_DEPARTMENT: &str = "N/A";

/// A user as held in the local list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl UserRecord {
    pub fn from_remote(remote: RemoteUser) -> Self {
        let (first_name, last_name) = split_full_name(&remote.name);
        Self {
            id: remote.id,
            first_name,
            last_name,
            email: remote.email,
            department: DEFAULT_DEPARTMENT.to_string(),
        }
    }

    pub fn from_new(id: u64, user: NewUser) -> Self {
        Self {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            department: user.department,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

/// Item of the remote read-all response. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Body of a create response; only the assigned id is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedUser {
    pub id: u64,
}

/// Splits "First Last" on single spaces. Tokens past the second are dropped and
/// missing parts come back empty.
pub fn split_full_name(name: &str) -> (String, String) {
    let mut parts = name.split(' ');
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.next().unwrap_or_default().to_string();
    (first, last)
}

/// The four form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Department,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Department,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Department => "department",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Department => "Department",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}` (expected firstName, lastName, email or department)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Staging copy of a record being added or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub is_editing: bool,
}

impl DraftForm {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: Some(record.id),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            is_editing: true,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Department => &self.department,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
        };
        *slot = value.into();
    }

    /// Required inputs that are still blank.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }

    /// The full record for an update; `None` unless the draft carries an id.
    pub fn to_record(&self) -> Option<UserRecord> {
        self.id.map(|id| UserRecord::from_new(id, self.to_new_user()))
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing {
            "Update"
        } else {
            "Add"
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing {
            "Edit User"
        } else {
            "Add User"
        }
    }
}
