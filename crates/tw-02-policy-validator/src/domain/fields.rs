//! The fields of a wipe request, as submitted.

use serde_json::Value;
use shared_types::WipeMethod;
use std::fmt;

use super::errors::ValidationError;

/// Fields that carry a length/pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Drive,
    Username,
    Password,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed, unvalidated request fields. Empty strings count as missing.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct WipeFields<'a> {
    pub drive: Option<&'a str>,
    pub method: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl<'a> WipeFields<'a> {
    pub fn new(drive: &'a str, method: &'a str, username: &'a str, password: &'a str) -> Self {
        Self {
            drive: Some(drive),
            method: Some(method),
            username: Some(username),
            password: Some(password),
        }
    }

    /// Read the fields out of a JSON object (IPC payloads).
    ///
    /// Absent keys and `null` map to `None`; any other non-string value is
    /// rejected as [`ValidationError::NotText`].
    pub fn from_json(value: &'a Value) -> Result<Self, ValidationError> {
        let field = move |key: &str, kind: FieldKind| match value.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ValidationError::NotText(kind)),
        };

        let method = match value.get("method") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => return Err(ValidationError::UnknownMethod(other.to_string())),
        };

        Ok(Self {
            drive: field("drive", FieldKind::Drive)?,
            method,
            username: field("username", FieldKind::Username)?,
            password: field("password", FieldKind::Password)?,
        })
    }

    pub(crate) fn get(&self, kind: FieldKind) -> Option<&'a str> {
        let value = match kind {
            FieldKind::Drive => self.drive,
            FieldKind::Username => self.username,
            FieldKind::Password => self.password,
        };
        value.filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for WipeFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WipeFields")
            .field("drive", &self.drive)
            .field("method", &self.method)
            .field("username", &self.username)
            .field("password", &self.password.map(|_| "***"))
            .finish()
    }
}

/// Fields that passed every rule. The password is not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedFields<'a> {
    pub drive: &'a str,
    pub method: WipeMethod,
    pub username: &'a str,
}
