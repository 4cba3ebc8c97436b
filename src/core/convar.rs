//! Console variable (ConVar) implementation.
//!
//! A ConVar holds exactly one integer, float, boolean or string value. Its
//! kind is fixed at construction: typed getters and setters for any other
//! kind do nothing.

use std::fmt::{self, Display};

use super::{parse_bool, parse_float, parse_int};

/// The kind of value a [`ConVar`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Integer,
    Float,
    Boolean,
    String,
}

impl VarKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            VarKind::Integer => "integer",
            VarKind::Float => "float",
            VarKind::Boolean => "boolean",
            VarKind::String => "string",
        }
    }
}

impl Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The stored value of a [`ConVar`].
///
/// String values are either owned by the variable or borrowed from static
/// storage. Replacing an owned string drops the previous buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Integer(i32),
    Float(f32),
    Boolean(bool),
    OwnedString(String),
    BorrowedString(&'static str),
}

impl VarValue {
    /// Get the kind of this value.
    pub fn kind(&self) -> VarKind {
        match self {
            VarValue::Integer(_) => VarKind::Integer,
            VarValue::Float(_) => VarKind::Float,
            VarValue::Boolean(_) => VarKind::Boolean,
            VarValue::OwnedString(_) | VarValue::BorrowedString(_) => VarKind::String,
        }
    }
}

/// A typed console variable.
///
/// # Examples
///
/// ```
/// use bevy_console_args::core::{ConVar, VarKind};
///
/// let mut prefix = ConVar::from("user");
/// assert_eq!(prefix.kind(), VarKind::String);
/// assert!(!prefix.owns_string());
///
/// // Assignment from console text always takes an owned copy
/// assert!(prefix.assign("admin"));
/// assert_eq!(prefix.get_str(), "admin");
/// assert!(prefix.owns_string());
///
/// // Mismatched setters are no-ops
/// assert!(!prefix.set_int(3));
/// assert_eq!(prefix.get_int(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConVar {
    value: VarValue,
}

impl ConVar {
    /// Create an integer variable.
    pub fn int(value: i32) -> Self {
        Self {
            value: VarValue::Integer(value),
        }
    }

    /// Create a float variable.
    pub fn float(value: f32) -> Self {
        Self {
            value: VarValue::Float(value),
        }
    }

    /// Create a boolean variable.
    pub fn bool(value: bool) -> Self {
        Self {
            value: VarValue::Boolean(value),
        }
    }

    /// Create a string variable borrowing a static default.
    pub fn str(value: &'static str) -> Self {
        Self {
            value: VarValue::BorrowedString(value),
        }
    }

    /// Create a string variable owning its value.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: VarValue::OwnedString(value.into()),
        }
    }

    #[inline]
    pub fn kind(&self) -> VarKind {
        self.value.kind()
    }

    #[inline]
    pub fn value(&self) -> &VarValue {
        &self.value
    }

    /// Check if the variable owns its string buffer.
    #[inline]
    pub fn owns_string(&self) -> bool {
        matches!(self.value, VarValue::OwnedString(_))
    }

    /// Get the integer value, or `0` for other kinds.
    pub fn get_int(&self) -> i32 {
        match self.value {
            VarValue::Integer(v) => v,
            _ => 0,
        }
    }

    /// Get the float value, or `0.0` for other kinds.
    pub fn get_float(&self) -> f32 {
        match self.value {
            VarValue::Float(v) => v,
            _ => 0.0,
        }
    }

    /// Get the boolean value, or `false` for other kinds.
    pub fn get_bool(&self) -> bool {
        match self.value {
            VarValue::Boolean(v) => v,
            _ => false,
        }
    }

    /// Get the string value, or `""` for other kinds.
    pub fn get_str(&self) -> &str {
        match &self.value {
            VarValue::OwnedString(s) => s,
            VarValue::BorrowedString(s) => s,
            _ => "",
        }
    }

    /// Set an integer value. Returns `false` if this is not an integer variable.
    pub fn set_int(&mut self, value: i32) -> bool {
        match &mut self.value {
            VarValue::Integer(v) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Set a float value. Returns `false` if this is not a float variable.
    pub fn set_float(&mut self, value: f32) -> bool {
        match &mut self.value {
            VarValue::Float(v) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Set a boolean value. Returns `false` if this is not a boolean variable.
    pub fn set_bool(&mut self, value: bool) -> bool {
        match &mut self.value {
            VarValue::Boolean(v) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Store an owned string, dropping any previously owned one.
    ///
    /// Returns `false` if this is not a string variable.
    pub fn set_string(&mut self, value: impl Into<String>) -> bool {
        if self.kind() != VarKind::String {
            return false;
        }
        self.value = VarValue::OwnedString(value.into());
        true
    }

    /// Point the variable at a static string, dropping any owned one.
    ///
    /// Returns `false` if this is not a string variable.
    pub fn set_str(&mut self, value: &'static str) -> bool {
        if self.kind() != VarKind::String {
            return false;
        }
        self.value = VarValue::BorrowedString(value);
        true
    }

    /// Assign from console text, parsing it according to the variable's kind.
    ///
    /// Numeric and boolean text is parsed permissively and always succeeds.
    /// String variables take an owned copy of `text`.
    pub fn assign(&mut self, text: &str) -> bool {
        match self.kind() {
            VarKind::Integer => self.set_int(parse_int(text)),
            VarKind::Float => self.set_float(parse_float(text)),
            VarKind::Boolean => self.set_bool(parse_bool(text)),
            VarKind::String => self.set_string(text),
        }
    }
}

impl From<i32> for ConVar {
    fn from(value: i32) -> Self {
        Self::int(value)
    }
}

impl From<f32> for ConVar {
    fn from(value: f32) -> Self {
        Self::float(value)
    }
}

impl From<bool> for ConVar {
    fn from(value: bool) -> Self {
        Self::bool(value)
    }
}

impl From<&'static str> for ConVar {
    fn from(value: &'static str) -> Self {
        Self::str(value)
    }
}

impl From<String> for ConVar {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl Display for ConVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            VarValue::Integer(v) => write!(f, "{}", v),
            // Avoid unnecessary decimal places
            VarValue::Float(v) if v.fract() == 0.0 => write!(f, "{:.0}", v),
            VarValue::Float(v) => write!(f, "{}", v),
            VarValue::Boolean(v) => write!(f, "{}", v),
            VarValue::OwnedString(s) => f.write_str(s),
            VarValue::BorrowedString(s) => f.write_str(s),
        }
    }
}
