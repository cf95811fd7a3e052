//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty or only whitespace.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The floor identifier could not be parsed.
    #[error("invalid floor: {value} (expected e.g. \"Floor 2\" or \"2\")")]
    InvalidFloor { value: String },
}

/// Generates a validated, trimmed string newtype with common trait implementations.
macro_rules! define_text_field {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after trimming and validation.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if trimmed.len() == value.len() {
                    return Ok(Self(value));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_text_field!(
    /// A validated licence plate.
    ///
    /// Plates must be non-empty once trimmed. Uniqueness across active
    /// sessions is enforced by the store.
    Plate, "plate"
);

define_text_field!(
    /// A validated vehicle type label (e.g. "Sedan", "Motorcycle").
    VehicleType, "vehicle type"
);

/// A floor of the car park, numbered from 1.
///
/// Floors are displayed and stored as `Floor N`. Parsing also accepts the
/// bare number, so `"2"` and `"Floor 2"` name the same floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Floor(u32);

impl Floor {
    /// Display prefix used for floor names.
    pub const PREFIX: &str = "Floor";

    /// Creates a floor from its 1-based number.
    pub fn new(number: u32) -> Result<Self, ValidationError> {
        if number == 0 {
            return Err(ValidationError::Empty { field: "floor" });
        }
        Ok(Self(number))
    }

    /// Returns the 1-based floor number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl FromStr for Floor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .map_or(trimmed, str::trim_start);
        digits
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidFloor {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Floor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Floor> for String {
    fn from(floor: Floor) -> Self {
        floor.to_string()
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::PREFIX, self.0)
    }
}
