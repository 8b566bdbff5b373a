//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! non-empty text, known status codes) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided code is not part of the enumeration.
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: String },
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(PatientId, "Unique identifier for a patient.");
id_newtype!(InvoiceId, "Unique identifier for an invoice.");
id_newtype!(EmployeeId, "Unique identifier for an employee.");
id_newtype!(MedicineId, "Unique identifier for a medicine.");
id_newtype!(MedicalExamId, "Unique identifier for a medical exam order.");
id_newtype!(ScheduleId, "Unique identifier for a doctor schedule entry.");
id_newtype!(PaymentId, "Unique identifier for a payment.");
id_newtype!(DepartmentId, "Unique identifier for a hospital department.");
id_newtype!(CategoryId, "Unique identifier for a medicine category.");

/// Generates a closed enumeration backed by SCREAMING_SNAKE_CASE wire codes.
///
/// The codes are what filters compare against and what the database stores,
/// so `as_str` and `FromStr` must stay exact inverses.
macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Wire code of the variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::types::TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    other => Err($crate::domain::types::TypeConstraintError::UnknownCode {
                        kind: $kind,
                        code: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::types::TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use code_enum;

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    code_enum!(
        /// Test-only enumeration.
        Colour, "colour" {
            Red => "RED",
            DarkBlue => "DARK_BLUE",
        }
    );

    #[test]
    fn id_newtypes_reject_non_positive_values() {
        assert_eq!(PatientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(InvoiceId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(PatientId::new(7).map(PatientId::get), Ok(7));
    }

    #[test]
    fn id_newtypes_serialize_as_plain_numbers() {
        let id = DepartmentId::new(12).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }

    #[test]
    fn code_enum_round_trips_wire_codes() {
        assert_eq!("DARK_BLUE".parse::<Colour>(), Ok(Colour::DarkBlue));
        assert_eq!(Colour::Red.as_str(), "RED");
        assert_eq!(serde_json::to_string(&Colour::DarkBlue).unwrap(), "\"DARK_BLUE\"");
        assert_eq!(
            "red".parse::<Colour>(),
            Err(TypeConstraintError::UnknownCode {
                kind: "colour",
                code: "red".to_string()
            })
        );
    }

    #[test]
    fn non_empty_string_trims_and_rejects_blank() {
        assert_eq!(NonEmptyString::new("  ok ").unwrap().as_str(), "ok");
        assert_eq!(
            NonEmptyString::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }
}
