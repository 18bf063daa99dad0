//! Owner aggregate.
//!
//! An owner is a named adult who may have pets. Owners are validated when a
//! [`NewOwner`] is constructed, so persistence adapters only ever see values
//! that already satisfy the invariants below.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum age accepted for an owner.
pub const MIN_OWNER_AGE: i32 = 18;

/// Longest owner or pet name the stores accept, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Store-assigned owner identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct OwnerId(i64);

impl OwnerId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Constraint violations raised while building an owner.
///
/// `Display` yields the constraint message alone; use
/// [`OwnerValidationError::field`] to qualify it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnerValidationError {
    /// Name was empty or whitespace.
    #[error("must not be blank")]
    BlankName,
    /// Name exceeded [`MAX_NAME_LENGTH`].
    #[error("size must be between 1 and {max}")]
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Rejected length.
        actual: usize,
    },
    /// Age was under the adult threshold.
    #[error("must be greater than or equal to {min}")]
    AgeBelowMinimum {
        /// Minimum permitted age.
        min: i32,
        /// Rejected age.
        actual: i32,
    },
}

impl OwnerValidationError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankName | Self::NameTooLong { .. } => "name",
            Self::AgeBelowMinimum { .. } => "age",
        }
    }

    /// Stable identifier of the violated constraint.
    #[must_use]
    pub const fn constraint(&self) -> &'static str {
        match self {
            Self::BlankName => "not_blank",
            Self::NameTooLong { .. } => "size",
            Self::AgeBelowMinimum { .. } => "min",
        }
    }
}

/// A validated owner that has not been persisted yet.
///
/// # Examples
/// ```
/// use pets_api::domain::{NewOwner, OwnerValidationError};
///
/// let owner = NewOwner::try_new("Bob", 35).expect("valid owner");
/// assert_eq!(owner.name(), "Bob");
///
/// let err = NewOwner::try_new("Bob", 10).expect_err("too young");
/// assert_eq!(err.field(), "age");
/// assert_eq!(err.to_string(), "must be greater than or equal to 18");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    name: String,
    age: i32,
}

impl NewOwner {
    /// Validate and build a new owner. The name is checked before the age.
    pub fn try_new(name: impl Into<String>, age: i32) -> Result<Self, OwnerValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OwnerValidationError::BlankName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(OwnerValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: length,
            });
        }
        if age < MIN_OWNER_AGE {
            return Err(OwnerValidationError::AgeBelowMinimum {
                min: MIN_OWNER_AGE,
                actual: age,
            });
        }
        Ok(Self { name, age })
    }

    /// Owner name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Owner age in years.
    pub const fn age(&self) -> i32 {
        self.age
    }
}

/// Persisted owner.
///
/// ## Invariants
/// - `name` is non-blank and at most [`MAX_NAME_LENGTH`] characters.
/// - `age` is at least [`MIN_OWNER_AGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "OwnerDto", into = "OwnerDto")]
pub struct Owner {
    id: OwnerId,
    #[schema(example = "Barney")]
    name: String,
    #[schema(example = 35)]
    age: i32,
}

impl Owner {
    /// Combine a store-assigned identifier with validated owner data.
    #[must_use]
    pub fn new(id: OwnerId, owner: NewOwner) -> Self {
        let NewOwner { name, age } = owner;
        Self { id, name, age }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> OwnerId {
        self.id
    }

    /// Owner name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Owner age in years.
    pub const fn age(&self) -> i32 {
        self.age
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OwnerDto {
    id: OwnerId,
    name: String,
    age: i32,
}

impl From<Owner> for OwnerDto {
    fn from(value: Owner) -> Self {
        Self {
            id: value.id,
            name: value.name,
            age: value.age,
        }
    }
}

impl TryFrom<OwnerDto> for Owner {
    type Error = OwnerValidationError;

    fn try_from(value: OwnerDto) -> Result<Self, Self::Error> {
        NewOwner::try_new(value.name, value.age).map(|owner| Self::new(value.id, owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 30, OwnerValidationError::BlankName)]
    #[case("   ", 30, OwnerValidationError::BlankName)]
    #[case("Bob", 17, OwnerValidationError::AgeBelowMinimum { min: 18, actual: 17 })]
    #[case("", 10, OwnerValidationError::BlankName)]
    #[case(&"a".repeat(256), 30, OwnerValidationError::NameTooLong { max: 255, actual: 256 })]
    #[case(&"b".repeat(300), 10, OwnerValidationError::NameTooLong { max: 255, actual: 300 })]
    fn rejects_invalid_owners(
        #[case] name: &str,
        #[case] age: i32,
        #[case] expected: OwnerValidationError,
    ) {
        assert_eq!(NewOwner::try_new(name, age), Err(expected));
    }

    #[rstest]
    #[case(18)]
    #[case(99)]
    fn accepts_adults(#[case] age: i32) {
        let owner = NewOwner::try_new("Harry", age).expect("valid owner");
        assert_eq!(owner.age(), age);
    }

    #[rstest]
    #[case("a".repeat(255))]
    #[case("é".repeat(255))]
    fn accepts_names_up_to_the_column_width(#[case] name: String) {
        let owner = NewOwner::try_new(name.clone(), 30).expect("valid owner");
        assert_eq!(owner.name(), name);
    }

    #[rstest]
    fn validation_error_names_field_and_constraint() {
        let err = OwnerValidationError::AgeBelowMinimum { min: 18, actual: 3 };
        assert_eq!(err.field(), "age");
        assert_eq!(err.constraint(), "min");
        assert_eq!(err.to_string(), "must be greater than or equal to 18");
        assert_eq!(OwnerValidationError::BlankName.to_string(), "must not be blank");

        let err = OwnerValidationError::NameTooLong { max: 255, actual: 300 };
        assert_eq!(err.field(), "name");
        assert_eq!(err.constraint(), "size");
        assert_eq!(err.to_string(), "size must be between 1 and 255");
    }

    #[rstest]
    fn serialises_flat_json() {
        let owner = Owner::new(OwnerId::new(7), NewOwner::try_new("Barney", 35).expect("owner"));
        let value = serde_json::to_value(&owner).expect("serialise");
        assert_eq!(value, serde_json::json!({ "id": 7, "name": "Barney", "age": 35 }));
    }

    #[rstest]
    fn deserialise_enforces_invariants() {
        let result: Result<Owner, _> =
            serde_json::from_str(r#"{"id": 1, "name": "Kid", "age": 9}"#);
        assert!(result.is_err());
    }
}
