//! Pet entity and vaccination status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::owner::MAX_NAME_LENGTH;
use super::{Owner, OwnerId};

/// Store-assigned pet identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 2)]
pub struct PetId(i64);

impl PetId {
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

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Vaccination status of a pet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetHealth {
    /// Vaccinations are up to date.
    #[default]
    Vaccinated,
    /// The pet is due a vaccination.
    RequiresVaccination,
}

impl PetHealth {
    /// Canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vaccinated => "VACCINATED",
            Self::RequiresVaccination => "REQUIRES_VACCINATION",
        }
    }
}

impl fmt::Display for PetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or supplied health value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pet health status: {value}")]
pub struct UnknownPetHealth {
    /// Rejected input.
    pub value: String,
}

impl FromStr for PetHealth {
    type Err = UnknownPetHealth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VACCINATED" => Ok(Self::Vaccinated),
            "REQUIRES_VACCINATION" => Ok(Self::RequiresVaccination),
            other => Err(UnknownPetHealth {
                value: other.to_owned(),
            }),
        }
    }
}

/// Constraint violations raised while building a pet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetValidationError {
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
}

impl PetValidationError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankName | Self::NameTooLong { .. } => "name",
        }
    }
}

/// Validated pet name: non-blank and at most [`MAX_NAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PetName(String);

impl PetName {
    /// Validate a pet name.
    pub fn try_new(name: impl Into<String>) -> Result<Self, PetValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PetValidationError::BlankName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(PetValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A validated pet awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    name: PetName,
    owner_id: OwnerId,
    health: PetHealth,
}

impl NewPet {
    /// Validate and build a pet for `owner_id` with the default health.
    pub fn try_new(name: impl Into<String>, owner_id: OwnerId) -> Result<Self, PetValidationError> {
        PetName::try_new(name).map(|name| Self::new(name, owner_id))
    }

    /// Build a pet from an already validated name.
    #[must_use]
    pub fn new(name: PetName, owner_id: OwnerId) -> Self {
        Self {
            name,
            owner_id,
            health: PetHealth::default(),
        }
    }

    /// Override the initial health status.
    #[must_use]
    pub fn with_health(mut self, health: PetHealth) -> Self {
        self.health = health;
        self
    }

    /// Pet name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Owning owner's identifier.
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Initial health status.
    pub const fn health(&self) -> PetHealth {
        self.health
    }
}

/// Persisted pet, joined with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    id: PetId,
    #[schema(example = "Hoppy")]
    name: String,
    owner: Owner,
    health: PetHealth,
}

impl Pet {
    /// Assemble a pet from its stored parts.
    #[must_use]
    pub const fn new(id: PetId, name: String, owner: Owner, health: PetHealth) -> Self {
        Self {
            id,
            name,
            owner,
            health,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> PetId {
        self.id
    }

    /// Pet name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Owning owner.
    pub const fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Current vaccination status.
    pub const fn health(&self) -> PetHealth {
        self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewOwner;
    use rstest::rstest;

    #[rstest]
    #[case(PetHealth::Vaccinated, "VACCINATED")]
    #[case(PetHealth::RequiresVaccination, "REQUIRES_VACCINATION")]
    fn health_text_matches_wire_format(#[case] health: PetHealth, #[case] text: &str) {
        assert_eq!(health.as_str(), text);
        assert_eq!(text.parse::<PetHealth>(), Ok(health));
        assert_eq!(
            serde_json::to_value(health).expect("serialise"),
            serde_json::Value::from(text)
        );
    }

    #[rstest]
    fn unknown_health_is_rejected() {
        let err = "sick".parse::<PetHealth>().expect_err("unknown value");
        assert_eq!(err.value, "sick");
    }

    #[rstest]
    fn new_pet_defaults_to_vaccinated() {
        let pet = NewPet::try_new("Hoppy", OwnerId::new(1)).expect("valid pet");
        assert_eq!(pet.health(), PetHealth::Vaccinated);
    }

    #[rstest]
    fn blank_pet_name_is_rejected() {
        let err = NewPet::try_new(" ", OwnerId::new(1)).expect_err("blank name");
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn overlong_pet_name_is_rejected() {
        let err = PetName::try_new("p".repeat(256)).expect_err("name too long");
        assert_eq!(err, PetValidationError::NameTooLong { max: 255, actual: 256 });
        assert_eq!(err.field(), "name");
        assert_eq!(err.to_string(), "size must be between 1 and 255");
        assert!(PetName::try_new("p".repeat(255)).is_ok());
    }

    #[rstest]
    fn pet_serialises_with_nested_owner() {
        let owner = Owner::new(OwnerId::new(2), NewOwner::try_new("Barney", 35).expect("owner"));
        let pet = Pet::new(PetId::new(5), "Hoppy".to_owned(), owner, PetHealth::Vaccinated);
        let value = serde_json::to_value(&pet).expect("serialise");
        assert_eq!(value["owner"]["name"], "Barney");
        assert_eq!(value["health"], "VACCINATED");
    }
}
