//! Owner registry file parsing.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::OwnerSeedDefinition;

/// Errors that can occur when reading or parsing an owner registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    Io {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

/// Owners configured for seeding, in insertion order.
///
/// # Examples
///
/// ```
/// use pets_api::owner_seeds::OwnerRegistry;
///
/// let registry = OwnerRegistry::from_json(
///     r#"{ "owners": [{ "name": "Harry", "age": 40, "pets": ["Sally"] }] }"#,
/// )
/// .expect("valid registry");
/// assert_eq!(registry.owners.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerRegistry {
    /// Owner definitions.
    #[serde(default)]
    pub owners: Vec<OwnerSeedDefinition>,
}

impl OwnerRegistry {
    /// Parse a registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] when the payload is not a valid
    /// registry document.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let document: Value = serde_json::from_str(json).map_err(parse_error)?;
        require_object(&document, "registry")?;
        if let Some(Value::Array(owners)) = document.get("owners") {
            owners
                .iter()
                .try_for_each(|owner| require_object(owner, "owner entry"))?;
        }
        serde_json::from_value(document).map_err(parse_error)
    }
}

fn parse_error(err: serde_json::Error) -> RegistryError {
    RegistryError::Parse {
        message: err.to_string(),
    }
}

// Derived struct deserializers also accept sequences.
fn require_object(value: &Value, what: &str) -> Result<(), RegistryError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(RegistryError::Parse {
            message: format!("{what} must be a JSON object"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_owners_and_pets_in_order() {
        let registry = OwnerRegistry::from_json(
            r#"{
                "owners": [
                    { "name": "Harry", "age": 40, "pets": ["Sally"] },
                    { "name": "Barney", "age": 35 }
                ]
            }"#,
        )
        .expect("valid registry");

        let names: Vec<&str> = registry.owners.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Harry", "Barney"]);
        assert_eq!(registry.owners[0].pets, ["Sally"]);
        assert!(registry.owners[1].pets.is_empty());
    }

    #[rstest]
    fn empty_document_has_no_owners() {
        let registry = OwnerRegistry::from_json("{}").expect("valid registry");
        assert!(registry.owners.is_empty());
    }

    #[rstest]
    #[case::malformed("{ not json")]
    #[case::unknown_field(r#"{ "owners": [], "extra": true }"#)]
    #[case::unknown_owner_field(r#"{ "owners": [{ "name": "A", "age": 30, "email": "x" }] }"#)]
    #[case::missing_age(r#"{ "owners": [{ "name": "A" }] }"#)]
    #[case::empty_array("[]")]
    #[case::nested_array(r#"[[{ "name": "A", "age": 30 }]]"#)]
    #[case::owner_as_array(r#"{ "owners": [["A", 30]] }"#)]
    #[case::scalar("42")]
    fn rejects_invalid_documents(#[case] json: &str) {
        let err = OwnerRegistry::from_json(json).expect_err("invalid registry");
        assert!(matches!(err, RegistryError::Parse { .. }));
    }

    #[rstest]
    fn array_root_names_the_expected_shape() {
        let err = OwnerRegistry::from_json("[]").expect_err("array root");
        assert_eq!(
            err,
            RegistryError::Parse {
                message: "registry must be a JSON object".to_owned(),
            }
        );
    }
}
