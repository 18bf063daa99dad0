//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{OwnerSeedRepository, SeedingResult};
use crate::domain::{OwnerSeedOutcome, OwnerSeeder, OwnerSeedingError};
use crate::owner_seeds::config::OwnerSeedSettings;
use crate::owner_seeds::registry::{OwnerRegistry, RegistryError};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Validation or persistence failed.
    #[error("owner seeding error: {0}")]
    Seeding(#[from] OwnerSeedingError),
}

/// Seed configured owners on startup when enabled.
///
/// Returns `Ok(None)` when seeding is disabled. A store that already holds
/// owners is left untouched and reported as [`SeedingResult::AlreadySeeded`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use pets_api::outbound::memory::InMemoryPetStore;
/// use pets_api::owner_seeds::{OwnerSeedSettings, seed_owners_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = OwnerSeedSettings {
///     enabled: false,
///     registry_path: None,
/// };
/// let outcome = seed_owners_on_startup(&settings, Arc::new(InMemoryPetStore::new())).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_owners_on_startup<R>(
    settings: &OwnerSeedSettings,
    repository: Arc<R>,
) -> Result<Option<OwnerSeedOutcome>, StartupSeedingError>
where
    R: OwnerSeedRepository,
{
    if !settings.is_enabled() {
        info!(reason = "disabled", "owner seeding skipped");
        return Ok(None);
    }

    let registry_path = settings.registry_path();
    let registry = load_registry(&registry_path)?;

    let seeder = OwnerSeeder::new(repository);
    let outcome = seeder.seed(&registry.owners).await?;

    match outcome.result {
        SeedingResult::Applied => {
            info!(
                registry = %registry_path.display(),
                owner_count = outcome.owner_count,
                pet_count = outcome.pet_count,
                "owner seeding applied"
            );
        }
        SeedingResult::AlreadySeeded => {
            info!(
                registry = %registry_path.display(),
                "owners already present; seeding skipped"
            );
        }
    }

    Ok(Some(outcome))
}

fn load_registry(path: &Path) -> Result<OwnerRegistry, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(OwnerRegistry::from_json(&contents)?)
}
