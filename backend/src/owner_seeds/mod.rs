//! Startup wiring for owner seeding.

mod config;
mod registry;
mod startup;

pub use config::OwnerSeedSettings;
pub use registry::{OwnerRegistry, RegistryError};
pub use startup::{StartupSeedingError, seed_owners_on_startup};
