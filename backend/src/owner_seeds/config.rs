//! Owner seed configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("owners.json")
}

/// Configuration values controlling owner seeding at startup.
///
/// `enabled` is read from files and the environment only. A clap switch
/// always parses to `false` when absent, which would mask the `true` default.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OWNER_SEEDS")]
pub struct OwnerSeedSettings {
    /// Seed an empty store on startup.
    #[ortho_config(default = true, skip_cli)]
    pub enabled: bool,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
}

impl Default for OwnerSeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            registry_path: None,
        }
    }
}

impl OwnerSeedSettings {
    /// Whether seeding should run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the configured registry path, falling back to the bundled
    /// fixture.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}
