//! Settings that pick the marketplace dataset loaded at startup.
//!
//! Values layer in this order, later layers winning: built-in defaults,
//! config files, `EXAMPLE_DATA_*` environment variables, then the
//! `learnify` command-line flags applied through
//! [`ExampleDataSettings::with_overrides`].

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Dataset bundled with the backend: two teachers, one student, three
/// published courses.
pub const DEMO_SEED: &str = "learnify-demo";

/// Bundled registry shipped beside the crate manifest.
pub fn bundled_registry_path() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "fixtures", "example-data", "seeds.json"]
        .iter()
        .collect()
}

/// Which seed the marketplace starts from, and where the registry lives.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Start from the seed; when off the marketplace starts empty.
    #[ortho_config(default = true)]
    pub enabled: bool,
    /// Seed to select from the registry. Defaults to [`DEMO_SEED`].
    pub seed_name: Option<String>,
    /// Registry file. Defaults to [`bundled_registry_path`].
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEMO_SEED)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(bundled_registry_path)
    }

    /// Apply command-line choices on top of the loaded layers. `None`
    /// keeps the current value.
    #[must_use]
    pub fn with_overrides(
        mut self,
        seed_name: Option<String>,
        registry_path: Option<PathBuf>,
    ) -> Self {
        if seed_name.is_some() {
            self.seed_name = seed_name;
        }
        if registry_path.is_some() {
            self.registry_path = registry_path;
        }
        self
    }
}
