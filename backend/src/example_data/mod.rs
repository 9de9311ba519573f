//! Startup wiring for the example marketplace dataset.

mod config;
mod startup;

pub use config::{DEMO_SEED, ExampleDataSettings, bundled_registry_path};
pub use startup::{StartupSeedingError, load_marketplace_on_startup, marketplace_from_seed};
