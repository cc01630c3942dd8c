//! Session configuration: override semantics and TOML loading.

pub mod loader;
pub mod schema;

pub use loader::{discover_config, load_from_path, load_from_str, ConfigError, CONFIG_FILE_NAME};
pub use schema::{GroupOverride, RuleOverride, SessionConfig, ValidationError, ValidationIssue};
