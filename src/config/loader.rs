use crate::config::schema::{SessionConfig, ValidationError};
use crate::rules::RuleRegistry;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = ".css-promptify.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config from {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse config TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse config TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid config ({}): {}", path.display(), source),
                None => write!(f, "invalid config: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

/// Parse a TOML session config and check it against `registry`.
pub fn load_from_str(input: &str, registry: &RuleRegistry) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate(registry)
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(
    path: impl AsRef<Path>,
    registry: &RuleRegistry,
) -> Result<SessionConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents, registry).map_err(|error| error.with_path(path))
}

/// Nearest [`CONFIG_FILE_NAME`] in `start` or any of its ancestors.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{RuleGroup, Severity};

    #[test]
    fn parses_rule_and_group_overrides() {
        let registry = RuleRegistry::with_builtin_rules();
        let config = load_from_str(
            r#"
[rules."format/no-tabs"]
enabled = false

[rules."tokens/zero-units"]
severity = "warning"

[groups.education]
enabled = false
"#,
            &registry,
        )
        .unwrap();

        assert_eq!(config.rules["format/no-tabs"].enabled, Some(false));
        assert_eq!(
            config.rules["tokens/zero-units"].severity,
            Some(Severity::Warning)
        );
        assert_eq!(config.groups[&RuleGroup::Education].enabled, Some(false));
    }

    #[test]
    fn empty_input_is_default_config() {
        let registry = RuleRegistry::with_builtin_rules();
        assert_eq!(load_from_str("", &registry).unwrap(), SessionConfig::default());
    }

    #[test]
    fn unknown_group_is_a_toml_error() {
        let registry = RuleRegistry::with_builtin_rules();
        let err = load_from_str("[groups.colors]\nenabled = true\n", &registry).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn unknown_rule_is_a_validation_error_with_path() {
        let registry = RuleRegistry::with_builtin_rules();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[rules.\"format/nope\"]\nenabled = false\n").unwrap();

        let err = load_from_path(&path, &registry).unwrap_err();
        match err {
            ConfigError::Validation { path: Some(p), .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn discovers_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("styles/components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }
}
