//! Editor configuration loaded from TOML.
//!
//! Every section and key is optional; an empty document yields
//! [`EditorConfig::default`].

use std::path::{Path, PathBuf};

use crate::history::DEFAULT_MAX_HISTORY;

/// Errors raised while reading or validating a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root of the configuration document.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// `[history]` — undo stack sizing.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HistoryConfig {
    /// Oldest commands are evicted beyond this many entries.
    pub max_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_HISTORY,
        }
    }
}

/// `[logging]` — tracing subscriber setup.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Write to a log file instead of stderr.
    pub file: bool,
    /// Log file directory; defaults to the OS local data dir.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
            directory: None,
        }
    }
}

impl EditorConfig {
    /// Parse a TOML string, running validation.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_size == 0 {
            return Err(ConfigError::Invalid(
                "history.max_size must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let cfg = EditorConfig::parse("").expect("parse");
        assert_eq!(cfg, EditorConfig::default());
        assert_eq!(cfg.history.max_size, 50);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.logging.file);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = EditorConfig::parse("[history]\nmax_size = 5\n").expect("parse");
        assert_eq!(cfg.history.max_size, 5);
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn full_document_parses() {
        let toml = r#"
[history]
max_size = 200

[logging]
level = "floorplan_lib=debug"
file = true
directory = "/tmp/floorplan-logs"
"#;
        let cfg = EditorConfig::parse(toml).expect("parse");
        assert_eq!(cfg.history.max_size, 200);
        assert_eq!(cfg.logging.level, "floorplan_lib=debug");
        assert!(cfg.logging.file);
        assert_eq!(
            cfg.logging.directory.as_deref(),
            Some(Path::new("/tmp/floorplan-logs"))
        );
    }

    #[test]
    fn zero_history_size_is_rejected() {
        let err = EditorConfig::parse("[history]\nmax_size = 0\n").expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("max_size"));
    }

    #[test]
    fn blank_level_is_rejected() {
        let err = EditorConfig::parse("[logging]\nlevel = \"  \"\n").expect_err("invalid");
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn malformed_toml_returns_parse_error() {
        let result = EditorConfig::parse("this is not valid toml ::::");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_returns_read_error() {
        let path = std::env::temp_dir().join("floorplan-config-does-not-exist.toml");
        let result = EditorConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "floorplan-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[history]\nmax_size = 7\n").expect("write config");
        let cfg = EditorConfig::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.history.max_size, 7);
    }
}
