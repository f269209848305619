//! Persistent user configuration.
//!
//! Stored as JSON at `<config_dir>/filesigner/config.json`:
//!
//! ```json
//! {
//!   "comment_styles": {
//!     "hs": { "open": "--" },
//!     "vue": { "open": "<!--", "close": "-->" }
//!   },
//!   "logging": { "level": "info", "file": true }
//! }
//! ```

use crate::error::SignerError;
use crate::marker::body::MARKER_TAGS;
use crate::marker::{CommentStyle, CommentStyles};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Comment syntax for one extension, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStyleConfig {
    pub open: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Whether to also write rotating log files
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            file: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Additions to, or overrides of, the built-in extension table
    pub comment_styles: BTreeMap<String, CommentStyleConfig>,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Default config file location
    ///
    /// # Errors
    ///
    /// Returns error if the platform has no config directory
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("filesigner").join("config.json"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or is not valid
    /// config JSON
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config JSON in {}", path.display()))
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Built-in table with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::Config` for an empty extension or opening
    /// token, or a token that contains a newline or a marker tag (it would
    /// break marker parsing).
    pub fn comment_styles(&self) -> crate::error::Result<CommentStyles> {
        let mut styles = CommentStyles::builtin();

        for (extension, entry) in &self.comment_styles {
            if extension.trim_start_matches('.').is_empty() {
                return Err(SignerError::Config(
                    "comment style with empty extension".to_owned(),
                ));
            }
            if entry.open.trim().is_empty() {
                return Err(SignerError::Config(format!(
                    "empty comment token for extension '{extension}'"
                )));
            }
            for token in std::iter::once(&entry.open).chain(entry.close.as_ref()) {
                validate_token(extension, token)?;
            }

            styles.insert(
                extension,
                CommentStyle::custom(entry.open.clone(), entry.close.clone()),
            );
        }

        Ok(styles)
    }
}

fn validate_token(extension: &str, token: &str) -> crate::error::Result<()> {
    if token.contains('\n') || token.contains('\r') {
        return Err(SignerError::Config(format!(
            "comment token for '{extension}' contains a line break"
        )));
    }
    if let Some(tag) = MARKER_TAGS.iter().find(|tag| token.contains(*tag)) {
        return Err(SignerError::Config(format!(
            "comment token for '{extension}' contains marker tag {tag}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn with_style(ext: &str, open: &str, close: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.comment_styles.insert(
            ext.to_owned(),
            CommentStyleConfig {
                open: open.to_owned(),
                close: close.map(str::to_owned),
            },
        );
        config
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = with_style("vue", "<!--", Some("-->"));

        config.save(&path).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "logging": { "file": true } }"#).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(config.logging.file);
        assert_eq!(config.logging.level, "warn");
        assert!(config.comment_styles.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_overrides_applied() {
        let styles = with_style(".HS", "--", None).comment_styles().unwrap();
        assert_eq!(styles.for_extension("hs").open(), "--");
        // Built-ins still present
        assert_eq!(styles.for_extension("py").open(), "#");
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = with_style("hs", "  ", None).comment_styles().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_empty_extension_rejected() {
        let err = with_style(".", "#", None).comment_styles().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_token_with_marker_tag_rejected() {
        let err = with_style("x", "#", Some("_HASH_"))
            .comment_styles()
            .unwrap_err();
        assert!(err.to_string().contains("_HASH_"));
    }

    #[test]
    fn test_token_with_newline_rejected() {
        let err = with_style("x", "/*\n", Some("*/"))
            .comment_styles()
            .unwrap_err();
        assert!(err.to_string().contains("line break"));
    }
}
