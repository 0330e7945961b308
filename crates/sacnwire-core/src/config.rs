use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::protocols::sacn::addressing::is_valid_universe;
use crate::protocols::sacn::layout;
use crate::protocols::sacn::{Cid, FramingOptions};

pub const DEFAULT_SOURCE_NAME: &str = "sacnwire";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source name is {len} bytes, at most {max} fit")]
    SourceNameTooLong { len: usize, max: usize },
    #[error("priority {value} out of range 0..={max}")]
    InvalidPriority { value: u8, max: u8 },
    #[error("universe {value} out of range 1..=63999")]
    InvalidUniverse { value: u16 },
}

/// Identity and defaults shared by every universe a source transmits.
///
/// # Examples
/// ```
/// use sacnwire_core::SourceConfig;
///
/// let config = SourceConfig::from_json(r#"{ "source_name": "desk", "universes": [1, 2] }"#)?;
/// assert_eq!(config.priority, 100);
/// assert_eq!(config.universes, vec![1, 2]);
/// # Ok::<(), sacnwire_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Generated when absent; persist it to keep the identity stable.
    #[serde(default = "Cid::generate")]
    pub cid: Cid,
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub universes: Vec<u16>,
}

fn default_source_name() -> String {
    DEFAULT_SOURCE_NAME.to_string()
}

fn default_priority() -> u8 {
    layout::DEFAULT_PRIORITY
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            cid: Cid::generate(),
            source_name: default_source_name(),
            priority: default_priority(),
            preview: false,
            universes: Vec::new(),
        }
    }
}

impl SourceConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), cid = %config.cid, "loaded sACN source config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_name.len() > layout::SOURCE_NAME_LEN {
            return Err(ConfigError::SourceNameTooLong {
                len: self.source_name.len(),
                max: layout::SOURCE_NAME_LEN,
            });
        }
        if self.priority > layout::MAX_PRIORITY {
            return Err(ConfigError::InvalidPriority {
                value: self.priority,
                max: layout::MAX_PRIORITY,
            });
        }
        if let Some(&value) = self.universes.iter().find(|u| !is_valid_universe(**u)) {
            return Err(ConfigError::InvalidUniverse { value });
        }
        Ok(())
    }

    /// Framing options every packet of this source carries.
    pub fn options(&self) -> FramingOptions {
        if self.preview {
            FramingOptions::PREVIEW_DATA
        } else {
            FramingOptions::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{ConfigError, SourceConfig};
    use crate::protocols::sacn::{Cid, FramingOptions};

    #[test]
    fn defaults_fill_missing_fields() {
        let config = SourceConfig::from_json("{}").unwrap();
        assert_eq!(config.source_name, "sacnwire");
        assert_eq!(config.priority, 100);
        assert!(!config.preview);
        assert!(config.universes.is_empty());
        assert_ne!(config.cid, Cid::NIL);
    }

    #[test]
    fn cid_accepts_hyphenated_uuid() {
        let config =
            SourceConfig::from_json(r#"{ "cid": "00000000-0000-0000-0000-000000000001" }"#)
                .unwrap();
        assert_eq!(config.cid.as_bytes()[15], 1);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SourceConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_priority_above_max() {
        let err = SourceConfig::from_json(r#"{ "priority": 201 }"#).unwrap_err();
        assert!(err.to_string().contains("priority 201"));
    }

    #[test]
    fn rejects_universe_zero() {
        let err = SourceConfig::from_json(r#"{ "universes": [1, 0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUniverse { value: 0 }));
    }

    #[test]
    fn rejects_long_source_name() {
        let json = format!(r#"{{ "source_name": "{}" }}"#, "n".repeat(65));
        let err = SourceConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::SourceNameTooLong { len: 65, .. }));
    }

    #[test]
    fn preview_maps_to_option_bit() {
        let config = SourceConfig::from_json(r#"{ "preview": true }"#).unwrap();
        assert_eq!(config.options(), FramingOptions::PREVIEW_DATA);
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("source.json");
        fs::write(&path, r#"{ "source_name": "desk", "universes": [7] }"#).unwrap();

        let config = SourceConfig::load(&path).unwrap();
        assert_eq!(config.source_name, "desk");
        assert_eq!(config.universes, vec![7]);
    }

    #[test]
    fn load_missing_file_names_path() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("missing.json");
        let err = SourceConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
