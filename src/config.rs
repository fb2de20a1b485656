//! Configuration for paginators
//!
//! Per-visibility default options and the identity field, loadable from
//! YAML or JSON.
//!
//! ```yaml
//! identity_field: _id
//! defaults:
//!   limit: 20
//! deleted:
//!   lean: true
//! with_deleted: {}
//! ```

use crate::error::{Error, Result};
use crate::options::PaginateOptions;
use crate::types::{Visibility, DEFAULT_ID_FIELD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Paginator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    /// Identity field copied into `id` for lean results
    pub identity_field: String,

    /// Defaults for default-visibility calls
    pub defaults: PaginateOptions,

    /// Defaults for deleted-only calls
    pub deleted: PaginateOptions,

    /// Defaults for calls including soft-deleted records
    pub with_deleted: PaginateOptions,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            identity_field: default_identity_field(),
            defaults: PaginateOptions::default(),
            deleted: PaginateOptions::default(),
            with_deleted: PaginateOptions::default(),
        }
    }
}

fn default_identity_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

impl PaginatorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity field
    #[must_use]
    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = field.into();
        self
    }

    /// Set the default options for one visibility
    #[must_use]
    pub fn with_defaults(mut self, visibility: Visibility, options: PaginateOptions) -> Self {
        *self.defaults_for_mut(visibility) = options;
        self
    }

    /// Default options for one visibility
    pub fn defaults_for(&self, visibility: Visibility) -> &PaginateOptions {
        match visibility {
            Visibility::Default => &self.defaults,
            Visibility::Deleted => &self.deleted,
            Visibility::WithDeleted => &self.with_deleted,
        }
    }

    fn defaults_for_mut(&mut self, visibility: Visibility) -> &mut PaginateOptions {
        match visibility {
            Visibility::Default => &mut self.defaults,
            Visibility::Deleted => &mut self.deleted,
            Visibility::WithDeleted => &mut self.with_deleted,
        }
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse paginator YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse paginator JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; `.json` files are parsed as JSON,
    /// everything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.identity_field.trim().is_empty() {
            return Err(Error::config("identity_field cannot be empty"));
        }
        Ok(())
    }
}
