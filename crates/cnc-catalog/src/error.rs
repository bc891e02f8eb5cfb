//! Error types for catalog loading and configuration

use std::path::PathBuf;

/// Errors while loading catalogs or catalog configuration
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No loader for the file extension
    #[error("unsupported catalog format: '{0}'")]
    UnsupportedFormat(String),

    /// JSON document malformed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document malformed
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML document malformed
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two records normalize to the same identifier
    #[error("duplicate catalog id '{id}' in catalog '{catalog}'")]
    DuplicateId { catalog: String, id: String },

    /// Configuration value out of range
    #[error("invalid value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_display() {
        let err = CatalogError::UnsupportedFormat("csv".to_string());
        assert_eq!(err.to_string(), "unsupported catalog format: 'csv'");
    }

    #[test]
    fn duplicate_id_display() {
        let err = CatalogError::DuplicateId {
            catalog: "oem".into(),
            id: "haas_vf_2".into(),
        };
        assert_eq!(err.to_string(), "duplicate catalog id 'haas_vf_2' in catalog 'oem'");
    }

    #[test]
    fn io_error_keeps_path() {
        let err = CatalogError::io_error(
            "machines.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("machines.json"));
    }
}
