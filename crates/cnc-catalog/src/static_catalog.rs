//! Read-only OEM record catalogs
//!
//! Catalogs are loaded once from JSON, YAML or TOML documents and answer
//! lookups by normalized identifier. Each record becomes a descriptor whose
//! payload is the record itself.
//!
//! ```toml
//! name = "hurco"
//!
//! [[records]]
//! id = "Hurco VM-50 i"
//! manufacturer = "Hurco"
//! has_geometry = true
//! axes = 3
//! ```

use crate::error::{CatalogError, CatalogResult};
use cnc_resolver::{normalize, Descriptor, NormalizedId, Provider, ProviderResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Raw identifier as written in the catalog
    ///
    /// Integer ids (`id = 1100`) are accepted and kept as their decimal text.
    #[serde(deserialize_with = "scalar_id")]
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Manufacturer / OEM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Record carries verified geometry (e.g. an OEM STEP model)
    #[serde(default)]
    pub has_geometry: bool,

    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

fn scalar_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScalarId {
        Text(String),
        Integer(i64),
    }

    Ok(match ScalarId::deserialize(deserializer)? {
        ScalarId::Text(text) => text,
        ScalarId::Integer(n) => n.to_string(),
    })
}

impl CatalogRecord {
    /// Create record with only an id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            manufacturer: None,
            has_geometry: false,
            attributes: serde_json::Map::new(),
        }
    }

    /// With manufacturer
    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// With display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With geometry flag
    #[must_use]
    pub fn with_geometry(mut self, has_geometry: bool) -> Self {
        self.has_geometry = has_geometry;
        self
    }

    /// With extra attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Catalog name; falls back to the file stem when loading from disk
    #[serde(default)]
    pub name: Option<String>,

    /// Records in catalog order
    #[serde(default)]
    pub records: Vec<CatalogRecord>,
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl CatalogFormat {
    /// Pick format from file extension
    ///
    /// # Errors
    /// Returns [`CatalogError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(CatalogError::UnsupportedFormat(ext)),
        }
    }

    /// Parse a document in this format
    ///
    /// # Errors
    /// Returns the format's parse error.
    pub fn parse(self, source: &str) -> CatalogResult<CatalogDocument> {
        Ok(match self {
            Self::Json => serde_json::from_str(source)?,
            Self::Yaml => serde_yaml::from_str(source)?,
            Self::Toml => toml::from_str(source)?,
        })
    }
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    record: CatalogRecord,
    descriptor: Descriptor,
}

/// Read-only catalog of records keyed by normalized id
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    name: String,
    entries: IndexMap<NormalizedId, CatalogEntry>,
}

impl StaticCatalog {
    /// Build catalog from records
    ///
    /// # Errors
    /// - [`CatalogError::DuplicateId`] if two records normalize to one id
    /// - [`CatalogError::Json`] if a record cannot be turned into a payload
    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = CatalogRecord>,
    ) -> CatalogResult<Self> {
        let name = name.into();
        let mut entries = IndexMap::new();

        for record in records {
            let id = normalize(&record.id);
            if entries.contains_key(&id) {
                return Err(CatalogError::DuplicateId {
                    catalog: name,
                    id: id.into(),
                });
            }
            let descriptor =
                Descriptor::new(serde_json::to_value(&record)?).with_geometry(record.has_geometry);
            entries.insert(id, CatalogEntry { record, descriptor });
        }

        tracing::debug!(catalog = %name, records = entries.len(), "catalog built");
        Ok(Self { name, entries })
    }

    /// Parse catalog from a document string
    ///
    /// `default_name` is used when the document has no `name`.
    ///
    /// # Errors
    /// Parse errors and duplicate ids.
    pub fn from_str_with_format(
        default_name: &str,
        source: &str,
        format: CatalogFormat,
    ) -> CatalogResult<Self> {
        let document = format.parse(source)?;
        let name = document.name.unwrap_or_else(|| default_name.to_string());
        Self::from_records(name, document.records)
    }

    /// Load catalog from file; format follows the extension
    ///
    /// # Errors
    /// IO, format and parse errors, duplicate ids.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        let default_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("catalog");

        tracing::info!(path = %path.display(), ?format, "loading catalog");
        Self::from_str_with_format(default_name, &source, format)
    }

    /// Catalog name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get record by raw identifier
    #[must_use]
    pub fn get(&self, raw_id: &str) -> Option<&CatalogRecord> {
        self.entries.get(&normalize(raw_id)).map(|e| &e.record)
    }

    /// Records whose manufacturer matches, ignoring case
    #[must_use]
    pub fn by_manufacturer(&self, manufacturer: &str) -> Vec<&CatalogRecord> {
        let wanted = manufacturer.trim();
        self.entries
            .values()
            .map(|e| &e.record)
            .filter(|r| {
                r.manufacturer
                    .as_deref()
                    .is_some_and(|m| m.eq_ignore_ascii_case(wanted))
            })
            .collect()
    }

    /// Case-insensitive substring search over id, name and manufacturer
    ///
    /// An empty query returns every record.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogRecord> {
        let query = query.trim();
        let needle = query.to_lowercase();
        let key = normalize(query);
        if needle.is_empty() {
            return self.entries.values().map(|e| &e.record).collect();
        }

        self.entries
            .iter()
            .filter(|(id, entry)| {
                let field_matches = |field: &Option<String>| {
                    field
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                };
                (!key.is_empty() && id.as_str().contains(key.as_str()))
                    || field_matches(&entry.record.name)
                    || field_matches(&entry.record.manufacturer)
            })
            .map(|(_, entry)| &entry.record)
            .collect()
    }

    /// Normalized ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &NormalizedId> {
        self.entries.keys()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Provider for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        Ok(self.entries.get(id).map(|e| e.descriptor.clone()))
    }
}
