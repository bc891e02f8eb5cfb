//! CNC Catalog Providers
//!
//! Concrete data sources for the resolver's four tiers:
//!
//! - [`UserOverrideStore`]: runtime user uploads (rank 1)
//! - [`StaticCatalog`]: OEM records loaded from JSON / YAML / TOML (rank 2)
//! - [`LearnedStore`]: inferred descriptors with a confidence floor (rank 3)
//! - [`ProceduralGenerator`]: identifier-based guess, always succeeds (rank 4)
//!
//! # Example
//!
//! ```rust,ignore
//! use cnc_catalog::{CatalogConfig, StandardProviders};
//! use cnc_resolver::{ModelResolver, ResolverConfig};
//!
//! let config = CatalogConfig::from_toml_str(&std::fs::read_to_string("catalogs.toml")?)?;
//! let providers = StandardProviders::from_config(&config)?;
//! let resolver = ModelResolver::new(providers.chain_builder().build()?, ResolverConfig::default());
//!
//! providers.overrides.upload("My VF-2", descriptor);
//! resolver.invalidate("My VF-2");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod learned;
pub mod overrides;
pub mod procedural;
pub mod standard;
pub mod static_catalog;

// Re-exports
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use learned::{LearnedEntry, LearnedStore};
pub use overrides::UserOverrideStore;
pub use procedural::{MachineKind, ProceduralGenerator};
pub use standard::StandardProviders;
pub use static_catalog::{CatalogDocument, CatalogFormat, CatalogRecord, StaticCatalog};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
