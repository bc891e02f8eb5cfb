//! CNC Model Resolver
//!
//! Picks the best available descriptor for a machine, material or
//! post-processor identifier by consulting data providers in a fixed
//! priority order, caching the answer and reporting where it came from.
//!
//! # Priority tiers
//!
//! 1. **User override**: explicit user uploads always win
//! 2. **OEM record**: authoritative manufacturer data, possibly with geometry
//! 3. **Learned**: inferred from prior observations
//! 4. **Procedural**: synthesized from the identifier, always available
//!
//! # Architecture
//!
//! ```text
//! raw id → normalize → ResolutionCache ──hit──→ Arc<ResolutionResult>
//!                          │ miss
//!                          ↓
//!                   ProviderChain (rank 1 → 4, first match wins)
//!                          │
//!                          └──→ EventSink (diagnostics)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cnc_resolver::{ModelResolver, ProviderChain, ResolverConfig};
//!
//! let chain = ProviderChain::builder()
//!     .user_override(overrides)
//!     .oem_record(oem_catalog)
//!     .learned(learned_store)
//!     .fallback(procedural)
//!     .build()?;
//!
//! let resolver = ModelResolver::new(chain, ResolverConfig::default());
//! let result = resolver.get_best_descriptor("Hurco VM-50 i");
//! println!("{} (priority {})", result.provider, result.priority);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod chain;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod identifier;
pub mod provider;
pub mod resolver;

// Re-exports for convenience
pub use cache::{CacheStats, ResolutionCache};
pub use chain::{ProviderChain, ProviderChainBuilder};
pub use config::ResolverConfig;
pub use descriptor::{Descriptor, ProviderRank, ResolutionResult};
pub use error::{ChainError, ConfigError, ProviderError, ProviderResult};
pub use events::{EventSink, FanoutSink, MemorySink, NullSink, ResolutionEvent, TracingSink};
pub use identifier::{normalize, NormalizedId};
pub use provider::{FallbackProvider, FnProvider, Provider};
pub use resolver::ModelResolver;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for wiring a resolver
    pub use crate::{
        normalize, Descriptor, EventSink, FallbackProvider, ModelResolver, NormalizedId, Provider,
        ProviderChain, ProviderError, ProviderRank, ResolutionResult, ResolverConfig,
    };
}
