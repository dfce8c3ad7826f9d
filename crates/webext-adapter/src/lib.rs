//! # webext-adapter
//!
//! Post-processes a prebuilt static site into a bundle fit for packaging
//! as a browser extension, where inline script execution is disallowed
//! and assets are served from a fixed runtime prefix:
//!
//! - inline `type="module"` scripts move to content-hashed external files
//! - quoted cross-file references are rewritten under an import prefix
//! - every eligible file gains gzip and brotli siblings
//! - a `meta.js` module describes the processed pages and stylesheets
//!
//! The upstream build (asset materialization, prerendering) stays behind
//! the [`BuildContext`] trait; this crate owns only the directory-tree
//! transformation, rediscovering file relationships from contents and
//! names.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use webext_adapter::{Adapter, AdapterConfig};
//!
//! let config = AdapterConfig::new()
//!     .with_pages("build")
//!     .with_import_prefix("/ext/")
//!     .with_precompress(true);
//!
//! let manifest = Adapter::new(config).adapt(&builder).await?;
//! println!("processed {} pages", manifest.pages.len());
//! ```
//!
//! ## Module structure
//!
//! - [`adapter`] - Pass sequencing and the build-context boundary
//! - [`config`] - Adapter configuration
//! - [`extract`] - Inline module-script extraction
//! - [`rewrite`] - Reference prefix rewriting
//! - [`compress`] - Compressed sibling generation
//! - [`hash`] - Content fingerprints for derived filenames
//! - [`manifest`] - The accumulated build manifest
//! - [`scan`] - Tree enumeration and extension classes
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod adapter;
pub mod compress;
pub mod config;
pub mod error;
pub mod extract;
pub mod fsutil;
pub mod hash;
pub mod manifest;
pub mod rewrite;
pub mod scan;

// Re-export main types
pub use adapter::{Adapter, BuildContext, MANIFEST_MODULE, PrerenderRequest};
pub use config::AdapterConfig;
pub use error::{AdapterError, Result};
pub use manifest::{BuildManifest, PageEntry};
pub use scan::AssetKind;
