//! Adapter configuration.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default upper bound on in-flight compression jobs.
pub const DEFAULT_COMPRESSION_JOBS: usize = 8;

/// Configuration for [`Adapter`](crate::Adapter).
///
/// # Example
///
/// ```rust
/// use webext_adapter::AdapterConfig;
///
/// let config = AdapterConfig::new()
///     .with_pages("build")
///     .with_import_prefix("/ext/")
///     .with_precompress(true);
/// assert_eq!(config.assets(), std::path::Path::new("build"));
/// ```
#[derive(Debug, Clone)]
pub struct AdapterConfig {
	/// Directory receiving prerendered pages
	pub pages: PathBuf,
	/// Assets directory override; defaults to the pages directory
	assets: Option<PathBuf>,
	/// Fallback page for unrendered routes
	pub fallback: Option<String>,
	/// Produce `.gz`/`.br` siblings for eligible files
	pub precompress: bool,
	/// Prefix applied to rewritten cross-file references
	pub import_prefix: Option<String>,
	/// Caller metadata merged into the generated manifest module
	pub meta: Map<String, Value>,
	/// Upper bound on in-flight compression jobs
	pub compression_jobs: usize,
}

impl Default for AdapterConfig {
	fn default() -> Self {
		Self {
			pages: PathBuf::from("build"),
			assets: None,
			fallback: None,
			precompress: false,
			import_prefix: None,
			meta: Map::new(),
			compression_jobs: DEFAULT_COMPRESSION_JOBS,
		}
	}
}

impl AdapterConfig {
	/// Creates the default configuration (pages and assets in `build`).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the pages directory. Assets follow it unless overridden with
	/// [`with_assets`](Self::with_assets).
	pub fn with_pages(mut self, pages: impl Into<PathBuf>) -> Self {
		self.pages = pages.into();
		self
	}

	/// Sets a separate assets directory.
	pub fn with_assets(mut self, assets: impl Into<PathBuf>) -> Self {
		self.assets = Some(assets.into());
		self
	}

	/// Sets the fallback page generated for unrendered routes.
	pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
		self.fallback = Some(fallback.into());
		self
	}

	/// Enables or disables compressed sibling generation.
	pub fn with_precompress(mut self, precompress: bool) -> Self {
		self.precompress = precompress;
		self
	}

	/// Sets the prefix applied to rewritten cross-file references.
	pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.import_prefix = Some(prefix.into());
		self
	}

	/// Replaces the caller metadata wholesale.
	pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
		self.meta = meta;
		self
	}

	/// Adds one caller metadata entry.
	pub fn with_meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
		self.meta.insert(key.into(), value);
		self
	}

	/// Caps the number of concurrently running compression jobs.
	pub fn with_compression_jobs(mut self, jobs: usize) -> Self {
		self.compression_jobs = jobs;
		self
	}

	/// Effective assets directory: the override, or the pages directory.
	pub fn assets(&self) -> &Path {
		self.assets.as_deref().unwrap_or(&self.pages)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn assets_default_to_the_pages_directory() {
		let config = AdapterConfig::new().with_pages("out");
		assert_eq!(config.pages, PathBuf::from("out"));
		assert_eq!(config.assets(), Path::new("out"));
	}

	#[test]
	fn assets_override_sticks() {
		let config = AdapterConfig::new().with_pages("pages").with_assets("static");
		assert_eq!(config.assets(), Path::new("static"));
	}

	#[test]
	fn builder_chain() {
		let config = AdapterConfig::new()
			.with_fallback("200.html")
			.with_precompress(true)
			.with_import_prefix("/ext/")
			.with_meta_entry("name", json!("demo"))
			.with_compression_jobs(2);

		assert_eq!(config.fallback.as_deref(), Some("200.html"));
		assert!(config.precompress);
		assert_eq!(config.import_prefix.as_deref(), Some("/ext/"));
		assert_eq!(config.meta.get("name"), Some(&json!("demo")));
		assert_eq!(config.compression_jobs, 2);
	}
}
