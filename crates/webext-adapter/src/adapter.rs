//! Pipeline orchestration.
//!
//! [`Adapter::adapt`] sequences the passes over the destination
//! directories; the upstream build stays behind [`BuildContext`].

use crate::compress;
use crate::config::AdapterConfig;
use crate::error::{AdapterError, Result};
use crate::extract;
use crate::fsutil;
use crate::manifest::BuildManifest;
use crate::rewrite;
use async_trait::async_trait;
use std::path::Path;

/// Name of the generated manifest module.
pub const MANIFEST_MODULE: &str = "meta.js";

/// What the orchestrator asks of the prerender collaborator.
#[derive(Debug, Clone)]
pub struct PrerenderRequest<'a> {
	/// Directory to render pages into
	pub dest: &'a Path,
	/// Fallback page to generate, if any
	pub fallback: Option<&'a str>,
	/// Render every route (set when no fallback is configured)
	pub all: bool,
}

/// Boundary to the upstream build: asset materialization and prerendering
/// live outside this crate.
#[async_trait]
pub trait BuildContext: Send + Sync {
	/// Copies the project's static files into `dest`.
	async fn write_static(&self, dest: &Path) -> Result<()>;

	/// Copies the compiled client bundle into `dest`.
	async fn write_client(&self, dest: &Path) -> Result<()>;

	/// Renders page output into `request.dest`.
	async fn prerender(&self, request: PrerenderRequest<'_>) -> Result<()>;
}

/// Sequences the post-build passes over the destination directories.
pub struct Adapter {
	config: AdapterConfig,
}

impl Adapter {
	/// Creates an adapter for the given configuration.
	pub fn new(config: AdapterConfig) -> Self {
		Self { config }
	}

	/// Runs the full pipeline; each step completes before the next begins.
	///
	/// Clears the destinations, materializes assets through `ctx`,
	/// prerenders, optionally compresses, extracts inline module scripts,
	/// optionally rewrites references under the import prefix, and writes
	/// the manifest module. Returns the accumulated manifest.
	pub async fn adapt(&self, ctx: &dyn BuildContext) -> Result<BuildManifest> {
		let config = &self.config;
		let pages = config.pages.as_path();
		let assets = config.assets();
		let split = pages != assets;

		fsutil::clear_dir(assets).await?;
		if split {
			fsutil::clear_dir(pages).await?;
		}

		ctx.write_static(assets).await?;
		ctx.write_client(assets).await?;

		ctx.prerender(PrerenderRequest {
			dest: pages,
			fallback: config.fallback.as_deref(),
			all: config.fallback.is_none(),
		})
		.await?;

		if config.precompress {
			if split {
				tracing::info!("compressing assets");
				compress::compress_directory(assets, config.compression_jobs).await?;
				tracing::info!("compressing pages");
				compress::compress_directory(pages, config.compression_jobs).await?;
			} else {
				tracing::info!("compressing assets and pages");
				compress::compress_directory(assets, config.compression_jobs).await?;
			}
		}

		if split {
			tracing::info!(
				"wrote pages to {} and assets to {}",
				pages.display(),
				assets.display()
			);
		} else {
			tracing::info!("wrote site to {}", pages.display());
		}

		let mut manifest = BuildManifest::new();
		extract::extract_inline_scripts(pages, &mut manifest).await?;

		if let Some(prefix) = config.import_prefix.as_deref() {
			rewrite::add_import_prefix(assets, prefix, &mut manifest).await?;
		}

		let module = manifest.render_module(&config.meta, config.import_prefix.as_deref())?;
		let manifest_path = assets.join(MANIFEST_MODULE);
		tokio::fs::write(&manifest_path, module)
			.await
			.map_err(|e| AdapterError::io(&manifest_path, e))?;
		tracing::debug!("wrote {}", manifest_path.display());

		Ok(manifest)
	}
}
