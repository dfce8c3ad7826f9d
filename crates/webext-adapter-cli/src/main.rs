//! Standalone driver for post-processing an existing build directory.
//!
//! The upstream build produces the tree; this binary runs the
//! extension-packaging passes over it in place: optional compression,
//! inline module-script extraction, reference prefixing, and manifest
//! generation.

use anyhow::Context;
use clap::Parser;
use serde_json::{Map, Value};
use std::path::PathBuf;
use webext_adapter::config::DEFAULT_COMPRESSION_JOBS;
use webext_adapter::manifest::BuildManifest;
use webext_adapter::{MANIFEST_MODULE, compress, extract, rewrite};

#[derive(Parser, Debug)]
#[command(name = "webext-adapt")]
#[command(about = "Post-process a static build for browser-extension packaging", long_about = None)]
#[command(version)]
struct Args {
	/// Build directory to transform in place
	directory: PathBuf,

	/// Prefix for rewritten cross-file references (e.g. /ext/)
	#[arg(long, value_name = "PREFIX")]
	prefix: Option<String>,

	/// Produce .gz and .br siblings for eligible files
	#[arg(long)]
	precompress: bool,

	/// Extra manifest metadata as KEY=VALUE (repeatable)
	#[arg(long, value_name = "KEY=VALUE")]
	meta: Vec<String>,

	/// Bound on concurrently running compression jobs
	#[arg(long, value_name = "N", default_value_t = DEFAULT_COMPRESSION_JOBS)]
	compression_jobs: usize,

	/// Verbosity level (can be repeated for more output)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	init_tracing(args.verbose);

	let dir = args.directory.as_path();
	anyhow::ensure!(dir.is_dir(), "{} is not a directory", dir.display());

	if args.precompress {
		tracing::info!("compressing {}", dir.display());
		compress::compress_directory(dir, args.compression_jobs)
			.await
			.context("compression failed")?;
	}

	let mut manifest = BuildManifest::new();
	extract::extract_inline_scripts(dir, &mut manifest)
		.await
		.context("inline script extraction failed")?;

	if let Some(prefix) = args.prefix.as_deref() {
		rewrite::add_import_prefix(dir, prefix, &mut manifest)
			.await
			.context("reference rewriting failed")?;
	}

	let meta = parse_meta(&args.meta)?;
	let module = manifest.render_module(&meta, args.prefix.as_deref())?;
	let module_path = dir.join(MANIFEST_MODULE);
	tokio::fs::write(&module_path, module)
		.await
		.with_context(|| format!("failed to write {}", module_path.display()))?;

	println!(
		"processed {} pages and {} stylesheets in {}",
		manifest.pages.len(),
		manifest.css.len(),
		dir.display()
	);
	Ok(())
}

fn parse_meta(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
	let mut meta = Map::new();
	for pair in pairs {
		let (key, value) = pair
			.split_once('=')
			.with_context(|| format!("--meta expects KEY=VALUE, got '{pair}'"))?;
		meta.insert(key.to_string(), Value::String(value.to_string()));
	}
	Ok(meta)
}

fn init_tracing(verbosity: u8) {
	let default_level = match verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn meta_pairs_parse_into_string_values() {
		let meta = parse_meta(&["name=demo".to_string(), "channel=stable".to_string()]).unwrap();
		assert_eq!(meta.get("name"), Some(&Value::String("demo".to_string())));
		assert_eq!(
			meta.get("channel"),
			Some(&Value::String("stable".to_string()))
		);
	}

	#[test]
	fn meta_values_may_contain_equals_signs() {
		let meta = parse_meta(&["query=a=b".to_string()]).unwrap();
		assert_eq!(meta.get("query"), Some(&Value::String("a=b".to_string())));
	}

	#[test]
	fn malformed_meta_pairs_are_rejected() {
		assert!(parse_meta(&["no-separator".to_string()]).is_err());
	}
}
