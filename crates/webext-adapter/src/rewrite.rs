//! Cross-file reference rewriting.
//!
//! Script and style files in a build tree refer to each other with quoted
//! relative paths. Packaging serves the tree from a fixed runtime prefix,
//! so every such reference becomes `<prefix><relative path>`.

use crate::error::{AdapterError, Result};
use crate::manifest::BuildManifest;
use crate::scan;
use regex::Regex;
use std::path::Path;

/// Rewrites quoted cross-file references under `root` to absolute
/// references anchored at `prefix`, recording every rewritten stylesheet
/// path in the manifest.
///
/// The file-name set is captured once before any rewriting, so each file's
/// edit set is independent of processing order. Files whose path contains
/// `pages.js` stay in the reference set but are not themselves rewritten.
pub async fn add_import_prefix(
	root: &Path,
	prefix: &str,
	manifest: &mut BuildManifest,
) -> Result<()> {
	let files = scan::reference_files(root)?;
	let patterns: Vec<(&String, Regex)> = files
		.iter()
		.map(|file| (file, reference_pattern(file)))
		.collect();

	for target in &files {
		if target.contains("pages.js") {
			continue;
		}

		let target_path = root.join(target);
		let original = tokio::fs::read_to_string(&target_path)
			.await
			.map_err(|e| AdapterError::io(&target_path, e))?;

		// Matches are collected against the unmodified text; quote-bounded
		// literals keep the replacements from interfering with each other.
		let mut text = original.clone();
		for (file, pattern) in &patterns {
			for literal in distinct_matches(pattern, &original) {
				let quote = &literal[..1];
				let replacement = format!("{quote}{prefix}{file}{quote}");
				text = text.replace(&literal, &replacement);
			}
		}

		if file_name(target).contains("start-") {
			text = text.replacen("\"/app/\"", "\"\"", 1);
		}

		if target.ends_with(".css") {
			manifest.css.push(format!("{prefix}{target}"));
		}

		tokio::fs::write(&target_path, text)
			.await
			.map_err(|e| AdapterError::io(&target_path, e))?;
		tracing::debug!("rewrote references in {}", target_path.display());
	}

	Ok(())
}

/// Pattern for quoted literals that refer to `file` by its base name.
///
/// The base name must sit at the start of the literal's final path
/// component (preceded by the opening quote or a `/`), so `"foo.js"`
/// never matches inside `"foobar.js"`.
fn reference_pattern(file: &str) -> Regex {
	let base = regex::escape(file_name(file));
	Regex::new(&format!(r#"["'](?:[^"']*/)?{base}["']"#))
		.expect("escaped file name pattern compiles")
}

/// Distinct whole-literal matches in first-seen order.
fn distinct_matches(pattern: &Regex, text: &str) -> Vec<String> {
	let mut matches = Vec::new();
	for found in pattern.find_iter(text) {
		let literal = found.as_str().to_string();
		if !matches.contains(&literal) {
			matches.push(literal);
		}
	}
	matches
}

fn file_name(path: &str) -> &str {
	path.rsplit('/').next().unwrap_or(path)
}
