//! Asset tree enumeration and extension classification.

use crate::error::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Extension classes recognized in a build tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
	/// HTML pages
	Markup,
	/// JavaScript files
	Script,
	/// Stylesheets
	Style,
	/// JSON payloads
	StructuredData,
	/// SVG images
	VectorGraphics,
	/// XML documents
	MarkupData,
	/// Everything else
	Other,
}

impl AssetKind {
	/// Classifies a path by its extension.
	pub fn from_path(path: &Path) -> Self {
		let Some(extension) = path.extension() else {
			return Self::Other;
		};
		match extension.to_string_lossy().to_lowercase().as_str() {
			"html" => Self::Markup,
			"js" => Self::Script,
			"css" => Self::Style,
			"json" => Self::StructuredData,
			"svg" => Self::VectorGraphics,
			"xml" => Self::MarkupData,
			_ => Self::Other,
		}
	}

	/// Whether compressed siblings are produced for this class.
	pub fn is_compressible(self) -> bool {
		!matches!(self, Self::Other)
	}
}

/// Markup files under `root`, as sorted root-relative unix-style paths.
pub fn markup_files(root: &Path) -> Result<Vec<String>> {
	collect(root, |kind| kind == AssetKind::Markup)
}

/// Script and style files under `root`, the reference-rewrite working set.
pub fn reference_files(root: &Path) -> Result<Vec<String>> {
	collect(root, |kind| {
		matches!(kind, AssetKind::Script | AssetKind::Style)
	})
}

/// Files under `root` that receive compressed siblings.
pub fn compressible_files(root: &Path) -> Result<Vec<String>> {
	collect(root, AssetKind::is_compressible)
}

/// Walks `root` and keeps regular files whose class passes `keep`.
///
/// Paths come back relative to `root` with `/` separators, sorted for
/// deterministic processing order across platforms.
fn collect(root: &Path, keep: impl Fn(AssetKind) -> bool) -> Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in WalkDir::new(root) {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}
		if !keep(AssetKind::from_path(entry.path())) {
			continue;
		}
		if let Ok(relative) = entry.path().strip_prefix(root) {
			files.push(unix_path(relative));
		}
	}

	files.sort();
	Ok(files)
}

fn unix_path(path: &Path) -> String {
	path.components()
		.map(|component| component.as_os_str().to_string_lossy().into_owned())
		.collect::<Vec<_>>()
		.join("/")
}
