//! The accumulated page/script/style manifest.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// One processed page: where it lives, how its script slot is identified,
/// and the derived external script that now backs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
	/// Page path relative to the output root, with a leading slash
	pub page: String,
	/// Human-readable selector derived from the script tag's last attribute
	pub selector: String,
	/// Derived external script name (`/script-<hash>.js`)
	pub script: String,
}

/// Manifest accumulator, threaded through the passes that contribute to it
/// and returned from [`Adapter::adapt`](crate::Adapter::adapt).
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildManifest {
	/// One entry per processed markup file
	pub pages: Vec<PageEntry>,
	/// Rewritten stylesheet paths
	pub css: Vec<String>,
}

impl BuildManifest {
	/// Creates an empty manifest.
	pub fn new() -> Self {
		Self::default()
	}

	/// Renders the manifest module source: caller metadata merged with the
	/// import prefix and the accumulated pages and stylesheet lists.
	///
	/// The body is pretty-printed with two-space indentation; the module
	/// evaluates to a single `meta` export.
	pub fn render_module(
		&self,
		meta: &Map<String, Value>,
		import_prefix: Option<&str>,
	) -> Result<String> {
		let mut merged = meta.clone();
		if let Some(prefix) = import_prefix {
			merged.insert(
				"importPrefix".to_string(),
				Value::String(prefix.to_string()),
			);
		}
		merged.insert("pages".to_string(), serde_json::to_value(&self.pages)?);
		merged.insert("css".to_string(), serde_json::to_value(&self.css)?);

		let body = serde_json::to_string_pretty(&Value::Object(merged))?;
		Ok(format!("export const meta = {};", body))
	}
}
