//! Inline module-script extraction.
//!
//! Browser-extension packaging forbids inline script execution, so each
//! page's `type="module"` script body moves to a content-hashed external
//! file and the original element becomes an external reference carrying
//! the same attributes.

use crate::error::{AdapterError, Result};
use crate::hash;
use crate::manifest::{BuildManifest, PageEntry};
use crate::scan;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)<script\b([^>]*)>(.*?)</script>").expect("script tag pattern compiles")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
		.expect("attribute pattern compiles")
});

/// A module script located in a page, before extraction.
struct ModuleScript {
	/// The element exactly as it appears in the source text
	full_tag: String,
	/// Attribute pairs in source order
	attributes: Vec<(String, String)>,
	/// Inline body
	body: String,
}

/// Extracts the inline module script from every markup file under `root`,
/// appending one manifest entry per page.
///
/// Every page in scope is assumed to carry exactly one inline module
/// script: zero aborts the pass with
/// [`AdapterError::MissingModuleScript`]; more than one processes the
/// first and leaves the rest inline. Not idempotent over its own output,
/// since no inline module script survives the first run.
pub async fn extract_inline_scripts(root: &Path, manifest: &mut BuildManifest) -> Result<()> {
	for page in scan::markup_files(root)? {
		let page_path = root.join(&page);
		let html = tokio::fs::read_to_string(&page_path)
			.await
			.map_err(|e| AdapterError::io(&page_path, e))?;

		let script =
			first_module_script(&html).ok_or_else(|| AdapterError::MissingModuleScript {
				page: page_path.clone(),
			})?;

		let derived = format!("/script-{}.js", hash::hash_str(&script.body));
		let attributes = render_attributes(&script.attributes);
		let external_tag = format!(r#"<script {attributes} src="{derived}"></script>"#);
		let rewritten = html.replacen(&script.full_tag, &external_tag, 1);

		tokio::fs::write(&page_path, rewritten)
			.await
			.map_err(|e| AdapterError::io(&page_path, e))?;
		tracing::debug!("rewrote {}", page_path.display());

		let script_path = root.join(derived.trim_start_matches('/'));
		tokio::fs::write(&script_path, &script.body)
			.await
			.map_err(|e| AdapterError::io(&script_path, e))?;
		tracing::debug!("wrote {}", script_path.display());

		let selector = script
			.attributes
			.last()
			.map(|(name, value)| format!(r#"{name}="{value}""#))
			.unwrap_or_default();

		manifest.pages.push(PageEntry {
			page: format!("/{page}"),
			selector,
			script: derived,
		});
	}

	Ok(())
}

/// Finds the first inline script element whose attributes include
/// `type="module"`. Elements that already carry a `src` are external and
/// do not qualify.
fn first_module_script(html: &str) -> Option<ModuleScript> {
	for caps in SCRIPT_TAG.captures_iter(html) {
		let attributes = parse_attributes(&caps[1]);
		if !attributes
			.iter()
			.any(|(name, value)| name == "type" && value == "module")
		{
			continue;
		}
		if attributes.iter().any(|(name, _)| name == "src") {
			continue;
		}
		return Some(ModuleScript {
			full_tag: caps[0].to_string(),
			attributes,
			body: caps[2].to_string(),
		});
	}
	None
}

fn parse_attributes(tag: &str) -> Vec<(String, String)> {
	ATTRIBUTE
		.captures_iter(tag)
		.map(|caps| {
			let value = caps
				.get(2)
				.or_else(|| caps.get(3))
				.map_or("", |m| m.as_str());
			(caps[1].to_string(), value.to_string())
		})
		.collect()
}

/// Renders attribute pairs back as `name="value"` text in source order.
fn render_attributes(attributes: &[(String, String)]) -> String {
	attributes
		.iter()
		.map(|(name, value)| format!(r#"{name}="{value}""#))
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finds_the_first_module_script() {
		let html = r#"<script src="analytics.js"></script>
<script type="module">console.log(1)</script>
<script type="module">console.log(2)</script>"#;

		let script = first_module_script(html).unwrap();
		assert_eq!(script.body, "console.log(1)");
		assert_eq!(
			script.full_tag,
			r#"<script type="module">console.log(1)</script>"#
		);
	}

	#[test]
	fn ignores_pages_without_module_scripts() {
		assert!(first_module_script(r#"<script src="a.js"></script>"#).is_none());
		assert!(first_module_script("<html><body></body></html>").is_none());
	}

	#[test]
	fn external_module_scripts_do_not_qualify() {
		let html = r#"<script type="module" src="/script-45h.js"></script>"#;
		assert!(first_module_script(html).is_none());
	}

	#[test]
	fn captures_multiline_bodies() {
		let html = "<script type=\"module\">\nimport './app.js';\nstart();\n</script>";
		let script = first_module_script(html).unwrap();
		assert_eq!(script.body, "\nimport './app.js';\nstart();\n");
	}

	#[test]
	fn preserves_attribute_order() {
		let html = r#"<script defer="defer" type="module" data-entry="main">go()</script>"#;
		let script = first_module_script(html).unwrap();
		assert_eq!(
			script.attributes,
			vec![
				("defer".to_string(), "defer".to_string()),
				("type".to_string(), "module".to_string()),
				("data-entry".to_string(), "main".to_string()),
			]
		);
		assert_eq!(
			render_attributes(&script.attributes),
			r#"defer="defer" type="module" data-entry="main""#
		);
	}

	#[test]
	fn parses_single_quoted_attributes() {
		let attributes = parse_attributes(r#" type='module' id='entry'"#);
		assert_eq!(
			attributes,
			vec![
				("type".to_string(), "module".to_string()),
				("id".to_string(), "entry".to_string()),
			]
		);
	}
}
