//! Thin filesystem helpers for the orchestrator and for
//! [`BuildContext`](crate::BuildContext) implementors.

use crate::error::{AdapterError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Removes `dir` if present and recreates it empty.
pub async fn clear_dir(dir: &Path) -> Result<()> {
	match tokio::fs::remove_dir_all(dir).await {
		Ok(()) => {}
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
		Err(e) => return Err(AdapterError::io(dir, e)),
	}
	tokio::fs::create_dir_all(dir)
		.await
		.map_err(|e| AdapterError::io(dir, e))
}

/// Recursively copies the regular files under `src` into `dst`,
/// creating directories as needed.
pub async fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
	for entry in WalkDir::new(src) {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}
		let Ok(relative) = entry.path().strip_prefix(src) else {
			continue;
		};

		let destination = dst.join(relative);
		if let Some(parent) = destination.parent() {
			tokio::fs::create_dir_all(parent)
				.await
				.map_err(|e| AdapterError::io(parent, e))?;
		}
		tokio::fs::copy(entry.path(), &destination)
			.await
			.map_err(|e| AdapterError::io(entry.path(), e))?;
	}
	Ok(())
}
