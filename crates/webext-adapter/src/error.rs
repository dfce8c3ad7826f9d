//! Error types for the adapter pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while post-processing a build tree.
///
/// There is no partial-success mode: any error leaves the output tree in a
/// partially transformed state and the caller is expected to re-run from a
/// clean destination.
#[derive(Debug, Error)]
pub enum AdapterError {
	/// A page slated for extraction carries no `type="module"` script
	#[error("no module script found in {}", page.display())]
	MissingModuleScript {
		/// Path of the offending page
		page: PathBuf,
	},

	/// Reading or writing a file in the tree failed
	#[error("io failure at {}", path.display())]
	Io {
		/// File the operation targeted
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},

	/// Walking the asset tree failed
	#[error("directory walk failed")]
	Walk(#[from] walkdir::Error),

	/// Manifest serialization failed
	#[error("manifest serialization failed")]
	Json(#[from] serde_json::Error),

	/// A compression worker panicked or was cancelled
	#[error("compression task failed")]
	Task(#[source] tokio::task::JoinError),

	/// The external prerender collaborator reported a failure
	#[error("prerender failed: {0}")]
	Prerender(String),
}

impl AdapterError {
	/// Attaches the target path to an I/O error.
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
