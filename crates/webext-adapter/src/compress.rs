//! Compressed sibling generation.
//!
//! Every eligible file gains a gzip and a brotli sibling so the packaged
//! tree can be served pre-compressed. Jobs are independent per
//! (file, codec) pair and run on blocking threads behind a semaphore, so
//! large trees cannot exhaust the runtime.

use crate::error::{AdapterError, Result};
use crate::scan;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Codecs produced for each eligible file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
	/// gzip at maximum compression
	Gzip,
	/// brotli in text mode at maximum quality
	Brotli,
}

impl Codec {
	const ALL: [Codec; 2] = [Codec::Gzip, Codec::Brotli];

	/// Conventional file suffix for the codec.
	pub fn suffix(self) -> &'static str {
		match self {
			Codec::Gzip => "gz",
			Codec::Brotli => "br",
		}
	}
}

/// Produces `.gz` and `.br` siblings for every compressible file under
/// `root`, with at most `max_jobs` compression jobs in flight at once.
///
/// Originals are never modified. The first failure aborts the step;
/// already-written siblings of other files are left behind, consistent
/// with the pipeline's no-partial-success contract.
pub async fn compress_directory(root: &Path, max_jobs: usize) -> Result<()> {
	let files = scan::compressible_files(root)?;
	let semaphore = Arc::new(Semaphore::new(max_jobs.max(1)));
	let mut jobs = JoinSet::new();

	for file in &files {
		let path = root.join(file);
		for codec in Codec::ALL {
			let semaphore = Arc::clone(&semaphore);
			let path = path.clone();
			jobs.spawn(async move {
				let _permit = semaphore
					.acquire_owned()
					.await
					.expect("compression semaphore is never closed");
				tokio::task::spawn_blocking(move || compress_file(&path, codec))
					.await
					.map_err(AdapterError::Task)?
			});
		}
	}

	while let Some(joined) = jobs.join_next().await {
		joined.map_err(AdapterError::Task)??;
	}

	tracing::debug!(files = files.len(), "compressed {}", root.display());
	Ok(())
}

fn compress_file(path: &Path, codec: Codec) -> Result<()> {
	let result = match codec {
		Codec::Gzip => gzip_file(path),
		Codec::Brotli => brotli_file(path),
	};
	result.map_err(|e| AdapterError::io(path, e))
}

/// Sibling path: the original name plus the codec suffix.
fn sibling_path(path: &Path, codec: Codec) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(".");
	name.push(codec.suffix());
	PathBuf::from(name)
}

fn gzip_file(source: &Path) -> io::Result<()> {
	let mut reader = BufReader::new(File::open(source)?);
	let writer = BufWriter::new(File::create(sibling_path(source, Codec::Gzip))?);

	let mut encoder = GzEncoder::new(writer, Compression::best());
	io::copy(&mut reader, &mut encoder)?;
	encoder.finish()?.flush()
}

fn brotli_file(source: &Path) -> io::Result<()> {
	let size_hint = source.metadata()?.len() as usize;
	let mut reader = BufReader::new(File::open(source)?);
	let mut writer = BufWriter::new(File::create(sibling_path(source, Codec::Brotli))?);

	brotli::BrotliCompress(
		&mut reader,
		&mut writer,
		&brotli::enc::BrotliEncoderParams {
			quality: 11,
			mode: brotli::enc::backward_references::BrotliEncoderMode::BROTLI_MODE_TEXT,
			size_hint,
			..Default::default()
		},
	)?;
	writer.flush()
}
