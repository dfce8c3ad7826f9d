use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use tempfile::TempDir;
use webext_adapter::compress::compress_directory;

fn gzip_round_trip(path: &std::path::Path) -> Vec<u8> {
	let mut decoder = GzDecoder::new(fs::File::open(path).unwrap());
	let mut out = Vec::new();
	decoder.read_to_end(&mut out).unwrap();
	out
}

fn brotli_round_trip(path: &std::path::Path) -> Vec<u8> {
	let mut decoder = brotli::Decompressor::new(fs::File::open(path).unwrap(), 4096);
	let mut out = Vec::new();
	decoder.read_to_end(&mut out).unwrap();
	out
}

#[tokio::test]
async fn produces_round_trippable_siblings_for_eligible_files() {
	let dir = TempDir::new().unwrap();
	let body = "body { color: red; }\n".repeat(50);
	let eligible = [
		("index.html", format!("<html>{body}</html>")),
		("app.js", "console.log('x');\n".repeat(40)),
		("style.css", body.clone()),
		("routes.json", r#"{"routes": ["/"]}"#.to_string()),
		("logo.svg", "<svg></svg>".to_string()),
		("feed.xml", "<feed></feed>".to_string()),
	];
	for (name, content) in &eligible {
		fs::write(dir.path().join(name), content).unwrap();
	}
	fs::write(dir.path().join("image.png"), [0u8; 64]).unwrap();

	compress_directory(dir.path(), 4).await.unwrap();

	for (name, content) in &eligible {
		let original = dir.path().join(name);
		let gz = dir.path().join(format!("{name}.gz"));
		let br = dir.path().join(format!("{name}.br"));

		assert!(gz.is_file(), "{name} missing gzip sibling");
		assert!(br.is_file(), "{name} missing brotli sibling");
		assert_eq!(gzip_round_trip(&gz), content.as_bytes());
		assert_eq!(brotli_round_trip(&br), content.as_bytes());

		// The original is untouched.
		assert_eq!(fs::read(&original).unwrap(), content.as_bytes());
	}

	assert!(!dir.path().join("image.png.gz").exists());
	assert!(!dir.path().join("image.png.br").exists());
}

#[tokio::test]
async fn compresses_nested_directories() {
	let dir = TempDir::new().unwrap();
	fs::create_dir_all(dir.path().join("assets/js")).unwrap();
	fs::write(dir.path().join("assets/js/chunk.js"), "export {}").unwrap();

	compress_directory(dir.path(), 2).await.unwrap();

	assert!(dir.path().join("assets/js/chunk.js.gz").is_file());
	assert!(dir.path().join("assets/js/chunk.js.br").is_file());
}

#[tokio::test]
async fn an_empty_tree_is_a_no_op() {
	let dir = TempDir::new().unwrap();
	compress_directory(dir.path(), 4).await.unwrap();
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn a_single_permit_still_drains_every_job() {
	let dir = TempDir::new().unwrap();
	for i in 0..6 {
		fs::write(
			dir.path().join(format!("chunk-{i}.js")),
			format!("export const n = {i};"),
		)
		.unwrap();
	}

	compress_directory(dir.path(), 1).await.unwrap();

	for i in 0..6 {
		assert!(dir.path().join(format!("chunk-{i}.js.gz")).is_file());
		assert!(dir.path().join(format!("chunk-{i}.js.br")).is_file());
	}
}
