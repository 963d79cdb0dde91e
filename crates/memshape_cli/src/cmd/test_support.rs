use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

static MEMSHAPE_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture(name: &str) -> String {
	memshape_testkit::fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_memshape(args: &[&str]) -> Output {
	Command::new(memshape_bin()).args(args).output().expect("memshape command executes")
}

pub(crate) fn run_memshape_json(args: &[&str]) -> serde_json::Value {
	let output = run_memshape(args);
	assert!(
		output.status.success(),
		"memshape command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn memshape_bin() -> &'static PathBuf {
	MEMSHAPE_BIN.get_or_init(resolve_memshape_bin)
}

fn resolve_memshape_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_memshape") {
		return PathBuf::from(path);
	}

	// Unit test binaries live in `target/<profile>/deps`, next to the built CLI.
	let exe = std::env::current_exe().expect("test executable path");
	let profile_dir = exe.parent().and_then(|deps| deps.parent()).expect("target profile dir");
	let bin = profile_dir.join(if cfg!(windows) { "memshape.exe" } else { "memshape" });
	assert!(bin.exists(), "memshape binary not built at {}", bin.display());
	bin
}
