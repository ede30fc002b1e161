use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

use anyvalue_testkit::{fixture_path, target_dir as workspace_target_dir};

static ANYVALUE_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_anyvalue(args: &[&str]) -> Output {
	Command::new(anyvalue_bin()).args(args).output().expect("anyvalue command executes")
}

pub(crate) fn run_anyvalue_stdin(args: &[&str], input: &str) -> Output {
	let mut child = Command::new(anyvalue_bin())
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("anyvalue command spawns");
	child
		.stdin
		.take()
		.expect("stdin is piped")
		.write_all(input.as_bytes())
		.expect("stdin accepts input");
	child.wait_with_output().expect("anyvalue command finishes")
}

pub(crate) fn run_anyvalue_json(args: &[&str]) -> serde_json::Value {
	let output = run_anyvalue(args);
	assert!(
		output.status.success(),
		"anyvalue command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn anyvalue_bin() -> &'static PathBuf {
	ANYVALUE_BIN.get_or_init(resolve_anyvalue_bin)
}

fn resolve_anyvalue_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_anyvalue") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = workspace_target_dir().join("debug");
	bin.push(if cfg!(windows) { "anyvalue.exe" } else { "anyvalue" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "anyvalue"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build anyvalue binary at {}", bin.display());

	bin
}
