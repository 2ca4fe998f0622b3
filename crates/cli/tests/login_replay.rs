use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use serde_json::json;
use tempfile::TempDir;

const CREDENTIAL: &str = r#"{"cookies":["sid=abc"],"token":"t1"}"#;
const PROMPT: &str = "Login failed. Try again? (y/n)";

fn run_termchat(home: &Path, args: &[&str], input: &str) -> (bool, String, String) {
	let mut child = Command::new(env!("CARGO_BIN_EXE_termchat"))
		.current_dir(home)
		.env("HOME", home)
		.env("XDG_CONFIG_HOME", home.join("config"))
		.env_remove("RUST_LOG")
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("failed to spawn termchat");

	child
		.stdin
		.take()
		.expect("stdin should be piped")
		.write_all(input.as_bytes())
		.expect("stdin should accept input");
	let output = child.wait_with_output().expect("termchat should exit");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

/// Writes a replay script plus a token image next to it and returns the script path.
fn write_script(dir: &Path, outcomes: &[&str]) -> PathBuf {
	let image = GrayImage::from_fn(50, 50, |x, y| if ((x / 5) + (y / 5)) % 2 == 0 { Luma([0]) } else { Luma([255]) });
	let mut png = Vec::new();
	DynamicImage::ImageLuma8(image)
		.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
		.expect("png should encode");
	std::fs::create_dir_all(dir.join("codes")).expect("codes dir should be created");
	std::fs::write(dir.join("codes").join("qr.png"), png).expect("png should be written");

	let tokens: Vec<_> = outcomes.iter().map(|outcome| json!({ "image": "codes/qr.png", "outcome": outcome })).collect();
	let script = json!({
		"nickname": "alice",
		"acceptedCredential": CREDENTIAL,
		"tokens": tokens,
		"events": [
			{ "kind": "direct", "sender": { "nickname": "bob", "alias": "Bobby" }, "content": "hi" },
			{ "kind": "group", "group": { "name": "rust" }, "sender": { "nickname": "ferris" }, "content": "crab" },
			{ "kind": "discussion", "discussion": { "name": "lunch" }, "sender": { "nickname": "carol", "alias": "" }, "content": "noon?" },
			{ "kind": "echo", "target": { "name": "bob" }, "content": "sure" }
		]
	});
	let path = dir.join("session.json");
	std::fs::write(&path, serde_json::to_string_pretty(&script).expect("script should serialize")).expect("script should be written");
	path
}

fn lines_after_greeting(stdout: &str) -> Vec<&str> {
	stdout.lines().skip_while(|line| !line.starts_with("Login success")).collect()
}

#[test]
fn token_login_prints_messages_and_saves_credential() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = write_script(tmp.path(), &["tokenExpired", "succeeded"]);
	let credential = tmp.path().join("state").join("credential.json");

	let (success, stdout, stderr) = run_termchat(
		tmp.path(),
		&["--credential", credential.to_str().unwrap(), "login", "--replay", script.to_str().unwrap(), "--ramp", " #"],
		"",
	);
	assert!(success, "login failed: {stderr}");

	assert_eq!(stdout.matches("login code is printed above").count(), 2, "stdout: {stdout}");
	assert!(!stdout.contains(PROMPT));
	assert_eq!(
		lines_after_greeting(&stdout),
		vec!["Login success, alice!", "Bobby:hi", "[rust]ferris:crab", "[lunch]carol:noon?", "bob>sure"]
	);
	// 50 px at 5 px per glyph.
	assert!(stdout.lines().any(|line| line == "# # # # # "), "stdout: {stdout}");

	let saved = std::fs::read_to_string(&credential).expect("credential should be saved");
	assert_eq!(saved, CREDENTIAL);
}

#[test]
fn saved_credential_skips_the_token() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = write_script(tmp.path(), &["succeeded"]);
	let credential = tmp.path().join("credential.json");
	let args = ["--credential", credential.to_str().unwrap(), "login", "--replay", script.to_str().unwrap()];

	let (success, _, stderr) = run_termchat(tmp.path(), &args, "");
	assert!(success, "first login failed: {stderr}");

	let (success, stdout, stderr) = run_termchat(tmp.path(), &args, "");
	assert!(success, "second login failed: {stderr}");
	assert!(!stdout.contains("login code"), "stdout: {stdout}");
	assert!(stdout.starts_with("Login success, alice!"), "stdout: {stdout}");
}

#[test]
fn declining_retry_exits_with_failure() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = write_script(tmp.path(), &["failed", "succeeded"]);
	let credential = tmp.path().join("credential.json");

	let (success, stdout, stderr) = run_termchat(
		tmp.path(),
		&["--credential", credential.to_str().unwrap(), "login", "--replay", script.to_str().unwrap()],
		"n\n",
	);
	assert!(!success);
	assert_eq!(stdout.matches(PROMPT).count(), 1, "stdout: {stdout}");
	assert!(!stdout.contains("Login success"));
	assert!(stderr.contains("Login abandoned"), "stderr: {stderr}");
	assert!(!credential.exists());
}

#[test]
fn accepting_retry_shows_a_new_token() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = write_script(tmp.path(), &["failed", "succeeded"]);
	let credential = tmp.path().join("credential.json");

	let (success, stdout, stderr) = run_termchat(
		tmp.path(),
		&["--credential", credential.to_str().unwrap(), "login", "--replay", script.to_str().unwrap()],
		"y\n",
	);
	assert!(success, "login failed: {stderr}");
	assert_eq!(stdout.matches(PROMPT).count(), 1);
	assert_eq!(stdout.matches("login code is printed above").count(), 2);
	assert!(stdout.contains("Login success, alice!"));
}

#[test]
fn closed_stdin_abandons() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = write_script(tmp.path(), &["failed"]);
	let credential = tmp.path().join("credential.json");

	let (success, _, stderr) = run_termchat(
		tmp.path(),
		&["--credential", credential.to_str().unwrap(), "login", "--replay", script.to_str().unwrap()],
		"",
	);
	assert!(!success);
	assert!(stderr.contains("Login abandoned"), "stderr: {stderr}");
}

#[test]
fn broken_script_is_reported() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let script = tmp.path().join("session.json");
	std::fs::write(&script, "{ not json").expect("script should be written");

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["login", "--replay", script.to_str().unwrap()], "");
	assert!(!success);
	assert!(stdout.is_empty());
	assert!(stderr.contains("Invalid replay script"), "stderr: {stderr}");
}

#[test]
fn credential_show_and_clear() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credential = tmp.path().join("credential.json");
	std::fs::write(&credential, CREDENTIAL).expect("credential should be written");
	let path = credential.to_str().unwrap();

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["--credential", path, "credential", "show"], "");
	assert!(success, "show failed: {stderr}");
	assert!(stdout.contains("Format: JSON object"), "stdout: {stdout}");
	assert!(stdout.contains("Keys: cookies, token"), "stdout: {stdout}");
	assert!(!stdout.contains("sid=abc"), "credential values must not be printed");

	let (success, stdout, _) = run_termchat(tmp.path(), &["--credential", path, "credential", "clear"], "");
	assert!(success);
	assert!(stdout.contains("Removed credential"));
	assert!(!credential.exists());

	let (success, stdout, _) = run_termchat(tmp.path(), &["--credential", path, "credential", "clear"], "");
	assert!(success);
	assert!(stdout.contains("No credential stored"));

	let (success, stdout, _) = run_termchat(tmp.path(), &["--credential", path, "credential", "show"], "");
	assert!(success);
	assert!(stdout.contains("(none stored)"));
}
