use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

fn run_termchat(home: &Path, args: &[&str]) -> (bool, String, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_termchat"))
		.current_dir(home)
		.env("HOME", home)
		.env("XDG_CONFIG_HOME", home.join("config"))
		.env_remove("RUST_LOG")
		.args(args)
		.output()
		.expect("failed to execute termchat");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

fn write_png(path: &Path, image: RgbImage) {
	let mut png = Vec::new();
	DynamicImage::ImageRgb8(image)
		.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
		.expect("png should encode");
	std::fs::write(path, png).expect("png should be written");
}

/// 10×10 white image with a black 5×5 square in the top-left corner.
fn corner_png(dir: &Path) -> String {
	let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
	for y in 0..5 {
		for x in 0..5 {
			image.put_pixel(x, y, Rgb([0, 0, 0]));
		}
	}
	let path = dir.join("corner.png");
	write_png(&path, image);
	path.to_string_lossy().into_owned()
}

#[test]
fn render_prints_one_glyph_per_block() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let image = corner_png(tmp.path());

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", &image, "--ramp", " #"]);
	assert!(success, "render failed: {stderr}");
	assert_eq!(stdout, "# \n  \n");
}

#[test]
fn render_uses_default_ramp() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let image = corner_png(tmp.path());

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", &image]);
	assert!(success, "render failed: {stderr}");
	assert_eq!(stdout, "\u{2587}\u{3000}\n\u{3000}\u{3000}\n");
}

#[test]
fn block_flag_changes_grid_shape() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let image = corner_png(tmp.path());

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", &image, "--block", "2x5", "--ramp", " #"]);
	assert!(success, "render failed: {stderr}");
	let rows: Vec<&str> = stdout.lines().collect();
	assert_eq!(rows.len(), 5);
	assert!(rows.iter().all(|row| row.chars().count() == 2));
	assert_eq!(rows[0], "# ");
}

#[test]
fn zero_fill_keeps_and_darkens_edge_blocks() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("white.png");
	write_png(&path, RgbImage::from_pixel(7, 7, Rgb([255, 255, 255])));
	let image = path.to_string_lossy().into_owned();

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", &image, "--ramp", " #"]);
	assert!(success, "render failed: {stderr}");
	assert_eq!(stdout, " \n");

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", &image, "--ramp", " #", "--zero-fill"]);
	assert!(success, "render failed: {stderr}");
	assert_eq!(stdout, " #\n##\n");
}

#[test]
fn config_file_supplies_defaults() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let image = corner_png(tmp.path());
	let config = tmp.path().join("settings.json");
	std::fs::write(&config, r##"{ "ramp": ".@", "rowBlock": 10, "colBlock": 5 }"##).expect("config should be written");

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["--config", config.to_str().unwrap(), "render", &image]);
	assert!(success, "render failed: {stderr}");
	// Top row block is half black: mean 0.5 lands on the lighter symbol.
	assert_eq!(stdout, "..\n");
}

#[test]
fn missing_image_fails_with_path() {
	let tmp = TempDir::new().expect("temp dir should be created");

	let (success, stdout, stderr) = run_termchat(tmp.path(), &["render", "nowhere.png"]);
	assert!(!success);
	assert!(stdout.is_empty());
	assert!(stderr.contains("nowhere.png"), "stderr: {stderr}");
}

#[test]
fn undecodable_image_fails() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let path = tmp.path().join("junk.png");
	std::fs::write(&path, b"not an image").expect("junk should be written");

	let (success, _, stderr) = run_termchat(tmp.path(), &["render", path.to_str().unwrap()]);
	assert!(!success);
	assert!(stderr.contains("decode"), "stderr: {stderr}");
}
