use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use swatchbook::palettes::palette::{Color, Palette};

fn cmd(dir: &Path) -> Command {
	let mut cmd = cargo_bin_cmd!("pal");
	cmd.current_dir(dir).env_remove("RUST_LOG").env("NO_COLOR", "1");
	cmd
}

fn fixture(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(format!("tests/palettes/{name}"))
}

fn scratch_copy(dir: &Path, name: &str) -> PathBuf {
	let target = dir.join(name);
	fs::copy(fixture(name), &target).unwrap();
	target
}

#[test]
fn test_show() {
	let dir = tempfile::tempdir().unwrap();
	cmd(dir.path())
		.args(["show"])
		.arg(fixture("basic.gpl"))
		.assert()
		.success()
		.stdout(predicate::str::contains("Test"))
		.stdout(predicate::str::contains("#FF0000"))
		.stdout(predicate::str::contains("Green"));
}

#[test]
fn test_show_json() {
	let dir = tempfile::tempdir().unwrap();
	let output = cmd(dir.path())
		.args(["show", "--json"])
		.arg(fixture("basic.gpl"))
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
	assert_eq!(json["name"], "Test");
	assert_eq!(json["columns"], 3);
	assert_eq!(json["colors"][1]["name"], "Green");
	assert_eq!(json["colors"][1]["color"]["g"], 255);
}

#[test]
fn test_show_broken_file_fails() {
	let dir = tempfile::tempdir().unwrap();
	cmd(dir.path())
		.args(["show"])
		.arg(fixture("broken_header.gpl"))
		.assert()
		.failure()
		.stderr(predicate::str::contains("not a GIMP palette"));
}

#[test]
fn test_new_and_edit() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("mine.gpl");

	cmd(dir.path())
		.args(["new", "Mine", "-c", "4", "-o"])
		.arg(&file)
		.assert()
		.success()
		.stdout(predicate::str::contains("Wrote"));

	cmd(dir.path()).args(["add"]).arg(&file).args(["#102030", "Navy"]).assert().success();
	cmd(dir.path()).args(["add"]).arg(&file).args(["ff0000", "Red", "--at", "0"]).assert().success();
	cmd(dir.path()).args(["rename-color"]).arg(&file).args(["1", "Deep Navy"]).assert().success();
	cmd(dir.path()).args(["set-color"]).arg(&file).args(["0", "0x00ff00"]).assert().success();
	cmd(dir.path()).args(["columns"]).arg(&file).args(["-3"]).assert().success();

	let pal = Palette::from_gpl_file(&file).unwrap();
	assert_eq!(pal.name(), "Mine");
	assert_eq!(pal.columns(), 0);
	assert_eq!(pal.color_at(0), Color::new(0, 255, 0));
	assert_eq!(pal.name_at(0), "Red");
	assert_eq!(pal.color_at(1), Color::new(0x10, 0x20, 0x30));
	assert_eq!(pal.name_at(1), "Deep Navy");

	cmd(dir.path()).args(["remove"]).arg(&file).args(["0"]).assert().success();
	assert_eq!(Palette::from_gpl_file(&file).unwrap().len(), 1);
}

#[test]
fn test_new_without_output_uses_working_directory() {
	let dir = tempfile::tempdir().unwrap();

	cmd(dir.path()).args(["new", "Scratch"]).assert().success();

	assert!(dir.path().join("Scratch.gpl").exists());
}

#[test]
fn test_out_of_range_index_fails() {
	let dir = tempfile::tempdir().unwrap();
	let file = scratch_copy(dir.path(), "basic.gpl");

	cmd(dir.path())
		.args(["remove"])
		.arg(&file)
		.args(["2"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("out of range"));

	cmd(dir.path())
		.args(["add"])
		.arg(&file)
		.args(["#000000", "--at", "3"])
		.assert()
		.failure();

	assert_eq!(Palette::from_gpl_file(&file).unwrap().len(), 2);
}

#[test]
fn test_invalid_color_argument() {
	let dir = tempfile::tempdir().unwrap();
	let file = scratch_copy(dir.path(), "basic.gpl");

	cmd(dir.path())
		.args(["add"])
		.arg(&file)
		.args(["not-a-color"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("not a valid hexadecimal color value"));
}

#[test]
fn test_list() {
	let dir = tempfile::tempdir().unwrap();
	scratch_copy(dir.path(), "basic.gpl");
	scratch_copy(dir.path(), "crlf.gpl");

	cmd(dir.path())
		.args(["list", "."])
		.assert()
		.success()
		.stdout(predicate::str::contains("Test (2 colors)"))
		.stdout(predicate::str::contains("Windows (1 colors)"));
}

#[test]
fn test_list_uses_config_file() {
	let dir = tempfile::tempdir().unwrap();
	let palettes = dir.path().join("palettes");
	fs::create_dir(&palettes).unwrap();
	scratch_copy(&palettes, "basic.gpl");
	fs::write(dir.path().join("swatchbook.toml"), "search_paths = [\"palettes\"]\n").unwrap();

	cmd(dir.path())
		.args(["list"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Test (2 colors)"));
}

#[test]
fn test_list_without_search_paths_fails() {
	let dir = tempfile::tempdir().unwrap();
	cmd(dir.path())
		.args(["list"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("No search paths"));
}
