use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DIAGRAM: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="200" height="100" fill="orange"/></svg>"#;

const DRAW_AND_TOGGLE: &str = r#"
[[step]]
action = "pencil"

[[step]]
action = "down"
x = 5
y = 5

[[step]]
action = "move"
x = 50
y = 40

[[step]]
action = "up"

[[step]]
action = "toggle"
"#;

fn flowboard_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flowboard").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn flowboard_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    flowboard_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Drawing surface with a flowchart overlay",
        ))
        .stdout(predicate::str::contains("--script"));
}

#[test]
fn replay_requires_output() {
    let temp = TempDir::new().unwrap();
    let script = write(temp.path(), "script.toml", DRAW_AND_TOGGLE);

    flowboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn replay_paints_diagram_and_writes_png() {
    let temp = TempDir::new().unwrap();
    let script = write(temp.path(), "script.toml", DRAW_AND_TOGGLE);
    let code = write(temp.path(), "diagram.svg", DIAGRAM);
    let output = temp.path().join("out.png");

    flowboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--code")
        .arg(&code)
        .arg("--output")
        .arg(&output)
        .args(["--width", "64", "--height", "48"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 200x100 surface"))
        .stdout(predicate::str::contains("1 diagram paints"));

    assert_png(&output);
}

#[test]
fn invalid_code_reports_generic_error_and_continues() {
    let temp = TempDir::new().unwrap();
    let script = write(temp.path(), "script.toml", DRAW_AND_TOGGLE);
    let code = write(temp.path(), "code.js", "function broken( {");
    let output = temp.path().join("out.png");

    flowboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--code")
        .arg(&code)
        .arg("--output")
        .arg(&output)
        .args(["--width", "64", "--height", "48"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid source code for flowchart"))
        .stdout(predicate::str::contains("Wrote 64x48 surface"))
        .stdout(predicate::str::contains("1 render failures"));

    assert_png(&output);
}

#[test]
fn surface_size_comes_from_config() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("flowboard");
    fs::create_dir_all(&config_dir).unwrap();
    write(&config_dir, "config.toml", "[surface]\nwidth = 33\nheight = 22\n");
    let script = write(temp.path(), "script.toml", "");
    let output = temp.path().join("out.png");

    flowboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 33x22 surface"));
}

#[test]
fn init_config_writes_example_file() {
    let temp = TempDir::new().unwrap();

    flowboard_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    let written = fs::read_to_string(temp.path().join("flowboard/config.toml")).unwrap();
    assert!(written.contains("[overlay]"));

    flowboard_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
