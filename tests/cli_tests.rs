use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn homereel(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homereel").unwrap();
    cmd.current_dir(cwd.path()).env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    homereel(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run").and(predicate::str::contains("inspect")));
}

#[test]
fn test_missing_input_directory_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    homereel(&dir)
        .args(["run", "--input-dir"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory does not exist"));
}

#[test]
fn test_relative_output_directory_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    homereel(&dir)
        .args(["run", "--input-dir"])
        .arg(dir.path())
        .args(["--output-dir", "relative/output"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

#[test]
fn test_non_positive_fps_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    homereel(&dir)
        .args(["run", "--input-dir"])
        .arg(dir.path())
        .args(["--fps", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));
}

#[test]
fn test_empty_folder_has_nothing_to_combine() {
    let dir = TempDir::new().unwrap();
    homereel(&dir)
        .args(["run", "--json", "--input-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing_to_combine"));

    assert!(dir.path().join("output").is_dir());
}

#[test]
fn test_config_file_supplies_input_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("homereel.toml"),
        format!("[homereel]\ninput_dir = {:?}\n", dir.path().display().to_string()),
    )
    .unwrap();

    homereel(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("No videos to combine"));
}

#[test]
fn test_output_directory_equal_to_input_keeps_sources() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("20200717_130000_a.mp4");
    std::fs::write(&source, "source").unwrap();

    homereel(&dir)
        .args(["run", "--resume", "--input-dir"])
        .arg(dir.path())
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be the input directory"));

    assert_eq!(std::fs::read_to_string(&source).unwrap(), "source");
}
