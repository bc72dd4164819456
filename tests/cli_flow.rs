use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13, b'I', b'H', b'D', b'R'];

fn seedsaver(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("seedsaver").unwrap();
    cmd.env("SEEDSAVER_DATA_DIR", data_dir).env_remove("RUST_LOG");
    cmd
}

fn seal(data_dir: &Path, image: &Path, archive: &Path, authenticated: bool) {
    let mut cmd = seedsaver(data_dir);
    cmd.arg("seal")
        .arg(image)
        .arg("--output")
        .arg(archive)
        .arg("--password-stdin");
    if authenticated {
        cmd.arg("--authenticated");
    }
    cmd.write_stdin("correct-password\ncorrect-password\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted archive written to"));
}

#[test]
fn test_seal_then_open_restores_image() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("seed.png");
    let archive = temp_dir.path().join("seed.html");
    let restored = temp_dir.path().join("restored.png");
    fs::write(&image, PNG).unwrap();

    seal(temp_dir.path(), &image, &archive, false);

    let document = fs::read_to_string(&archive).unwrap();
    assert!(document.contains(r#"<script id="seedsaver-archive""#));
    assert!(!document.contains("ENCRYPTED_DATA_PLACEHOLDER"));
    assert!(!document.contains("SALT_PLACEHOLDER"));

    seedsaver(temp_dir.path())
        .arg("open")
        .arg(&archive)
        .arg("--output")
        .arg(&restored)
        .arg("--password-stdin")
        .write_stdin("correct-password\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decrypted image written to"));

    assert_eq!(fs::read(&restored).unwrap(), PNG);
}

#[test]
fn test_open_retries_after_wrong_password() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("photo.png");
    let archive = temp_dir.path().join("seed.html");
    fs::write(&image, PNG).unwrap();

    seal(temp_dir.path(), &image, &archive, true);

    seedsaver(temp_dir.path())
        .arg("open")
        .arg(&archive)
        .arg("--password-stdin")
        .write_stdin("wrong-password\ncorrect-password\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrong password or corrupted archive. Try again."));

    // Default output sits next to the archive with the sniffed extension
    assert_eq!(fs::read(temp_dir.path().join("seed.png")).unwrap(), PNG);
    let audit = fs::read_to_string(temp_dir.path().join("audit.log")).unwrap();
    assert!(audit.contains("\"open_failed\""));
    assert!(audit.contains("\"open\""));
}

#[test]
fn test_open_cancel_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("seed.png");
    let archive = temp_dir.path().join("seed.html");
    let restored = temp_dir.path().join("restored.png");
    fs::write(&image, PNG).unwrap();

    seal(temp_dir.path(), &image, &archive, true);

    seedsaver(temp_dir.path())
        .arg("open")
        .arg(&archive)
        .arg("--output")
        .arg(&restored)
        .arg("--password-stdin")
        .write_stdin("wrong-password\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    assert!(!restored.exists());
}

#[test]
fn test_seal_rejects_mismatched_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("seed.png");
    let archive = temp_dir.path().join("seed.html");
    fs::write(&image, PNG).unwrap();

    seedsaver(temp_dir.path())
        .arg("seal")
        .arg(&image)
        .arg("--output")
        .arg(&archive)
        .arg("--password-stdin")
        .write_stdin("correct-password\nsomething-else\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords don't match"));

    assert!(!archive.exists());
}

#[test]
fn test_inspect_reports_format() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("seed.png");
    let archive = temp_dir.path().join("seed.html");
    fs::write(&image, PNG).unwrap();

    seal(temp_dir.path(), &image, &archive, true);

    seedsaver(temp_dir.path())
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:          v2"))
        .stdout(predicate::str::contains("Salt:            128 bits"))
        .stdout(predicate::str::contains("100000 iterations"));
}

#[test]
fn test_inspect_rejects_unfilled_template() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template.html");

    seedsaver(temp_dir.path())
        .arg("template")
        .arg("--output")
        .arg(&template)
        .assert()
        .success();

    let contents = fs::read_to_string(&template).unwrap();
    assert!(contents.contains("ENCRYPTED_DATA_PLACEHOLDER"));
    assert!(contents.contains("SALT_PLACEHOLDER"));

    seedsaver(temp_dir.path())
        .arg("inspect")
        .arg(&template)
        .assert()
        .failure();
}

#[test]
fn test_config_shows_data_dir() {
    let temp_dir = TempDir::new().unwrap();

    seedsaver(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Envelope format:     v1"))
        .stdout(predicate::str::contains(temp_dir.path().to_str().unwrap()));
}

#[test]
fn test_unwritable_audit_log_does_not_fail_commands() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("photo.png");
    let archive = temp_dir.path().join("seed.html");
    fs::write(&image, PNG).unwrap();
    fs::create_dir(temp_dir.path().join("audit.log")).unwrap();

    seal(temp_dir.path(), &image, &archive, true);
    assert!(archive.exists());

    seedsaver(temp_dir.path())
        .arg("open")
        .arg(&archive)
        .arg("--password-stdin")
        .write_stdin("wrong-password\ncorrect-password\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrong password or corrupted archive. Try again."))
        .stdout(predicate::str::contains("Decrypted image written to"));

    assert_eq!(fs::read(temp_dir.path().join("seed.png")).unwrap(), PNG);
}

#[test]
fn test_first_run_writes_default_settings() {
    let temp_dir = TempDir::new().unwrap();
    let settings_file = temp_dir.path().join("config.json");

    seedsaver(temp_dir.path()).arg("config").assert().success();

    let settings = fs::read_to_string(&settings_file).unwrap();
    assert!(settings.contains("\"format_version\": \"v1\""));
    assert!(settings.contains("\"min_password_len\": 6"));
}
