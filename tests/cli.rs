use assert_cmd::Command;

#[test]
fn help_lists_options() {
    let out = Command::cargo_bin("tomatimer")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("--tick-ms"));
    assert!(stdout.contains("--no-progress"));
}

#[test]
fn non_tty_stdin_is_rejected() {
    let out = Command::cargo_bin("tomatimer")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).to_string();
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn invalid_tick_is_rejected() {
    Command::cargo_bin("tomatimer")
        .unwrap()
        .args(["--tick-ms", "0"])
        .assert()
        .failure();
}
