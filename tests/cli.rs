use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("typepace")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("practice"));
    assert!(stdout.contains("game"));
    assert!(stdout.contains("texts"));
}

#[test]
fn texts_prints_the_requested_level() {
    let output = Command::cargo_bin("typepace")
        .unwrap()
        .args(["texts", "--level", "beginner"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("beginner: The quick brown fox"));
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn texts_without_level_prints_all_three() {
    let output = Command::cargo_bin("typepace")
        .unwrap()
        .arg("texts")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn unknown_game_is_rejected() {
    Command::cargo_bin("typepace")
        .unwrap()
        .args(["game", "hangman"])
        .assert()
        .failure();
}

#[test]
fn practice_needs_a_tty() {
    Command::cargo_bin("typepace")
        .unwrap()
        .arg("practice")
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn zero_second_practice_is_refused_before_anything_is_saved() {
    let home = tempfile::tempdir().unwrap();
    let output = Command::cargo_bin("typepace")
        .unwrap()
        .args(["practice", "--secs", "0"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--secs"), "{stderr}");
    assert!(!home.path().join("config").exists());
}

#[test]
fn empty_prompt_is_refused() {
    let output = Command::cargo_bin("typepace")
        .unwrap()
        .args(["practice", "--prompt", ""])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("must not be empty"), "{stderr}");
}
