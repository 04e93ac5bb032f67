use assert_cmd::Command;

// The TUI itself needs a TTY, but the informational surfaces must not.

#[test]
fn help_runs_without_a_tty() {
    let assert = Command::cargo_bin("termfolio")
        .unwrap()
        .arg("--help")
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("--dump-profile"));
    assert!(out.contains("--no-typos"));
}

#[test]
fn dump_profile_prints_parseable_json() {
    let assert = Command::cargo_bin("termfolio")
        .unwrap()
        .arg("--dump-profile")
        .assert()
        .success();

    let out = assert.get_output().stdout.clone();
    let profile: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(profile["name"].is_string());
    assert!(profile["projects"].is_array());
}

#[test]
fn dump_profile_respects_an_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "name": "Grace Hopper",
            "role": "Rear Admiral",
            "location": "Arlington, VA",
            "bio": "Compilers before it was cool.",
            "tech": ["COBOL"],
            "projects": [],
            "experience": {
                "company": "US Navy",
                "title": "Rear Admiral",
                "summary": "FLOW-MATIC and friends.",
                "url": "https://example.org",
                "current": false
            },
            "links": [],
            "email": "grace@example.org"
        })
        .to_string(),
    )
    .unwrap();

    let assert = Command::cargo_bin("termfolio")
        .unwrap()
        .args(["--profile", path.to_str().unwrap(), "--dump-profile"])
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("Grace Hopper"));
}

#[test]
fn a_broken_profile_fails_before_the_tui_starts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, b"{ not json").unwrap();

    Command::cargo_bin("termfolio")
        .unwrap()
        .args(["--profile", path.to_str().unwrap(), "--dump-profile"])
        .assert()
        .failure();
}

#[test]
fn refuses_to_animate_without_a_tty() {
    Command::cargo_bin("termfolio").unwrap().assert().failure();
}

#[test]
fn typo_flags_conflict() {
    Command::cargo_bin("termfolio")
        .unwrap()
        .args(["--no-typos", "--typo-probability", "0.5"])
        .assert()
        .failure();
}

#[test]
fn out_of_range_probability_is_rejected() {
    Command::cargo_bin("termfolio")
        .unwrap()
        .args(["--typo-probability", "1.5", "--dump-profile"])
        .assert()
        .failure();
}
