use termfolio::profile::{FileProfileStore, Profile, ProfileError, ProfileStore};

#[test]
fn missing_file_falls_back_to_the_builtin_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProfileStore::with_path(dir.path().join("profile.json"));
    let profile = store.load().unwrap();
    assert_eq!(profile, Profile::default());
}

#[test]
fn a_saved_profile_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let mut profile = Profile::default();
    profile.name = "Grace Hopper".into();
    profile.tech.push("COBOL".into());
    std::fs::write(&path, serde_json::to_vec_pretty(&profile).unwrap()).unwrap();

    let loaded = FileProfileStore::with_path(&path).load().unwrap();
    assert_eq!(loaded, profile);
    assert_eq!(loaded.name, "Grace Hopper");
}

#[test]
fn malformed_json_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, b"{ not json").unwrap();

    match FileProfileStore::with_path(&path).load() {
        Err(ProfileError::Parse(_)) => {}
        other => panic!("expected a parse error, got {:?}", other.map(|p| p.name)),
    }
}

#[test]
fn an_invalid_command_script_fails_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    // The typo variant disagrees with the correct text before its declared
    // divergence point; this must never reach the animation engine.
    let mut profile = Profile::default();
    let mut json = serde_json::to_value(&profile).unwrap();
    json["commands"] = serde_json::json!([
        { "correct": "whoami", "typo": "xhoami", "divergence": 3, "speed_ms": 90 },
        { "correct": "ls", "speed_ms": 65 },
        { "correct": "cat a.md", "speed_ms": 65 },
        { "correct": "cat b.txt", "speed_ms": 65 }
    ]);
    std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

    match FileProfileStore::with_path(&path).load() {
        Err(ProfileError::Command(_)) => {}
        other => panic!("expected a command error, got {:?}", other.map(|p| p.name)),
    }

    // The same document with the typo fixed loads fine.
    json["commands"][0]["typo"] = serde_json::json!("whomai");
    std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();
    let loaded = FileProfileStore::with_path(&path).load().unwrap();
    profile.commands = serde_json::from_value(json["commands"].clone()).unwrap();
    assert_eq!(loaded.commands, profile.commands);
}

#[test]
fn a_bad_timezone_fails_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let mut json = serde_json::to_value(Profile::default()).unwrap();
    json["tuning"]["clock_timezone"] = serde_json::json!("Moon/Tranquility");
    std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

    match FileProfileStore::with_path(&path).load() {
        Err(ProfileError::Timezone(name)) => assert_eq!(name, "Moon/Tranquility"),
        other => panic!("expected a timezone error, got {:?}", other.map(|p| p.name)),
    }
}
