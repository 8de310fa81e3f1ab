mod common;

use common::{TestEnv, CLEAN_DEFAULTS};

fn orig_backup(env: &TestEnv) -> String {
    env.backups()
        .into_iter()
        .find(|n| n.ends_with(".orig.txt"))
        .expect("no orig backup")
}

#[test]
fn test_backup_create_default_tag() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    let result = env.run_json(&["backup", "create"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let event = result.event("backup_created");
    assert_eq!(event["backup"]["tag"], "custom");

    let backups = env.backups();
    assert_eq!(backups.len(), 2, "{backups:?}");
    assert!(backups.iter().any(|n| n.ends_with(".custom.txt")));
}

#[test]
fn test_backup_create_rejects_bad_tag() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    let result = env.run(&["backup", "create", "has.dot"]);
    assert!(!result.success);
    assert!(!env.backups().iter().any(|n| n.contains("has")));
}

#[test]
fn test_backup_list_marks_current_content() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["backup", "create", "second"]).success);

    let result = env.run_json(&["backup", "list"]);
    assert!(result.success, "stderr: {}", result.stderr);
    let event = result.event("backups");
    let backups = event["backups"].as_array().unwrap();
    assert_eq!(backups.len(), 2);
    assert!(backups
        .iter()
        .all(|b| b["checksum"] == event["current"]));
}

#[test]
fn test_backup_list_ignores_foreign_files() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["show"]).success);
    std::fs::write(env.backup_dir().join("notes.txt"), "hello").unwrap();

    let result = env.run_json(&["backup", "list"]);
    let event = result.event("backups");
    assert_eq!(event["backups"].as_array().unwrap().len(), 1);
}

#[test]
fn test_backup_delete_with_yes() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["backup", "create", "scratch"]).success);
    let scratch = env
        .backups()
        .into_iter()
        .find(|n| n.ends_with(".scratch.txt"))
        .unwrap();

    let result = env.run(&["backup", "delete", &scratch, "--yes"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(env.backups(), vec![orig_backup(&env)]);
}

#[test]
fn test_backup_delete_needs_name_when_not_interactive() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["show"]).success);

    let result = env.run(&["backup", "delete", "--yes"]);
    assert!(!result.success);
    assert_eq!(env.backups().len(), 1);
}

#[test]
fn test_backup_delete_unknown_name() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    let result = env.run(&["backup", "delete", "20240101.000000.00000000.gone.txt", "--yes"]);
    assert!(!result.success);
}

#[test]
fn test_restore_round_trip() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["set", "timeout", "10", "--yes"]).success);
    assert_ne!(env.read_target(), CLEAN_DEFAULTS);

    let orig = orig_backup(&env);
    let result = env.run(&["backup", "restore", &orig, "--yes"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(env.read_target(), CLEAN_DEFAULTS);
}

#[test]
fn test_restore_with_tag_keeps_replaced_content() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["set", "timeout", "10", "--yes"]).success);
    let edited = env.read_target();

    let orig = orig_backup(&env);
    let result = env.run(&["backup", "restore", &orig, "--yes", "--tag", "edited"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let kept = env
        .backups()
        .into_iter()
        .find(|n| n.ends_with(".edited.txt"))
        .unwrap();
    assert!(common::file_is(&env.backup_dir().join(kept), &edited));
}

#[test]
fn test_restore_refuses_tampered_backup() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["set", "timeout", "10", "--yes"]).success);
    let orig = orig_backup(&env);
    std::fs::write(env.backup_dir().join(&orig), "GRUB_TIMEOUT=99\n").unwrap();

    let before = env.read_target();
    let result = env.run(&["backup", "restore", &orig, "--yes"]);
    assert!(!result.success);
    assert!(result.stderr.contains("checksum"), "{}", result.stderr);
    assert_eq!(env.read_target(), before);
}

#[test]
fn test_external_edit_between_runs_is_new_baseline() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    assert!(env.run(&["show"]).success);
    env.write_target("GRUB_TIMEOUT=1\n");

    assert!(env.run(&["set", "timeout", "2", "--yes"]).success);
    assert_eq!(env.read_target(), "GRUB_TIMEOUT=2\n");
}
