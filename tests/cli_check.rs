mod common;

use common::{TestEnv, CLEAN_DEFAULTS, UBUNTU_DEFAULTS};

#[test]
fn test_check_clean_file_succeeds() {
    let env = TestEnv::new(CLEAN_DEFAULTS);
    let result = env.run_json(&["check"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let event = result.event("check");
    assert_eq!(event["blocks_commit"], false);
    assert_eq!(event["counts"]["critical"], 0);
    assert_eq!(event["counts"]["error"], 0);
}

#[test]
fn test_check_ubuntu_defaults_blocks() {
    let env = TestEnv::new(UBUNTU_DEFAULTS);
    let result = env.run_json(&["check"]);
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);

    let event = result.event("check");
    assert_eq!(event["blocks_commit"], true);
    assert_eq!(event["counts"]["critical"], 1);
    assert_eq!(event["counts"]["error"], 1);

    let ids: Vec<&str> = event["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids[0], "GRUB_TIMEOUT_STYLE.critical");
    assert!(ids.contains(&"GRUB_TIMEOUT.error"));
}

#[test]
fn test_check_text_output_names_findings() {
    let env = TestEnv::new(UBUNTU_DEFAULTS);
    let result = env.run(&["check"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("GRUB_TIMEOUT_STYLE"), "{}", result.stdout);
    assert!(result.stdout.contains("hidden-timeout"), "{}", result.stdout);
}

#[test]
fn test_suppressing_blocking_findings_passes_check() {
    let env = TestEnv::new(UBUNTU_DEFAULTS);
    assert!(env.run(&["suppress", "GRUB_TIMEOUT_STYLE.critical"]).success);
    assert!(env.run(&["suppress", "timeout.error"]).success);

    let result = env.run_json(&["check"]);
    assert!(result.success, "stdout: {}", result.stdout);
    let event = result.event("check");
    let suppressed = event["findings"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["suppressed"] == true)
        .count();
    assert_eq!(suppressed, 2);
}

#[test]
fn test_suppression_is_per_severity() {
    let env = TestEnv::new(UBUNTU_DEFAULTS);
    // Same key, different severity: the critical finding still blocks
    assert!(env.run(&["suppress", "GRUB_TIMEOUT_STYLE.advisory"]).success);
    assert!(env.run(&["suppress", "GRUB_TIMEOUT.error"]).success);

    let result = env.run(&["check"]);
    assert_eq!(result.exit_code, 1);
}
