//! Several edits over time, then a restore of an older version.

use std::path::Path;

use chrono::NaiveDate;
use grubwiz::{
    BackupDecision, BackupManager, BackupState, BackupTag, EditSession, GrubwizError, MemoryFs,
};

use crate::common::CLEAN_DEFAULTS;

const TARGET: &str = "/etc/default/grub";
const BACKUPS: &str = "/backups";

#[test]
fn scenario_tagged_commits_then_restore() {
    let fs = MemoryFs::new();
    fs.insert(Path::new(TARGET), CLEAN_DEFAULTS.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);

    let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();

    // First edit: superseded content is already the orig backup
    session.set("GRUB_TIMEOUT", "10").unwrap();
    assert!(!session.backup_state(&backups).unwrap().needs_backup());
    session.commit(&backups, BackupDecision::Skip).unwrap();
    let ten = session.loaded().to_vec();

    // Second edit: the ten-second version is new, keep it
    session.set("GRUB_TIMEOUT", "3").unwrap();
    assert_eq!(session.backup_state(&backups).unwrap(), BackupState::NewContent);
    let tag = BackupTag::new("ten-seconds").unwrap();
    let result = session.commit(&backups, BackupDecision::Tag(tag)).unwrap();
    let kept = result.backup.unwrap();
    assert!(kept.is_created());
    assert_eq!(backups.restore(&kept.backup().file_name()).unwrap(), ten);

    // Restore the tagged version and commit it
    session
        .restore_from(&backups, &kept.backup().file_name())
        .unwrap();
    assert_eq!(session.model().get("GRUB_TIMEOUT"), Some("10"));
    session.commit(&backups, BackupDecision::Skip).unwrap();
    assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), ten);

    // Content is in the history again
    assert!(!session.backup_state(&backups).unwrap().needs_backup());
}

#[test]
fn scenario_same_second_backup_is_not_duplicated() {
    let fs = MemoryFs::new();
    let backups = BackupManager::new(fs.clone(), BACKUPS);
    let at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let tag = BackupTag::new("manual").unwrap();

    let first = backups.create_backup_at(b"GRUB_TIMEOUT=5\n", &tag, at).unwrap();
    let second = backups.create_backup_at(b"GRUB_TIMEOUT=5\n", &tag, at).unwrap();
    assert!(first.is_created());
    assert!(!second.is_created());
    assert_eq!(first.backup(), second.backup());
    assert_eq!(backups.list_backups().unwrap().len(), 1);
}

#[test]
fn scenario_deleted_backup_cannot_be_restored() {
    let fs = MemoryFs::new();
    fs.insert(Path::new(TARGET), CLEAN_DEFAULTS.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);
    let mut session = EditSession::open(fs, TARGET, &backups).unwrap();

    let orig = backups.latest().unwrap().unwrap().file_name();
    backups.delete_backup(&orig).unwrap();
    assert!(backups.list_backups().unwrap().is_empty());

    let err = session.restore_from(&backups, &orig).unwrap_err();
    assert!(matches!(err, GrubwizError::NotFound { .. }));
}
