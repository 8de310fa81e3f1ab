//! Another program edits the file while a session holds pending changes.

use std::path::Path;

use grubwiz::{BackupDecision, BackupManager, BackupTag, EditSession, GrubwizError, MemoryFs};

use crate::common::CLEAN_DEFAULTS;

const TARGET: &str = "/etc/default/grub";
const BACKUPS: &str = "/backups";

#[test]
fn scenario_external_edit_blocks_commit_until_reload() {
    let fs = MemoryFs::new();
    fs.insert(Path::new(TARGET), CLEAN_DEFAULTS.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);

    let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
    session.set("GRUB_TIMEOUT", "10").unwrap();

    // Package upgrade rewrites the file underneath us
    let upgraded = CLEAN_DEFAULTS.replace("GRUB_DEFAULT=0", "GRUB_DEFAULT=1");
    fs.insert(Path::new(TARGET), upgraded.as_bytes().to_vec());
    let writes = fs.write_count();

    let tag = BackupTag::new("mine").unwrap();
    let err = session
        .commit(&backups, BackupDecision::Tag(tag))
        .unwrap_err();
    match err {
        GrubwizError::ConcurrentModification { expected, found, .. } => {
            assert_eq!(&expected, session.loaded_checksum());
            assert_ne!(expected, found);
        }
        other => panic!("expected ConcurrentModification, got {other:?}"),
    }

    // Nothing written, nothing backed up
    assert_eq!(fs.write_count(), writes);
    assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), upgraded.as_bytes());
    assert_eq!(backups.list_backups().unwrap().len(), 1);

    // Reload drops the edit; redoing it on the new baseline succeeds
    session.reload().unwrap();
    assert_eq!(session.model().get("GRUB_DEFAULT"), Some("1"));
    session.set("GRUB_TIMEOUT", "10").unwrap();
    session.commit(&backups, BackupDecision::Skip).unwrap();

    let text = String::from_utf8(fs.contents(Path::new(TARGET)).unwrap()).unwrap();
    assert!(text.contains("GRUB_DEFAULT=1\n"));
    assert!(text.contains("GRUB_TIMEOUT=10\n"));
}

#[test]
fn scenario_deleted_target_is_reported_as_missing() {
    let fs = MemoryFs::new();
    fs.insert(Path::new(TARGET), CLEAN_DEFAULTS.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);

    let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
    session.set("GRUB_TIMEOUT", "10").unwrap();
    grubwiz::domain::ports::FileSystem::remove(&fs, Path::new(TARGET)).unwrap();

    let err = session.commit(&backups, BackupDecision::Skip).unwrap_err();
    assert!(matches!(err, GrubwizError::TargetMissing { .. }));
}
