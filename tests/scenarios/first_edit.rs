//! A user opens an unmanaged file for the first time, fixes the hidden
//! menu and commits.

use std::path::Path;
use std::sync::Arc;

use grubwiz::{
    BackupDecision, BackupManager, BackupState, CheckRegistry, EditSession, MemoryFs, Severity,
    SuppressionState,
};

use crate::common::UBUNTU_DEFAULTS;

const TARGET: &str = "/etc/default/grub";
const BACKUPS: &str = "/root/.config/grubwiz/backups";

#[test]
fn scenario_fix_hidden_menu_and_commit() {
    let fs = MemoryFs::new();
    fs.insert(Path::new(TARGET), UBUNTU_DEFAULTS.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);
    let registry = CheckRegistry::builtin(Arc::new(fs.clone()));
    let suppressions = SuppressionState::new();

    // Opening takes the orig snapshot
    let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
    let list = backups.list_backups().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name().tag().as_str(), "orig");
    assert!(matches!(
        session.backup_state(&backups).unwrap(),
        BackupState::UpToDate(_)
    ));

    // Stock Ubuntu defaults cannot be committed as they are
    let eval = session.evaluate(&registry, &suppressions);
    assert!(eval.blocks_commit());
    assert_eq!(eval.count(Severity::Critical), 1);
    assert_eq!(eval.count(Severity::Error), 1);

    session.set("GRUB_TIMEOUT_STYLE", "menu").unwrap();
    session.set("GRUB_TIMEOUT", "5").unwrap();
    let eval = session.evaluate(&registry, &suppressions);
    assert!(!eval.blocks_commit(), "{:?}", eval.findings());

    let diff = session.diff();
    assert_eq!(diff.additions, 2);
    assert_eq!(diff.deletions, 2);

    let result = session.commit(&backups, BackupDecision::Skip).unwrap();
    assert!(result.written);

    let written = String::from_utf8(fs.contents(Path::new(TARGET)).unwrap()).unwrap();
    assert_eq!(
        written,
        UBUNTU_DEFAULTS
            .replace("GRUB_TIMEOUT_STYLE=hidden", "GRUB_TIMEOUT_STYLE=menu")
            .replace("GRUB_TIMEOUT=0", "GRUB_TIMEOUT=5")
    );

    // The orig snapshot still holds the untouched file
    let orig = backups.list_backups().unwrap()[0].file_name();
    assert_eq!(backups.restore(&orig).unwrap(), UBUNTU_DEFAULTS.as_bytes());

    // What was just written is new to the backup history
    assert_eq!(session.backup_state(&backups).unwrap(), BackupState::NewContent);
}

#[test]
fn scenario_untouched_file_round_trips() {
    let fs = MemoryFs::new();
    let quirky = "  GRUB_DEFAULT=0   # first entry\r\nexport GRUB_X\nGRUB_CMDLINE_LINUX='a b'\n\n#end";
    fs.insert(Path::new(TARGET), quirky.as_bytes().to_vec());
    let backups = BackupManager::new(fs.clone(), BACKUPS);

    let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
    assert!(!session.is_dirty());
    assert_eq!(session.pending(), quirky.as_bytes());

    let result = session.commit(&backups, BackupDecision::Skip).unwrap();
    assert!(!result.written);
    assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), quirky.as_bytes());
}
