#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        // Anything that parses must print back to the same file name
        if let Some(parsed) = grubwiz::BackupName::parse(name) {
            assert_eq!(parsed.to_string(), name);
        }
        let _ = grubwiz::FindingId::parse(name);
    }
});
