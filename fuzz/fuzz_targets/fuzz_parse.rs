#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every UTF-8 input must come back byte for byte
    if let Ok(model) = grubwiz::parse(data) {
        assert_eq!(grubwiz::serialize(&model), data);

        // Editing must never panic, whatever the surrounding lines are
        let mut model = model;
        let _ = model.set("GRUB_TIMEOUT", "5");
        let reparsed = grubwiz::parse(&grubwiz::serialize(&model)).unwrap();
        assert_eq!(reparsed.get("GRUB_TIMEOUT"), Some("5"));
    }
});
