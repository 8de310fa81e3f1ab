//! Property tests for parse/serialize fidelity.

use proptest::prelude::*;

use grubwiz::{parse, serialize};

/// Lines that look like a GRUB defaults file, including the awkward cases
fn grub_line() -> impl Strategy<Value = String> {
    let key = proptest::string::string_regex("GRUB_[A-Z0-9_]{1,10}").unwrap().boxed();
    let value = proptest::string::string_regex("[A-Za-z0-9 ._,=/$-]{0,12}").unwrap().boxed();
    prop_oneof![
        (key.clone(), value.clone()).prop_map(|(k, v)| format!("{k}={v}")),
        (key.clone(), value.clone()).prop_map(|(k, v)| format!("{k}=\"{v}\"")),
        (key.clone(), value.clone()).prop_map(|(k, v)| format!("{k}='{v}'  # note")),
        (key.clone(), value).prop_map(|(k, v)| format!("\t{k}={v}\r")),
        key.prop_map(|k| format!("export {k}")),
        proptest::string::string_regex("#[ -~]{0,20}").unwrap(),
        Just(String::new()),
        proptest::string::string_regex("[ -~]{0,20}").unwrap(),
    ]
}

fn grub_file() -> impl Strategy<Value = String> {
    (proptest::collection::vec(grub_line(), 0..12), any::<bool>()).prop_map(|(lines, newline)| {
        let mut text = lines.join("\n");
        if newline && !lines.is_empty() {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any UTF-8 text re-serializes byte for byte.
    #[test]
    fn property_arbitrary_text_round_trips(text in any::<String>()) {
        let model = parse(text.as_bytes()).unwrap();
        prop_assert_eq!(serialize(&model), text.into_bytes());
    }

    /// PROPERTY: file-shaped text re-serializes byte for byte.
    #[test]
    fn property_grub_files_round_trip(text in grub_file()) {
        let model = parse(text.as_bytes()).unwrap();
        prop_assert_eq!(String::from_utf8(serialize(&model)).unwrap(), text);
    }

    /// PROPERTY: parsing arbitrary bytes never panics; invalid UTF-8 is an error.
    #[test]
    fn property_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let result = parse(&bytes);
        prop_assert_eq!(result.is_ok(), std::str::from_utf8(&bytes).is_ok());
    }
}
