//! Property tests for `set` and `unset` on the config model.

use proptest::prelude::*;

use grubwiz::domain::services::parse_str;
use grubwiz::{parse, serialize, GrubwizError};

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("GRUB_[A-Z_]{1,8}").unwrap()
}

/// Values without quotes, backslashes or comment markers
fn value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ._,:=/-]{0,16}").unwrap()
}

/// Values drawn from quotes, shell syntax and control characters,
/// line breaks included
fn raw_value() -> impl Strategy<Value = String> {
    let c = prop_oneof![
        Just('\n'),
        Just('\r'),
        Just('\t'),
        Just('\0'),
        Just('\x1b'),
        Just(' '),
        Just('#'),
        Just('"'),
        Just('\''),
        Just('\\'),
        Just('$'),
        proptest::char::range('a', 'z'),
    ];
    proptest::collection::vec(c, 0..12).prop_map(String::from_iter)
}

fn file() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        (key(), value()).prop_map(|(k, v)| format!("{k}={v}")),
        (key(), value()).prop_map(|(k, v)| format!("{k}=\"{v}\" # why")),
        (key(), value()).prop_map(|(k, v)| format!("{k}='{v}'")),
        proptest::string::string_regex("# [a-z ]{0,12}").unwrap(),
        Just(String::new()),
    ];
    proptest::collection::vec(line, 0..10).prop_map(|lines| {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: setting a value twice changes the model only once.
    #[test]
    fn property_set_is_idempotent(text in file(), k in key(), v in value()) {
        let mut model = parse_str(&text);
        model.set(&k, &v).unwrap();
        let once = serialize(&model);

        prop_assert!(!model.set(&k, &v).unwrap());
        prop_assert_eq!(serialize(&model), once);
    }

    /// PROPERTY: a set value reads back the same after a write and re-parse.
    #[test]
    fn property_set_survives_reparse(text in file(), k in key(), v in value()) {
        let mut model = parse_str(&text);
        model.set(&k, &v).unwrap();
        let reparsed = parse(&serialize(&model)).unwrap();
        prop_assert_eq!(reparsed.get(&k), Some(v.as_str()));
    }

    /// PROPERTY: set only rewrites the line it targets.
    #[test]
    fn property_set_touches_at_most_one_line(text in file(), k in key(), v in value()) {
        let before: Vec<String> = text.lines().map(str::to_string).collect();
        let mut model = parse_str(&text);
        model.set(&k, &v).unwrap();
        let after_text = String::from_utf8(serialize(&model)).unwrap();
        let after: Vec<&str> = after_text.lines().collect();

        if before.len() == after.len() {
            let changed = before.iter().zip(&after).filter(|(a, b)| a.as_str() != **b).count();
            prop_assert!(changed <= 1);
        } else {
            // New key: exactly one line inserted, the rest in order
            prop_assert_eq!(after.len(), before.len() + 1);
            let kept: Vec<&str> = after
                .iter()
                .copied()
                .filter(|l| !l.starts_with(&format!("{k}=")))
                .collect();
            prop_assert_eq!(kept, before.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    /// PROPERTY: after unset the key is gone and nothing else moves.
    #[test]
    fn property_unset_removes_every_assignment(text in file(), k in key()) {
        let mut model = parse_str(&text);
        let existed = model.contains(&k);
        prop_assert_eq!(model.unset(&k), existed);
        prop_assert!(!model.contains(&k));

        let reparsed = parse(&serialize(&model)).unwrap();
        prop_assert!(reparsed.get(&k).is_none());
    }

    /// PROPERTY: set either rejects a value or writes exactly one line that
    /// reads back as the stored value.
    #[test]
    fn property_set_never_splits_a_line(text in file(), k in key(), v in raw_value()) {
        let mut model = parse_str(&text);
        let before = model.clone();
        let breaks_line = v.contains(['\n', '\r']);

        match model.set(&k, &v) {
            Err(GrubwizError::InvalidValue { .. }) => {
                prop_assert!(breaks_line);
                prop_assert_eq!(&model, &before);
            }
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
            Ok(_) => {
                prop_assert!(!breaks_line);
                let reparsed = parse(&serialize(&model)).unwrap();
                prop_assert_eq!(reparsed.len(), model.len());
                prop_assert_eq!(reparsed.get(&k), model.get(&k));
            }
        }
    }
}
