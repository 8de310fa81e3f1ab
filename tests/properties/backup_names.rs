//! Property tests for backup file names and tags.

use chrono::NaiveDate;
use proptest::prelude::*;

use grubwiz::{BackupName, BackupTag, Checksum};

fn tag() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[-_A-Za-z0-9]{1,64}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a backup name parses back to the same timestamp, checksum and tag.
    #[test]
    fn property_backup_name_round_trips(
        content in proptest::collection::vec(any::<u8>(), 0..64),
        tag in tag(),
        days in 0i64..20_000,
        seconds in 0u32..86_400,
    ) {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
        let timestamp = date
            .and_hms_opt(seconds / 3600, (seconds / 60) % 60, seconds % 60)
            .unwrap();
        let name = BackupName::new(
            timestamp,
            Checksum::from_bytes(&content),
            BackupTag::new(&tag).unwrap(),
        );

        let text = name.to_string();
        prop_assert_eq!(BackupName::parse(&text), Some(name));
    }

    /// PROPERTY: tags from the allowed alphabet are accepted.
    #[test]
    fn property_valid_tags_accepted(tag in tag()) {
        prop_assert!(BackupTag::new(&tag).is_ok());
    }

    /// PROPERTY: any tag containing a character outside `[-_A-Za-z0-9]` is rejected.
    #[test]
    fn property_tags_with_foreign_characters_rejected(
        prefix in proptest::string::string_regex("[a-z]{0,5}").unwrap(),
        bad in proptest::char::any().prop_filter("outside the tag alphabet", |c| {
            !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        }),
    ) {
        let tag = format!("{prefix}{bad}");
        prop_assert!(BackupTag::new(&tag).is_err());
    }

    /// PROPERTY: tags longer than 64 characters are rejected.
    #[test]
    fn property_long_tags_rejected(tag in proptest::string::string_regex("[a-z]{65,80}").unwrap()) {
        prop_assert!(BackupTag::new(&tag).is_err());
    }
}
