//! Tests for registering mappings on the active table
//!
//! Each test uses its own keys since the active table is shared across the
//! test threads.

use morastr_core::{active_table, count_all, normalize, register, MoraString, PatternEntry};
use std::thread;

#[test]
fn test_registered_mapping_applies() {
    let effective = register([("old_spelling", "new_spelling")]);
    assert_eq!(effective, vec![PatternEntry::new("old_spelling", "new_spelling")]);
    assert_eq!(normalize("old_spelling"), "new_spelling");
}

#[test]
fn test_register_reports_only_changes() {
    register([("ヰヰ", "イイ")]);
    let effective = register([("ヰヰ", "イイ"), ("ヱヱ", "エエ"), ("ゑゑ", "ゑゑ")]);
    assert_eq!(effective, vec![PatternEntry::new("ヱヱ", "エエ")]);
}

#[test]
fn test_registered_mapping_feeds_segmentation() {
    register([("kyatto", "キャット")]);
    let s = MoraString::new("kyatto!", true).unwrap();
    assert_eq!(s.as_str(), "キャット!");
    assert_eq!(s.mora_count(), 3);
    assert_eq!(count_all("kyatto", false).unwrap(), 3);
}

#[test]
fn test_snapshot_is_unaffected_by_later_registration() {
    let before = active_table();
    register([("snapshot_key", "value")]);
    assert!(before.get("snapshot_key").is_none());
    assert_eq!(active_table().get("snapshot_key"), Some("value"));
}

#[test]
fn test_concurrent_registration() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                register([(format!("concurrent_{i}"), format!("value_{i}"))]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let table = active_table();
    for i in 0..8 {
        assert_eq!(
            table.get(&format!("concurrent_{i}")),
            Some(format!("value_{i}").as_str())
        );
    }
}
