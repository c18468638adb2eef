use chrono::{DateTime, Duration, TimeZone, Utc};
use issuepad_core::event::{EventRecord, IssueFields};
use proptest::prelude::*;

pub fn arb_when() -> impl Strategy<Value = DateTime<Utc>> + Clone {
    (0i64..5_000_000).prop_map(|secs| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
    })
}

/// A small id space so that updates, resolves, and deletes often hit.
pub fn arb_id() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from)
}

pub fn arb_text() -> impl Strategy<Value = Option<String>> + Clone {
    prop::option::of("[a-zA-Z0-9 ,.\n\"\\\\è✓]{0,12}")
}

pub fn arb_fields() -> impl Strategy<Value = IssueFields> + Clone {
    (arb_text(), arb_text(), arb_text(), arb_text()).prop_map(
        |(application, title, description, notes)| IssueFields {
            application,
            title,
            description,
            notes,
        },
    )
}

pub fn arb_record() -> impl Strategy<Value = EventRecord> + Clone {
    (0u8..5, arb_id(), arb_fields(), arb_when(), any::<bool>()).prop_map(
        |(kind, id, fields, when, has_when)| {
            let mut record = match kind {
                0 => EventRecord::add(id, fields, when),
                1 => EventRecord::update(id, fields, when),
                2 => EventRecord::resolve(id, when),
                3 => EventRecord::reopen(id, when),
                _ => EventRecord::delete(id, when),
            };
            if !has_when && kind != 0 {
                record.when_utc = None;
            }
            record
        },
    )
}

pub fn arb_records() -> impl Strategy<Value = Vec<EventRecord>> + Clone {
    prop::collection::vec(arb_record(), 0..40)
}

/// Lines that never decode to an event.
pub fn arb_garbage_line() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec![
        "garbage",
        "{",
        "{\"type\":\"add\"}",
        "{\"id\":\"a\"}",
        "{\"type\":\"archive\",\"id\":\"a\"}",
        "{\"type\":\"add\",\"id\":\"a\",\"title\":7}",
        "[]",
        "null",
    ])
    .prop_map(String::from)
}
