//! End-to-end journal tests: append records or raw lines to a real file,
//! then load and check the reconstructed issues.

use chrono::{DateTime, Duration, TimeZone, Utc};
use issuepad_core::event::{EventRecord, IssueFields};
use issuepad_core::journal::{Journal, ReplayOptions};
use issuepad_core::model::{Issue, UNTITLED};
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn t(min: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(min)
}

fn journal() -> (TempDir, Journal) {
    let tmp = TempDir::new().expect("tempdir");
    let journal = Journal::new(tmp.path().join("IssuePad").join("issues.jsonl"));
    (tmp, journal)
}

fn write_raw(journal: &Journal, content: &str) {
    fs::create_dir_all(journal.path().parent().expect("parent")).expect("mkdir");
    fs::write(journal.path(), content).expect("write journal");
}

fn find<'a>(issues: &'a [Issue], id: &str) -> Option<&'a Issue> {
    issues.iter().find(|i| i.id == id)
}

fn add(id: &str, title: &str, min: i64) -> EventRecord {
    EventRecord::add(id, IssueFields::titled(title), t(min))
}

// ---------------------------------------------------------------------------
// Replay properties
// ---------------------------------------------------------------------------

#[test]
fn load_twice_is_identical() {
    let (_tmp, journal) = journal();
    journal.append(&add("a", "A", 0)).expect("append");
    journal.append(&add("b", "B", 1)).expect("append");
    journal.append(&EventRecord::resolve("a", t(2))).expect("append");

    assert_eq!(
        journal.load_all().expect("load"),
        journal.load_all().expect("load")
    );
}

#[test]
fn update_wins_only_when_after_add() {
    let add_line = r#"{"type":"add","id":"X","title":"A","whenUtc":"2024-01-01T12:00:00Z"}"#;
    let update_line = r#"{"type":"update","id":"X","title":"B","whenUtc":"2024-01-01T11:00:00Z"}"#;

    let (_tmp, journal) = journal();
    write_raw(&journal, &format!("{add_line}\n{update_line}\n"));
    let issues = journal.load_all().expect("load");
    assert_eq!(find(&issues, "X").expect("X").title, "B");

    write_raw(&journal, &format!("{update_line}\n{add_line}\n"));
    let issues = journal.load_all().expect("load");
    assert_eq!(find(&issues, "X").expect("X").title, "A");
}

#[test]
fn resolve_after_delete_does_not_resurrect() {
    let (_tmp, journal) = journal();
    journal.append(&add("X", "T", 0)).expect("append");
    journal.append(&EventRecord::delete("X", t(1))).expect("append");
    journal.append(&EventRecord::resolve("X", t(2))).expect("append");

    assert!(journal.load_all().expect("load").is_empty());
}

#[test]
fn partial_update_preserves_unspecified_fields() {
    let (_tmp, journal) = journal();
    journal
        .append(&EventRecord::add(
            "X",
            IssueFields {
                application: Some("Billing".into()),
                title: Some("T".into()),
                description: Some("D".into()),
                notes: Some("N".into()),
            },
            t(0),
        ))
        .expect("append");
    journal
        .append(&EventRecord::update("X", IssueFields::titled("T2"), t(1)))
        .expect("append");

    let issues = journal.load_all().expect("load");
    let x = find(&issues, "X").expect("X");
    assert_eq!(x.title, "T2");
    assert_eq!(x.notes, "N");
    assert_eq!(x.description, "D");
    assert_eq!(x.application, "Billing");
    assert_eq!(x.created_utc, t(0));
}

#[test]
fn garbage_between_adds_is_ignored() {
    let (_tmp, journal) = journal();
    journal.append(&add("a", "A", 0)).expect("append");
    fs::write(
        journal.path(),
        format!(
            "{}%%% not a record %%%\n",
            fs::read_to_string(journal.path()).expect("read")
        ),
    )
    .expect("write");
    journal.append(&add("b", "B", 1)).expect("append");

    let replay = journal.replay(ReplayOptions::default()).expect("replay");
    assert_eq!(replay.issues.len(), 2);
    assert_eq!(replay.stats.skipped, 1);
}

#[test]
fn append_then_load_reflects_exactly_the_event() {
    let (_tmp, journal) = journal();
    journal.append(&add("a", "A", 0)).expect("append");
    let before = journal.load_all().expect("load");

    journal.append(&EventRecord::resolve("a", t(1))).expect("append");
    let after = journal.load_all().expect("load");

    let expected: Vec<Issue> = before.iter().map(|i| i.with_done(true)).collect();
    assert_eq!(after, expected);
}

#[test]
fn toggle_cycle_roundtrips() {
    let (_tmp, journal) = journal();
    journal.append(&add("a", "A", 0)).expect("append");
    let open = journal.load_all().expect("load");

    journal.append(&EventRecord::resolve("a", t(1))).expect("append");
    journal.append(&EventRecord::reopen("a", t(2))).expect("append");

    assert_eq!(journal.load_all().expect("load"), open);
}

#[test]
fn results_come_back_in_id_order() {
    let (_tmp, journal) = journal();
    for (id, min) in [("20240101120000300", 0), ("20240101120000100", 1), ("20240101120000200", 2)] {
        journal.append(&add(id, id, min)).expect("append");
    }
    let ids: Vec<String> = journal
        .load_all()
        .expect("load")
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(
        ids,
        ["20240101120000100", "20240101120000200", "20240101120000300"]
    );
}

// ---------------------------------------------------------------------------
// Lines written by other producers
// ---------------------------------------------------------------------------

#[test]
fn reads_bom_crlf_and_offsetless_timestamps() {
    let (_tmp, journal) = journal();
    write_raw(
        &journal,
        concat!(
            "\u{feff}{\"type\":\"add\",\"id\":\"20240101120000000\",\"application\":\"Billing\",",
            "\"title\":\"Invoice bug\",\"description\":\"\",\"notes\":\"\",",
            "\"whenUtc\":\"2024-01-01T12:00:00.1234567Z\"}\r\n",
            "{\"type\":\"resolve\",\"id\":\"20240101120000000\",\"title\":null,",
            "\"whenUtc\":\"2024-01-01T13:00:00.5\"}\r\n",
        ),
    );

    let issues = journal.load_all().expect("load");
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.application, "Billing");
    assert_eq!(issue.title, "Invoice bug");
    assert!(issue.done);
    assert_eq!(issue.created_utc.timestamp(), t(0).timestamp());
}

#[test]
fn add_without_title_or_when_gets_placeholder_and_replay_time() {
    let (_tmp, journal) = journal();
    write_raw(&journal, "{\"type\":\"add\",\"id\":\"x\"}\n");

    let now = t(500);
    let replay = journal
        .replay(ReplayOptions {
            now: Some(now),
            max_lines: None,
        })
        .expect("replay");
    let issue = &replay.issues["x"];
    assert_eq!(issue.title, UNTITLED);
    assert_eq!(issue.application, "");
    assert_eq!(issue.created_utc, now);
}

#[test]
fn lines_missing_type_or_id_are_skipped() {
    let (_tmp, journal) = journal();
    write_raw(
        &journal,
        concat!(
            "{\"id\":\"x\",\"title\":\"no type\"}\n",
            "{\"type\":\"add\",\"title\":\"no id\"}\n",
            "{\"type\":\"promote\",\"id\":\"x\"}\n",
            "\n",
            "   \n",
            "{\"type\":\"add\",\"id\":\"y\",\"title\":\"ok\"}\n",
        ),
    );

    let replay = journal.replay(ReplayOptions::default()).expect("replay");
    assert_eq!(replay.issues.len(), 1);
    assert!(replay.issues.contains_key("y"));
    assert_eq!(replay.stats.skipped, 3);
    assert_eq!(replay.stats.lines, 6);
}

#[test]
fn missing_trailing_newline_still_loads_last_line() {
    let (_tmp, journal) = journal();
    write_raw(&journal, "{\"type\":\"add\",\"id\":\"x\",\"title\":\"T\"}");

    assert_eq!(journal.load_all().expect("load").len(), 1);

    journal.append(&add("y", "Y", 1)).expect("append");
    let content = fs::read_to_string(journal.path()).expect("read");
    assert_eq!(content.lines().count(), 2);
    assert_eq!(journal.load_all().expect("load").len(), 2);
}
