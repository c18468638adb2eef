//! Left fold of journal events into current issue state.
//!
//! # Rules
//!
//! | event     | id known                          | id unknown |
//! |-----------|-----------------------------------|------------|
//! | `add`     | overwrite with a fresh open issue | insert     |
//! | `update`  | overwrite supplied fields         | no-op      |
//! | `resolve` | `done = true`                     | no-op      |
//! | `reopen`  | `done = false`                    | no-op      |
//! | `delete`  | remove                            | no-op      |
//!
//! Ordering is replay order (line order), never `whenUtc`. An `add` without
//! `whenUtc` takes the caller-supplied `now` as its creation time; every
//! other field of the result depends only on the events.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::event::{Change, Event};
use crate::model::Issue;

/// Current issues keyed by id.
///
/// Ordered so that iteration, and therefore every replay result, is
/// deterministic.
pub type IssueMap = BTreeMap<String, Issue>;

/// Whether an event changed the state it was folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    /// The event referenced an id that is not in current state.
    NoOp,
}

/// Apply one event to `state` in place.
pub fn apply(state: &mut IssueMap, event: &Event, now: DateTime<Utc>) -> Applied {
    match &event.change {
        Change::Add(fields) => {
            let created = event.when_utc.unwrap_or(now);
            state.insert(event.id.clone(), Issue::created(&event.id, fields, created));
            Applied::Changed
        }
        Change::Update(fields) => replace_existing(state, &event.id, |cur| cur.patched(fields)),
        Change::Resolve => replace_existing(state, &event.id, |cur| cur.with_done(true)),
        Change::Reopen => replace_existing(state, &event.id, |cur| cur.with_done(false)),
        Change::Delete => {
            if state.remove(&event.id).is_some() {
                Applied::Changed
            } else {
                Applied::NoOp
            }
        }
    }
}

fn replace_existing(
    state: &mut IssueMap,
    id: &str,
    f: impl FnOnce(&Issue) -> Issue,
) -> Applied {
    match state.get_mut(id) {
        Some(cur) => {
            *cur = f(cur);
            Applied::Changed
        }
        None => Applied::NoOp,
    }
}

/// Fold one event onto `prior`, returning the next state.
#[must_use]
pub fn fold(mut prior: IssueMap, event: &Event, now: DateTime<Utc>) -> IssueMap {
    apply(&mut prior, event, now);
    prior
}

/// Fold a whole event sequence, left to right, from empty state.
#[must_use]
pub fn replay_events<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: DateTime<Utc>,
) -> IssueMap {
    events
        .into_iter()
        .fold(IssueMap::new(), |state, event| fold(state, event, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventRecord, IssueFields};
    use crate::model::UNTITLED;
    use chrono::{Duration, TimeZone};

    fn t(min: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(min)
    }

    fn add(id: &str, title: &str, min: i64) -> Event {
        Event::from(EventRecord::add(id, IssueFields::titled(title), t(min)))
    }

    fn update(id: &str, fields: IssueFields, min: i64) -> Event {
        Event::from(EventRecord::update(id, fields, t(min)))
    }

    #[test]
    fn add_inserts_open_issue() {
        let state = replay_events(&[add("x", "T", 0)], t(99));
        let issue = &state["x"];
        assert_eq!(issue.title, "T");
        assert!(!issue.done);
        assert_eq!(issue.created_utc, t(0));
    }

    #[test]
    fn add_without_when_uses_now() {
        let mut event = add("x", "T", 0);
        event.when_utc = None;
        let state = replay_events(&[event], t(42));
        assert_eq!(state["x"].created_utc, t(42));
    }

    #[test]
    fn add_without_title_is_untitled() {
        let event = Event::from(EventRecord::add("x", IssueFields::default(), t(0)));
        let state = replay_events(&[event], t(0));
        assert_eq!(state["x"].title, UNTITLED);
    }

    #[test]
    fn second_add_overwrites_and_resets_done() {
        let events = [
            add("x", "first", 0),
            Event::from(EventRecord::resolve("x", t(1))),
            add("x", "second", 2),
        ];
        let state = replay_events(&events, t(9));
        assert_eq!(state.len(), 1);
        assert_eq!(state["x"].title, "second");
        assert!(!state["x"].done);
        assert_eq!(state["x"].created_utc, t(2));
    }

    #[test]
    fn update_order_is_line_order() {
        let a = add("x", "A", 0);
        let b = update("x", IssueFields::titled("B"), 1);
        assert_eq!(replay_events([&a, &b], t(9))["x"].title, "B");

        // Reversed: the update hits an unknown id and is dropped.
        assert_eq!(replay_events([&b, &a], t(9))["x"].title, "A");
    }

    #[test]
    fn update_keeps_created_and_unsupplied_fields() {
        let created = Event::from(EventRecord::add(
            "x",
            IssueFields {
                title: Some("T".into()),
                notes: Some("N".into()),
                ..IssueFields::default()
            },
            t(0),
        ));
        let state = replay_events(&[created, update("x", IssueFields::titled("T2"), 5)], t(9));
        assert_eq!(state["x"].title, "T2");
        assert_eq!(state["x"].notes, "N");
        assert_eq!(state["x"].created_utc, t(0));
    }

    #[test]
    fn resolve_and_reopen_flip_done() {
        let mut state = replay_events(&[add("x", "T", 0)], t(0));
        let before = state["x"].clone();

        assert_eq!(
            apply(&mut state, &Event::from(EventRecord::resolve("x", t(1))), t(0)),
            Applied::Changed
        );
        assert!(state["x"].done);
        assert_eq!(state["x"].title, before.title);
        assert_eq!(state["x"].created_utc, before.created_utc);

        apply(&mut state, &Event::from(EventRecord::reopen("x", t(2))), t(0));
        assert_eq!(state["x"], before);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut state = replay_events(&[add("x", "T", 0)], t(0));
        let snapshot = state.clone();
        for event in [
            update("y", IssueFields::titled("B"), 1),
            Event::from(EventRecord::resolve("y", t(1))),
            Event::from(EventRecord::reopen("y", t(1))),
            Event::from(EventRecord::delete("y", t(1))),
        ] {
            assert_eq!(apply(&mut state, &event, t(0)), Applied::NoOp);
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn delete_then_stale_ops_do_not_resurrect() {
        let events = [
            add("x", "T", 0),
            Event::from(EventRecord::delete("x", t(1))),
            Event::from(EventRecord::resolve("x", t(2))),
            update("x", IssueFields::titled("ghost"), 3),
            Event::from(EventRecord::reopen("x", t(4))),
        ];
        assert!(replay_events(&events, t(9)).is_empty());
    }

    #[test]
    fn add_after_delete_reintroduces_id() {
        let events = [
            add("x", "T", 0),
            Event::from(EventRecord::delete("x", t(1))),
            add("x", "again", 2),
        ];
        let state = replay_events(&events, t(9));
        assert_eq!(state["x"].title, "again");
        assert_eq!(state["x"].created_utc, t(2));
    }

    #[test]
    fn fold_is_left_to_right() {
        let events = [add("a", "A", 0), add("b", "B", 1)];
        let stepwise = events
            .iter()
            .fold(IssueMap::new(), |s, e| fold(s, e, t(0)));
        assert_eq!(stepwise, replay_events(&events, t(0)));
        let ids: Vec<&str> = stepwise.keys().map(String::as_str).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
