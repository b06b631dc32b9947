mod common;

use common::{harness, local_unread, read, unread};
use fieldnotify::{Confirmation, LogLevel, Sound, StoreEvent};
use serde_json::json;

fn ids(store: &fieldnotify::NotificationStore) -> Vec<String> {
    store.notifications().iter().map(|n| n.id()).collect()
}

#[test]
fn duplicate_delivery_keeps_one_entry() {
    let h = harness(vec![]);

    assert!(h.store.ingest(json!({"id": "A", "is_read": false})));
    assert!(!h.store.ingest(json!({"id": "A", "is_read": false})));

    assert_eq!(ids(&h.store), vec!["A"]);
    assert_eq!(h.store.unread_count(), 1);
    assert_eq!(h.sounds.played().len(), 1);
}

#[test]
fn live_feed_then_fetch_does_not_duplicate() {
    let h = harness(vec![unread("A"), unread("B")]);

    h.store.ingest(json!({"id": "A", "title": "t"}));
    assert!(h.store.fetch_all());

    assert_eq!(ids(&h.store), vec!["A", "B"]);
    assert_eq!(h.store.unread_count(), 2);
}

#[test]
fn fetch_drops_repeated_ids_from_the_server() {
    let h = harness(vec![unread("A"), unread("A"), read("B")]);

    h.store.fetch_all();

    assert_eq!(ids(&h.store), vec!["A", "B"]);
}

#[test]
fn live_feed_prepends() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();

    h.store.ingest(json!({"id": "B"}));
    h.store.ingest(json!({"id": "C"}));

    assert_eq!(ids(&h.store), vec!["C", "B", "A"]);
}

#[test]
fn unread_count_tracks_every_local_mutation() {
    let h = harness(vec![unread("A"), read("B"), unread("C")]);
    h.store.fetch_all();
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.ingest(json!({"id": "D"}));
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.ingest(json!({"id": "E", "is_read": true}));
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.mark_as_read("A");
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.mark_as_read("A");
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.mark_as_read("B");
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.delete_notification("C");
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.delete_notification("B");
    assert_eq!(h.store.unread_count(), local_unread(&h.store));

    h.store.mark_all_as_read();
    assert_eq!(h.store.unread_count(), local_unread(&h.store));
    assert_eq!(h.store.unread_count(), 0);
}

#[test]
fn mark_all_read_with_mixed_state() {
    let h = harness(vec![unread("A"), read("B")]);
    h.store.fetch_all();

    h.store.mark_all_as_read();

    assert!(h.store.notifications().iter().all(|n| n.is_read));
    assert_eq!(h.store.unread_count(), 0);
    assert_eq!(h.store.pending_confirmations(), vec![Confirmation::MarkAllRead]);
}

#[test]
fn mark_as_read_is_optimistic_then_confirmed() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();

    assert!(h.store.mark_as_read("A"));
    assert!(h.store.get("A").unwrap().is_read);
    assert!(h.server.calls().is_empty());

    assert_eq!(h.store.process_confirmations(), 1);
    assert_eq!(h.server.calls(), vec!["PUT /notifications/A/read"]);
    assert!(h.store.pending_confirmations().is_empty());
}

#[test]
fn mark_as_read_of_unknown_id_is_a_no_op() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();

    assert!(!h.store.mark_as_read("Z"));

    assert_eq!(h.store.unread_count(), 1);
    assert!(h.store.pending_confirmations().is_empty());
}

#[test]
fn failed_read_confirmation_keeps_local_state_without_resync() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();
    h.server.state().fail_mark = true;

    h.store.mark_as_read("A");
    h.store.mark_all_as_read();
    h.store.process_confirmations();

    assert!(h.store.get("A").unwrap().is_read);
    assert_eq!(h.store.unread_count(), 0);
    assert_eq!(h.server.fetches(), 1);
    assert_eq!(h.logs.count(LogLevel::Error), 2);
}

#[test]
fn drift_from_failed_read_is_corrected_by_next_fetch() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();
    h.server.state().fail_mark = true;

    h.store.mark_as_read("A");
    h.store.process_confirmations();
    h.store.fetch_all();

    assert!(!h.store.get("A").unwrap().is_read);
    assert_eq!(h.store.unread_count(), 1);
}

#[test]
fn delete_removes_exactly_one() {
    let h = harness(vec![unread("A"), read("B"), unread("C")]);
    h.store.fetch_all();

    assert!(h.store.delete_notification("B"));
    assert_eq!(ids(&h.store), vec!["A", "C"]);
    assert_eq!(h.store.unread_count(), 2);

    assert!(!h.store.delete_notification("Z"));
    assert_eq!(ids(&h.store), vec!["A", "C"]);

    assert!(h.store.delete_notification("A"));
    assert_eq!(ids(&h.store), vec!["C"]);
    assert_eq!(h.store.unread_count(), 1);
}

#[test]
fn delete_all_clears_fully() {
    let h = harness(vec![unread("A"), read("B")]);
    h.store.fetch_all();

    h.store.delete_all_notifications();
    assert!(h.store.notifications().is_empty());
    assert_eq!(h.store.unread_count(), 0);

    h.store.process_confirmations();
    assert_eq!(h.server.calls(), vec!["DELETE /notifications/delete-all"]);
    assert!(h.server.state().notifications.is_empty());
}

#[test]
fn failed_delete_resyncs_and_restores_the_entry() {
    let h = harness(vec![unread("B")]);
    h.store.fetch_all();
    h.server.state().fail_delete = true;

    h.store.delete_notification("B");
    assert!(h.store.notifications().is_empty());
    assert_eq!(h.store.unread_count(), 0);

    h.store.process_confirmations();

    assert_eq!(ids(&h.store), vec!["B"]);
    assert_eq!(h.store.unread_count(), 1);
    assert_eq!(h.server.fetches(), 2);
}

#[test]
fn failed_delete_all_resyncs() {
    let h = harness(vec![unread("A"), unread("B")]);
    h.store.fetch_all();
    h.server.state().fail_delete = true;

    h.store.delete_all_notifications();
    h.store.process_confirmations();

    assert_eq!(ids(&h.store), vec!["A", "B"]);
    assert_eq!(h.store.unread_count(), 2);
}

#[test]
fn successful_delete_does_not_resync() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();

    h.store.delete_notification("A");
    h.store.process_confirmations();

    assert_eq!(h.server.fetches(), 1);
    assert!(h.server.state().notifications.is_empty());
}

#[test]
fn failed_fetch_keeps_last_known_state() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();
    h.server.state().fail_fetch = true;

    assert!(!h.store.fetch_all());

    assert_eq!(ids(&h.store), vec!["A"]);
    assert_eq!(h.store.unread_count(), 1);
    assert!(!h.store.loading());
    assert_eq!(h.logs.count(LogLevel::Error), 1);
}

#[test]
fn subscribers_see_loading_during_fetch() {
    let h = harness(vec![unread("A")]);
    let changes = h.store.subscribe();

    h.store.fetch_all();

    let snapshots: Vec<_> = changes.try_iter().collect();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].loading);
    assert!(!snapshots[1].loading);
    assert_eq!(snapshots[1].unread_count, 1);
}

#[test]
fn ingest_selects_sound_from_effective_type() {
    let h = harness(vec![]);

    h.store.ingest(json!({"id": "1", "type": "success", "metadata": {"type": "checkin"}}));
    h.store.ingest(json!({"id": "2", "metadata": "{\"type\":\"reminder\"}"}));
    h.store.ingest(json!({"id": "3", "metadata": {"type": "checkout_approved"}}));
    h.store.ingest(json!({"id": "4", "type": "warning", "metadata": "{broken"}));

    assert_eq!(
        h.sounds.played(),
        vec![Sound::CheckIn, Sound::Reminder, Sound::TaskStatus, Sound::Default]
    );
}

#[test]
fn ingest_ignores_payloads_without_usable_id() {
    let h = harness(vec![]);

    assert!(!h.store.ingest(json!({"title": "no id"})));
    assert!(!h.store.ingest(json!({"id": ""})));
    assert!(!h.store.ingest(json!({"id": 7})));
    assert!(!h.store.ingest(json!({"id": "A", "is_read": "nope"})));
    assert!(!h.store.ingest(json!("ping")));

    assert!(h.store.notifications().is_empty());
    assert_eq!(h.store.unread_count(), 0);
    assert!(h.sounds.played().is_empty());
}

#[test]
fn poll_plays_generic_sound_only_when_unread_grows() {
    let h = harness(vec![unread("A")]);

    assert!(h.store.poll());
    assert_eq!(h.sounds.played(), vec![Sound::Default]);

    assert!(h.store.poll());
    assert_eq!(h.sounds.played().len(), 1);

    h.server.state().notifications.insert(0, unread("B"));
    h.store.poll();
    assert_eq!(h.sounds.played(), vec![Sound::Default, Sound::Default]);
    assert_eq!(ids(&h.store), vec!["B", "A"]);
}

#[test]
fn poll_failure_is_silent() {
    let h = harness(vec![unread("A")]);
    h.store.poll();
    h.server.state().fail_fetch = true;

    assert!(!h.store.poll());

    assert_eq!(ids(&h.store), vec!["A"]);
    assert_eq!(h.logs.count(LogLevel::Error), 0);
    assert_eq!(h.logs.count(LogLevel::Warning), 0);
}

#[test]
fn events_from_all_channels_are_applied_in_order() {
    let h = harness(vec![unread("S")]);
    let sender = h.store.event_sender();
    let relay = h.store.relay();

    sender.send(StoreEvent::Incoming(json!({"id": "L"}))).unwrap();
    assert!(relay.handle_message(r#"{"type":"NEW_NOTIFICATION"}"#));
    sender.send(StoreEvent::Incoming(json!({"id": "L"}))).unwrap();

    assert_eq!(h.store.process_events(), 3);

    // The relay refresh overwrote the live entry with the server snapshot and
    // the repeated live delivery afterwards was a fresh insert.
    assert_eq!(ids(&h.store), vec!["L", "S"]);
    assert_eq!(h.server.fetches(), 1);
    assert_eq!(h.store.unread_count(), local_unread(&h.store));
}

#[test]
fn relay_signal_triggers_full_refresh() {
    let h = harness(vec![unread("A"), unread("B")]);

    std::thread::spawn({
        let relay = h.store.relay();
        move || relay.signal()
    })
    .join()
    .unwrap();

    h.store.process_events();
    assert_eq!(ids(&h.store), vec!["A", "B"]);
}

#[test]
fn clear_resets_the_session() {
    let h = harness(vec![unread("A")]);
    h.store.fetch_all();
    h.store.mark_as_read("A");
    h.store.event_sender().send(StoreEvent::RefreshRequested).unwrap();

    h.store.clear();

    assert!(h.store.notifications().is_empty());
    assert_eq!(h.store.unread_count(), 0);
    assert!(h.store.pending_confirmations().is_empty());
    assert_eq!(h.store.process_events(), 0);
}

#[test]
fn fetch_sends_owed_delete_before_taking_the_snapshot() {
    let h = harness(vec![unread("A"), unread("B")]);
    h.store.fetch_all();

    h.store.delete_notification("B");
    assert!(h.store.fetch_all());

    assert_eq!(h.server.calls(), vec!["DELETE /notifications/B"]);
    assert_eq!(ids(&h.store), vec!["A"]);
    assert_eq!(h.store.unread_count(), 1);
    assert!(h.store.pending_confirmations().is_empty());
}

#[test]
fn fetch_sends_owed_read_before_taking_the_snapshot() {
    let h = harness(vec![unread("A"), unread("B")]);
    h.store.fetch_all();

    h.store.mark_as_read("A");
    h.store.fetch_all();

    assert!(h.store.get("A").unwrap().is_read);
    assert_eq!(h.store.unread_count(), 1);
    assert_eq!(h.store.unread_count(), local_unread(&h.store));
}

#[test]
fn poll_after_local_changes_keeps_them_and_stays_quiet() {
    let h = harness(vec![unread("A"), unread("B")]);
    h.store.poll();
    assert_eq!(h.sounds.played(), vec![Sound::Default]);

    h.store.mark_as_read("A");
    h.store.delete_notification("B");
    assert!(h.store.poll());

    assert_eq!(
        h.server.calls(),
        vec!["PUT /notifications/A/read", "DELETE /notifications/B"]
    );
    assert_eq!(ids(&h.store), vec!["A"]);
    assert!(h.store.get("A").unwrap().is_read);
    assert_eq!(h.store.unread_count(), 0);
    assert_eq!(h.sounds.played().len(), 1);
}

#[test]
fn failed_delete_sent_by_a_fetch_is_restored_by_that_fetch() {
    let h = harness(vec![unread("A"), unread("B")]);
    h.store.fetch_all();
    h.server.state().fail_delete = true;

    h.store.delete_notification("B");
    h.store.fetch_all();

    assert_eq!(ids(&h.store), vec!["A", "B"]);
    assert_eq!(h.store.unread_count(), 2);
    assert_eq!(h.server.fetches(), 2);
}
