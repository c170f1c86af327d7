// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Tests for the streaming reader
//
// Tests cover:
//  1. event/data pair framed into one unit
//  2. Heartbeats and empty records dropped
//  3. Orphan data lines dropped
//  4. Pending event cleared after emission
//  5. Consecutive event lines overwrite the pending name
//  6. Records split across chunk boundaries
//  7. Decoding per event kind, unknown events ignored
//  8. Undecodable payloads dropped without ending the stream
//  9. Body errors are fatal
// 10. Oversized records dropped with bounded buffering
// 11. A closed listener stops the stream

use super::*;
use crate::status::Status;
use bytes::Bytes;

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// A listener that records every event it receives.
#[derive(Default)]
struct RecordingListener {
    updates: Vec<Status>,
    notifications: Vec<serde_json::Value>,
    deletes: Vec<String>,
}

impl RecordingListener {
    fn total(&self) -> usize {
        self.updates.len() + self.notifications.len() + self.deletes.len()
    }
}

impl StreamListener for RecordingListener {
    fn on_update(&mut self, status: Status) {
        self.updates.push(status);
    }

    fn on_notification(&mut self, notification: serde_json::Value) {
        self.notifications.push(notification);
    }

    fn on_delete(&mut self, id: &str) {
        self.deletes.push(id.to_string());
    }
}

/// A listener that only cares about deletes; the other handlers keep their
/// default no-op bodies.
#[derive(Default)]
struct DeleteOnly {
    deletes: Vec<String>,
}

impl StreamListener for DeleteOnly {
    fn on_delete(&mut self, id: &str) {
        self.deletes.push(id.to_string());
    }
}

/// A listener whose output goes away after `capacity` deletes.
struct ClosingListener {
    capacity: usize,
    deletes: Vec<String>,
}

impl StreamListener for ClosingListener {
    fn on_delete(&mut self, id: &str) {
        self.deletes.push(id.to_string());
    }

    fn is_closed(&self) -> bool {
        self.deletes.len() >= self.capacity
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const UPDATE_PAYLOAD: &str = r#"{"id":"110","content":"<p>hello</p>","account":{"id":"1","username":"alice","acct":"alice","url":"https://mastodon.example/@alice","display_name":"Alice"}}"#;

fn frame_all(chunks: &[&[u8]]) -> Vec<Frame> {
    let mut framer = StreamFramer::new();
    let mut frames = Vec::new();
    for chunk in chunks {
        frames.extend(framer.feed(chunk));
    }
    frames.extend(framer.finish());
    frames
}

fn frame(event: &str, payload: &str) -> Frame {
    Frame {
        event: event.to_string(),
        payload: payload.to_string(),
    }
}

/// Build an in-memory body stream; each slice becomes one chunk.
fn body(
    chunks: &[&'static [u8]],
) -> impl futures_util::Stream<Item = Result<Bytes, std::io::Error>> {
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        chunks.iter().map(|&c| Ok(Bytes::from_static(c))).collect();
    tokio_stream::iter(chunks)
}

// ---------------------------------------------------------------------------
// 1. event/data pair framed into one unit
// ---------------------------------------------------------------------------

#[test]
fn event_and_data_line_yield_one_frame() {
    let frames = frame_all(&[b"event: update\ndata: {\"a\":1}\x00"]);
    assert_eq!(frames, vec![frame("update", r#"{"a":1}"#)]);
}

#[test]
fn event_name_is_trimmed_after_first_colon() {
    let frames = frame_all(&[b"event:   status.update  \ndata: {}\n"]);
    assert_eq!(frames, vec![frame("status.update", "{}")]);
}

#[test]
fn bare_data_line_without_prefix_is_a_payload() {
    let frames = frame_all(&[b"event: delete\n12345\n"]);
    assert_eq!(frames, vec![frame("delete", "12345")]);
}

#[test]
fn typical_server_output_frames_each_event() {
    let wire = b"event: update\ndata: {\"id\":1}\n\n:thump\n\nevent: delete\ndata: 42\n\n";
    let frames = frame_all(&[wire]);
    assert_eq!(frames, vec![frame("update", r#"{"id":1}"#), frame("delete", "42")]);
}

// ---------------------------------------------------------------------------
// 2. Heartbeats and empty records dropped
// ---------------------------------------------------------------------------

#[test]
fn heartbeat_only_input_yields_nothing() {
    assert!(frame_all(&[b"\x00:thump\x00"]).is_empty());
    assert!(frame_all(&[b":thump\n", b"\n\n", b":thump\r\n"]).is_empty());
}

#[test]
fn heartbeat_between_event_and_data_does_not_break_pairing() {
    let frames = frame_all(&[b"event: update\n:thump\ndata: {}\n"]);
    assert_eq!(frames, vec![frame("update", "{}")]);
}

// ---------------------------------------------------------------------------
// 3. Orphan data lines dropped
// ---------------------------------------------------------------------------

#[test]
fn data_line_without_event_yields_nothing() {
    assert!(frame_all(&[b"data: {\"a\":1}\n"]).is_empty());
}

// ---------------------------------------------------------------------------
// 4. Pending event cleared after emission
// ---------------------------------------------------------------------------

#[test]
fn second_data_line_is_not_paired_again() {
    let frames = frame_all(&[b"event: update\ndata: {\"a\":1}\ndata: {\"a\":2}\n"]);
    assert_eq!(frames, vec![frame("update", r#"{"a":1}"#)]);
}

#[test]
fn framer_state_transitions() {
    let mut framer = StreamFramer::new();
    assert_eq!(framer.pending_event(), None);

    assert_eq!(framer.push_record("event: update"), None);
    assert_eq!(framer.pending_event(), Some("update"));

    assert_eq!(framer.push_record("data: {}"), Some(frame("update", "{}")));
    assert_eq!(framer.pending_event(), None);

    assert_eq!(framer.push_record("data: {}"), None);
    assert_eq!(framer.pending_event(), None);
}

// ---------------------------------------------------------------------------
// 5. Consecutive event lines overwrite the pending name
// ---------------------------------------------------------------------------

#[test]
fn later_event_line_replaces_pending_event() {
    let frames = frame_all(&[b"event: update\nevent: delete\ndata: 7\n"]);
    assert_eq!(frames, vec![frame("delete", "7")]);
}

// ---------------------------------------------------------------------------
// 6. Records split across chunk boundaries
// ---------------------------------------------------------------------------

#[test]
fn record_split_across_chunks_is_reassembled() {
    let frames = frame_all(&[b"eve", b"nt: upd", b"ate\ndata: {\"a\"", b":1}\n"]);
    assert_eq!(frames, vec![frame("update", r#"{"a":1}"#)]);
}

#[test]
fn frame_is_emitted_as_soon_as_its_record_terminates() {
    let mut framer = StreamFramer::new();
    assert!(framer.feed(b"event: update\ndata: {}").is_empty());
    assert_eq!(framer.feed(b"\n"), vec![frame("update", "{}")]);
    assert!(framer.finish().is_empty());
}

#[test]
fn multibyte_text_split_across_chunks_survives() {
    let text = "event: update\ndata: {\"t\":\"héllo\"}\n".as_bytes();
    let (head, tail) = text.split_at(text.len() - 7);
    let frames = frame_all(&[head, tail]);
    assert_eq!(frames, vec![frame("update", r#"{"t":"héllo"}"#)]);
}

#[test]
fn invalid_utf8_record_is_dropped() {
    let frames = frame_all(&[b"event: update\n\xff\xfe\ndata: {}\n"]);
    assert_eq!(frames, vec![frame("update", "{}")]);
}

// ---------------------------------------------------------------------------
// 7. Decoding per event kind, unknown events ignored
// ---------------------------------------------------------------------------

#[test]
fn update_decodes_into_status() {
    let event = decode(&frame("update", UPDATE_PAYLOAD)).unwrap().unwrap();
    match event {
        StreamEvent::Update(status) => {
            assert_eq!(status.id, "110");
            assert_eq!(status.account.username, "alice");
        }
        other => panic!("expected update, got {other:?}"),
    }
}

#[test]
fn notification_is_forwarded_unmodified() {
    let payload = r#"{"id":"9","type":"mention","extra":{"nested":[1,2,3]}}"#;
    let event = decode(&frame("notification", payload)).unwrap().unwrap();
    let expected: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(event, StreamEvent::Notification(expected));
}

#[test]
fn delete_payload_is_the_identifier() {
    let event = decode(&frame("delete", "103270115826048975")).unwrap().unwrap();
    assert_eq!(event, StreamEvent::Delete("103270115826048975".to_string()));

    let quoted = decode(&frame("delete", "\"42\"")).unwrap().unwrap();
    assert_eq!(quoted.kind(), EventKind::Delete);
    assert_eq!(quoted, StreamEvent::Delete("42".to_string()));
}

#[test]
fn unknown_event_decodes_to_none_and_invokes_nothing() {
    assert!(decode(&frame("ping", "{}")).unwrap().is_none());

    let mut listener = RecordingListener::default();
    dispatch(&frame("ping", "{}"), &mut listener);
    dispatch(&frame("filters_changed", ""), &mut listener);
    assert_eq!(listener.total(), 0);
}

#[test]
fn dispatch_invokes_matching_handler() {
    let mut listener = RecordingListener::default();
    dispatch(&frame("update", UPDATE_PAYLOAD), &mut listener);
    dispatch(&frame("notification", r#"{"type":"follow"}"#), &mut listener);
    dispatch(&frame("delete", "5"), &mut listener);

    assert_eq!(listener.updates.len(), 1);
    assert_eq!(listener.notifications.len(), 1);
    assert_eq!(listener.deletes, vec!["5"]);
}

#[test]
fn default_handlers_are_no_ops() {
    let mut listener = DeleteOnly::default();
    dispatch(&frame("update", UPDATE_PAYLOAD), &mut listener);
    dispatch(&frame("delete", "5"), &mut listener);
    assert_eq!(listener.deletes, vec!["5"]);
}

// ---------------------------------------------------------------------------
// 8. Undecodable payloads dropped without ending the stream
// ---------------------------------------------------------------------------

#[test]
fn malformed_payloads_are_decode_errors() {
    assert!(matches!(
        decode(&frame("update", "{not json")),
        Err(DecodeError::Json { event: EventKind::Update, .. })
    ));
    assert!(matches!(
        decode(&frame("update", r#"{"id":"1"}"#)),
        Err(DecodeError::Json { .. })
    ));
    assert!(matches!(
        decode(&frame("notification", "[1,2]")),
        Err(DecodeError::NotAnObject { .. })
    ));
    assert!(matches!(
        decode(&frame("delete", "  ")),
        Err(DecodeError::Empty { .. })
    ));
}

#[tokio::test]
async fn stream_continues_after_bad_payload() {
    let input = body(&[
        b"event: update\ndata: {broken\n\n",
        b"event: notification\ndata: {\"type\":\"favourite\"}\n\n",
    ]);
    let mut listener = RecordingListener::default();
    consume(input, &mut listener).await.unwrap();
    assert!(listener.updates.is_empty());
    assert_eq!(listener.notifications.len(), 1);
}

#[tokio::test]
async fn consume_dispatches_in_wire_order() {
    let input = body(&[
        b":thump\n",
        b"event: delete\ndata: 1\n\nevent: upd",
        b"ate\ndata: ",
        b"{\"id\":\"2\",\"account\":{\"id\":\"3\",\"username\":\"bob\"}}\n\n",
        b"event: delete\ndata: 4",
    ]);
    let mut listener = RecordingListener::default();
    consume(input, &mut listener).await.unwrap();

    assert_eq!(listener.deletes, vec!["1", "4"]);
    assert_eq!(listener.updates.len(), 1);
    assert_eq!(listener.updates[0].id, "2");
}

// ---------------------------------------------------------------------------
// 9. Body errors are fatal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn body_error_ends_the_stream() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"event: delete\ndata: 1\n")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer")),
        Ok(Bytes::from_static(b"event: delete\ndata: 2\n")),
    ];
    let mut listener = RecordingListener::default();
    let err = consume(tokio_stream::iter(chunks), &mut listener)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Body(ref msg) if msg.contains("reset by peer")));
    assert_eq!(listener.deletes, vec!["1"]);
}

// ---------------------------------------------------------------------------
// 10. Oversized records dropped with bounded buffering
// ---------------------------------------------------------------------------

#[test]
fn oversized_unterminated_record_is_dropped_and_framer_resyncs() {
    let mut framer = StreamFramer::new();
    assert!(framer.feed(b"event: update
data: ").is_empty());

    let filler = vec![b'a'; MAX_RECORD_LEN / 2];
    for _ in 0..4 {
        assert!(framer.feed(&filler).is_empty());
        assert!(framer.buffered_len() <= MAX_RECORD_LEN);
    }

    // The tail of the oversized record is skipped up to its terminator.
    let mut frames = framer.feed(b"still the same record
event: delete
data: 1
");
    frames.extend(framer.finish());
    assert_eq!(frames, vec![frame("delete", "1")]);
    assert_eq!(framer.buffered_len(), 0);
}

#[test]
fn oversized_record_at_end_of_body_is_not_flushed() {
    let mut framer = StreamFramer::new();
    assert!(framer.feed(b"event: update
").is_empty());
    assert!(framer.feed(&vec![b'x'; MAX_RECORD_LEN + 1]).is_empty());
    assert!(framer.finish().is_empty());
}

#[test]
fn record_at_the_length_limit_is_still_framed() {
    let payload = "p".repeat(MAX_RECORD_LEN - DATA_PREFIX.len());
    let record = format!("{DATA_PREFIX}{payload}");
    let (head, tail) = record.as_bytes().split_at(record.len() / 2);

    let frames = frame_all(&[b"event: delete\n", head, tail, b"\n"]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload.len(), payload.len());
}

// ---------------------------------------------------------------------------
// 11. A closed listener stops the stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_listener_stops_consuming() {
    let input = body(&[
        b"event: delete\ndata: 1\nevent: delete\ndata: 2\n",
        b"event: delete\ndata: 3\n",
    ]);
    let mut listener = ClosingListener {
        capacity: 1,
        deletes: Vec::new(),
    };
    consume(input, &mut listener).await.unwrap();
    assert_eq!(listener.deletes, vec!["1"]);
}

#[test]
fn listeners_are_open_by_default() {
    assert!(!RecordingListener::default().is_closed());
}

#[test]
fn timeline_paths() {
    assert_eq!(Timeline::Home.path(), "/api/v1/streaming/user");
    assert_eq!(Timeline::Local.path(), "/api/v1/streaming/public/local");
    assert_eq!(Timeline::Public.path(), "/api/v1/streaming/public");
}

#[test]
fn timeline_url_joins_onto_host() {
    let client = StreamClient::new(
        url::Url::parse("https://mastodon.example/some/prefix/").unwrap(),
        "token",
    );
    assert_eq!(
        client.timeline_url(Timeline::Local).unwrap().as_str(),
        "https://mastodon.example/api/v1/streaming/public/local"
    );
}
