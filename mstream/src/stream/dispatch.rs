// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Stream dispatcher
//
// Decodes framed payloads by event kind and hands them to a listener.
// Handlers run synchronously on the reading task.

use super::types::{DecodeError, EventKind, Frame, StreamEvent};
use crate::status::Status;

/// Receives decoded stream events. Every handler defaults to a no-op, so
/// listeners implement only what they care about.
pub trait StreamListener {
    fn on_update(&mut self, _status: Status) {}

    fn on_notification(&mut self, _notification: serde_json::Value) {}

    fn on_delete(&mut self, _id: &str) {}

    /// True once the listener cannot take more events, e.g. its output was
    /// closed. The stream stops at the next frame boundary.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Decode a frame. Unknown event names decode to `Ok(None)`.
pub fn decode(frame: &Frame) -> Result<Option<StreamEvent>, DecodeError> {
    let Some(kind) = EventKind::from_name(&frame.event) else {
        return Ok(None);
    };

    let event = match kind {
        EventKind::Update => {
            let status: Status = serde_json::from_str(&frame.payload)
                .map_err(|source| DecodeError::Json { event: kind, source })?;
            StreamEvent::Update(Box::new(status))
        }
        EventKind::Notification => {
            let value: serde_json::Value = serde_json::from_str(&frame.payload)
                .map_err(|source| DecodeError::Json { event: kind, source })?;
            if !value.is_object() {
                return Err(DecodeError::NotAnObject { event: kind });
            }
            StreamEvent::Notification(value)
        }
        EventKind::Delete => {
            let id = delete_id(&frame.payload);
            if id.is_empty() {
                return Err(DecodeError::Empty { event: kind });
            }
            StreamEvent::Delete(id.to_string())
        }
    };

    Ok(Some(event))
}

/// Invoke the listener handler for `event`.
pub fn deliver<L>(event: StreamEvent, listener: &mut L)
where
    L: StreamListener + ?Sized,
{
    match event {
        StreamEvent::Update(status) => listener.on_update(*status),
        StreamEvent::Notification(notification) => listener.on_notification(notification),
        StreamEvent::Delete(id) => listener.on_delete(&id),
    }
}

/// Decode `frame` and deliver it. Unknown events and undecodable payloads
/// are logged at debug level and dropped.
pub fn dispatch<L>(frame: &Frame, listener: &mut L)
where
    L: StreamListener + ?Sized,
{
    match decode(frame) {
        Ok(Some(event)) => deliver(event, listener),
        Ok(None) => tracing::debug!(event = %frame.event, "unhandled stream event ignored"),
        Err(e) => tracing::debug!(error = %e, "stream payload dropped"),
    }
}

/// The delete payload is the bare status id; some servers send it as a JSON
/// string, so one pair of surrounding quotes is removed.
fn delete_id(payload: &str) -> &str {
    let id = payload.trim();
    id.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(id)
}
