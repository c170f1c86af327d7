// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Stream framer
//
// Turns response body chunks into (event, payload) frames. Chunks are cut
// into records at newlines and NUL bytes; empty records and heartbeats are
// dropped before decoding. An `event:` record sets the pending event name,
// and the next data record is paired with it.

use super::types::{
    Frame, DATA_PREFIX, EVENT_PREFIX, HEARTBEAT, LINE_SEPARATOR, MAX_RECORD_LEN, RECORD_SEPARATOR,
};

/// Incremental framer for one stream.
///
/// State between chunks is the pending event name and the bytes of a record
/// that has not been terminated yet, capped at [`MAX_RECORD_LEN`].
#[derive(Debug, Default)]
pub struct StreamFramer {
    /// Bytes after the last terminator seen so far.
    partial: Vec<u8>,
    /// Set after an oversized record was dropped; bytes are skipped until
    /// the next terminator.
    discarding: bool,
    /// Name from the last `event:` record, waiting for its data record.
    pending_event: Option<String>,
}

impl StreamFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The event name waiting for a data line, if any.
    pub fn pending_event(&self) -> Option<&str> {
        self.pending_event.as_deref()
    }

    /// Bytes of the unterminated record currently held.
    pub fn buffered_len(&self) -> usize {
        self.partial.len()
    }

    /// Feed one body chunk and return the frames it completes.
    ///
    /// Only `chunk` is scanned for terminators; the carried partial record
    /// is never rescanned.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| is_terminator(b)) {
            self.complete(&rest[..pos], &mut frames);
            rest = &rest[pos + 1..];
        }

        if self.discarding {
            return frames;
        }
        if self.partial.len() + rest.len() > MAX_RECORD_LEN {
            tracing::debug!(
                len = self.partial.len() + rest.len(),
                "oversized record dropped, skipping to next terminator"
            );
            self.partial.clear();
            self.discarding = true;
        } else {
            self.partial.extend_from_slice(rest);
        }

        frames
    }

    /// Flush an unterminated trailing record once the body has ended.
    pub fn finish(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if std::mem::take(&mut self.discarding) {
            return frames;
        }
        let partial = std::mem::take(&mut self.partial);
        self.push_raw(&partial, &mut frames);
        frames
    }

    /// Handle a terminator: `head` is the part of the record in the current
    /// chunk, joined onto any carried partial record.
    fn complete(&mut self, head: &[u8], frames: &mut Vec<Frame>) {
        if std::mem::take(&mut self.discarding) {
            return;
        }
        if self.partial.is_empty() {
            self.push_raw(head, frames);
            return;
        }

        let mut record = std::mem::take(&mut self.partial);
        if record.len() + head.len() > MAX_RECORD_LEN {
            tracing::debug!(len = record.len() + head.len(), "oversized record dropped");
        } else {
            record.extend_from_slice(head);
            self.push_raw(&record, frames);
        }
        record.clear();
        self.partial = record;
    }

    /// Process one decoded record.
    ///
    /// Returns a frame when `record` is a data line and an event name is
    /// pending. An `event:` record replaces any pending name; a data line
    /// with no pending name is dropped.
    pub fn push_record(&mut self, record: &str) -> Option<Frame> {
        if let Some(name) = record.strip_prefix(EVENT_PREFIX) {
            if let Some(previous) = self.pending_event.replace(name.trim().to_string()) {
                tracing::debug!(dropped = %previous, "event line without data replaced");
            }
            return None;
        }

        let payload = record.strip_prefix(DATA_PREFIX).unwrap_or(record);
        match self.pending_event.take() {
            Some(event) => Some(Frame {
                event,
                payload: payload.to_string(),
            }),
            None => {
                tracing::debug!(line = %record, "data line without event dropped");
                None
            }
        }
    }

    fn push_raw(&mut self, record: &[u8], frames: &mut Vec<Frame>) {
        let record = record.strip_suffix(b"\r").unwrap_or(record);
        if record.is_empty() || record == HEARTBEAT {
            return;
        }
        match std::str::from_utf8(record) {
            Ok(text) => frames.extend(self.push_record(text)),
            Err(e) => tracing::debug!(error = %e, len = record.len(), "non-UTF-8 record dropped"),
        }
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == LINE_SEPARATOR || byte == RECORD_SEPARATOR
}
