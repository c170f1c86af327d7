// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Mastodon streaming API reader
//
// Responsibilities:
// - Open an authenticated streaming GET for a timeline
// - Cut the body into records, dropping empty records and `:thump` heartbeats
// - Pair each `event:` line with the data line that follows it
// - Decode `update` / `notification` / `delete` payloads and call the listener
// - Ignore unknown events and undecodable payloads without ending the stream

mod client;
mod dispatch;
mod framer;
mod types;

pub use client::{consume, StreamClient};
pub use dispatch::{decode, deliver, dispatch, StreamListener};
pub use framer::StreamFramer;
pub use types::{
    DecodeError, EventKind, Frame, StreamError, StreamEvent, Timeline, DATA_PREFIX, EVENT_PREFIX,
    HEARTBEAT, LINE_SEPARATOR, MAX_RECORD_LEN, RECORD_SEPARATOR,
};

#[cfg(test)]
mod tests;
