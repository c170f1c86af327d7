// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Stream types
//
// Wire constants, framed units, decoded events, timelines and errors for the
// Mastodon streaming API.

use std::fmt;

use crate::status::Status;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Separates records inside a line of the response body.
pub const RECORD_SEPARATOR: u8 = 0x00;

/// Separates lines of the response body.
pub const LINE_SEPARATOR: u8 = b'\n';

/// Keep-alive record the server sends on idle connections.
pub const HEARTBEAT: &[u8] = b":thump";

/// Names the event carried by the next data line.
pub const EVENT_PREFIX: &str = "event:";

/// Optional prefix of a data line.
pub const DATA_PREFIX: &str = "data: ";

/// Longest record the framer buffers. A longer record is dropped and the
/// framer resynchronizes at the next terminator.
pub const MAX_RECORD_LEN: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Framed unit
// ---------------------------------------------------------------------------

/// One `event:` line paired with the data line that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub event: String,
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Event names the client handles. Anything else on the wire is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Update,
    Notification,
    Delete,
}

impl EventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "update" => Some(EventKind::Update),
            "notification" => Some(EventKind::Notification),
            "delete" => Some(EventKind::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Update => "update",
            EventKind::Notification => "notification",
            EventKind::Delete => "delete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A new status on the timeline.
    Update(Box<Status>),
    /// A notification, forwarded as the server sent it.
    Notification(serde_json::Value),
    /// The id of a deleted status.
    Delete(String),
}

impl StreamEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StreamEvent::Update(_) => EventKind::Update,
            StreamEvent::Notification(_) => EventKind::Notification,
            StreamEvent::Delete(_) => EventKind::Delete,
        }
    }
}

// ---------------------------------------------------------------------------
// Timelines
// ---------------------------------------------------------------------------

/// The streaming endpoints the client can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Timeline {
    /// The authenticated user's home timeline and notifications.
    Home,
    /// Public posts from the local instance only.
    Local,
    /// All public posts known to the instance.
    Public,
}

impl Timeline {
    /// Path of the streaming endpoint, relative to the server root.
    pub fn path(&self) -> &'static str {
        match self {
            Timeline::Home => "/api/v1/streaming/user",
            Timeline::Local => "/api/v1/streaming/public/local",
            Timeline::Public => "/api/v1/streaming/public",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Timeline::Home => "home",
            Timeline::Local => "local",
            Timeline::Public => "public",
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal stream failures. Any of these ends the stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("invalid streaming URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("streaming request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("stream body failed: {0}")]
    Body(String),
}

/// A framed payload that does not decode as its event requires.
/// Never fatal: the frame is dropped and the stream continues.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed {event} payload: {source}")]
    Json {
        event: EventKind,
        source: serde_json::Error,
    },

    #[error("{event} payload is not a JSON object")]
    NotAnObject { event: EventKind },

    #[error("empty {event} payload")]
    Empty { event: EventKind },
}
