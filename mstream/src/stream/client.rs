// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Streaming HTTP client
//
// Opens a long-lived GET against a timeline endpoint and pumps the body
// through the framer and dispatcher until the server closes it. There is
// no reconnect: a transport failure or a non-success status ends the run.

use std::fmt;

use bytes::Bytes;
use futures_util::stream::{Stream, StreamExt};
use url::Url;

use super::dispatch::{dispatch, StreamListener};
use super::framer::StreamFramer;
use super::types::{Frame, StreamError, Timeline};

pub struct StreamClient {
    http: reqwest::Client,
    host: Url,
    bearer_token: String,
}

impl StreamClient {
    pub fn new(host: Url, bearer_token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), host, bearer_token)
    }

    pub fn with_client(http: reqwest::Client, host: Url, bearer_token: impl Into<String>) -> Self {
        Self {
            http,
            host,
            bearer_token: bearer_token.into(),
        }
    }

    /// Full URL of a timeline's streaming endpoint on this server.
    pub fn timeline_url(&self, timeline: Timeline) -> Result<Url, StreamError> {
        Ok(self.host.join(timeline.path())?)
    }

    /// Open the stream for `timeline` and return its body.
    ///
    /// Fails before any body is read if the request cannot be sent or the
    /// server answers with a non-success status.
    pub async fn open(
        &self,
        timeline: Timeline,
    ) -> Result<impl Stream<Item = reqwest::Result<Bytes>>, StreamError> {
        let url = self.timeline_url(timeline)?;

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|source| StreamError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::info!(%timeline, %url, "stream opened");
        Ok(response.bytes_stream())
    }

    /// Stream `timeline` into `listener` until the server closes the
    /// connection or the transport fails.
    pub async fn run<L>(&self, timeline: Timeline, listener: &mut L) -> Result<(), StreamError>
    where
        L: StreamListener + ?Sized,
    {
        let body = self.open(timeline).await?;
        consume(body, listener).await
    }
}

impl fmt::Debug for StreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamClient")
            .field("host", &self.host.as_str())
            .finish_non_exhaustive()
    }
}

/// Frame and dispatch every chunk of `body`.
///
/// Returns `Ok(())` when the body ends or the listener reports it is
/// closed, and `StreamError::Body` on the first chunk error. Frames are
/// dispatched in order, before the next chunk is awaited.
pub async fn consume<S, E, L>(body: S, listener: &mut L) -> Result<(), StreamError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: fmt::Display,
    L: StreamListener + ?Sized,
{
    let mut body = std::pin::pin!(body);
    let mut framer = StreamFramer::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| StreamError::Body(e.to_string()))?;
        if !dispatch_all(framer.feed(&chunk), listener) {
            tracing::info!("listener closed, stopping stream");
            return Ok(());
        }
    }
    if !dispatch_all(framer.finish(), listener) {
        tracing::info!("listener closed, stopping stream");
        return Ok(());
    }

    tracing::info!("stream closed by server");
    Ok(())
}

/// Dispatch `frames` in order. Returns false once the listener is closed.
fn dispatch_all<L>(frames: Vec<Frame>, listener: &mut L) -> bool
where
    L: StreamListener + ?Sized,
{
    for frame in frames {
        if listener.is_closed() {
            return false;
        }
        dispatch(&frame, listener);
    }
    !listener.is_closed()
}
