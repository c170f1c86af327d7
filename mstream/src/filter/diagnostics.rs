// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Diagnostic events raised by the filter engine.
//
// Matchers, the mute decision and word-list loading never log directly.
// They report to an injected `DiagnosticSink`; the binary wires in
// `TracingSink`, tests wire in a recording sink.

use std::path::PathBuf;

use super::mute::MuteReason;

/// Something noteworthy happened while compiling or evaluating filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A pattern failed to compile and was left out of its matcher set.
    InvalidPattern { pattern: String, reason: String },
    /// A pattern matched the given text.
    PatternMatched { pattern: String, text: String },
    /// A status was muted. `subject` is the client or account that matched,
    /// when the check was on one of those.
    Muted {
        reason: MuteReason,
        subject: Option<String>,
    },
    /// A filter word list could not be read; its category is disabled.
    WordListUnavailable { path: PathBuf, reason: String },
}

/// Receives diagnostics from filter components.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
///
/// Compile failures and unreadable word lists are warnings; match and mute
/// events are debug output (visible with `--verbose`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::InvalidPattern { pattern, reason } => {
                tracing::warn!(%pattern, %reason, "invalid pattern skipped");
            }
            Diagnostic::PatternMatched { pattern, text } => {
                tracing::debug!(%pattern, %text, "pattern matched");
            }
            Diagnostic::Muted { reason, subject } => match subject {
                Some(subject) => tracing::debug!(%reason, %subject, "muted"),
                None => tracing::debug!(%reason, "muted"),
            },
            Diagnostic::WordListUnavailable { path, reason } => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "word list unavailable, filter category disabled"
                );
            }
        }
    }
}
