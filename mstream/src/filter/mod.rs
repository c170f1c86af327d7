// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Mute and highlight engine.
//
// Word lists are compiled once at startup into immutable matcher sets. The
// mute filter decides whether a status is shown at all; the highlighter
// marks matched words in statuses that are shown.

mod diagnostics;
mod highlight;
mod load;
mod mute;
mod pattern;

pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use highlight::{strip_emphasis, Highlighter, EMPHASIS_CLOSE, EMPHASIS_OPEN};
pub use load::{FilterOptions, FilterSet};
pub use mute::{MuteConfig, MuteFilter, MuteReason};
pub use pattern::{CompiledPattern, MatcherSet};

#[cfg(test)]
pub(crate) use diagnostics::testing::RecordingSink;
