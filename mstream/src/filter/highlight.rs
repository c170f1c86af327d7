// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::sync::Arc;

use regex::Captures;

use super::diagnostics::DiagnosticSink;
use super::pattern::MatcherSet;

/// Opens an emphasized span. A private-use code point; the renderer turns it
/// into terminal styling. Status text can carry it too, so the renderer runs
/// [`strip_emphasis`] over incoming text before highlighting.
pub const EMPHASIS_OPEN: char = '\u{E000}';
/// Closes an emphasized span opened by [`EMPHASIS_OPEN`].
pub const EMPHASIS_CLOSE: char = '\u{E001}';

/// Remove any emphasis markers already present in `text`.
pub fn strip_emphasis(text: &str) -> Cow<'_, str> {
    if text.contains([EMPHASIS_OPEN, EMPHASIS_CLOSE]) {
        Cow::Owned(
            text.chars()
                .filter(|&c| c != EMPHASIS_OPEN && c != EMPHASIS_CLOSE)
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Wraps every match of a matcher set in emphasis markers.
///
/// Patterns are applied one after another in set order, each one running on
/// the output of the previous. When two patterns overlap, the result depends
/// on that order, and a later pattern can split or nest inside an earlier
/// pattern's markers. This is a known limitation; the renderer tolerates
/// nested and unbalanced markers.
#[derive(Debug, Clone)]
pub struct Highlighter {
    matcher: MatcherSet,
}

impl Highlighter {
    pub fn new(matcher: MatcherSet) -> Self {
        Self { matcher }
    }

    pub fn compile<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(MatcherSet::compile(words))
    }

    pub fn compile_with<I, S>(words: I, sink: Arc<dyn DiagnosticSink>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(MatcherSet::compile_with(words, sink))
    }

    pub fn matcher(&self) -> &MatcherSet {
        &self.matcher
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Return `text` with every non-empty match wrapped in emphasis markers.
    /// Text without any match comes back unchanged.
    pub fn apply(&self, text: &str) -> String {
        let mut out = Cow::Borrowed(text);
        for pattern in self.matcher.patterns() {
            let replaced = pattern.regex.replace_all(&out, |caps: &Captures<'_>| {
                let hit = &caps[0];
                if hit.is_empty() {
                    String::new()
                } else {
                    format!("{EMPHASIS_OPEN}{hit}{EMPHASIS_CLOSE}")
                }
            });
            if let Cow::Owned(replaced) = replaced {
                out = Cow::Owned(replaced);
            }
        }
        out.into_owned()
    }
}
