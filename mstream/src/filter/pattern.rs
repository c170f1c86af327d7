// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};

/// A pre-compiled regex pattern. Wraps `regex::Regex` with the source
/// pattern string preserved for debugging/display.
#[derive(Clone)]
pub struct CompiledPattern {
    pub pattern: String,
    pub regex: Regex,
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Unanchored search: true if the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("pattern", &self.pattern)
            .finish()
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// An immutable, ordered set of compiled patterns.
///
/// Each pattern compiles on its own; a malformed one is reported to the
/// diagnostic sink and dropped while the rest of the set is still built.
/// An empty set never matches.
#[derive(Clone)]
pub struct MatcherSet {
    patterns: Vec<CompiledPattern>,
    sink: Arc<dyn DiagnosticSink>,
}

impl MatcherSet {
    /// Compile `patterns`, reporting failures through `tracing`.
    pub fn compile<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compile_with(patterns, Arc::new(TracingSink))
    }

    /// Compile `patterns`, reporting failures and matches to `sink`.
    pub fn compile_with<I, S>(patterns: I, sink: Arc<dyn DiagnosticSink>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| match CompiledPattern::compile(p.as_ref()) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    sink.emit(Diagnostic::InvalidPattern {
                        pattern: p.as_ref().to_string(),
                        reason: e.to_string(),
                    });
                    None
                }
            })
            .collect();
        Self { patterns, sink }
    }

    /// A set built from a single pattern.
    pub fn single(pattern: &str) -> Self {
        Self::compile([pattern])
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self.patterns.iter().find(|p| p.is_match(text)) {
            Some(hit) => {
                self.sink.emit(Diagnostic::PatternMatched {
                    pattern: hit.pattern.clone(),
                    text: text.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// The patterns that compiled, in input order.
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl From<&str> for MatcherSet {
    fn from(pattern: &str) -> Self {
        Self::single(pattern)
    }
}

impl fmt::Debug for MatcherSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.patterns.iter().map(|p| &p.pattern))
            .finish()
    }
}
