// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Filter word lists: plain text, one pattern or account per line.
//
// Lines starting with `#` are comments, blank lines are skipped, and
// surrounding whitespace is trimmed from every entry.

use std::path::Path;

use crate::filter::{Diagnostic, DiagnosticSink};

use super::error::ConfigError;
use super::source::{ConfigSource, FileSource};

/// Parse word-list text into its entries, in file order.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_word_list(source: &dyn ConfigSource) -> Result<Vec<String>, ConfigError> {
    Ok(parse_word_list(&source.load()?))
}

/// Read the word list at `path`. A missing or unreadable file is reported
/// to `sink` and yields an empty list.
pub fn load_word_list_or_empty(path: &Path, sink: &dyn DiagnosticSink) -> Vec<String> {
    let source = FileSource {
        path: path.to_path_buf(),
    };
    match load_word_list(&source) {
        Ok(words) => {
            tracing::debug!(path = %path.display(), entries = words.len(), "word list loaded");
            words
        }
        Err(e) => {
            sink.emit(Diagnostic::WordListUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            Vec::new()
        }
    }
}
