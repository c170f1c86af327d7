// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_word_list_or_empty, FilterPaths};

use super::diagnostics::DiagnosticSink;
use super::highlight::Highlighter;
use super::mute::{MuteConfig, MuteFilter};
use super::pattern::MatcherSet;

/// Which filter features the user switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub mute: bool,
    pub highlight: bool,
}

/// The filters a timeline printer runs with.
#[derive(Debug, Default)]
pub struct FilterSet {
    pub mute: Option<MuteFilter>,
    pub highlight: Option<Highlighter>,
}

impl FilterSet {
    /// Build filters from the configured word lists.
    ///
    /// A category whose file is not configured stays disabled. A configured
    /// file that cannot be read is reported and treated as empty, so
    /// streaming goes ahead without that category.
    pub fn load(
        paths: &FilterPaths,
        options: FilterOptions,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let words = |path: &Path| load_word_list_or_empty(path, sink.as_ref());

        let mute = options.mute.then(|| {
            let config = MuteConfig {
                client: paths
                    .client
                    .as_deref()
                    .map(|p| MatcherSet::compile_with(words(p), sink.clone())),
                accounts: paths
                    .account
                    .as_deref()
                    .map(|p| words(p).into_iter().collect()),
                content: paths
                    .content
                    .as_deref()
                    .map(|p| MatcherSet::compile_with(words(p), sink.clone())),
            };
            tracing::debug!(?config, "mute filter enabled");
            MuteFilter::with_sink(config, sink.clone())
        });

        let highlight = if options.highlight {
            let highlighter = paths
                .highlight
                .as_deref()
                .map(|p| Highlighter::compile_with(words(p), sink.clone()));
            if highlighter.is_none() {
                tracing::warn!("highlighting requested but no highlight word list is configured");
            }
            highlighter
        } else {
            None
        };

        Self { mute, highlight }
    }
}
