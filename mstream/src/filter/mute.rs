// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::pattern::MatcherSet;

/// Which check decided that a status is muted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuteReason {
    Client,
    Account,
    Content,
    ContentWarning,
}

impl fmt::Display for MuteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MuteReason::Client => "client",
            MuteReason::Account => "account",
            MuteReason::Content => "content",
            MuteReason::ContentWarning => "content warning",
        })
    }
}

/// Mute criteria per category. `None` disables a category.
#[derive(Debug, Clone, Default)]
pub struct MuteConfig {
    /// Patterns tested against the posting application's name.
    pub client: Option<MatcherSet>,
    /// Exact `username@host` identities.
    pub accounts: Option<HashSet<String>>,
    /// Patterns tested against the body and the content warning.
    pub content: Option<MatcherSet>,
}

impl MuteConfig {
    pub fn with_client(mut self, matcher: MatcherSet) -> Self {
        self.client = Some(matcher);
        self
    }

    pub fn with_accounts<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accounts = Some(accounts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_content(mut self, matcher: MatcherSet) -> Self {
        self.content = Some(matcher);
        self
    }
}

/// Ordered mute decision over a [`MuteConfig`].
///
/// Checks run client → account → content → content warning and stop at the
/// first hit.
pub struct MuteFilter {
    config: MuteConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl MuteFilter {
    pub fn new(config: MuteConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    pub fn with_sink(config: MuteConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &MuteConfig {
        &self.config
    }

    /// Return the first check that mutes this status, if any.
    pub fn evaluate(
        &self,
        application: &str,
        account: &str,
        content: &str,
        content_warning: Option<&str>,
    ) -> Option<MuteReason> {
        let verdict = self.first_hit(application, account, content, content_warning);
        if let Some(reason) = verdict {
            let subject = match reason {
                MuteReason::Client => Some(application.to_string()),
                MuteReason::Account => Some(account.to_string()),
                MuteReason::Content | MuteReason::ContentWarning => None,
            };
            self.sink.emit(Diagnostic::Muted { reason, subject });
        }
        verdict
    }

    pub fn should_mute(
        &self,
        application: &str,
        account: &str,
        content: &str,
        content_warning: Option<&str>,
    ) -> bool {
        self.evaluate(application, account, content, content_warning)
            .is_some()
    }

    fn first_hit(
        &self,
        application: &str,
        account: &str,
        content: &str,
        content_warning: Option<&str>,
    ) -> Option<MuteReason> {
        if let Some(client) = &self.config.client {
            if client.is_match(application) {
                return Some(MuteReason::Client);
            }
        }
        if let Some(accounts) = &self.config.accounts {
            if accounts.contains(account) {
                return Some(MuteReason::Account);
            }
        }
        if let Some(matcher) = &self.config.content {
            if matcher.is_match(content) {
                return Some(MuteReason::Content);
            }
            if let Some(warning) = content_warning {
                if matcher.is_match(warning) {
                    return Some(MuteReason::ContentWarning);
                }
            }
        }
        None
    }
}

impl fmt::Debug for MuteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MuteFilter")
            .field("config", &self.config)
            .finish()
    }
}
