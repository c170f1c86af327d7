// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::PathBuf;

use url::Url;

/// Top-level parsed and validated mstream config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config format version. Always "v1".
    pub version: String,
    pub network: NetworkConfig,
    pub auth: AuthConfig,
    pub filters: FilterPaths,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Base URL of the Mastodon server, e.g. `https://mastodon.social`.
    pub host: Url,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// OAuth access token sent as `Authorization: Bearer ...`.
    pub bearer_token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// Word-list files per filter category, already joined onto the filter
/// directory. `None` means the category has no list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPaths {
    pub content: Option<PathBuf>,
    pub account: Option<PathBuf>,
    pub client: Option<PathBuf>,
    pub highlight: Option<PathBuf>,
}
