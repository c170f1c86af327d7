// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Mastodon entities carried by `update` events.
//
// Only the fields the client reads are modelled. Unknown fields are ignored
// and most fields default when absent, since servers differ in what they
// send and newer servers keep adding fields.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single post ("toot").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    pub account: Account,
    /// HTML body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub sensitive: bool,
    /// Content warning; empty when the post has none.
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub media_attachments: Vec<Attachment>,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub reblogs_count: i64,
    #[serde(default)]
    pub favourites_count: i64,
    #[serde(default)]
    pub replies_count: i64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
}

impl Status {
    /// Name of the posting application, or `""` when the server does not
    /// disclose it.
    pub fn application_name(&self) -> &str {
        self.application
            .as_ref()
            .map(|app| app.name.as_str())
            .unwrap_or_default()
    }

    /// The content warning, if the post has a non-empty one.
    pub fn content_warning(&self) -> Option<&str> {
        Some(self.spoiler_text.as_str()).filter(|cw| !cw.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub username: String,
    /// `username` for local accounts, `username@domain` for remote ones.
    #[serde(default)]
    pub acct: String,
    /// Profile page URL.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bot: Option<bool>,
    #[serde(default)]
    pub statuses_count: i64,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
}

impl Account {
    /// `username@host`, with the host taken from the profile URL.
    ///
    /// This is the identity matched against the account mute list. Falls
    /// back to `acct` when the profile URL has no host.
    pub fn qualified_name(&self) -> String {
        let host = Url::parse(&self.url).ok().and_then(|url| {
            url.host_str().map(|host| match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        });
        match host {
            Some(host) => format!("{}@{}", self.username, host),
            None => self.acct.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentType,
    pub url: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub text_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Gifv,
    Video,
    Audio,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}
