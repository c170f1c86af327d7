// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Terminal output for a timeline
//
// `TimelinePrinter` is the stream listener the binary runs with. For each
// status it converts the HTML body to text, asks the mute filter whether to
// show it, applies highlighting and writes a formatted block. Highlight
// markers are turned into terminal colors here and nowhere else.

mod html;

pub use html::html_to_text;

use std::io::{self, Write};

use colored::Colorize;

use crate::filter::{
    strip_emphasis, FilterSet, Highlighter, MuteFilter, EMPHASIS_CLOSE, EMPHASIS_OPEN,
};
use crate::status::Status;
use crate::stream::StreamListener;

/// Separator width when the terminal size is unknown.
pub const DEFAULT_WIDTH: usize = 80;

const NSFW_BANNER: &str = "****** NSFW ******";

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

/// Whether output carries ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Ansi,
    Plain,
}

#[derive(Debug, Clone, Copy)]
enum Role {
    DisplayName,
    ContentWarning,
    Highlight,
    Separator,
}

impl Style {
    fn paint(self, role: Role, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Ansi => match role {
                Role::DisplayName => text.bright_cyan().to_string(),
                Role::ContentWarning => text.magenta().to_string(),
                Role::Highlight => text.bright_red().to_string(),
                Role::Separator => text.dimmed().to_string(),
            },
        }
    }

    /// Replace emphasis markers with highlight styling.
    ///
    /// Text outside any marked span gets `base` styling, if any. Nested
    /// spans count as one and unbalanced markers are dropped.
    fn emphasize(self, text: &str, base: Option<Role>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut segment = String::new();
        let mut depth = 0usize;

        for c in text.chars() {
            match c {
                EMPHASIS_OPEN | EMPHASIS_CLOSE => {
                    self.flush(&mut out, &mut segment, depth, base);
                    if c == EMPHASIS_OPEN {
                        depth += 1;
                    } else {
                        depth = depth.saturating_sub(1);
                    }
                }
                _ => segment.push(c),
            }
        }
        self.flush(&mut out, &mut segment, depth, base);

        out
    }

    fn flush(self, out: &mut String, segment: &mut String, depth: usize, base: Option<Role>) {
        if segment.is_empty() {
            return;
        }
        let role = if depth > 0 { Some(Role::Highlight) } else { base };
        match role {
            Some(role) => out.push_str(&self.paint(role, segment)),
            None => out.push_str(segment),
        }
        segment.clear();
    }
}

// ---------------------------------------------------------------------------
// Printer
// ---------------------------------------------------------------------------

/// Writes accepted statuses to `out`.
pub struct TimelinePrinter<W: Write> {
    out: W,
    mute: Option<MuteFilter>,
    highlight: Option<Highlighter>,
    style: Style,
    width: usize,
    closed: bool,
}

impl<W: Write> TimelinePrinter<W> {
    /// A printer with no filters. The separator spans the terminal when its
    /// width can be read.
    pub fn new(out: W, style: Style) -> Self {
        let width = crossterm::terminal::size()
            .map(|(columns, _)| usize::from(columns))
            .ok()
            .filter(|&columns| columns > 0)
            .unwrap_or(DEFAULT_WIDTH);

        Self {
            out,
            mute: None,
            highlight: None,
            style,
            width,
            closed: false,
        }
    }

    pub fn with_filters(self, filters: FilterSet) -> Self {
        Self {
            mute: filters.mute,
            highlight: filters.highlight,
            ..self
        }
    }

    pub fn with_mute(mut self, mute: MuteFilter) -> Self {
        self.mute = Some(mute);
        self
    }

    pub fn with_highlight(mut self, highlight: Highlighter) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format `status`, or return `None` when it is muted.
    pub fn render_status(&self, status: &Status) -> Option<String> {
        let account = &status.account;
        let qualified = account.qualified_name();
        let application = status.application_name();
        let content = strip_emphasis(&html_to_text(&status.content)).into_owned();
        let warning = status.content_warning().map(strip_emphasis);

        if let Some(mute) = &self.mute {
            if mute
                .evaluate(application, &qualified, &content, warning.as_deref())
                .is_some()
            {
                return None;
            }
        }

        let (content, warning) = match &self.highlight {
            Some(highlight) => (
                highlight.apply(&content),
                warning.map(|cw| highlight.apply(&cw)),
            ),
            None => (content, warning.map(|cw| cw.into_owned())),
        };

        let display = if account.display_name.is_empty() {
            account.username.as_str()
        } else {
            account.display_name.as_str()
        };

        let mut lines = Vec::new();
        lines.push(format!(
            "{} ({})",
            self.style.paint(Role::DisplayName, display),
            qualified
        ));
        if status.sensitive {
            lines.push(NSFW_BANNER.to_string());
        }
        if let Some(warning) = &warning {
            lines.push(format!(
                "#### {} ####",
                self.style.emphasize(warning, Some(Role::ContentWarning))
            ));
        }
        lines.push(self.style.emphasize(&content, None));
        lines.push(format!(
            "{} / {} / {}",
            account.statuses_count, account.following_count, account.followers_count
        ));
        lines.push(format!("via {application}"));
        for media in &status.media_attachments {
            lines.push(format!("media: {}", media.url));
        }
        lines.push(self.style.paint(Role::Separator, &"=".repeat(self.width)));

        let mut block = lines.join("\n");
        block.push('\n');
        Some(block)
    }

    /// Write a block. A closed pipe marks the printer closed instead of
    /// being reported.
    fn write_block(&mut self, block: &str) -> io::Result<()> {
        let result = self
            .out
            .write_all(block.as_bytes())
            .and_then(|()| self.out.flush());
        match result {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("output closed");
                self.closed = true;
                Ok(())
            }
            other => other,
        }
    }
}

impl<W: Write> StreamListener for TimelinePrinter<W> {
    fn on_update(&mut self, status: Status) {
        if self.closed {
            return;
        }
        let Some(block) = self.render_status(&status) else {
            return;
        };
        if let Err(e) = self.write_block(&block) {
            tracing::warn!(error = %e, id = %status.id, "failed to write status");
        }
    }

    fn on_notification(&mut self, notification: serde_json::Value) {
        if self.closed {
            return;
        }
        let text = match serde_json::to_string_pretty(&notification) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "failed to format notification");
                return;
            }
        };
        if let Err(e) = self.write_block(&format!("{text}\n")) {
            tracing::warn!(error = %e, "failed to write notification");
        }
    }

    fn on_delete(&mut self, id: &str) {
        tracing::debug!(id, "status deleted");
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
