// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// HTML to terminal text
//
// Status bodies arrive as a small HTML subset: paragraphs, line breaks,
// links and mention spans. Tags are dropped, `<br>` becomes a newline and
// each paragraph after the first is separated by a blank line. Entities are
// decoded once the markup is gone, so escaped angle brackets survive as
// text.

/// Longest entity name looked at between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Convert a status body to plain text.
pub fn html_to_text(html: &str) -> String {
    let chars: Vec<char> = html.chars().collect();
    let len = chars.len();
    let mut text = String::with_capacity(html.len());
    let mut i = 0;

    while i < len {
        if chars[i] == '<' && starts_tag(&chars, i) {
            let (closing, name) = tag_name(&chars, i);
            match (closing, name.as_str()) {
                (false, "br") => text.push('\n'),
                (false, "p") if !text.is_empty() => text.push_str("\n\n"),
                _ => {}
            }
            i = skip_tag(&chars, i);
        } else {
            text.push(chars[i]);
            i += 1;
        }
    }

    decode_entities(&text)
}

// ---------------------------------------------------------------------------
// Internal: tag scanning
// ---------------------------------------------------------------------------

/// A `<` only opens a tag when followed by a name, `/` or `!`.
fn starts_tag(chars: &[char], start: usize) -> bool {
    chars
        .get(start + 1)
        .is_some_and(|&c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// Lowercase name of the tag at `start` and whether it is a closing tag.
fn tag_name(chars: &[char], start: usize) -> (bool, String) {
    let mut j = start + 1;
    let closing = chars.get(j) == Some(&'/');
    if closing {
        j += 1;
    }

    let name = chars[j.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (closing, name)
}

/// Index just past the `>` that ends the tag at `start`. A `>` inside a
/// quoted attribute value does not end the tag.
fn skip_tag(chars: &[char], start: usize) -> usize {
    let mut quote: Option<char> = None;
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return i + 1,
            None => {}
        }
        i += 1;
    }

    // Unterminated tag: drop the rest.
    chars.len()
}

// ---------------------------------------------------------------------------
// Internal: entities
// ---------------------------------------------------------------------------

/// Decode named and numeric character references. Anything that does not
/// decode is left as written.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
