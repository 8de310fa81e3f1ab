//! Parser/serializer for the GRUB defaults file
//!
//! `serialize(parse(bytes)) == bytes` for every valid UTF-8 input. Lines
//! that do not look like `KEY=VALUE` are kept verbatim as passthrough
//! entries, so comments, blank lines and shell we do not understand survive
//! an edit untouched.
//!
//! Lookup and mutation (`get`, `set`, `unset`) live on [`ConfigModel`].

use crate::domain::entities::{is_valid_key, Assignment, ConfigEntry, ConfigModel, QuoteStyle};
use crate::error::{GrubwizError, GrubwizResult};

/// Parse file bytes into a model.
///
/// Fails only on bytes that are not UTF-8.
pub fn parse(bytes: &[u8]) -> GrubwizResult<ConfigModel> {
    let text = std::str::from_utf8(bytes).map_err(|e| GrubwizError::Parse {
        offset: e.valid_up_to(),
        message: e.to_string(),
    })?;
    Ok(parse_str(text))
}

/// Parse text into a model
pub fn parse_str(text: &str) -> ConfigModel {
    if text.is_empty() {
        return ConfigModel::new();
    }
    let final_newline = text.ends_with('\n');
    let body = text.strip_suffix('\n').unwrap_or(text);
    let entries = body.split('\n').map(parse_line).collect();
    ConfigModel::from_parts(entries, final_newline)
}

/// Render a model back to file bytes
pub fn serialize(model: &ConfigModel) -> Vec<u8> {
    to_text(model).into_bytes()
}

/// Render a model back to text
pub fn to_text(model: &ConfigModel) -> String {
    let mut out = String::new();
    for (i, entry) in model.entries().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&entry.render());
    }
    if model.final_newline() && !model.is_empty() {
        out.push('\n');
    }
    out
}

fn parse_line(line: &str) -> ConfigEntry {
    match parse_assignment(line) {
        Some(assignment) => ConfigEntry::Assignment(assignment),
        None => ConfigEntry::Passthrough {
            raw: line.to_string(),
        },
    }
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn parse_assignment(line: &str) -> Option<Assignment> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    let (key, rest) = body.split_once('=')?;
    if !is_valid_key(key) {
        return None;
    }

    let (quote, value, trailer) = match rest.as_bytes().first() {
        Some(b'"') => {
            let end = closing_double_quote(&rest[1..])?;
            (QuoteStyle::Double, &rest[1..=end], &rest[end + 2..])
        }
        Some(b'\'') => {
            let end = rest[1..].find('\'')?;
            (QuoteStyle::Single, &rest[1..=end], &rest[end + 2..])
        }
        _ => {
            let end = bare_word_end(rest);
            (QuoteStyle::Bare, &rest[..end], &rest[end..])
        }
    };

    if !is_trailer(trailer) {
        return None;
    }
    Some(Assignment::parsed(key, value, quote, indent, trailer, line))
}

/// Byte offset of the first unescaped `"` in `s`
fn closing_double_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '"') => return Some(i),
            _ => {}
        }
    }
    None
}

/// A bare word runs to the first blank that introduces a `#` comment, minus
/// trailing blanks and `\r`.
fn bare_word_end(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let cut = (0..bytes.len())
        .find(|&i| {
            is_blank(bytes[i])
                && bytes[i..].iter().find(|b| !is_blank(**b)) == Some(&b'#')
        })
        .unwrap_or(bytes.len());
    let mut end = cut;
    while end > 0 && (is_blank(bytes[end - 1]) || bytes[end - 1] == b'\r') {
        end -= 1;
    }
    end
}

/// What may follow a value: blanks, then nothing, `\r`, or a comment
fn is_trailer(trailer: &str) -> bool {
    let rest = trailer.trim_start_matches([' ', '\t']);
    rest.is_empty() || rest == "\r" || rest.starts_with('#')
}
