//! Config model entity - the in-memory GRUB defaults file
//!
//! An ordered list of entries that reproduces the source file exactly when
//! left untouched. Reading and writing bytes is the parser's job; this
//! module only knows about lines.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{GrubwizError, GrubwizResult};

/// Check that `key` is an upper-case shell identifier (`[A-Z_][A-Z0-9_]*`).
pub fn is_valid_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_uppercase() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// How a value was (or will be) quoted in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `KEY=value`
    Bare,
    /// `KEY='value'`
    Single,
    /// `KEY="value"`
    Double,
}

impl QuoteStyle {
    /// Whether `value` can be emitted in this style without changing its
    /// meaning to the shell
    pub fn can_represent(&self, value: &str) -> bool {
        match self {
            QuoteStyle::Bare => is_safe_bare(value),
            QuoteStyle::Single => !value.contains('\''),
            QuoteStyle::Double => closes_cleanly_in_double_quotes(value),
        }
    }

    fn wrap(&self, value: &str) -> String {
        match self {
            QuoteStyle::Bare => value.to_string(),
            QuoteStyle::Single => format!("'{}'", value),
            QuoteStyle::Double => format!("\"{}\"", value),
        }
    }

    /// Pick the style (and text) used to emit `value`, preferring `self`.
    fn fit(self, value: &str) -> (QuoteStyle, String) {
        for style in [self, QuoteStyle::Double, QuoteStyle::Single] {
            if style.can_represent(value) {
                return (style, value.to_string());
            }
        }
        (QuoteStyle::Double, escape_for_double_quotes(value))
    }
}

/// Characters that never need quoting in a shell word.
fn is_safe_bare(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:,=+@%".contains(c))
}

/// True if `value` has no unescaped `"` and does not end in a dangling `\`.
fn closes_cleanly_in_double_quotes(value: &str) -> bool {
    let mut escaped = false;
    for c in value.chars() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '"') => return false,
            _ => {}
        }
    }
    !escaped
}

fn escape_for_double_quotes(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                out.push(chars.next().unwrap_or('\\'));
            }
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// A `KEY=VALUE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    key: String,
    /// Shell text between the quotes, escapes kept as written
    value: String,
    quote: QuoteStyle,
    /// Blanks before the key
    indent: String,
    /// Everything after the value: blanks, comment, `\r`
    trailer: String,
    /// Verbatim source line while the assignment is unmodified
    source: Option<String>,
}

impl Assignment {
    /// A freshly added assignment
    pub fn new(key: impl Into<String>, value: &str) -> Self {
        let (quote, value) = QuoteStyle::Bare.fit(value);
        Self {
            key: key.into(),
            value,
            quote,
            indent: String::new(),
            trailer: String::new(),
            source: None,
        }
    }

    /// An assignment read from `source`
    pub(crate) fn parsed(
        key: &str,
        value: &str,
        quote: QuoteStyle,
        indent: &str,
        trailer: &str,
        source: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            quote,
            indent: indent.to_string(),
            trailer: trailer.to_string(),
            source: Some(source.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn quote(&self) -> QuoteStyle {
        self.quote
    }

    /// Whether the value is wrapped in quotes in the file
    pub fn is_quoted(&self) -> bool {
        self.quote != QuoteStyle::Bare
    }

    /// Whether the line has been changed since it was parsed
    pub fn is_modified(&self) -> bool {
        self.source.is_none()
    }

    fn replace_value(&mut self, value: &str) {
        let (quote, value) = self.quote.fit(value);
        self.quote = quote;
        self.value = value;
        self.source = None;
    }

    fn render(&self) -> Cow<'_, str> {
        match &self.source {
            Some(source) => Cow::Borrowed(source),
            None => Cow::Owned(format!(
                "{}{}={}{}",
                self.indent,
                self.key,
                self.quote.wrap(&self.value),
                self.trailer
            )),
        }
    }
}

/// One logical line of the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEntry {
    Assignment(Assignment),
    /// Comment, blank line, or anything not recognized as an assignment
    Passthrough { raw: String },
}

impl ConfigEntry {
    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            ConfigEntry::Assignment(a) => Some(a),
            ConfigEntry::Passthrough { .. } => None,
        }
    }

    /// The line as it will be written, without its terminator
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            ConfigEntry::Assignment(a) => a.render(),
            ConfigEntry::Passthrough { raw } => Cow::Borrowed(raw),
        }
    }
}

/// The GRUB defaults file as an ordered list of entries.
///
/// The derived index maps each key to the position of its *first*
/// assignment; it holds a key exactly when some assignment for it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigModel {
    entries: Vec<ConfigEntry>,
    index: HashMap<String, usize>,
    final_newline: bool,
}

impl Default for ConfigModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigModel {
    /// An empty model; lines added to it end with a newline
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            final_newline: true,
        }
    }

    pub(crate) fn from_parts(entries: Vec<ConfigEntry>, final_newline: bool) -> Self {
        let mut model = Self {
            entries,
            index: HashMap::new(),
            final_newline,
        };
        model.rebuild_index();
        model
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            if let ConfigEntry::Assignment(a) = entry {
                self.index.entry(a.key.clone()).or_insert(i);
            }
        }
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Whether the last line carries a newline terminator
    pub fn final_newline(&self) -> bool {
        self.final_newline
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Value of the first assignment of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignment(key).map(Assignment::value)
    }

    /// First assignment of `key`
    pub fn assignment(&self, key: &str) -> Option<&Assignment> {
        self.index
            .get(key)
            .and_then(|&i| self.entries[i].as_assignment())
    }

    /// Entry index of the first assignment of `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// All assignments in file order (duplicates included)
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter().filter_map(ConfigEntry::as_assignment)
    }

    /// Distinct keys in order of first appearance
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<(usize, &str)> =
            self.index.iter().map(|(k, &i)| (i, k.as_str())).collect();
        keys.sort_unstable();
        keys.into_iter().map(|(_, k)| k).collect()
    }

    /// Set `key` to `value`, returning whether the model changed.
    ///
    /// An existing key is updated in place. A new key is inserted after the
    /// last assignment in the file. Every entry is one line, so values
    /// containing `\n` or `\r` are rejected.
    pub fn set(&mut self, key: &str, value: &str) -> GrubwizResult<bool> {
        if !is_valid_key(key) {
            return Err(GrubwizError::InvalidKey {
                key: key.to_string(),
            });
        }
        if value.contains(['\n', '\r']) {
            return Err(GrubwizError::InvalidValue {
                key: key.to_string(),
                reason: "values cannot contain line breaks".to_string(),
            });
        }

        if let Some(&i) = self.index.get(key) {
            if let ConfigEntry::Assignment(a) = &mut self.entries[i] {
                if a.value == value {
                    return Ok(false);
                }
                a.replace_value(value);
                return Ok(true);
            }
        }

        let at = self
            .entries
            .iter()
            .rposition(|e| matches!(e, ConfigEntry::Assignment(_)))
            .map(|i| i + 1)
            .unwrap_or(self.entries.len());
        self.entries
            .insert(at, ConfigEntry::Assignment(Assignment::new(key, value)));
        self.rebuild_index();
        Ok(true)
    }

    /// Remove every assignment of `key`, returning whether any existed
    pub fn unset(&mut self, key: &str) -> bool {
        if !self.index.contains_key(key) {
            return false;
        }
        self.entries
            .retain(|e| !matches!(e, ConfigEntry::Assignment(a) if a.key == key));
        self.rebuild_index();
        true
    }
}
