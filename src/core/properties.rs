//! Reader for line-oriented `key=value` property files.
//!
//! Follows the usual properties conventions: `#`/`!` comment lines, `=`, `:`
//! or whitespace separators, backslash line continuations and `\uXXXX` escapes.
//! Lines end at `\n`, `\r\n` or a lone `\r`. Files are decoded as UTF-8,
//! falling back to ISO-8859-1 when they are not valid UTF-8.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Errors raised while reading a properties document.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// A `\u` escape was not followed by four hex digits naming a valid character.
    #[error("line {line}: malformed \\uXXXX encoding")]
    MalformedUnicodeEscape { line: usize },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for properties parsing.
pub type Result<T> = std::result::Result<T, PropertiesError>;

/// Parsed property set. Later duplicates replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Read and parse a properties file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains a malformed escape.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&decode(bytes))
    }

    /// Parse properties from text.
    ///
    /// # Errors
    ///
    /// Returns an error if a `\uXXXX` escape is malformed.
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (line, logical) in logical_lines(input) {
            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, line)?;
            let value = unescape(raw_value, line)?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document held no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// UTF-8 if valid, otherwise one char per byte (ISO-8859-1).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    }
}

/// Split on `\n`, `\r\n` or a lone `\r`. A trailing terminator adds no empty line.
fn natural_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(end) = rest.find(['\r', '\n']) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..end]);
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }

    lines
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Join continuation lines and drop comments and blanks.
///
/// Yields each logical line with the 1-based number of the line it started on.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, natural) in natural_lines(input).into_iter().enumerate() {
        let natural = natural.trim_start_matches(is_blank);

        let (start, mut logical) = match pending.take() {
            Some(p) => p,
            None => {
                if natural.is_empty() || natural.starts_with('#') || natural.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = natural.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            logical.push_str(&natural[..natural.len() - 1]);
            pending = Some((start, logical));
        } else {
            logical.push_str(natural);
            out.push((start, logical));
        }
    }

    // Continuation on the last line of the file
    if let Some(p) = pending {
        out.push(p);
    }

    out
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if has_separator {
        rest = &rest[1..];
    }
    rest = rest.trim_start_matches(is_blank);
    if !has_separator {
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start_matches(is_blank);
        }
    }

    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(read_unicode(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decode the hex digits of a `\u` escape, pairing UTF-16 surrogates.
fn read_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char> {
    let high = read_hex4(chars, line)?;
    if let Some(c) = char::from_u32(high) {
        return Ok(c);
    }

    // High surrogate must be followed by `\uDC00`..`\uDFFF`
    if (0xD800..0xDC00).contains(&high) && chars.next() == Some('\\') && chars.next() == Some('u')
    {
        let low = read_hex4(chars, line)?;
        if (0xDC00..0xE000).contains(&low) {
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(combined) {
                return Ok(c);
            }
        }
    }

    Err(PropertiesError::MalformedUnicodeEscape { line })
}

fn read_hex4(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
        value = value * 16 + digit;
    }
    Ok(value)
}
