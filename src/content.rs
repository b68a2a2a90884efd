//! Content classification and normalization for fixture comparison.

use serde::Serialize;
use serde::de::IgnoredAny;
use sha2::{Digest, Sha256};
use std::fmt;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Whether a byte sequence is treated as text or as an opaque blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Text,
    Binary,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => write!(f, "text"),
            Kind::Binary => write!(f, "binary"),
        }
    }
}

/// Returns true if `c` is a letter, mark, number, punctuation or symbol,
/// or the ASCII space.
///
/// Everything else is not printable: control and format characters,
/// private use, unassigned code points (noncharacters included) and
/// whitespace other than U+0020. [`classify`] accepts whitespace separately.
pub fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    c == ' '
        || matches!(
            get_general_category(c),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | NonspacingMark
                | SpacingMark
                | EnclosingMark
                | DecimalNumber
                | LetterNumber
                | OtherNumber
                | ConnectorPunctuation
                | DashPunctuation
                | OpenPunctuation
                | ClosePunctuation
                | InitialPunctuation
                | FinalPunctuation
                | OtherPunctuation
                | MathSymbol
                | CurrencySymbol
                | ModifierSymbol
                | OtherSymbol
        )
}

/// Classifies content as binary if any decoded character is neither
/// printable nor whitespace.
///
/// Bytes are decoded as UTF-8 with replacement. Invalid sequences become
/// U+FFFD, which is printable, so malformed UTF-8 on its own stays text.
/// Empty content is text.
pub fn classify(bytes: &[u8]) -> Kind {
    let binary = String::from_utf8_lossy(bytes)
        .chars()
        .any(|c| !is_printable(c) && !c.is_whitespace());
    if binary { Kind::Binary } else { Kind::Text }
}

/// Re-indents JSON text with two spaces per level.
///
/// Only whitespace between tokens changes. Strings, numbers and keys are
/// copied from `src` as written, duplicate keys included. Leading whitespace
/// is dropped and trailing whitespace is copied to the output. Returns
/// `None` if `src` is not a single valid JSON document.
pub fn reindent_json(src: &[u8]) -> Option<Vec<u8>> {
    serde_json::from_slice::<IgnoredAny>(src).ok()?;

    let mut out = Vec::with_capacity(src.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // Set after `{` or `[`; the line break waits until we know the
    // container is not empty.
    let mut opened = false;

    for &b in src {
        if in_string {
            out.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if is_json_space(b) {
            continue;
        }
        if opened && b != b'}' && b != b']' {
            opened = false;
            depth += 1;
            newline(&mut out, depth);
        }
        match b {
            b'"' => {
                in_string = true;
                out.push(b);
            }
            b'{' | b'[' => {
                out.push(b);
                opened = true;
            }
            b'}' | b']' => {
                if opened {
                    opened = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(b);
            }
            b',' => {
                out.push(b);
                newline(&mut out, depth);
            }
            b':' => out.extend_from_slice(b": "),
            _ => out.push(b),
        }
    }

    out.extend_from_slice(trailing_whitespace(src));
    Some(out)
}

fn newline(out: &mut Vec<u8>, depth: usize) {
    out.push(b'\n');
    out.extend(std::iter::repeat_n(b' ', depth * 2));
}

fn is_json_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn trailing_whitespace(src: &[u8]) -> &[u8] {
    let end = src
        .iter()
        .rposition(|&b| !is_json_space(b))
        .map_or(0, |i| i + 1);
    &src[end..]
}

/// Lowercase hex rendering used when reporting binary mismatches.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// SHA-256 of the content as a 64-character lowercase hex string.
pub fn digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
