//! Define shared string semantics (policy + pure helpers).
//!
//! This module holds **pure/deterministic** helpers used by the `Text` and `UserString` containers and by
//! byte/text conversions, so every string-shaped container agrees on indexing and transforms.
//!
//! ## Notes
//! - **Indexing model**: Unicode scalar indexing (Rust `char`), not bytes or grapheme clusters.
//! - **Negative indices**: supported (Python-style): `s[-1]` is the last scalar.
//! - **Slicing**: Python-like `start`, `end`, `step` with negative indices and bounds clamping.
//! - **Positions** returned by search helpers are scalar offsets, not byte offsets.

use crate::errors::{CoreError, ErrorKind};
use crate::index::{checked_index, slice_positions};
use crate::types::ContainerTypeId;

/// Which side(s) of a string a strip operation trims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripSide {
    Left,
    Right,
    Both,
}

/// Return the string length in Unicode scalars (Rust `char`).
pub fn str_len(s: &str) -> usize {
    s.chars().count()
}

/// Index a string by Unicode scalar index.
///
/// ## Errors
/// - `IndexError` if the index is out of range (negative indices count from the end).
pub fn str_char_at(s: &str, idx: i64) -> Result<char, CoreError> {
    let pos = checked_index(ContainerTypeId::Str, str_len(s), idx)?;
    s.chars()
        .nth(pos)
        .ok_or_else(|| CoreError::index_out_of_range_for(ContainerTypeId::Str, idx, pos))
}

/// Slice a string over Unicode scalars (Python-like semantics).
///
/// ## Errors
/// - `ValueError: slice step cannot be zero` if `step == 0`.
pub fn str_slice(s: &str, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Result<String, CoreError> {
    let chars: Vec<char> = s.chars().collect();
    let positions = slice_positions(chars.len(), start, end, step)?;
    Ok(positions.into_iter().filter_map(|i| chars.get(i)).collect())
}

/// Concatenate two strings.
pub fn str_concat(lhs: &str, rhs: &str) -> String {
    let mut out = String::with_capacity(lhs.len() + rhs.len());
    out.push_str(lhs);
    out.push_str(rhs);
    out
}

/// Repeat a string `n` times; non-positive counts give the empty string.
pub fn str_repeat(s: &str, n: i64) -> String {
    if n <= 0 { String::new() } else { s.repeat(n as usize) }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest (`str.title`).
pub fn str_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Uppercase the first scalar and lowercase the rest (`str.capitalize`).
pub fn str_capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Invert the case of every cased scalar (`str.swapcase`).
pub fn str_swapcase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
        } else if ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Split a string.
///
/// - `sep = None` splits on runs of whitespace and drops empty parts (`"a  b ".split()`).
/// - `sep = Some(..)` splits on every occurrence, keeping empty parts.
///
/// ## Errors
/// - `ValueError: empty separator` if `sep` is `Some("")`.
pub fn str_split(s: &str, sep: Option<&str>) -> Result<Vec<String>, CoreError> {
    match sep {
        Some("") => Err(CoreError::with_message(ErrorKind::Value, "empty separator")),
        Some(sep) => Ok(s.split(sep).map(str::to_string).collect()),
        None => Ok(s.split_whitespace().map(str::to_string).collect()),
    }
}

/// Split a string at line boundaries, dropping the terminators (`str.splitlines`).
///
/// Boundaries are `\n`, `\r`, `\r\n`, `\x0b`, `\x0c`, `\x1c`-`\x1e`, `\x85`, `\u2028` and `\u2029`.
/// A trailing boundary does not produce an empty last line.
pub fn str_splitlines(s: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_line_boundary(c) {
            current.push(c);
            continue;
        }
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        lines.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Join items with a separator.
pub fn str_join<S: AsRef<str>>(sep: &str, items: &[S]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(sep)
}

/// Strip characters from one or both ends.
///
/// `chars = None` strips whitespace; otherwise any scalar contained in `chars` is stripped.
pub fn str_strip(s: &str, chars: Option<&str>, side: StripSide) -> String {
    let matches = |c: char| match chars {
        Some(set) => set.contains(c),
        None => c.is_whitespace(),
    };
    let out = match side {
        StripSide::Left => s.trim_start_matches(matches),
        StripSide::Right => s.trim_end_matches(matches),
        StripSide::Both => s.trim_matches(matches),
    };
    out.to_string()
}

/// Center a string in a field of `width` scalars using `fill` (`str.center`).
///
/// When the padding is odd, the extra fill goes to the side CPython chooses.
pub fn str_center(s: &str, width: usize, fill: char) -> String {
    let len = str_len(s);
    if width <= len {
        return s.to_string();
    }
    let marg = width - len;
    let left = marg / 2 + (marg & width & 1);
    let right = marg - left;
    pad(s, left, right, fill)
}

/// Left-justify in a field of `width` scalars (`str.ljust`).
pub fn str_ljust(s: &str, width: usize, fill: char) -> String {
    let len = str_len(s);
    if width <= len { s.to_string() } else { pad(s, 0, width - len, fill) }
}

/// Right-justify in a field of `width` scalars (`str.rjust`).
pub fn str_rjust(s: &str, width: usize, fill: char) -> String {
    let len = str_len(s);
    if width <= len { s.to_string() } else { pad(s, width - len, 0, fill) }
}

fn pad(s: &str, left: usize, right: usize, fill: char) -> String {
    let mut out = String::with_capacity(s.len() + (left + right) * fill.len_utf8());
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Return the scalar offset of the first occurrence of `needle`, if any.
pub fn str_find(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle).map(|byte| haystack[..byte].chars().count())
}

/// Return the scalar offset of the last occurrence of `needle`, if any.
pub fn str_rfind(haystack: &str, needle: &str) -> Option<usize> {
    haystack.rfind(needle).map(|byte| haystack[..byte].chars().count())
}

/// Count non-overlapping occurrences of `needle`.
///
/// An empty needle matches between every scalar (`len + 1` times), as in Python.
pub fn str_count(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return str_len(haystack) + 1;
    }
    haystack.matches(needle).count()
}

/// Replace all occurrences of `from` with `to`.
pub fn str_replace(s: &str, from: &str, to: &str) -> String {
    s.replace(from, to)
}

/// True if non-empty and every scalar is alphabetic.
pub fn str_is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// True if non-empty and every scalar is numeric.
pub fn str_is_digit(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

/// True if non-empty and every scalar is whitespace.
pub fn str_is_space(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}

/// True if `name` is usable as a field identifier (letter or `_`, then letters, digits or `_`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}
