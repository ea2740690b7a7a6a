//! Parse `str.format`-style templates.
//!
//! The core only parses and pads; resolving a field to a value and rendering it (including precision for
//! floats) is the runtime's job. This keeps the grammar in one place and fuzzable without container types.
//!
//! ## Grammar
//! - `{{` and `}}` are literal braces.
//! - `{}` is an automatically numbered positional field, `{0}` an explicit one, `{name}` a named one.
//!   Automatic and explicit numbering cannot be mixed.
//! - An optional `:spec` follows the field: `[[fill]align][width][.precision][type]` where `align` is one of
//!   `<`, `>`, `^` and `type` is one of `s`, `d`, `f`.

use crate::errors::{CoreError, ErrorKind};
use crate::strings::{str_center, str_ljust, str_rjust};

/// Field alignment inside a padded width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Parsed format spec of a replacement field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            width: None,
            precision: None,
            kind: None,
        }
    }
}

/// Which argument a replacement field refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Index(usize),
    Name(String),
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field { key: FieldKey, spec: FormatSpec },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unknown,
    Auto,
    Manual,
}

/// Parse a template into literal and field segments.
///
/// ## Errors
/// - `ValueError` for a lone `}`, an unclosed `{`, mixed automatic/manual numbering, or a bad format spec.
pub fn parse_template(template: &str) -> Result<Vec<Segment>, CoreError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut numbering = Numbering::Unknown;
    let mut next_auto = 0usize;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err(value_error("single '}' encountered in format string")),
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    if c == '{' {
                        return Err(value_error("unexpected '{' in field name"));
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(value_error("expected '}' before end of string"));
                }

                let (name, spec) = match body.split_once(':') {
                    Some((name, spec)) => (name, parse_spec(spec)?),
                    None => (body.as_str(), FormatSpec::default()),
                };

                let key = if name.is_empty() {
                    if numbering == Numbering::Manual {
                        return Err(value_error(
                            "cannot switch from manual field specification to automatic field numbering",
                        ));
                    }
                    numbering = Numbering::Auto;
                    next_auto += 1;
                    FieldKey::Index(next_auto - 1)
                } else if let Ok(index) = name.parse::<usize>() {
                    if numbering == Numbering::Auto {
                        return Err(value_error(
                            "cannot switch from automatic field numbering to manual field specification",
                        ));
                    }
                    numbering = Numbering::Manual;
                    FieldKey::Index(index)
                } else {
                    FieldKey::Name(name.to_string())
                };

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field { key, spec });
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Parse the part of a field after `:`.
///
/// ## Errors
/// - `ValueError: invalid format specifier '{spec}'` if anything is left unparsed.
pub fn parse_spec(spec: &str) -> Result<FormatSpec, CoreError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = FormatSpec::default();
    let mut i = 0;

    let align_of = |c: char| match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    };

    if let Some(align) = chars.get(1).and_then(|c| align_of(*c)) {
        out.fill = chars[0];
        out.align = Some(align);
        i = 2;
    } else if let Some(align) = chars.first().and_then(|c| align_of(*c)) {
        out.align = Some(align);
        i = 1;
    }

    let width_start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i > width_start {
        out.width = chars[width_start..i].iter().collect::<String>().parse().ok();
    }

    if chars.get(i) == Some(&'.') {
        i += 1;
        let prec_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i == prec_start {
            return Err(invalid_spec(spec));
        }
        out.precision = chars[prec_start..i].iter().collect::<String>().parse().ok();
    }

    if let Some(&kind) = chars.get(i) {
        if !matches!(kind, 's' | 'd' | 'f') {
            return Err(invalid_spec(spec));
        }
        out.kind = Some(kind);
        i += 1;
    }

    if i != chars.len() {
        return Err(invalid_spec(spec));
    }
    Ok(out)
}

/// Pad an already-rendered field according to `spec`.
///
/// `numeric` selects the default alignment when the spec names none (right for numbers, left otherwise).
pub fn apply_padding(rendered: &str, spec: &FormatSpec, numeric: bool) -> String {
    let Some(width) = spec.width else {
        return rendered.to_string();
    };
    let align = spec
        .align
        .unwrap_or(if numeric { Align::Right } else { Align::Left });
    match align {
        Align::Left => str_ljust(rendered, width, spec.fill),
        Align::Right => str_rjust(rendered, width, spec.fill),
        Align::Center => str_center(rendered, width, spec.fill),
    }
}

fn value_error(msg: &str) -> CoreError {
    CoreError::with_message(ErrorKind::Value, msg)
}

fn invalid_spec(spec: &str) -> CoreError {
    CoreError::with_message(ErrorKind::Value, format!("invalid format specifier '{spec}'"))
}
