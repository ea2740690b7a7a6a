//! Python-style `repr` rendering for every container.
//!
//! Rendering is driven by [`ReprConfig`], a small builder in the same spirit as the formatter configs in the
//! rest of the workspace. `Display` on the container types uses [`ReprConfig::default`].

use std::fmt::Write as _;

/// Quote style for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Single quotes unless the text contains `'` and no `"` (what CPython does).
    Auto,
    Single,
    Double,
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct ReprConfig {
    /// Quote style for strings and bytes
    pub quote_style: QuoteStyle,
    /// Render at most this many items per container, then `...`
    pub max_items: Option<usize>,
    /// Render floats with a fixed number of digits instead of the shortest round-trip form
    pub float_precision: Option<usize>,
}

impl Default for ReprConfig {
    fn default() -> Self {
        Self {
            quote_style: QuoteStyle::Auto,
            max_items: None,
            float_precision: None,
        }
    }
}

impl ReprConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote style
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Limit the number of rendered items per container
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Render floats with `digits` decimal places
    pub fn with_float_precision(mut self, digits: usize) -> Self {
        self.float_precision = Some(digits);
        self
    }

    fn quote_for(&self, has_single: bool, has_double: bool) -> char {
        match self.quote_style {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
            QuoteStyle::Auto if has_single && !has_double => '"',
            QuoteStyle::Auto => '\'',
        }
    }
}

/// Render a value the way Python's `repr()` would.
pub trait PyRepr {
    /// Append the representation of `self` to `out`.
    fn write_repr(&self, out: &mut String, config: &ReprConfig);

    /// Render with the default configuration.
    fn repr(&self) -> String {
        self.repr_with(&ReprConfig::default())
    }

    /// Render with an explicit configuration.
    fn repr_with(&self, config: &ReprConfig) -> String {
        let mut out = String::new();
        self.write_repr(&mut out, config);
        out
    }
}

/// Write a quoted, escaped string literal.
pub fn write_str_literal(out: &mut String, s: &str, config: &ReprConfig) {
    let quote = config.quote_for(s.contains('\''), s.contains('"'));
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Write a `b'...'` byte literal.
pub fn write_bytes_literal(out: &mut String, bytes: &[u8], config: &ReprConfig) {
    let quote = config.quote_for(bytes.contains(&b'\''), bytes.contains(&b'"'));
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(b as char);
            }
            b if b.is_ascii_graphic() || b == b' ' => out.push(b as char),
            b => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(quote);
}

/// Write a float the way Python does: integral values keep a trailing `.0`.
pub fn write_float(out: &mut String, value: f64, config: &ReprConfig) {
    if value.is_nan() {
        out.push_str("nan");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
    } else if let Some(digits) = config.float_precision {
        let _ = write!(out, "{value:.digits$}");
    } else {
        // `Debug` gives the shortest round-trip form and keeps `.0` on integral values.
        let _ = write!(out, "{value:?}");
    }
}

/// Write a delimited sequence of items, honoring `max_items`.
pub fn write_seq<'a, T, I>(out: &mut String, open: &str, close: &str, items: I, config: &ReprConfig)
where
    T: PyRepr + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    out.push_str(open);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if config.max_items.is_some_and(|max| i >= max) {
            out.push_str("...");
            break;
        }
        item.write_repr(out, config);
    }
    out.push_str(close);
}

/// Write `{k: v, ...}`, honoring `max_items`.
pub fn write_map<'a, K, V, I>(out: &mut String, entries: I, config: &ReprConfig)
where
    K: PyRepr + 'a,
    V: PyRepr + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    out.push('{');
    for (i, (k, v)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if config.max_items.is_some_and(|max| i >= max) {
            out.push_str("...");
            break;
        }
        k.write_repr(out, config);
        out.push_str(": ");
        v.write_repr(out, config);
    }
    out.push('}');
}

macro_rules! impl_repr_int {
    ($($t:ty),*) => {
        $(
            impl PyRepr for $t {
                fn write_repr(&self, out: &mut String, _config: &ReprConfig) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

impl_repr_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl PyRepr for f64 {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_float(out, *self, config);
    }
}

impl PyRepr for f32 {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_float(out, f64::from(*self), config);
    }
}

impl PyRepr for bool {
    fn write_repr(&self, out: &mut String, _config: &ReprConfig) {
        out.push_str(if *self { "True" } else { "False" });
    }
}

impl PyRepr for str {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_str_literal(out, self, config);
    }
}

impl PyRepr for String {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_str_literal(out, self, config);
    }
}

impl PyRepr for char {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        let mut buf = [0u8; 4];
        write_str_literal(out, self.encode_utf8(&mut buf), config);
    }
}

impl<T: PyRepr + ?Sized> PyRepr for &T {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        (**self).write_repr(out, config);
    }
}

impl<T: PyRepr> PyRepr for Option<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        match self {
            Some(v) => v.write_repr(out, config),
            None => out.push_str("None"),
        }
    }
}

impl<T: PyRepr> PyRepr for Vec<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_seq(out, "[", "]", self.iter(), config);
    }
}

impl<A: PyRepr, B: PyRepr> PyRepr for (A, B) {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push('(');
        self.0.write_repr(out, config);
        out.push_str(", ");
        self.1.write_repr(out, config);
        out.push(')');
    }
}

impl<A: PyRepr, B: PyRepr, C: PyRepr> PyRepr for (A, B, C) {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push('(');
        self.0.write_repr(out, config);
        out.push_str(", ");
        self.1.write_repr(out, config);
        out.push_str(", ");
        self.2.write_repr(out, config);
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_quotes_follow_cpython() {
        assert_eq!("abc".repr(), "'abc'");
        assert_eq!("it's".repr(), "\"it's\"");
        assert_eq!("say \"hi\" it's".repr(), "'say \"hi\" it\\'s'");
    }

    #[test]
    fn explicit_quote_style() {
        let cfg = ReprConfig::new().with_quote_style(QuoteStyle::Double);
        assert_eq!("abc".repr_with(&cfg), "\"abc\"");
    }

    #[test]
    fn floats_keep_trailing_zero() {
        assert_eq!(1.0_f64.repr(), "1.0");
        assert_eq!(0.5_f64.repr(), "0.5");
        assert_eq!(f64::NAN.repr(), "nan");
        let cfg = ReprConfig::new().with_float_precision(2);
        assert_eq!(3.14159_f64.repr_with(&cfg), "3.14");
    }

    #[test]
    fn bools_and_options() {
        assert_eq!(true.repr(), "True");
        assert_eq!(None::<i64>.repr(), "None");
        assert_eq!(Some(3).repr(), "3");
    }

    #[test]
    fn max_items_truncates() {
        let cfg = ReprConfig::new().with_max_items(2);
        assert_eq!(vec![1, 2, 3, 4].repr_with(&cfg), "[1, 2, ...]");
        assert_eq!(vec![1, 2].repr_with(&cfg), "[1, 2]");
    }

    #[test]
    fn bytes_escape_non_printables() {
        let mut out = String::new();
        write_bytes_literal(&mut out, b"a\x00\n", &ReprConfig::default());
        assert_eq!(out, "b'a\\x00\\n'");
    }
}
