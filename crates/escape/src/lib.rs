//! Escaping for values placed inside generated markup.
//!
//! The renderer never escapes on its own; it asks an [`Escaper`]. The default
//! [`HtmlEscaper`] follows the OWASP recommendations for attribute and CSS
//! contexts: everything outside a small safe set is encoded.
//!
//! Both operations borrow the input when it contains nothing to escape.

use std::borrow::Cow;
use std::fmt::Write;

/// Escaping routines consumed by the renderer.
///
/// Implementations must be deterministic and free of side effects.
pub trait Escaper {
    /// Escapes a value for use inside a double-quoted HTML attribute.
    fn escape_attribute<'a>(&self, value: &'a str) -> Cow<'a, str>;

    /// Escapes a value for use inside a CSS string or identifier.
    fn escape_css<'a>(&self, value: &'a str) -> Cow<'a, str>;
}

/// The default UTF-8 escaper.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl HtmlEscaper {
    pub fn new() -> Self {
        Self
    }
}

fn is_attribute_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '-' | '_')
}

fn is_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

impl Escaper for HtmlEscaper {
    fn escape_attribute<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if is_digits(value) || value.chars().all(is_attribute_safe) {
            return Cow::Borrowed(value);
        }

        let mut out = String::with_capacity(value.len() * 2);
        for c in value.chars() {
            if is_attribute_safe(c) {
                out.push(c);
                continue;
            }
            let code = c as u32;
            match c {
                '"' => out.push_str("&quot;"),
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '\t' | '\n' | '\r' => {
                    let _ = write!(out, "&#x{code:02X};");
                }
                // Control characters have no safe textual form.
                _ if c.is_control() => out.push_str("&#xFFFD;"),
                _ if code > 0xFF => {
                    let _ = write!(out, "&#x{code:04X};");
                }
                _ => {
                    let _ = write!(out, "&#x{code:02X};");
                }
            }
        }
        Cow::Owned(out)
    }

    fn escape_css<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Cow::Borrowed(value);
        }

        let mut out = String::with_capacity(value.len() * 3);
        for c in value.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c);
            } else {
                let _ = write!(out, "\\{:X} ", c as u32);
            }
        }
        Cow::Owned(out)
    }
}
