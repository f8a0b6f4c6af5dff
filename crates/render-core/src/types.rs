use crate::traits::Diagnostics;
use headtags_escape::Escaper;
use headtags_types::Doctype;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// The string placed in front of every rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Indent(String);

impl Indent {
    pub fn spaces(width: usize) -> Self {
        Self(" ".repeat(width))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<usize> for Indent {
    fn from(width: usize) -> Self {
        Self::spaces(width)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Indent {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for Indent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IndentDef {
            Width(usize),
            Literal(String),
        }

        Ok(match IndentDef::deserialize(deserializer)? {
            IndentDef::Width(width) => Indent::spaces(width),
            IndentDef::Literal(s) => Indent(s),
        })
    }
}

/// Host-configurable output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub indent: Indent,
    /// Placed between rendered lines.
    pub separator: String,
    /// When false, attribute values are emitted verbatim.
    pub auto_escape: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            separator: "\n".to_string(),
            auto_escape: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_auto_escape(mut self, auto_escape: bool) -> Self {
        self.auto_escape = auto_escape;
        self
    }
}

/// A read-only snapshot consulted for one render pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub doctype: Doctype,
    pub escaper: &'a dyn Escaper,
    pub indent: &'a str,
    pub separator: &'a str,
    pub auto_escape: bool,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> RenderContext<'a> {
    /// A context with default options: no indent, `\n` separator, escaping on.
    pub fn new(
        doctype: Doctype,
        escaper: &'a dyn Escaper,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            doctype,
            escaper,
            indent: "",
            separator: "\n",
            auto_escape: true,
            diagnostics,
        }
    }

    pub fn from_options(
        options: &'a RenderOptions,
        doctype: Doctype,
        escaper: &'a dyn Escaper,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            doctype,
            escaper,
            indent: options.indent.as_str(),
            separator: &options.separator,
            auto_escape: options.auto_escape,
            diagnostics,
        }
    }

    /// Escapes an attribute value unless auto-escaping is off.
    pub fn attribute<'v>(&self, value: &'v str) -> Cow<'v, str> {
        if self.auto_escape {
            self.escaper.escape_attribute(value)
        } else {
            Cow::Borrowed(value)
        }
    }
}
