//! Markup dialects a document can be rendered in.
//!
//! A `Doctype` decides which `<meta>` types are legal and how void elements
//! are closed. The predicates here (`is_xhtml`, `is_html5`, `is_rdfa`) are the
//! only facts the rest of the workspace derives its rules from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a doctype name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown doctype '{0}'")]
pub struct ParseDoctypeError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Doctype {
    #[serde(rename = "XHTML11")]
    Xhtml11,
    #[serde(rename = "XHTML1_STRICT")]
    Xhtml1Strict,
    #[serde(rename = "XHTML1_TRANSITIONAL")]
    Xhtml1Transitional,
    #[serde(rename = "XHTML1_FRAMESET")]
    Xhtml1Frameset,
    #[serde(rename = "XHTML1_RDFA")]
    Xhtml1Rdfa,
    #[serde(rename = "XHTML1_RDFA11")]
    Xhtml1Rdfa11,
    #[serde(rename = "XHTML_BASIC1")]
    XhtmlBasic1,
    #[serde(rename = "XHTML5")]
    Xhtml5,
    #[serde(rename = "HTML4_STRICT")]
    Html4Strict,
    #[default]
    #[serde(rename = "HTML4_LOOSE")]
    Html4Loose,
    #[serde(rename = "HTML4_FRAMESET")]
    Html4Frameset,
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "CUSTOM_XHTML")]
    CustomXhtml,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl Doctype {
    pub const ALL: [Doctype; 14] = [
        Doctype::Xhtml11,
        Doctype::Xhtml1Strict,
        Doctype::Xhtml1Transitional,
        Doctype::Xhtml1Frameset,
        Doctype::Xhtml1Rdfa,
        Doctype::Xhtml1Rdfa11,
        Doctype::XhtmlBasic1,
        Doctype::Xhtml5,
        Doctype::Html4Strict,
        Doctype::Html4Loose,
        Doctype::Html4Frameset,
        Doctype::Html5,
        Doctype::CustomXhtml,
        Doctype::Custom,
    ];

    /// The registry name of this mode, e.g. `"XHTML1_STRICT"`.
    pub fn name(&self) -> &'static str {
        match self {
            Doctype::Xhtml11 => "XHTML11",
            Doctype::Xhtml1Strict => "XHTML1_STRICT",
            Doctype::Xhtml1Transitional => "XHTML1_TRANSITIONAL",
            Doctype::Xhtml1Frameset => "XHTML1_FRAMESET",
            Doctype::Xhtml1Rdfa => "XHTML1_RDFA",
            Doctype::Xhtml1Rdfa11 => "XHTML1_RDFA11",
            Doctype::XhtmlBasic1 => "XHTML_BASIC1",
            Doctype::Xhtml5 => "XHTML5",
            Doctype::Html4Strict => "HTML4_STRICT",
            Doctype::Html4Loose => "HTML4_LOOSE",
            Doctype::Html4Frameset => "HTML4_FRAMESET",
            Doctype::Html5 => "HTML5",
            Doctype::CustomXhtml => "CUSTOM_XHTML",
            Doctype::Custom => "CUSTOM",
        }
    }

    /// The `<!DOCTYPE ...>` line for this mode. Custom modes have none.
    pub fn declaration(&self) -> Option<&'static str> {
        let decl = match self {
            Doctype::Xhtml11 => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#
            }
            Doctype::Xhtml1Strict => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
            }
            Doctype::Xhtml1Transitional => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
            }
            Doctype::Xhtml1Frameset => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Frameset//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd">"#
            }
            Doctype::Xhtml1Rdfa => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML+RDFa 1.0//EN" "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd">"#
            }
            Doctype::Xhtml1Rdfa11 => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML+RDFa 1.1//EN" "http://www.w3.org/MarkUp/DTD/xhtml-rdfa-2.dtd">"#
            }
            Doctype::XhtmlBasic1 => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML Basic 1.0//EN" "http://www.w3.org/TR/xhtml-basic/xhtml-basic10.dtd">"#
            }
            Doctype::Html4Strict => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
            }
            Doctype::Html4Loose => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
            }
            Doctype::Html4Frameset => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Frameset//EN" "http://www.w3.org/TR/html4/frameset.dtd">"#
            }
            Doctype::Xhtml5 | Doctype::Html5 => "<!DOCTYPE html>",
            Doctype::CustomXhtml | Doctype::Custom => return None,
        };
        Some(decl)
    }

    /// True for every XML-serialised mode, including `XHTML5` and `CUSTOM_XHTML`.
    pub fn is_xhtml(&self) -> bool {
        matches!(
            self,
            Doctype::Xhtml11
                | Doctype::Xhtml1Strict
                | Doctype::Xhtml1Transitional
                | Doctype::Xhtml1Frameset
                | Doctype::Xhtml1Rdfa
                | Doctype::Xhtml1Rdfa11
                | Doctype::XhtmlBasic1
                | Doctype::Xhtml5
                | Doctype::CustomXhtml
        )
    }

    pub fn is_html5(&self) -> bool {
        matches!(self, Doctype::Html5 | Doctype::Xhtml5)
    }

    /// RDFa attributes are legal in the XHTML+RDFa modes and in the HTML5 family.
    pub fn is_rdfa(&self) -> bool {
        self.is_html5() || matches!(self, Doctype::Xhtml1Rdfa | Doctype::Xhtml1Rdfa11)
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Doctype {
    type Err = ParseDoctypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Doctype::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDoctypeError(s.to_string()))
    }
}
