//! Which meta types and closing conventions each doctype allows.
//!
//! Consulted at insertion time, where violations are hard errors, and again
//! at render time, where they only skip the offending tag.

use crate::item::{MetaItem, MetaType};
use headtags_types::Doctype;

/// How a `<meta charset>` tag is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetFormat {
    /// `<meta charset="utf-8">`
    Html,
    /// `<meta charset="utf-8"/>`
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoctypePolicy {
    pub meta_types: &'static [MetaType],
    /// Void elements close with ` />`.
    pub self_closing: bool,
    /// `None` when the doctype has no charset attribute.
    pub charset: Option<CharsetFormat>,
    pub scheme_modifier: bool,
}

const BASIC_TYPES: &[MetaType] = &[MetaType::Name, MetaType::HttpEquiv];
const RDFA_TYPES: &[MetaType] = &[MetaType::Name, MetaType::HttpEquiv, MetaType::Property];

pub const HTML4: DoctypePolicy = DoctypePolicy {
    meta_types: BASIC_TYPES,
    self_closing: false,
    charset: None,
    scheme_modifier: true,
};

pub const XHTML1: DoctypePolicy = DoctypePolicy {
    meta_types: BASIC_TYPES,
    self_closing: true,
    charset: None,
    scheme_modifier: true,
};

pub const XHTML1_RDFA: DoctypePolicy = DoctypePolicy {
    meta_types: RDFA_TYPES,
    ..XHTML1
};

pub const HTML5: DoctypePolicy = DoctypePolicy {
    meta_types: &MetaType::ALL,
    self_closing: false,
    charset: Some(CharsetFormat::Html),
    scheme_modifier: false,
};

pub const XHTML5: DoctypePolicy = DoctypePolicy {
    self_closing: true,
    charset: Some(CharsetFormat::Xml),
    ..HTML5
};

/// Looks up the policy for `doctype`.
pub fn policy_for(doctype: Doctype) -> &'static DoctypePolicy {
    match (doctype.is_html5(), doctype.is_xhtml(), doctype.is_rdfa()) {
        (true, true, _) => &XHTML5,
        (true, false, _) => &HTML5,
        (false, true, true) => &XHTML1_RDFA,
        (false, true, false) => &XHTML1,
        (false, false, _) => &HTML4,
    }
}

impl DoctypePolicy {
    pub fn allows(&self, meta_type: MetaType) -> bool {
        self.meta_types.contains(&meta_type)
    }

    /// The end of a void element's start tag.
    pub fn void_close(&self) -> &'static str {
        if self.self_closing { " />" } else { ">" }
    }
}

/// Checks that `meta` may be queued while `doctype` is active.
///
/// Checks required values and the meta type; modifier legality is a
/// render-time concern.
pub fn validate_meta(meta: &MetaItem, doctype: Doctype) -> Result<(), String> {
    let policy = policy_for(doctype);
    match meta {
        MetaItem::Charset(charset) if charset.is_empty() => {
            Err("charset must not be empty".to_string())
        }
        MetaItem::Charset(_) if policy.charset.is_none() => {
            let family = if doctype.is_xhtml() { "XHTML*" } else { doctype.name() };
            Err(format!(
                "{} doctype has no attribute charset; please use appendHttpEquiv()",
                family
            ))
        }
        MetaItem::Charset(_) => Ok(()),
        MetaItem::Keyed(keyed) if keyed.key().is_empty() => Err(format!(
            "meta tags require a non-empty {} value",
            keyed.meta_type().attribute()
        )),
        MetaItem::Keyed(keyed) if keyed.content().is_empty() => {
            Err("meta tags require non-empty content".to_string())
        }
        MetaItem::Keyed(keyed) if !policy.allows(keyed.meta_type()) => Err(format!(
            "meta type \"{}\" is not supported by doctype {}",
            keyed.meta_type(),
            doctype
        )),
        MetaItem::Keyed(_) => Ok(()),
    }
}
