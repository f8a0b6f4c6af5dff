//! Typed descriptors for the tags a helper can queue.
//!
//! Every queued entry is an [`Item`]: either a `<link>` ([`LinkItem`]) or a
//! `<meta>` ([`MetaItem`]). Required attributes are enforced by the
//! constructors, and extraneous attributes are dropped against a fixed
//! allow-list rather than rejected.

mod link;
mod meta;

pub use link::{LINK_ATTRIBUTES, LinkItem, LinkRel};
pub use meta::{KeyedMeta, MODIFIER_KEYS, MetaItem, MetaType};

use headtags_stack::{OrderedStack, StackEntry};
use headtags_types::Conditional;
use serde_json::Value;
use std::fmt;

/// The stack both helpers queue into.
pub type ItemStack = OrderedStack<Item>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Link(LinkItem),
    Meta(MetaItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Stylesheet,
    Alternate,
    Prev,
    Next,
    GenericLink,
    MetaName,
    MetaHttpEquiv,
    MetaProperty,
    MetaItemprop,
    MetaCharset,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Stylesheet => "Stylesheet",
            ItemKind::Alternate => "Alternate",
            ItemKind::Prev => "Prev",
            ItemKind::Next => "Next",
            ItemKind::GenericLink => "GenericLink",
            ItemKind::MetaName => "MetaName",
            ItemKind::MetaHttpEquiv => "MetaHttpEquiv",
            ItemKind::MetaProperty => "MetaProperty",
            ItemKind::MetaItemprop => "MetaItemprop",
            ItemKind::MetaCharset => "MetaCharset",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Link(link) => link.kind(),
            Item::Meta(meta) => meta.kind(),
        }
    }

    pub fn as_link(&self) -> Option<&LinkItem> {
        match self {
            Item::Link(link) => Some(link),
            Item::Meta(_) => None,
        }
    }

    pub fn as_meta(&self) -> Option<&MetaItem> {
        match self {
            Item::Meta(meta) => Some(meta),
            Item::Link(_) => None,
        }
    }

    pub fn is_charset(&self) -> bool {
        matches!(self, Item::Meta(MetaItem::Charset(_)))
    }

    /// The conditional comment trigger, if the item carries one.
    pub fn conditional(&self) -> Option<&Conditional> {
        match self {
            Item::Link(link) => Some(link.conditional()),
            Item::Meta(MetaItem::Keyed(meta)) => Some(meta.conditional()),
            Item::Meta(MetaItem::Charset(_)) => None,
        }
    }
}

impl From<LinkItem> for Item {
    fn from(link: LinkItem) -> Self {
        Item::Link(link)
    }
}

impl From<MetaItem> for Item {
    fn from(meta: MetaItem) -> Self {
        Item::Meta(meta)
    }
}

impl From<KeyedMeta> for Item {
    fn from(meta: KeyedMeta) -> Self {
        Item::Meta(MetaItem::Keyed(meta))
    }
}

impl StackEntry for Item {
    /// Stylesheets are unique per `href`.
    fn dedup_key(&self) -> Option<&str> {
        match self {
            Item::Link(link) if link.rel() == &LinkRel::Stylesheet => Some(link.href()),
            _ => None,
        }
    }

    fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Link(a), Item::Link(b)) => a.rel() == b.rel(),
            (Item::Meta(MetaItem::Keyed(a)), Item::Meta(MetaItem::Keyed(b))) => {
                a.meta_type() == b.meta_type() && a.key() == b.key()
            }
            (Item::Meta(MetaItem::Charset(_)), Item::Meta(MetaItem::Charset(_))) => true,
            _ => false,
        }
    }
}

// --- Value coercion shared by the record and positional factories ---

/// A scalar as text. Arrays, objects and null are not text.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like [`text`], but lists of scalars are joined with `,`.
pub(crate) fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::Array(values) => Some(values.iter().filter_map(text).collect::<Vec<_>>().join(",")),
        other => text(other),
    }
}

pub(crate) fn conditional_value(value: &Value) -> Option<Conditional> {
    match value {
        Value::Bool(flag) => Some(Conditional::Flag(*flag)),
        Value::String(expr) => Some(Conditional::Expr(expr.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stylesheets_dedup_by_href() {
        let a = Item::from(LinkItem::stylesheet("/a.css"));
        let icon = Item::from(LinkItem::new(LinkRel::Other("icon".into()), "/a.css"));
        assert_eq!(a.dedup_key(), Some("/a.css"));
        assert_eq!(icon.dedup_key(), None);
    }

    #[test]
    fn test_identity_rules() {
        let keywords = Item::from(KeyedMeta::new(MetaType::Name, "keywords", "a"));
        let keywords_again = Item::from(KeyedMeta::new(MetaType::Name, "keywords", "b"));
        let description = Item::from(KeyedMeta::new(MetaType::Name, "description", "c"));
        let pragma = Item::from(KeyedMeta::new(MetaType::HttpEquiv, "keywords", "d"));
        let utf8 = Item::from(MetaItem::charset("utf-8"));
        let latin = Item::from(MetaItem::charset("iso-8859-1"));

        assert!(keywords.same_identity(&keywords_again));
        assert!(!keywords.same_identity(&description));
        assert!(!keywords.same_identity(&pragma));
        assert!(utf8.same_identity(&latin));
        assert!(!utf8.same_identity(&keywords));

        let sheet = Item::from(LinkItem::stylesheet("/a.css"));
        let other_sheet = Item::from(LinkItem::stylesheet("/b.css"));
        let prev = Item::from(LinkItem::prev("/p"));
        assert!(sheet.same_identity(&other_sheet));
        assert!(!sheet.same_identity(&prev));
    }

    #[test]
    fn test_attribute_value_coercion() {
        assert_eq!(attribute_value(&json!("x")), Some("x".to_string()));
        assert_eq!(attribute_value(&json!(12)), Some("12".to_string()));
        assert_eq!(attribute_value(&json!(["print", "screen"])), Some("print,screen".to_string()));
        assert_eq!(attribute_value(&json!(null)), None);
        assert_eq!(attribute_value(&json!({ "a": 1 })), None);
        assert_eq!(text(&json!(["a"])), None);
    }

    #[test]
    fn test_conditional_value() {
        assert_eq!(conditional_value(&json!(false)), Some(Conditional::Flag(false)));
        assert_eq!(conditional_value(&json!("ie6")), Some(Conditional::from("ie6")));
        assert_eq!(conditional_value(&json!(null)), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Item::from(LinkItem::stylesheet("/a")).kind(), ItemKind::Stylesheet);
        assert_eq!(Item::from(MetaItem::charset("utf-8")).kind(), ItemKind::MetaCharset);
        assert_eq!(ItemKind::MetaHttpEquiv.to_string(), "MetaHttpEquiv");
    }
}
