use super::{ItemKind, conditional_value, text};
use headtags_types::Conditional;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Modifiers rendered after `content`, in this order.
pub const MODIFIER_KEYS: &[&str] = &["lang", "scheme"];

/// Modifier that sets the conditional instead of an attribute.
const CONDITIONAL_MODIFIER: &str = "conditional";

/// The discriminating attribute of a keyed `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaType {
    Name,
    HttpEquiv,
    Property,
    Itemprop,
}

impl MetaType {
    pub const ALL: [MetaType; 4] = [
        MetaType::Name,
        MetaType::HttpEquiv,
        MetaType::Property,
        MetaType::Itemprop,
    ];

    /// The attribute name used in markup.
    pub fn attribute(&self) -> &'static str {
        match self {
            MetaType::Name => "name",
            MetaType::HttpEquiv => "http-equiv",
            MetaType::Property => "property",
            MetaType::Itemprop => "itemprop",
        }
    }

    pub fn parse(attribute: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|meta_type| meta_type.attribute().eq_ignore_ascii_case(attribute))
    }

    pub(crate) fn kind(&self) -> ItemKind {
        match self {
            MetaType::Name => ItemKind::MetaName,
            MetaType::HttpEquiv => ItemKind::MetaHttpEquiv,
            MetaType::Property => ItemKind::MetaProperty,
            MetaType::Itemprop => ItemKind::MetaItemprop,
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// A `<meta {type}="{key}" content="...">` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedMeta {
    meta_type: MetaType,
    key: String,
    content: String,
    modifiers: BTreeMap<&'static str, String>,
    conditional: Conditional,
}

impl KeyedMeta {
    pub fn new(meta_type: MetaType, key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            meta_type,
            key: key.into(),
            content: content.into(),
            modifiers: BTreeMap::new(),
            conditional: Conditional::default(),
        }
    }

    /// Sets a modifier. `conditional` sets the conditional; names outside
    /// [`MODIFIER_KEYS`] are dropped.
    pub fn with_modifier(mut self, name: &str, value: impl Into<String>) -> Self {
        if name == CONDITIONAL_MODIFIER {
            self.conditional = Conditional::Expr(value.into());
            return self;
        }
        match MODIFIER_KEYS.iter().copied().find(|allowed| *allowed == name) {
            Some(allowed) => {
                self.modifiers.insert(allowed, value.into());
            }
            None => log::debug!("Dropping unsupported meta modifier '{}'", name),
        }
        self
    }

    pub fn with_modifiers(mut self, modifiers: &Map<String, Value>) -> Self {
        for (name, value) in modifiers {
            if name == CONDITIONAL_MODIFIER {
                if let Some(conditional) = conditional_value(value) {
                    self.conditional = conditional;
                }
            } else if let Some(value) = text(value) {
                self = self.with_modifier(name, value);
            }
        }
        self
    }

    pub fn with_conditional(mut self, conditional: impl Into<Conditional>) -> Self {
        self.conditional = conditional.into();
        self
    }

    pub fn meta_type(&self) -> MetaType {
        self.meta_type
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn modifier(&self, name: &str) -> Option<&str> {
        self.modifiers.get(name).map(String::as_str)
    }

    /// Modifiers in render order.
    pub fn modifiers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.modifiers.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn conditional(&self) -> &Conditional {
        &self.conditional
    }
}

/// A queued `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaItem {
    Keyed(KeyedMeta),
    Charset(String),
}

impl MetaItem {
    pub fn charset(charset: impl Into<String>) -> Self {
        MetaItem::Charset(charset.into())
    }

    /// `name`, `http-equiv`, `property`, `itemprop` or `charset`.
    pub fn type_name(&self) -> &'static str {
        match self {
            MetaItem::Keyed(meta) => meta.meta_type.attribute(),
            MetaItem::Charset(_) => "charset",
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            MetaItem::Keyed(meta) => meta.meta_type.kind(),
            MetaItem::Charset(_) => ItemKind::MetaCharset,
        }
    }

    pub fn as_keyed(&self) -> Option<&KeyedMeta> {
        match self {
            MetaItem::Keyed(meta) => Some(meta),
            MetaItem::Charset(_) => None,
        }
    }

    /// Builds a meta tag from a record.
    ///
    /// Keyed tags look like `{"type": "name", "name": "keywords",
    /// "content": "...", "modifiers": {...}}`; charset tags like
    /// `{"type": "charset", "charset": "utf-8"}`.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, String> {
        let type_name = record
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| "meta records require a type".to_string())?;

        if type_name.eq_ignore_ascii_case("charset") {
            let charset = record
                .get("charset")
                .and_then(text)
                .filter(|charset| !charset.is_empty())
                .ok_or_else(|| "charset records require a charset".to_string())?;
            return Ok(MetaItem::Charset(charset));
        }

        let meta_type = MetaType::parse(type_name)
            .ok_or_else(|| format!("unknown meta type \"{}\"", type_name))?;
        let key = record
            .get(meta_type.attribute())
            .and_then(text)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| format!("{} meta records require a {} value", meta_type, meta_type))?;
        let content = record
            .get("content")
            .and_then(text)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| "meta records require content".to_string())?;

        let mut meta = KeyedMeta::new(meta_type, key, content);
        if let Some(Value::Object(modifiers)) = record.get("modifiers") {
            meta = meta.with_modifiers(modifiers);
        }
        Ok(MetaItem::Keyed(meta))
    }
}

impl From<KeyedMeta> for MetaItem {
    fn from(meta: KeyedMeta) -> Self {
        MetaItem::Keyed(meta)
    }
}
