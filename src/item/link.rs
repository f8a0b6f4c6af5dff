use super::{ItemKind, attribute_value, conditional_value, text};
use headtags_types::Conditional;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Optional `<link>` attributes, in the order they are rendered after
/// `rel` and `href`.
pub const LINK_ATTRIBUTES: &[&str] = &[
    "as",
    "charset",
    "crossorigin",
    "hreflang",
    "id",
    "integrity",
    "itemprop",
    "media",
    "referrerpolicy",
    "rev",
    "sizes",
    "title",
    "type",
];

const CONDITIONAL_KEY: &str = "conditionalStylesheet";
const EXTRAS_KEY: &str = "extras";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkRel {
    Stylesheet,
    Alternate,
    Prev,
    Next,
    Other(String),
}

impl LinkRel {
    pub fn as_str(&self) -> &str {
        match self {
            LinkRel::Stylesheet => "stylesheet",
            LinkRel::Alternate => "alternate",
            LinkRel::Prev => "prev",
            LinkRel::Next => "next",
            LinkRel::Other(rel) => rel,
        }
    }

    pub fn parse(rel: &str) -> Self {
        match rel.to_ascii_lowercase().as_str() {
            "stylesheet" => LinkRel::Stylesheet,
            "alternate" => LinkRel::Alternate,
            "prev" => LinkRel::Prev,
            "next" => LinkRel::Next,
            _ => LinkRel::Other(rel.to_string()),
        }
    }
}

impl fmt::Display for LinkRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued `<link>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    rel: LinkRel,
    href: String,
    attributes: BTreeMap<&'static str, String>,
    conditional: Conditional,
}

impl LinkItem {
    pub fn new(rel: LinkRel, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
            attributes: BTreeMap::new(),
            conditional: Conditional::default(),
        }
    }

    /// A `text/css` stylesheet for the `screen` media.
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self::new(LinkRel::Stylesheet, href)
            .with_attribute("media", "screen")
            .with_attribute("type", "text/css")
    }

    pub fn alternate(
        href: impl Into<String>,
        mime: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::new(LinkRel::Alternate, href)
            .with_attribute("type", mime)
            .with_attribute("title", title)
    }

    pub fn prev(href: impl Into<String>) -> Self {
        Self::new(LinkRel::Prev, href)
    }

    pub fn next(href: impl Into<String>) -> Self {
        Self::new(LinkRel::Next, href)
    }

    /// Sets an optional attribute. Names outside [`LINK_ATTRIBUTES`] are dropped.
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        match LINK_ATTRIBUTES.iter().copied().find(|allowed| *allowed == name) {
            Some(allowed) => {
                self.attributes.insert(allowed, value.into());
            }
            None => log::debug!("Dropping unsupported link attribute '{}'", name),
        }
        self
    }

    /// Merges a record of optional attributes through the allow-list.
    pub fn with_extras(self, extras: &Map<String, Value>) -> Self {
        extras.iter().fold(self, |link, (name, value)| match attribute_value(value) {
            Some(value) => link.with_attribute(name, value),
            None => link,
        })
    }

    pub fn with_conditional(mut self, conditional: impl Into<Conditional>) -> Self {
        self.conditional = conditional.into();
        self
    }

    /// Builds a link from an attribute record.
    ///
    /// `href` is required. `rel` is required unless `default_rel` is given.
    /// The `conditionalStylesheet` key sets the conditional and an `extras`
    /// record is merged like any other attributes.
    pub fn from_record(
        record: &Map<String, Value>,
        default_rel: Option<LinkRel>,
    ) -> Result<Self, String> {
        let href = record
            .get("href")
            .and_then(text)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| "link records require an href".to_string())?;
        let rel = match record.get("rel").and_then(text) {
            Some(rel) if !rel.is_empty() => LinkRel::parse(&rel),
            _ => default_rel.ok_or_else(|| "link records require a rel".to_string())?,
        };

        let mut link = Self::new(rel, href);
        for (name, value) in record {
            match name.as_str() {
                "rel" | "href" => {}
                CONDITIONAL_KEY => {
                    if let Some(conditional) = conditional_value(value) {
                        link.conditional = conditional;
                    }
                }
                EXTRAS_KEY => {
                    if let Value::Object(extras) = value {
                        link = link.with_extras(extras);
                    }
                }
                _ => {
                    if let Some(value) = attribute_value(value) {
                        link = link.with_attribute(name, value);
                    }
                }
            }
        }
        Ok(link)
    }

    pub fn rel(&self) -> &LinkRel {
        &self.rel
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Optional attributes in render order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attributes.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn conditional(&self) -> &Conditional {
        &self.conditional
    }

    pub fn kind(&self) -> ItemKind {
        match self.rel {
            LinkRel::Stylesheet => ItemKind::Stylesheet,
            LinkRel::Alternate => ItemKind::Alternate,
            LinkRel::Prev => ItemKind::Prev,
            LinkRel::Next => ItemKind::Next,
            LinkRel::Other(_) => ItemKind::GenericLink,
        }
    }
}
