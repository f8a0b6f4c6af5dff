//! Name-based call surface: `{verb}{Suffix}(args...)`.
//!
//! A method name such as `prependStylesheet` or `offsetSetName` is split
//! into a verb and a suffix. The suffix selects a [`Handler`] from a fixed
//! table; the handler checks arity and builds the item, and the verb decides
//! how it is inserted.

use crate::error::HeadError;
use crate::item::{
    Item, ItemKind, KeyedMeta, LinkItem, LinkRel, MetaItem, MetaType, attribute_value,
    conditional_value, text,
};
use headtags_stack::Key;
use serde_json::{Map, Value};

/// How an item enters the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Append,
    Prepend,
    Set,
    At(Key),
}

impl Insertion {
    /// The operation name used in error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Insertion::Append => "append",
            Insertion::Prepend => "prepend",
            Insertion::Set => "set",
            Insertion::At(_) => "offsetSet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Append,
    Prepend,
    Set,
    OffsetSet,
}

const VERBS: [(&str, Verb); 4] = [
    ("offsetSet", Verb::OffsetSet),
    ("append", Verb::Append),
    ("prepend", Verb::Prepend),
    ("set", Verb::Set),
];

type PositionalFactory = fn(&[Value]) -> Result<Item, String>;
type RecordFactory = fn(&Map<String, Value>) -> Result<Item, String>;

/// One `{Suffix}` entry of a dispatch table.
pub(crate) struct Handler {
    pub suffix: &'static str,
    pub kind: ItemKind,
    /// Positional arguments required, not counting an `offsetSet` key.
    pub arity: usize,
    pub positional: PositionalFactory,
    /// Used instead of `positional` when the first argument is a record.
    pub record: Option<RecordFactory>,
}

pub(crate) const LINK_HANDLERS: &[Handler] = &[
    Handler {
        suffix: "Stylesheet",
        kind: ItemKind::Stylesheet,
        arity: 1,
        positional: stylesheet,
        record: Some(stylesheet_record),
    },
    Handler {
        suffix: "Alternate",
        kind: ItemKind::Alternate,
        arity: 3,
        positional: alternate,
        record: Some(alternate_record),
    },
    Handler {
        suffix: "Prev",
        kind: ItemKind::Prev,
        arity: 1,
        positional: prev,
        record: Some(prev_record),
    },
    Handler {
        suffix: "Next",
        kind: ItemKind::Next,
        arity: 1,
        positional: next,
        record: Some(next_record),
    },
];

pub(crate) const META_HANDLERS: &[Handler] = &[
    Handler {
        suffix: "Name",
        kind: ItemKind::MetaName,
        arity: 2,
        positional: meta_name,
        record: None,
    },
    Handler {
        suffix: "HttpEquiv",
        kind: ItemKind::MetaHttpEquiv,
        arity: 2,
        positional: meta_http_equiv,
        record: None,
    },
    Handler {
        suffix: "Property",
        kind: ItemKind::MetaProperty,
        arity: 2,
        positional: meta_property,
        record: None,
    },
    Handler {
        suffix: "Itemprop",
        kind: ItemKind::MetaItemprop,
        arity: 2,
        positional: meta_itemprop,
        record: None,
    },
    Handler {
        suffix: "Charset",
        kind: ItemKind::MetaCharset,
        arity: 1,
        positional: meta_charset,
        record: None,
    },
];

fn split_method(method: &str) -> Option<(Verb, &str)> {
    VERBS.iter().find_map(|(prefix, verb)| {
        method
            .strip_prefix(prefix)
            .filter(|suffix| !suffix.is_empty())
            .map(|suffix| (*verb, suffix))
    })
}

/// Resolves `method` against `table` and builds the item it describes.
pub(crate) fn dispatch(
    table: &[Handler],
    method: &str,
    args: &[Value],
) -> Result<(Insertion, Item), HeadError> {
    let unknown = || HeadError::UnknownOperation {
        method: method.to_string(),
    };
    let (verb, suffix) = split_method(method).ok_or_else(unknown)?;
    let handler = table.iter().find(|h| h.suffix == suffix).ok_or_else(unknown)?;
    log::trace!("Dispatching '{}' to the {} handler", method, handler.kind);

    let (insertion, rest, leading) = match verb {
        Verb::Append => (Insertion::Append, args, 0),
        Verb::Prepend => (Insertion::Prepend, args, 0),
        Verb::Set => (Insertion::Set, args, 0),
        Verb::OffsetSet => {
            let Some((key, rest)) = args.split_first() else {
                return Err(HeadError::Arity {
                    kind: handler.suffix,
                    required: handler.arity + 1,
                    provided: 0,
                });
            };
            let key = key.as_i64().ok_or_else(|| {
                HeadError::invalid("offsetSet", format!("expected an integer key, got {}", key))
            })?;
            (Insertion::At(key), rest, 1)
        }
    };

    if let (Some(record), Some(Value::Object(map))) = (handler.record, rest.first()) {
        let item = record(map).map_err(|reason| HeadError::invalid(insertion.operation(), reason))?;
        return Ok((insertion, item));
    }

    if rest.len() < handler.arity {
        return Err(HeadError::Arity {
            kind: handler.suffix,
            required: handler.arity + leading,
            provided: args.len(),
        });
    }

    let item = (handler.positional)(rest)
        .map_err(|reason| HeadError::invalid(insertion.operation(), reason))?;
    Ok((insertion, item))
}

// --- Positional argument helpers ---

fn required_text(args: &[Value], index: usize, what: &str) -> Result<String, String> {
    args.get(index)
        .and_then(text)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("{} must be a non-empty string", what))
}

fn extras(args: &[Value], index: usize) -> Option<&Map<String, Value>> {
    args.get(index).and_then(Value::as_object)
}

fn with_extras(link: LinkItem, extras: Option<&Map<String, Value>>) -> LinkItem {
    match extras {
        Some(extras) => link.with_extras(extras),
        None => link,
    }
}

// --- Link factories ---

/// `(href, media = "screen", conditional = false, extras = {})`
fn stylesheet(args: &[Value]) -> Result<Item, String> {
    let href = required_text(args, 0, "href")?;
    let mut link = LinkItem::stylesheet(href);
    if let Some(media) = args.get(1).and_then(attribute_value) {
        link = link.with_attribute("media", media);
    }
    if let Some(conditional) = args.get(2).and_then(conditional_value) {
        link = link.with_conditional(conditional);
    }
    Ok(with_extras(link, extras(args, 3)).into())
}

/// `(href, type, title, extras = {})`
fn alternate(args: &[Value]) -> Result<Item, String> {
    let href = required_text(args, 0, "href")?;
    let mime = required_text(args, 1, "type")?;
    let title = required_text(args, 2, "title")?;
    Ok(with_extras(LinkItem::alternate(href, mime, title), extras(args, 3)).into())
}

fn prev(args: &[Value]) -> Result<Item, String> {
    let href = required_text(args, 0, "href")?;
    Ok(with_extras(LinkItem::prev(href), extras(args, 1)).into())
}

fn next(args: &[Value]) -> Result<Item, String> {
    let href = required_text(args, 0, "href")?;
    Ok(with_extras(LinkItem::next(href), extras(args, 1)).into())
}

fn stylesheet_record(record: &Map<String, Value>) -> Result<Item, String> {
    LinkItem::from_record(record, Some(LinkRel::Stylesheet)).map(Item::from)
}

fn alternate_record(record: &Map<String, Value>) -> Result<Item, String> {
    LinkItem::from_record(record, Some(LinkRel::Alternate)).map(Item::from)
}

fn prev_record(record: &Map<String, Value>) -> Result<Item, String> {
    LinkItem::from_record(record, Some(LinkRel::Prev)).map(Item::from)
}

fn next_record(record: &Map<String, Value>) -> Result<Item, String> {
    LinkItem::from_record(record, Some(LinkRel::Next)).map(Item::from)
}

// --- Meta factories ---

/// `(key, content, modifiers = {})`
fn keyed_meta(meta_type: MetaType, args: &[Value]) -> Result<Item, String> {
    let key = required_text(args, 0, meta_type.attribute())?;
    let content = required_text(args, 1, "content")?;
    let mut meta = KeyedMeta::new(meta_type, key, content);
    if let Some(modifiers) = args.get(2).and_then(Value::as_object) {
        meta = meta.with_modifiers(modifiers);
    }
    Ok(meta.into())
}

fn meta_name(args: &[Value]) -> Result<Item, String> {
    keyed_meta(MetaType::Name, args)
}

fn meta_http_equiv(args: &[Value]) -> Result<Item, String> {
    keyed_meta(MetaType::HttpEquiv, args)
}

fn meta_property(args: &[Value]) -> Result<Item, String> {
    keyed_meta(MetaType::Property, args)
}

fn meta_itemprop(args: &[Value]) -> Result<Item, String> {
    keyed_meta(MetaType::Itemprop, args)
}

fn meta_charset(args: &[Value]) -> Result<Item, String> {
    let charset = required_text(args, 0, "charset")?;
    Ok(MetaItem::charset(charset).into())
}
