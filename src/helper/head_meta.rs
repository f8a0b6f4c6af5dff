use super::{HelperCore, Placement};
use crate::dispatch::{Insertion, META_HANDLERS, dispatch};
use crate::error::HeadError;
use crate::item::{Item, ItemStack, KeyedMeta, MetaItem, MetaType};
use crate::policy::validate_meta;
use headtags_escape::Escaper;
use headtags_render_core::{Diagnostics, Indent, RenderContext, RenderOptions};
use headtags_stack::Key;
use headtags_types::{Doctype, DoctypeRegistry};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Queues `<meta>` tags and renders them.
///
/// Every insertion is checked against the registry's current doctype, so a
/// `property` tag cannot be queued while an HTML4 doctype is active. If the
/// doctype changes afterwards, tags that became illegal are skipped at render
/// time with a warning instead.
#[derive(Debug, Default)]
pub struct HeadMeta {
    core: HelperCore,
}

impl HeadMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: Arc<DoctypeRegistry>) -> Self {
        self.core.registry = registry;
        self
    }

    pub fn with_escaper(mut self, escaper: Arc<dyn Escaper + Send + Sync>) -> Self {
        self.core.escaper = escaper;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics + Send + Sync>) -> Self {
        self.core.diagnostics = diagnostics;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.core.options = options;
        self
    }

    /// The doctype insertions are currently validated against.
    pub fn doctype(&self) -> Doctype {
        self.core.doctype()
    }

    fn insert(&mut self, insertion: Insertion, meta: MetaItem) -> Result<Key, HeadError> {
        validate_meta(&meta, self.core.doctype())
            .map_err(|reason| HeadError::invalid(insertion.operation(), reason))?;
        Ok(self.core.insert(insertion, meta.into()))
    }

    pub fn append(&mut self, meta: impl Into<MetaItem>) -> Result<Key, HeadError> {
        self.insert(Insertion::Append, meta.into())
    }

    pub fn prepend(&mut self, meta: impl Into<MetaItem>) -> Result<Key, HeadError> {
        self.insert(Insertion::Prepend, meta.into())
    }

    /// Replaces every queued tag with the same type and key.
    pub fn set(&mut self, meta: impl Into<MetaItem>) -> Result<Key, HeadError> {
        self.insert(Insertion::Set, meta.into())
    }

    pub fn offset_set(&mut self, key: Key, meta: impl Into<MetaItem>) -> Result<Key, HeadError> {
        self.insert(Insertion::At(key), meta.into())
    }

    /// Inserts an untyped value, which must be a meta record.
    pub fn insert_value(&mut self, value: &Value, insertion: Insertion) -> Result<Key, HeadError> {
        let operation = insertion.operation();
        let Value::Object(record) = value else {
            return Err(HeadError::invalid(operation, "expected a meta record"));
        };
        let meta = MetaItem::from_record(record)
            .map_err(|reason| HeadError::invalid(operation, reason))?;
        self.insert(insertion, meta)
    }

    /// Queues `<meta {key_type}="{key}" content="{content}">`.
    ///
    /// `key_type` is one of `name`, `http-equiv`, `property` or `itemprop`.
    pub fn meta(
        &mut self,
        content: impl Into<String>,
        key: impl Into<String>,
        key_type: &str,
        modifiers: Option<&Map<String, Value>>,
        placement: Placement,
    ) -> Result<&mut Self, HeadError> {
        let insertion = Insertion::from(placement);
        let meta_type = MetaType::parse(key_type).ok_or_else(|| {
            HeadError::invalid(
                insertion.operation(),
                format!("Invalid type \"{}\" provided for meta", key_type),
            )
        })?;
        let mut meta = KeyedMeta::new(meta_type, key, content);
        if let Some(modifiers) = modifiers {
            meta = meta.with_modifiers(modifiers);
        }
        self.insert(insertion, meta.into())?;
        Ok(self)
    }

    /// Replaces any queued charset. Only legal under HTML5 doctypes.
    pub fn set_charset(&mut self, charset: impl Into<String>) -> Result<&mut Self, HeadError> {
        self.insert(Insertion::Set, MetaItem::charset(charset))?;
        Ok(self)
    }

    /// Name-based entry point, e.g. `setName` or `offsetSetHttpEquiv`.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<&mut Self, HeadError> {
        let (insertion, item) = dispatch(META_HANDLERS, method, args)?;
        match item {
            Item::Meta(meta) => self.insert(insertion, meta)?,
            Item::Link(_) => {
                return Err(HeadError::UnknownOperation {
                    method: method.to_string(),
                });
            }
        };
        Ok(self)
    }

    pub fn set_indent(&mut self, indent: impl Into<Indent>) -> &mut Self {
        self.core.set_indent(indent);
        self
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.core.options.separator = separator.into();
        self
    }

    pub fn set_auto_escape(&mut self, auto_escape: bool) -> &mut Self {
        self.core.options.auto_escape = auto_escape;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.core.options
    }

    pub fn stack(&self) -> &ItemStack {
        &self.core.stack
    }

    /// Queued tags in stack order. Charsets are not moved to the front here.
    pub fn metas(&self) -> impl Iterator<Item = (Key, &MetaItem)> {
        self.core.stack.iter().filter_map(|(key, item)| item.as_meta().map(|meta| (key, meta)))
    }

    pub fn len(&self) -> usize {
        self.core.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.stack.is_empty()
    }

    pub fn remove(&mut self, key: Key) -> Option<Item> {
        self.core.stack.remove(key)
    }

    pub fn clear(&mut self) {
        self.core.stack.clear();
    }

    pub fn to_html(&self) -> String {
        self.core.render()
    }

    pub fn render_with(&self, ctx: &RenderContext<'_>) -> String {
        crate::render::render(&self.core.stack, ctx)
    }
}

impl fmt::Display for HeadMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
