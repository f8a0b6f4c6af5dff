use super::{HelperCore, Placement};
use crate::dispatch::{Insertion, LINK_HANDLERS, dispatch};
use crate::error::HeadError;
use crate::item::{Item, ItemStack, LinkItem};
use headtags_escape::Escaper;
use headtags_render_core::{Diagnostics, Indent, RenderContext, RenderOptions};
use headtags_stack::Key;
use headtags_types::DoctypeRegistry;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Queues `<link>` tags and renders them.
///
/// ```
/// use headtags::HeadLink;
/// use serde_json::json;
///
/// let mut links = HeadLink::new();
/// links.call("appendStylesheet", &[json!("foo")]).unwrap();
/// links.call("prependStylesheet", &[json!("bar")]).unwrap();
/// assert!(links.to_html().starts_with("<link rel=\"stylesheet\" href=\"bar\""));
/// ```
#[derive(Debug, Default)]
pub struct HeadLink {
    core: HelperCore,
}

impl HeadLink {
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

    pub fn append(&mut self, link: LinkItem) -> Key {
        self.core.insert(Insertion::Append, link.into())
    }

    pub fn prepend(&mut self, link: LinkItem) -> Key {
        self.core.insert(Insertion::Prepend, link.into())
    }

    /// Replaces every queued link with the same `rel`.
    pub fn set(&mut self, link: LinkItem) -> Key {
        self.core.insert(Insertion::Set, link.into())
    }

    pub fn offset_set(&mut self, key: Key, link: LinkItem) -> Key {
        self.core.insert(Insertion::At(key), link.into())
    }

    /// Inserts an untyped value, which must be a link attribute record with
    /// at least `rel` and `href`.
    pub fn insert_value(&mut self, value: &Value, insertion: Insertion) -> Result<Key, HeadError> {
        let operation = insertion.operation();
        let Value::Object(record) = value else {
            return Err(HeadError::invalid(operation, "expected a link attribute record"));
        };
        let link = LinkItem::from_record(record, None)
            .map_err(|reason| HeadError::invalid(operation, reason))?;
        Ok(self.core.insert(insertion, link.into()))
    }

    /// Queues a link built from an attribute record.
    pub fn link(
        &mut self,
        attributes: &Value,
        placement: Placement,
    ) -> Result<&mut Self, HeadError> {
        self.insert_value(attributes, placement.into())?;
        Ok(self)
    }

    /// Name-based entry point, e.g. `appendStylesheet` or `offsetSetPrev`.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<&mut Self, HeadError> {
        let (insertion, item) = dispatch(LINK_HANDLERS, method, args)?;
        self.core.insert(insertion, item);
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

    /// Queued links in render order.
    pub fn links(&self) -> impl Iterator<Item = (Key, &LinkItem)> {
        self.core.stack.iter().filter_map(|(key, item)| item.as_link().map(|link| (key, link)))
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

    /// Renders with the helper's own options and the registry's doctype.
    pub fn to_html(&self) -> String {
        self.core.render()
    }

    /// Renders with a caller-supplied context.
    pub fn render_with(&self, ctx: &RenderContext<'_>) -> String {
        crate::render::render(&self.core.stack, ctx)
    }
}

impl fmt::Display for HeadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
