//! Host-facing facades over an [`ItemStack`].
//!
//! [`HeadLink`] and [`HeadMeta`] own their stack and render options, and
//! share the doctype registry, escaper and diagnostic channel with whatever
//! else the host wires them to.

mod head_link;
mod head_meta;

pub use head_link::HeadLink;
pub use head_meta::HeadMeta;

use crate::dispatch::Insertion;
use crate::item::{Item, ItemStack};
use crate::render::render;
use headtags_escape::{Escaper, HtmlEscaper};
use headtags_render_core::{Diagnostics, Indent, LogDiagnostics, RenderContext, RenderOptions};
use headtags_stack::Key;
use headtags_types::{Doctype, DoctypeRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the generic entry points put a new item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Placement {
    #[default]
    Append,
    Prepend,
    Set,
}

impl From<Placement> for Insertion {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Append => Insertion::Append,
            Placement::Prepend => Insertion::Prepend,
            Placement::Set => Insertion::Set,
        }
    }
}

/// State shared by both helpers.
pub(crate) struct HelperCore {
    pub stack: ItemStack,
    pub options: RenderOptions,
    pub registry: Arc<DoctypeRegistry>,
    pub escaper: Arc<dyn Escaper + Send + Sync>,
    pub diagnostics: Arc<dyn Diagnostics + Send + Sync>,
}

impl Default for HelperCore {
    fn default() -> Self {
        Self {
            stack: ItemStack::new(),
            options: RenderOptions::default(),
            registry: Arc::new(DoctypeRegistry::new()),
            escaper: Arc::new(HtmlEscaper),
            diagnostics: Arc::new(LogDiagnostics),
        }
    }
}

impl HelperCore {
    pub fn doctype(&self) -> Doctype {
        self.registry.current()
    }

    pub fn insert(&mut self, insertion: Insertion, item: Item) -> Key {
        match insertion {
            Insertion::Append => self.stack.append(item),
            Insertion::Prepend => self.stack.prepend(item),
            Insertion::Set => self.stack.set(item),
            Insertion::At(key) => self.stack.offset_set(key, item),
        }
    }

    pub fn set_indent(&mut self, indent: impl Into<Indent>) {
        self.options.indent = indent.into();
    }

    /// Renders against the registry's current doctype.
    pub fn render(&self) -> String {
        let ctx = RenderContext::from_options(
            &self.options,
            self.doctype(),
            self.escaper.as_ref(),
            self.diagnostics.as_ref(),
        );
        render(&self.stack, &ctx)
    }
}

impl std::fmt::Debug for HelperCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperCore")
            .field("stack", &self.stack)
            .field("options", &self.options)
            .field("doctype", &self.doctype())
            .finish_non_exhaustive()
    }
}
