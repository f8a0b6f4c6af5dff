//! Ordered `<link>` and `<meta>` tag stacks for document heads.
//!
//! Items are queued under integer keys through [`HeadLink`] and [`HeadMeta`]
//! (or the name-based `call` surface, e.g. `appendStylesheet`,
//! `offsetSetName`) and rendered in ascending key order. Which meta types are
//! legal, and how void elements are closed, depends on the active
//! [`Doctype`].
//!
//! Insertion-time problems are hard errors ([`HeadError`]). Render-time
//! problems, such as a tag that became illegal after the doctype changed, are
//! reported as [`RenderWarning`]s through a [`Diagnostics`] channel and the
//! offending tag is skipped.

pub mod dispatch;
pub mod error;
pub mod helper;
pub mod item;
pub mod policy;
pub mod render;

pub use dispatch::Insertion;
pub use error::HeadError;
pub use helper::{HeadLink, HeadMeta, Placement};
pub use item::{Item, ItemKind, ItemStack, KeyedMeta, LinkItem, LinkRel, MetaItem, MetaType};
pub use render::render;

pub use headtags_escape::{Escaper, HtmlEscaper};
pub use headtags_render_core::{
    Diagnostics, Indent, LogDiagnostics, RecordingDiagnostics, RenderContext, RenderOptions,
    RenderWarning,
};
pub use headtags_stack::{Key, OrderedStack, StackEntry};
pub use headtags_types::{Conditional, Doctype, DoctypeRegistry};
