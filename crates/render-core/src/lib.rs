//! Core rendering abstractions shared by every tag family.
//!
//! This crate provides:
//! - `RenderOptions` and `Indent`, the host-configurable output settings
//! - `RenderContext`, the read-only snapshot a render pass works from
//! - `Diagnostics`, the side channel for recoverable render-time failures
//! - `RenderWarning`, the taxonomy of those failures

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderWarning;
pub use traits::{Diagnostics, LogDiagnostics, RecordingDiagnostics};
pub use types::{Indent, RenderContext, RenderOptions};
