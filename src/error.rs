// src/error.rs
use thiserror::Error;

fn plural(count: &usize) -> &'static str {
    if *count == 1 { "" } else { "s" }
}

/// Hard failures raised while queueing items.
///
/// Render-time problems are not errors; they are reported as
/// [`RenderWarning`](headtags_render_core::RenderWarning)s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadError {
    /// The value could not be shaped into a valid item for its family, or the
    /// item is not legal under the doctype active at insertion time.
    #[error("Invalid value passed to {operation}: {reason}")]
    InvalidItem {
        operation: &'static str,
        reason: String,
    },

    #[error("{kind} tags require {required} argument{}; {provided} provided", plural(.required))]
    Arity {
        kind: &'static str,
        required: usize,
        provided: usize,
    },

    #[error("Method \"{method}\" does not exist")]
    UnknownOperation { method: String },
}

impl HeadError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        HeadError::InvalidItem {
            operation,
            reason: reason.into(),
        }
    }
}
