use headtags_types::Doctype;
use thiserror::Error;

/// A recoverable failure detected while rendering a single item.
///
/// These never abort a render. The offending item contributes no output and
/// the warning goes to the active [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    #[error("Invalid type \"{meta_type}\" provided for meta; not supported by doctype {doctype}")]
    IllegalMetaType { meta_type: String, doctype: Doctype },

    #[error("Invalid modifier \"{modifier}\" provided; not supported by doctype {doctype}")]
    UnsupportedModifier { modifier: String, doctype: Doctype },

    #[error("<{tag}> tags require a non-empty \"{attribute}\" attribute")]
    MissingAttribute { tag: &'static str, attribute: &'static str },
}
