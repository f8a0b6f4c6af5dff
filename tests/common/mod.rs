#![allow(dead_code)]

use headtags::{
    Doctype, DoctypeRegistry, Escaper, HeadLink, HeadMeta, HtmlEscaper, RecordingDiagnostics,
};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A registry preset to `doctype`, for sharing between helpers in one test.
pub fn registry(doctype: Doctype) -> Arc<DoctypeRegistry> {
    Arc::new(DoctypeRegistry::with_doctype(doctype))
}

/// A link helper bound to `registry` that records its render warnings.
pub fn head_link(registry: &Arc<DoctypeRegistry>) -> (HeadLink, Arc<RecordingDiagnostics>) {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let helper = HeadLink::new()
        .with_registry(Arc::clone(registry))
        .with_diagnostics(diagnostics.clone());
    (helper, diagnostics)
}

/// A meta helper bound to `registry` that records its render warnings.
pub fn head_meta(registry: &Arc<DoctypeRegistry>) -> (HeadMeta, Arc<RecordingDiagnostics>) {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let helper = HeadMeta::new()
        .with_registry(Arc::clone(registry))
        .with_diagnostics(diagnostics.clone());
    (helper, diagnostics)
}

/// Escapes like the default escaper, for building expected output.
pub fn attr(value: &str) -> String {
    HtmlEscaper.escape_attribute(value).into_owned()
}

/// Counts non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
