use crate::error::RenderWarning;
use std::sync::Mutex;

/// A sink for recoverable render-time failures.
pub trait Diagnostics {
    fn warn(&self, warning: &RenderWarning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, warning: &RenderWarning) {
        log::warn!("{}", warning);
    }
}

/// Keeps every warning it receives, for hosts that surface them later.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    warnings: Mutex<Vec<RenderWarning>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warnings seen so far.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn warnings(&self) -> Vec<RenderWarning> {
        self.warnings.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().map(|w| w.is_empty()).unwrap_or(true)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, warning: &RenderWarning) {
        log::warn!("{}", warning);
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning.clone());
        }
    }
}
