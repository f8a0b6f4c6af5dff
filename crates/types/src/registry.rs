//! A shared, resettable holder for the active doctype.
//!
//! Helpers that queue items hold an `Arc<DoctypeRegistry>` so several of them
//! agree on one doctype for a rendering session. The registry is set once per
//! session and reset between independent sessions; nothing resets it
//! implicitly.

use crate::doctype::Doctype;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct DoctypeRegistry {
    current: RwLock<Doctype>,
}

impl DoctypeRegistry {
    /// Creates a registry holding the default doctype (`HTML4_LOOSE`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctype(doctype: Doctype) -> Self {
        Self {
            current: RwLock::new(doctype),
        }
    }

    /// Returns the active doctype.
    ///
    /// Falls back to the default doctype if the internal lock is poisoned.
    pub fn current(&self) -> Doctype {
        self.current.read().map(|d| *d).unwrap_or_default()
    }

    /// Replaces the active doctype.
    ///
    /// Does nothing if the lock is poisoned.
    pub fn set(&self, doctype: Doctype) {
        if let Ok(mut current) = self.current.write() {
            *current = doctype;
        }
    }

    /// Restores the default doctype, ending the current session.
    pub fn reset(&self) {
        self.set(Doctype::default());
    }
}
