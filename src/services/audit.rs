//! Activity audit sink boundary.
//!
//! The lifecycle emits one human-readable description per successful
//! mutation. Persisting those lines is someone else's job; a sink
//! failure is logged and never aborts the booking operation.

use log::info;
use std::sync::{Arc, Mutex};

/// Error reported by an audit sink. Carries only a message: the
/// lifecycle logs it and moves on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("audit sink failure: {0}")]
pub struct AuditError(pub String);

/// Fire-and-forget activity sink.
pub trait AuditSink: Send + Sync {
    fn record(&self, description: &str) -> Result<(), AuditError>;
}

/// Default sink: writes activity lines to the application log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudit;

impl AuditSink for LogAudit {
    fn record(&self, description: &str) -> Result<(), AuditError> {
        info!("activity: {}", description);
        Ok(())
    }
}

/// In-memory sink for tests: collects descriptions for later assertion.
#[derive(Debug, Default, Clone)]
pub struct MemoryAudit {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, description: &str) -> Result<(), AuditError> {
        self.entries.lock().unwrap().push(description.to_string());
        Ok(())
    }
}
