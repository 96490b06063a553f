use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
}

/// Two operations against a single opaque remote resource: fetch the
/// latest body, or overwrite it whole. Implementations fail with a
/// status and body; they never retry.
pub trait RemoteTransport {
    fn fetch_latest(&self) -> Result<String, TransportError>;

    fn overwrite(&self, body: &str) -> Result<(), TransportError>;
}

impl<T: RemoteTransport + ?Sized> RemoteTransport for Box<T> {
    fn fetch_latest(&self) -> Result<String, TransportError> {
        (**self).fetch_latest()
    }

    fn overwrite(&self, body: &str) -> Result<(), TransportError> {
        (**self).overwrite(body)
    }
}

/// In-process transport for tests and offline play. Clones share the
/// same document.
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    body: Arc<Mutex<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::with_body("{}")
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Arc::new(Mutex::new(body.into())),
        }
    }

    pub fn body(&self) -> String {
        match self.body.lock() {
            Ok(body) => body.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteTransport for MemoryTransport {
    fn fetch_latest(&self) -> Result<String, TransportError> {
        Ok(self.body())
    }

    fn overwrite(&self, body: &str) -> Result<(), TransportError> {
        match self.body.lock() {
            Ok(mut slot) => {
                *slot = body.to_string();
                Ok(())
            }
            Err(poisoned) => {
                *poisoned.into_inner() = body.to_string();
                Ok(())
            }
        }
    }
}
