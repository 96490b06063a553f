use deckforge_core::RngState;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity store io: {0}")]
    Io(String),
}

/// Durable local storage for the one string this system needs: the
/// device/user identifier.
pub trait IdentityStore {
    fn get(&self) -> Option<String>;

    fn set(&mut self, value: &str) -> Result<(), IdentityError>;

    fn has(&self) -> bool {
        self.get().is_some()
    }
}

/// Return the stored identifier, creating a random one on first use.
/// The identifier is never rotated once written.
pub fn ensure_user_id(
    store: &mut dyn IdentityStore,
    rng: &mut RngState,
) -> Result<String, IdentityError> {
    if let Some(id) = store.get() {
        return Ok(id);
    }
    let id = format!("user_{}", rng.hex_token(12));
    store.set(&id)?;
    tracing::debug!(%id, "created local user identity");
    Ok(id)
}

/// File-backed identity store.
#[derive(Debug, Clone)]
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("DECKFORGE_IDENTITY") {
            return Some(PathBuf::from(path));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".deckforge_identity"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentity {
    fn get(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn set(&mut self, value: &str) -> Result<(), IdentityError> {
        fs::write(&self.path, value).map_err(|err| IdentityError::Io(err.to_string()))
    }
}
