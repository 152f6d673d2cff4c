//! Credential handling: the API key newtype and the persistence capability.
//!
//! The pipeline never reads ambient global state for the key. Callers load a
//! [`Credential`] through a [`CredentialStore`] (or construct one directly)
//! and pass it into every call. The store trait mirrors the lifecycle of the
//! surrounding application: load at startup, prompt the user if absent, save
//! on change.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, TagsmithError};

/// An API key for the remote model service.
///
/// The wrapped string is forwarded to the service as-is; no format checking
/// or expiry handling is performed. `Debug` output is redacted so the key
/// never leaks into logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Credential(key.into())
    }

    /// The raw key, for constructing the authenticated request.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Credential {
    fn from(key: &str) -> Self {
        Credential::new(key)
    }
}

impl From<String> for Credential {
    fn from(key: String) -> Self {
        Credential::new(key)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Credential(unset)")
        } else {
            write!(f, "Credential(***)")
        }
    }
}

/// Capability interface for persisting the API key between runs.
///
/// `load` returns `Ok(None)` when no key has been stored yet; that is the
/// signal for the caller to prompt the user. Implementations must not treat
/// absence as an error.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<Credential>>;
    fn save(&self, credential: &Credential) -> Result<()>;
}

/// Process-local credential store, mainly for tests and embedding hosts that
/// manage persistence themselves.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| TagsmithError::CredentialStore("credential slot poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| TagsmithError::CredentialStore("credential slot poisoned".to_string()))?;
        *slot = Some(credential.clone());
        Ok(())
    }
}

/// File-backed credential store: one key per file, plain text, trimmed on
/// load. A missing file or an empty file both mean "no key stored yet".
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential file yet");
                return Ok(None);
            }
            Err(e) => return Err(TagsmithError::CredentialStore(e.to_string())),
        };

        let key = contents.trim();
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(Credential::new(key)))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| TagsmithError::CredentialStore(e.to_string()))?;
        }
        std::fs::write(&self.path, credential.as_str())
            .map_err(|e| TagsmithError::CredentialStore(e.to_string()))?;
        debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }
}
