use std::path::PathBuf;

use crate::error::AuthError;

pub const AUTH_STATE_KEY: &str = "auth_state";

/// Storage capability for the pending auth state value.
///
/// Exactly one value is ever stored: the random state generated before the
/// authorization redirect. The abstraction exists so the auth client can be
/// exercised in tests without touching the real filesystem backend.
pub trait AuthStateStore {
    /// Reads the currently persisted state, or `None` if absent.
    async fn get(&self) -> Result<Option<String>, AuthError>;

    /// Persists a new state value, overwriting any prior one.
    async fn set(&self, value: &str) -> Result<(), AuthError>;

    /// Removes the persisted state. Removing an absent value is not an error.
    async fn remove(&self) -> Result<(), AuthError>;
}

/// File-backed state store in the platform local data directory.
///
/// The value survives across process runs, which is what makes the
/// authorize/callback round trip work: the redirect leaves the process and
/// only the durable state connects the returning callback to the attempt
/// that initiated it.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("spotlogin/state/{}", AUTH_STATE_KEY));
        Self { path }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateStore for FileStateStore {
    async fn get(&self) -> Result<Option<String>, AuthError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(value) => {
                let value = value.trim().to_string();
                if value.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(value))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Store(e.to_string())),
        }
    }

    async fn set(&self, value: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Store(e.to_string()))?;
        }
        async_fs::write(&self.path, value)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    async fn remove(&self) -> Result<(), AuthError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Store(e.to_string())),
        }
    }
}

/// In-memory state store used by tests.
pub struct MemoryStateStore {
    value: std::sync::Mutex<Option<String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            value: std::sync::Mutex::new(None),
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: std::sync::Mutex::new(Some(value.to_string())),
        }
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateStore for MemoryStateStore {
    async fn get(&self) -> Result<Option<String>, AuthError> {
        Ok(self.value.lock().unwrap().clone())
    }

    async fn set(&self, value: &str) -> Result<(), AuthError> {
        *self.value.lock().unwrap() = Some(value.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), AuthError> {
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}
