use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// `localStorage` key the bearer token lives under.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token storage failed: {0}")]
pub struct StoreError(pub String);

/// Somewhere to keep the bearer token between requests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StoreError>;
    fn remove(&self) -> Result<(), StoreError>;
}

/// Process-local store, used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        let mut slot = self.token.lock().map_err(|e| StoreError(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        let mut slot = self.token.lock().map_err(|e| StoreError(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// The browser's `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTokenStore;

#[cfg(target_arch = "wasm32")]
impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn require_storage() -> Result<web_sys::Storage, StoreError> {
        Self::storage().ok_or_else(|| StoreError("localStorage is unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        Self::require_storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StoreError(format!("{e:?}")))
    }

    fn remove(&self) -> Result<(), StoreError> {
        Self::require_storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|e| StoreError(format!("{e:?}")))
    }
}

/// Handle on the signed-in state, shared by the API client and the screens.
///
/// Cloning is cheap and every clone sees the same token.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// `localStorage` in the browser, memory everywhere else.
    pub fn local() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(BrowserTokenStore)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }

    pub fn token(&self) -> Option<SecretString> {
        self.store
            .load()
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token. A store failure is logged and
    /// returned; the caller stays signed out in that case.
    pub fn sign_in(&self, token: &SecretString) -> Result<(), StoreError> {
        self.store.save(token.expose_secret()).inspect_err(|error| {
            tracing::warn!(%error, "could not persist session token");
        })
    }

    /// Forget the token. A failure is logged and returned, since the old
    /// token would still be sent on the next request.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove().inspect_err(|error| {
            tracing::warn!(%error, "could not clear session token");
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
