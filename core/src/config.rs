//! Client configuration, populated from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::endpoints::AddressBook;
use crate::session::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Runtime configuration for the admin API client.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `BACKOFFICE_API_ROOT` | `http://127.0.0.1:3000` | Domain root every endpoint is built from |
/// | `BACKOFFICE_LOGIN_PATH` | `/login` | Route the session guard redirects to on 401 |
/// | `BACKOFFICE_TOKEN_KEY` | `admin_token` | Name the bearer token is stored under |
/// | `BACKOFFICE_TOKEN_DIR` | (absent = in-memory) | Directory for the persisted token |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_root: String,
    pub login_path: String,
    pub token_key: String,
    pub token_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_root: get("BACKOFFICE_API_ROOT").unwrap_or_else(|| "http://127.0.0.1:3000".into()),
            login_path: get("BACKOFFICE_LOGIN_PATH").unwrap_or_else(|| "/login".into()),
            token_key: get("BACKOFFICE_TOKEN_KEY").unwrap_or_else(|| "admin_token".into()),
            token_dir: get("BACKOFFICE_TOKEN_DIR").map(PathBuf::from),
        }
    }

    pub fn address_book(&self) -> AddressBook {
        AddressBook::new(&self.api_root)
    }

    /// File-backed when `token_dir` is set, in-memory otherwise.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        match &self.token_dir {
            Some(dir) => Arc::new(FileTokenStore::new(dir, &self.token_key)),
            None => Arc::new(MemoryTokenStore::new()),
        }
    }
}
