//! Process-wide session state: the bearer token, the current location, and
//! the logout-and-redirect policy that runs when the server rejects a token.
//!
//! # Design
//! The executor does not clear tokens or navigate. On a 401 it notifies its
//! `AuthExpiredListener`; `SessionGuard` is the one listener that owns the
//! policy. Both steps are idempotent, so concurrent 401s running the guard
//! twice leave the same end state.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Where the bearer token lives between requests.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> io::Result<()>;
    /// Remove the token. Clearing an empty store is a no-op.
    fn clear(&self);
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) -> io::Result<()> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Token persisted as a single file named after the token key, so it
/// survives restarts the way a browser cookie does.
///
/// On unix the file is owner read/write only (0600). Elsewhere it inherits
/// the directory's default permissions.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(key),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn set(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            // mode() only applies on creation; tighten a pre-existing file too
            if self.path.exists() {
                std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
            }
        }
        let mut file = options.open(&self.path)?;
        file.write_all(token.as_bytes())
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to remove token file: {e}")
            }
        }
    }
}

/// The embedding UI's location. `navigate` is a hard redirect.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Navigator that only records where it has been sent.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: RwLock<NavState>,
}

#[derive(Debug)]
struct NavState {
    current: String,
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(NavState {
                current: start.into(),
                history: Vec::new(),
            }),
        }
    }

    /// Every path passed to `navigate`, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).history.clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.state.read().unwrap_or_else(|e| e.into_inner()).current.clone()
    }

    fn navigate(&self, path: &str) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.current = path.to_string();
        state.history.push(path.to_string());
    }
}

/// Notified by the executor whenever the server answers 401.
pub trait AuthExpiredListener: Send + Sync {
    fn on_auth_expired(&self);
}

/// Clears the stored token and sends the user to the login route.
pub struct SessionGuard<S, N> {
    store: S,
    navigator: N,
    login_path: String,
}

impl<S: TokenStore, N: Navigator> SessionGuard<S, N> {
    pub fn new(store: S, navigator: N, login_path: impl Into<String>) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl<S: TokenStore, N: Navigator> AuthExpiredListener for SessionGuard<S, N> {
    fn on_auth_expired(&self) {
        self.store.clear();
        if self.navigator.current_path() != self.login_path {
            tracing::info!(to = %self.login_path, "session expired, redirecting to login");
            self.navigator.navigate(&self.login_path);
        }
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) -> io::Result<()> {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

impl<T: Navigator + ?Sized> Navigator for std::sync::Arc<T> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn guard_clears_token_and_redirects() {
        let store = Arc::new(MemoryTokenStore::with_token("tok123"));
        let nav = Arc::new(MemoryNavigator::new("/users"));
        let guard = SessionGuard::new(store.clone(), nav.clone(), "/login");

        guard.on_auth_expired();

        assert_eq!(store.get(), None);
        assert_eq!(nav.current_path(), "/login");
        assert_eq!(nav.history(), vec!["/login".to_string()]);
    }

    #[test]
    fn guard_does_not_navigate_when_already_on_login() {
        let store = Arc::new(MemoryTokenStore::with_token("tok123"));
        let nav = Arc::new(MemoryNavigator::new("/login"));
        let guard = SessionGuard::new(store.clone(), nav.clone(), "/login");

        guard.on_auth_expired();

        assert_eq!(store.get(), None);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn guard_is_idempotent() {
        let store = Arc::new(MemoryTokenStore::with_token("tok123"));
        let nav = Arc::new(MemoryNavigator::new("/tickets"));
        let guard = SessionGuard::new(store, nav, "/login");

        guard.on_auth_expired();
        guard.on_auth_expired();

        assert_eq!(guard.store().get(), None);
        assert_eq!(guard.navigator().history().len(), 1);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session"), "admin_token");

        assert_eq!(store.get(), None);
        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        assert!(store.path().ends_with("admin_token"));

        store.clear();
        assert_eq!(store.get(), None);
        // second clear must not fail
        store.clear();
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path(), "admin_token");

        store.set("abc").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
        store.set("def").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get().as_deref(), Some("def"));
    }
}
