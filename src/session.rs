use std::sync::Arc;

use satinalma_onay_common::cookie_value;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// One place a session token can be persisted.
pub trait TokenStore: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn remove(&self);
}

/// Token kept in `window.localStorage` under `key`.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        Self::storage()
            .and_then(|s| s.get_item(&self.key).ok().flatten())
            .filter(|t| !t.is_empty())
    }

    fn write(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("Failed to write '{}' to local storage", self.key);
            }
        }
    }

    fn remove(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// Token kept in a same-named cookie so the host server can see it.
pub struct CookieStore {
    name: String,
}

impl CookieStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
    }
}

impl TokenStore for CookieStore {
    fn read(&self) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        cookie_value(&cookies, &self.name)
    }

    fn write(&self, token: &str) {
        if let Some(doc) = Self::document() {
            if doc.set_cookie(&cookie_assignment(&self.name, token)).is_err() {
                log::warn!("Failed to set cookie '{}'", self.name);
            }
        }
    }

    fn remove(&self) {
        if let Some(doc) = Self::document() {
            let _ = doc.set_cookie(&cookie_expiry(&self.name));
        }
    }
}

pub fn cookie_assignment(name: &str, token: &str) -> String {
    format!("{}={}; path=/; SameSite=Lax", name, urlencoding::encode(token))
}

pub fn cookie_expiry(name: &str) -> String {
    format!("{}=; path=/; max-age=0", name)
}

/// The user's credential, hiding that it lives in two stores.
///
/// Local storage is authoritative for the browser: `token` reads only from
/// it. The cookie exists for the host server's request-time check and is
/// read here only by `resync`. Writes always touch both.
#[derive(Clone)]
pub struct Session {
    local: Arc<dyn TokenStore>,
    cookie: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(local: Arc<dyn TokenStore>, cookie: Arc<dyn TokenStore>) -> Self {
        Self { local, cookie }
    }

    pub fn browser(token_key: &str) -> Self {
        Self::new(
            Arc::new(LocalStorageStore::new(token_key)),
            Arc::new(CookieStore::new(token_key)),
        )
    }

    pub fn token(&self) -> Option<String> {
        self.local.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn establish(&self, token: &str) {
        self.local.write(token);
        self.cookie.write(token);
        log::info!("Session established");
    }

    /// Copy a token found in either store into both. Returns whether one was found.
    pub fn resync(&self) -> bool {
        match self.local.read().or_else(|| self.cookie.read()) {
            Some(token) => {
                self.local.write(&token);
                self.cookie.write(&token);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.local.remove();
        self.cookie.remove();
        log::info!("Session cleared");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore(Mutex<Option<String>>);

    impl MemoryStore {
        pub fn with(token: &str) -> Self {
            Self(Mutex::new(Some(token.to_string())))
        }

        pub fn get(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl TokenStore for MemoryStore {
        fn read(&self) -> Option<String> {
            self.get().filter(|t| !t.is_empty())
        }

        fn write(&self, token: &str) {
            *self.0.lock().unwrap() = Some(token.to_string());
        }

        fn remove(&self) {
            *self.0.lock().unwrap() = None;
        }
    }

    pub fn session_with(
        local: Option<&str>,
        cookie: Option<&str>,
    ) -> (Session, Arc<MemoryStore>, Arc<MemoryStore>) {
        let local = Arc::new(local.map(MemoryStore::with).unwrap_or_default());
        let cookie = Arc::new(cookie.map(MemoryStore::with).unwrap_or_default());
        let session = Session::new(local.clone(), cookie.clone());
        (session, local, cookie)
    }

    #[test]
    fn test_token_prefers_local_storage() {
        let (session, _, _) = session_with(Some("local"), Some("cookie"));
        assert_eq!(session.token().as_deref(), Some("local"));
    }

    #[test]
    fn test_token_reads_local_storage_only() {
        let (session, _, _) = session_with(None, Some("cookie"));
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());

        let (session, _, _) = session_with(Some("local"), None);
        assert!(session.is_authenticated());

        let (session, _, _) = session_with(None, None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let (session, _, _) = session_with(Some(""), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_establish_and_clear_touch_both_stores() {
        let (session, local, cookie) = session_with(None, None);
        session.establish("abc");
        assert_eq!(local.get().as_deref(), Some("abc"));
        assert_eq!(cookie.get().as_deref(), Some("abc"));

        session.clear();
        assert_eq!(local.get(), None);
        assert_eq!(cookie.get(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_resync_fills_missing_store() {
        let (session, local, cookie) = session_with(None, Some("from-cookie"));
        assert!(!session.is_authenticated());
        assert!(session.resync());
        assert!(session.is_authenticated());
        assert_eq!(local.get().as_deref(), Some("from-cookie"));
        assert_eq!(cookie.get().as_deref(), Some("from-cookie"));

        let (session, _, _) = session_with(None, None);
        assert!(!session.resync());
    }

    #[test]
    fn test_cookie_strings() {
        assert_eq!(cookie_assignment("token", "a b"), "token=a%20b; path=/; SameSite=Lax");
        assert_eq!(cookie_expiry("token"), "token=; path=/; max-age=0");
    }
}
