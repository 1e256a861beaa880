// src/modules/auth/application/token_cache.rs
use tokio::sync::{watch, RwLock};
use tracing::warn;

/// Holds the bearer token and the authenticated flag the browser keeps in
/// persistent storage. Any 401 anywhere clears the cache and broadcasts a
/// forced logout so the login surface can take over.
pub struct TokenCache {
    token: RwLock<Option<String>>,
    forced_logout: watch::Sender<bool>,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    pub fn new() -> Self {
        let (forced_logout, _) = watch::channel(false);
        Self {
            token: RwLock::new(None),
            forced_logout,
        }
    }

    pub async fn store_token(&self, token: String) {
        *self.token.write().await = Some(token);
        self.forced_logout.send_replace(false);
    }

    pub async fn bearer(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Voluntary logout from the panel's logout action.
    pub async fn logout(&self) {
        *self.token.write().await = None;
    }

    /// The backend rejected our token. Drop it and push observers to the
    /// login surface.
    pub async fn force_logout(&self) {
        warn!("bearer token rejected, forcing logout");
        *self.token.write().await = None;
        self.forced_logout.send_replace(true);
    }

    /// Observers get `true` whenever a 401 invalidated the session.
    pub fn logout_signal(&self) -> watch::Receiver<bool> {
        self.forced_logout.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_clears_the_token() {
        let cache = TokenCache::new();
        assert!(!cache.is_authenticated().await);

        cache.store_token("abc".to_string()).await;
        assert_eq!(cache.bearer().await.as_deref(), Some("abc"));

        cache.logout().await;
        assert!(cache.bearer().await.is_none());
    }

    #[tokio::test]
    async fn forced_logout_notifies_observers() {
        let cache = TokenCache::new();
        cache.store_token("abc".to_string()).await;
        let mut signal = cache.logout_signal();
        assert!(!*signal.borrow());

        cache.force_logout().await;
        signal.changed().await.unwrap();
        assert!(*signal.borrow());
        assert!(!cache.is_authenticated().await);
    }

    #[tokio::test]
    async fn a_new_login_resets_the_forced_logout_flag() {
        let cache = TokenCache::new();
        cache.force_logout().await;
        cache.store_token("fresh".to_string()).await;
        assert!(!*cache.logout_signal().borrow());
    }
}
