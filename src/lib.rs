pub mod config;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::content;
pub use modules::session;
pub use modules::timeline;

use std::sync::Arc;

use crate::auth::application::token_cache::TokenCache;
use crate::auth::application::use_cases::login_user::{ILoginUseCase, LoginUseCase};
use crate::config::Config;
use crate::content::adapter::outgoing::RestGateway;
use crate::content::application::services::content_store::ContentStore;
use crate::session::application::edit_session::EditSession;
use crate::session::application::intro_gate::IntroGate;
use crate::shared::error::GatewayError;

#[cfg(test)]
mod tests;

/// Composition root for the admin client: builds the REST gateway once and
/// hands the same instance to the store and the login use case.
pub struct AdminContext {
    pub config: Config,
    pub tokens: Arc<TokenCache>,
    pub store: Arc<ContentStore>,
    pub login: Arc<dyn ILoginUseCase>,
    pub intro: IntroGate,
}

impl AdminContext {
    pub fn new(config: Config) -> Result<Self, GatewayError> {
        let tokens = Arc::new(TokenCache::new());
        let gateway = Arc::new(RestGateway::new(&config, Arc::clone(&tokens))?);
        let store = Arc::new(ContentStore::new(gateway.clone(), &config));
        let login = Arc::new(LoginUseCase::new(gateway, Arc::clone(&tokens)));
        Ok(Self {
            config,
            tokens,
            store,
            login,
            intro: IntroGate::default(),
        })
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(Config::from_env())
    }

    /// A fresh per-mount edit session over the shared store. The panel
    /// stops the store's polling while one of these is alive.
    pub fn edit_session(&self) -> EditSession {
        EditSession::new(Arc::clone(&self.store), self.config.clone())
    }
}
