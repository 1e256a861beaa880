// login_user.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::auth::application::ports::outgoing::AuthGateway;
use crate::auth::application::token_cache::TokenCache;
use crate::auth::domain::entities::Credentials;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    Rejected(String),
}

#[async_trait]
pub trait ILoginUseCase: Send + Sync {
    async fn execute(&self, credentials: Credentials) -> Result<(), LoginError>;
}

pub struct LoginUseCase {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<TokenCache>,
}

impl LoginUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<TokenCache>) -> Self {
        Self { gateway, tokens }
    }
}

#[async_trait]
impl ILoginUseCase for LoginUseCase {
    async fn execute(&self, credentials: Credentials) -> Result<(), LoginError> {
        let token = self
            .gateway
            .login(credentials)
            .await
            .map_err(|err| LoginError::Rejected(err.user_message()))?;
        self.tokens.store_token(token).await;
        info!("admin session established");
        Ok(())
    }
}
