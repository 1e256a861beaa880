// auth_gateway.rs
use async_trait::async_trait;

use crate::auth::domain::entities::Credentials;
use crate::shared::error::GatewayError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, credentials: Credentials) -> Result<String, GatewayError>;
}
