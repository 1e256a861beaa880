// src/modules/content/adapter/outgoing/rest_gateway.rs
//
// reqwest implementation of the content and auth gateways. Every request
// carries the cached bearer token; a 401 from any endpoint clears the
// session and broadcasts a forced logout before the error is surfaced.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::auth::application::ports::outgoing::AuthGateway;
use crate::auth::application::token_cache::TokenCache;
use crate::auth::domain::entities::Credentials;
use crate::config::Config;
use crate::content::application::ports::outgoing::content_gateway::{
    AboutDocument, AboutPatch, ContactMessage, ContentGateway, ProjectPayload, ProjectRecord,
    SkillGroups,
};
use crate::shared::error::GatewayError;

/// Response envelope shared by every backend endpoint:
/// `{ success, data, error: { code, message } }`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    data: Option<T>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    #[allow(dead_code)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

pub struct RestGateway {
    client: Client,
    base_url: String,
    tokens: Arc<TokenCache>,
}

impl RestGateway {
    pub fn new(config: &Config, tokens: Arc<TokenCache>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        debug!(base_url = %config.api_url, "REST gateway ready");
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        let builder = match self.tokens.bearer().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                GatewayError::Transport("request timed out".to_string())
            } else {
                GatewayError::Transport(err.to_string())
            }
        })?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<Option<T>, GatewayError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.tokens.force_logout().await;
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("server returned {}", status.as_u16()));
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|err| GatewayError::Transport(format!("malformed response body: {err}")))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ContentGateway for RestGateway {
    async fn fetch_about(&self) -> Result<Option<AboutDocument>, GatewayError> {
        self.send(self.client.get(self.endpoint("/about"))).await
    }

    async fn update_about(&self, patch: AboutPatch) -> Result<(), GatewayError> {
        self.send::<serde_json::Value>(self.client.put(self.endpoint("/about")).json(&patch))
            .await
            .map(|_| ())
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, GatewayError> {
        Ok(self
            .send(self.client.get(self.endpoint("/projects")))
            .await?
            .unwrap_or_default())
    }

    async fn fetch_project(&self, id: &str) -> Result<ProjectRecord, GatewayError> {
        self.send(self.client.get(self.endpoint(&format!("/projects/{id}"))))
            .await?
            .ok_or_else(|| GatewayError::Server {
                status: 404,
                message: format!("project {id} not found"),
            })
    }

    async fn create_project(&self, payload: ProjectPayload) -> Result<String, GatewayError> {
        let created: Option<ProjectRecord> = self
            .send(self.client.post(self.endpoint("/projects")).json(&payload))
            .await?;
        created
            .map(|record| record.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GatewayError::Server {
                status: 200,
                message: "create response carried no project id".to_string(),
            })
    }

    async fn update_project(&self, id: &str, payload: ProjectPayload) -> Result<(), GatewayError> {
        self.send::<serde_json::Value>(
            self.client
                .put(self.endpoint(&format!("/projects/{id}")))
                .json(&payload),
        )
        .await
        .map(|_| ())
    }

    async fn delete_project(&self, id: &str) -> Result<(), GatewayError> {
        self.send::<serde_json::Value>(self.client.delete(self.endpoint(&format!("/projects/{id}"))))
            .await
            .map(|_| ())
    }

    async fn fetch_skill_groups(&self) -> Result<SkillGroups, GatewayError> {
        Ok(self
            .send(self.client.get(self.endpoint("/skills")))
            .await?
            .unwrap_or_default())
    }

    async fn submit_contact_message(&self, message: ContactMessage) -> Result<(), GatewayError> {
        self.send::<serde_json::Value>(self.client.post(self.endpoint("/contact")).json(&message))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl AuthGateway for RestGateway {
    async fn login(&self, credentials: Credentials) -> Result<String, GatewayError> {
        let data: Option<LoginData> = self
            .send(
                self.client
                    .post(self.endpoint("/auth/login"))
                    .json(&credentials),
            )
            .await?;
        data.map(|login| login.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| GatewayError::Server {
                status: 200,
                message: "login response carried no token".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_base_url_loses_its_trailing_slash() {
        let config = Config {
            api_url: "http://localhost:5000/api/".to_string(),
            ..Config::default()
        };
        let gateway = RestGateway::new(&config, Arc::new(TokenCache::new())).unwrap();
        assert_eq!(gateway.endpoint("/about"), "http://localhost:5000/api/about");
    }

    #[test]
    fn envelopes_deserialize_with_and_without_data() {
        let ok: ApiEnvelope<ProjectRecord> = serde_json::from_str(
            r#"{"success":true,"data":{"_id":"p1","title":"Demo","description":"","images":[],"tech":[]}}"#,
        )
        .unwrap();
        assert_eq!(ok.data.unwrap().id, "p1");

        let err: ApiEnvelope<ProjectRecord> = serde_json::from_str(
            r#"{"success":false,"error":{"code":"VALIDATION","message":"title is required"}}"#,
        )
        .unwrap();
        assert!(err.data.is_none());
        assert_eq!(err.error.unwrap().message, "title is required");
    }
}
