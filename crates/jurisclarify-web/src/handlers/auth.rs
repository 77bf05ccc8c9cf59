//! Identity lookup — delegates entirely to an external identity provider.
//!
//! The service never manages credentials; it verifies a bearer ID token
//! against the provider and reports who the caller is.

use async_trait::async_trait;
use axum::{extract::State, Json};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use jurisclarify_common::error::ApiError;

use crate::state::SharedState;

/// The signed-in user, as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify an ID token; the error string is the provider's message.
    async fn verify(&self, token: &str) -> Result<AuthUser, String>;
}

/// Verifies Google ID tokens via the tokeninfo endpoint.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

impl GoogleTokenVerifier {
    pub fn new() -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("JurisClarify/0.1")
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, String> {
        let resp = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| format!("identity provider unreachable: {e}"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| format!("identity provider returned non-JSON: {e}"))?;

        if !status.is_success() {
            return Err(body["error_description"]
                .as_str()
                .or_else(|| body["error"].as_str())
                .unwrap_or("token rejected")
                .to_string());
        }

        let subject = body["sub"]
            .as_str()
            .ok_or_else(|| "token carried no subject".to_string())?
            .to_string();
        debug!(subject = %subject, "Token verified");

        Ok(AuthUser {
            subject,
            email: body["email"].as_str().map(String::from),
            name: body["name"].as_str().map(String::from),
        })
    }
}

/// GET /auth/me — current user for the presented bearer token, 401 otherwise.
pub async fn auth_me(
    State(state): State<SharedState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<AuthUser>, ApiError> {
    state
        .verifier
        .verify(bearer.token())
        .await
        .map(Json)
        .map_err(ApiError::unauthorized)
}
