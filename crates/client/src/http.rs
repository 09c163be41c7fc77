//! HTTP implementation of the gateway traits, speaking to the mixdesk API.
//!
//! Requests carry a Bearer token once the session is signed in. All calls
//! have an explicit timeout -- a slow server fails the operation instead of
//! hanging the surface in a loading state forever.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use mixdesk_core::status::OrderStatus;
use mixdesk_core::types::DbId;

use crate::error::ClientError;
use crate::gateway::{AuthApi, OrdersApi};
use crate::types::{LocalFile, NewOrder, Order, Profile, StatusHistoryEntry};

/// Default per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `{ "data": ... }` response envelope used by every API endpoint.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Tokens for the current session.
#[derive(Debug, Clone)]
struct SessionTokens {
    access_token: String,
    refresh_token: String,
}

/// Auth response returned by register, login, and refresh.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
}

/// Production gateway: one instance per session, cheap to share via `Arc`.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    tokens: RwLock<Option<SessionTokens>>,
}

impl HttpGateway {
    /// Build a gateway for an API base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("HTTP client construction cannot fail with static configuration");
        Self {
            client,
            base_url,
            tokens: RwLock::new(None),
        }
    }

    /// The WebSocket URL for the order change feed, carrying the current
    /// access token when signed in.
    pub async fn feed_url(&self) -> String {
        let ws_base = self
            .base_url
            .replacen("http://", "ws://", 1)
            .replacen("https://", "wss://", 1);
        match &*self.tokens.read().await {
            Some(tokens) => format!("{ws_base}/api/v1/ws?token={}", tokens.access_token),
            None => format!("{ws_base}/api/v1/ws"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    async fn bearer(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| format!("Bearer {}", t.access_token))
    }

    /// Attach the Authorization header when signed in.
    async fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer().await {
            Some(header) => req.header(reqwest::header::AUTHORIZATION, header),
            None => req,
        }
    }

    /// Extract the error message from a failed response.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {status}"),
        }
    }

    /// Decode a `{ "data": T }` success body, or surface the error message.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, String> {
        if response.status().is_success() {
            response
                .json::<DataEnvelope<T>>()
                .await
                .map(|env| env.data)
                .map_err(|e| format!("Malformed response: {e}"))
        } else {
            Err(Self::error_message(response).await)
        }
    }

    async fn store_auth(&self, auth: AuthResponse) {
        *self.tokens.write().await = Some(SessionTokens {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        });
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Call when a request starts failing with an authorization error; the
    /// rotated tokens replace the stored pair on success.
    pub async fn refresh_session(&self) -> Result<(), ClientError> {
        let refresh_token = self
            .tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
            .ok_or_else(|| ClientError::Auth("No session to refresh".into()))?;

        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_message(response).await));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("Malformed response: {e}")))?;
        self.store_auth(auth).await;
        Ok(())
    }

    async fn fetch_me(&self) -> Result<Profile, String> {
        let response = self
            .authed(self.client.get(self.url("/auth/me")))
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AuthApi for HttpGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_message(response).await));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("Malformed response: {e}")))?;
        self.store_auth(auth).await;

        self.fetch_me().await.map_err(ClientError::Auth)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Profile, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "full_name": full_name,
            }))
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_message(response).await));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("Malformed response: {e}")))?;
        self.store_auth(auth).await;

        self.fetch_me().await.map_err(ClientError::Auth)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self.authed(self.client.post(self.url("/auth/logout"))).await;
        // Local tokens are cleared regardless of the remote outcome.
        *self.tokens.write().await = None;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_message(response).await));
        }
        Ok(())
    }

    async fn current_profile(&self) -> Result<Option<Profile>, ClientError> {
        if self.tokens.read().await.is_none() {
            return Ok(None);
        }
        match self.fetch_me().await {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => Ok(None),
        }
    }
}

#[async_trait]
impl OrdersApi for HttpGateway {
    async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let response = self
            .authed(self.client.get(self.url("/orders")))
            .await
            .send()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;
        Self::decode(response).await.map_err(ClientError::Fetch)
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError> {
        let response = self
            .authed(self.client.post(self.url("/orders")))
            .await
            .json(&order)
            .send()
            .await
            .map_err(|e| ClientError::Update(e.to_string()))?;
        Self::decode(response).await.map_err(ClientError::Update)
    }

    async fn update_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Result<Order, ClientError> {
        let response = self
            .authed(
                self.client
                    .put(self.url(&format!("/orders/{order_id}/status"))),
            )
            .await
            .json(&serde_json::json!({ "status": status, "notes": notes }))
            .send()
            .await
            .map_err(|e| ClientError::Update(e.to_string()))?;
        Self::decode(response).await.map_err(ClientError::Update)
    }

    async fn status_history(
        &self,
        order_id: DbId,
    ) -> Result<Vec<StatusHistoryEntry>, ClientError> {
        let response = self
            .authed(
                self.client
                    .get(self.url(&format!("/orders/{order_id}/history"))),
            )
            .await
            .send()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;
        Self::decode(response).await.map_err(ClientError::Fetch)
    }

    async fn upload_files(
        &self,
        order_id: DbId,
        files: Vec<LocalFile>,
    ) -> Result<Order, ClientError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| ClientError::Upload(format!("Invalid content type: {e}")))?;
            form = form.part("files", part);
        }

        let response = self
            .authed(
                self.client
                    .post(self.url(&format!("/orders/{order_id}/files"))),
            )
            .await
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Upload(e.to_string()))?;
        Self::decode(response).await.map_err(ClientError::Upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn feed_url_swaps_scheme_and_carries_token() {
        let gateway = HttpGateway::new("http://localhost:3000/");
        assert_eq!(gateway.feed_url().await, "ws://localhost:3000/api/v1/ws");

        gateway
            .store_auth(AuthResponse {
                access_token: "tok".into(),
                refresh_token: "ref".into(),
            })
            .await;
        assert_eq!(
            gateway.feed_url().await,
            "ws://localhost:3000/api/v1/ws?token=tok"
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let gateway = HttpGateway::new("https://api.example.com");
        assert_eq!(
            gateway.url("/orders/7/history"),
            "https://api.example.com/api/v1/orders/7/history"
        );
    }
}
