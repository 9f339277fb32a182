//! HTTP client for the admin REST backend

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{ActivityLogEntry, ApiResponse, LoginRequest, LoginResponse, RoleRightsEntry};

use crate::activity::ActivitySink;
use crate::rights::RightsSource;
use crate::{ClientConfig, ClientError, ClientResult};

pub const LOGIN_PATH: &str = "api/auth/login";
pub const ROLE_RIGHTS_PATH: &str = "api/role-rights";
pub const ACTIVITY_LOG_PATH: &str = "api/activity-log";

/// 网络 HTTP 客户端
///
/// Every payload is wrapped in [`ApiResponse`]; `get`/`post` unwrap `data`.
#[derive(Debug)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.token.clone()),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace (or clear) the bearer token
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request and unwrap the envelope's data
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut req = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        Self::unwrap_data(Self::handle_response(response).await?)
    }

    /// Make a POST request with JSON body and unwrap the envelope's data
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope = self.post_envelope(path, body).await?;
        Self::unwrap_data(envelope)
    }

    /// POST where only the envelope's success code matters
    pub async fn post_ack<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        self.post_envelope::<serde_json::Value, B>(path, body)
            .await
            .map(|_| ())
    }

    async fn post_envelope<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    /// Map HTTP status and envelope code to a result
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // 尝试解析为 API 错误响应
            if let Ok(api_err) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                return Err(match status {
                    StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                    StatusCode::FORBIDDEN => ClientError::Forbidden(api_err.message),
                    _ => ClientError::Api {
                        code: api_err.code,
                        message: api_err.message,
                    },
                });
            }
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::BAD_REQUEST => ClientError::Validation(text),
                _ => ClientError::Internal(text),
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)?;
        if !envelope.is_success() {
            return Err(ClientError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    fn unwrap_data<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
    }

    // ========== Auth API ==========

    /// Login with username and password
    ///
    /// Does not store the returned token; the caller decides.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post(LOGIN_PATH, &req).await
    }
}

#[async_trait]
impl RightsSource for NetworkHttpClient {
    async fn fetch_rights(&self) -> ClientResult<Vec<RoleRightsEntry>> {
        self.get(ROLE_RIGHTS_PATH).await
    }
}

#[async_trait]
impl ActivitySink for NetworkHttpClient {
    async fn write(&self, entry: &ActivityLogEntry) -> ClientResult<()> {
        self.post_ack(ACTIVITY_LOG_PATH, entry).await
    }
}
