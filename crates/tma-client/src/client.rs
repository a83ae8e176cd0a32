use crate::credential::{INIT_DATA_HEADER, INIT_DATA_HEADER_ALIAS, InitData};
use crate::endpoints::{self, CURRENT_USER_PATH, DemoEndpoint, LOGIN_PATH};
use crate::error::{ApiError, Operation};
use crate::transport::{ApiRequest, HttpTransport, Method};
use serde::de::DeserializeOwned;
use tma_api_types::{BackendProfile, EntityId, LoginPayload, Role};
use tracing::{debug, error, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://backend-bar.onrender.com/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Also send `X-Telegram-Init-Data` next to the canonical header.
    pub send_header_alias: bool,
    /// Append `user_id` and `debug=true` to the login call.
    pub debug_login_params: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        Self {
            base_url: if trimmed.is_empty() {
                DEFAULT_API_BASE_URL.to_owned()
            } else {
                trimmed.to_owned()
            },
            send_header_alias: false,
            debug_login_params: false,
        }
    }

    /// Reads `TMA_API_BASE_URL`, `TMA_SEND_HEADER_ALIAS` and
    /// `TMA_DEBUG_LOGIN_PARAMS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("TMA_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        Self {
            send_header_alias: env_flag("TMA_SEND_HEADER_ALIAS"),
            debug_login_params: env_flag("TMA_DEBUG_LOGIN_PARAMS"),
            ..Self::new(base_url)
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Backend client that stamps the init data on every request and turns
/// every failure into an [`ApiError`].
pub struct ApiClient<T> {
    config: ClientConfig,
    credential: InitData,
    host_user_id: Option<i64>,
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(config: ClientConfig, credential: InitData, transport: T) -> Self {
        Self {
            config,
            credential,
            host_user_id: None,
            transport,
        }
    }

    /// Host user id used by the debug login parameters.
    #[must_use]
    pub fn with_host_user_id(mut self, user_id: Option<i64>) -> Self {
        self.host_user_id = user_id;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credential(&self) -> &InitData {
        &self.credential
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST /auth/login/telegram
    pub async fn login_with_telegram(&self) -> Result<LoginPayload, ApiError> {
        let mut query = Vec::new();
        if self.config.debug_login_params {
            if let Some(user_id) = self.host_user_id {
                query.push(("user_id".to_owned(), user_id.to_string()));
                query.push(("debug".to_owned(), "true".to_owned()));
            }
        }
        debug!("attempting Telegram authentication");
        let payload = self
            .execute(Operation::Login, Method::Post, LOGIN_PATH, query)
            .await?;
        debug!("Telegram authentication succeeded");
        Ok(payload)
    }

    /// GET /users/me
    pub async fn current_user(&self) -> Result<BackendProfile, ApiError> {
        self.execute(Operation::CurrentUser, Method::Get, CURRENT_USER_PATH, Vec::new())
            .await
    }

    /// GET /users/{id}/roles
    pub async fn user_roles(&self, user_id: &EntityId) -> Result<Vec<Role>, ApiError> {
        let path = endpoints::user_roles_path(&user_id.to_string());
        self.execute(Operation::UserRoles, Method::Get, &path, Vec::new())
            .await
    }

    /// Calls one of the test-panel endpoints and returns the raw JSON.
    pub async fn call(&self, endpoint: DemoEndpoint) -> Result<serde_json::Value, ApiError> {
        self.execute(
            Operation::Endpoint(endpoint.path()),
            endpoint.method(),
            endpoint.path(),
            Vec::new(),
        )
        .await
    }

    fn build_request(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<ApiRequest, ApiError> {
        if self.credential.is_empty() {
            warn!(path, "Telegram initData is missing; request not sent");
            return Err(ApiError::missing_credential(op));
        }

        let mut headers = vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            (
                INIT_DATA_HEADER.to_owned(),
                self.credential.as_str().to_owned(),
            ),
        ];
        if self.config.send_header_alias {
            headers.push((
                INIT_DATA_HEADER_ALIAS.to_owned(),
                self.credential.as_str().to_owned(),
            ));
        }

        Ok(ApiRequest {
            method,
            url: self.config.endpoint(path),
            headers,
            query,
            body: None,
        })
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R, ApiError> {
        let request = self.build_request(op, method, path, query)?;
        debug!(
            method = method.as_str(),
            url = %request.url,
            init_data = %self.credential.preview(),
            "dispatching backend request"
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(path, error = %err, "backend request got no response");
                return Err(ApiError::from_transport(op, err));
            }
        };

        if !response.is_success() {
            error!(
                path,
                status = response.status,
                status_text = %response.status_text,
                body = %response.body,
                "backend responded with failure"
            );
            if response.status == 401 {
                error!("authorization failed; Telegram initData might be invalid or expired");
            }
            return Err(ApiError::from_status(op, response));
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|err| {
            error!(path, error = %err, "backend response could not be decoded");
            ApiError::decode(op, err)
        })
    }
}
