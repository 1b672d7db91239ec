use crate::session::AdminSession;
use hostadmin_primitives::error::ApiError;
use hostadmin_primitives::models::ApiInfo;
use hostadmin_primitives::models::dtos::{ApiEnvelope, ApiFailureBody, LoginData, LoginRequest};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info, warn};

const USER_AGENT: &str = concat!("hostadmin/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated handle on the admin API. Logging in turns it into an
/// [`AdminSession`].
#[derive(Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
}

impl AdminClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Config(format!("Invalid admin API base URL: {base_url}")))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Admin API URL cannot be used as a base: {base_url}"
            )));
        }

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ApiInfo) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Internal(format!("HTTP client error: {e}")))?;

        Self::new(http, &config.api_url)
    }

    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AdminSession, ApiError> {
        let request = self.http.post(self.endpoint("admin/auth/login")).json(&LoginRequest {
            email,
            password: password.expose_secret(),
        });

        let envelope: ApiEnvelope<LoginData> = self.send(request, "login").await?;
        let data = Self::successful(envelope, "login")?
            .ok_or_else(|| ApiError::InvalidResponse("Login returned no session".into()))?;

        if data.token.is_empty() {
            return Err(ApiError::Auth("Login returned an empty token".into()));
        }

        info!(admin_id = %data.admin.id, "Admin session started");

        Ok(AdminSession::new(
            self.clone(),
            SecretString::from(data.token),
            data.admin,
        ))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Joins `path` onto the base URL, keeping any base path prefix such as
    /// `/v1`.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{}/{}", base, path.trim_start_matches('/')));
        url
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, ApiError> {
        let resp = request.send().await.map_err(|e| {
            error!(operation, error = %e, "Failed to reach admin API");
            ApiError::from(e)
        })?;

        let status = resp.status();
        let body_text = resp.text().await.map_err(|e| {
            error!(operation, error = %e, "Failed to read admin API response");
            ApiError::from(e)
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiFailureBody>(&body_text)
                .ok()
                .and_then(ApiFailureBody::into_message);

            let Some(message) = message else {
                error!(
                    operation,
                    http_status = status.as_u16(),
                    response = %body_text.chars().take(200).collect::<String>(),
                    "Admin API failed without a message"
                );
                return Err(ApiError::InvalidResponse(format!(
                    "{operation}: admin API returned {status}"
                )));
            };

            warn!(
                operation,
                http_status = status.as_u16(),
                message = %message,
                "Admin API rejected request"
            );

            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Auth(message));
            }
            return Err(ApiError::rejected(Some(status.as_u16()), message));
        }

        serde_json::from_str(&body_text).map_err(|e| {
            error!(
                operation,
                error = %e,
                response = %body_text.chars().take(200).collect::<String>(),
                "Invalid JSON from admin API"
            );
            ApiError::InvalidResponse(format!("{operation}: {e}"))
        })
    }

    /// Anything but the literal `"success"` status is a rejection carrying
    /// the API's message.
    pub(crate) fn successful<T>(
        envelope: ApiEnvelope<T>,
        operation: &'static str,
    ) -> Result<Option<T>, ApiError> {
        if !envelope.is_success() {
            return Err(Self::reported_failure(
                operation,
                &envelope.status,
                envelope.message,
            ));
        }
        Ok(envelope.data)
    }

    /// A failure reported inside a 2xx envelope. Without a message there is
    /// nothing to show the admin, so it counts as an invalid response.
    pub(crate) fn reported_failure(
        operation: &'static str,
        status: &str,
        message: String,
    ) -> ApiError {
        if message.trim().is_empty() {
            error!(operation, status, "Admin API reported failure without a message");
            return ApiError::InvalidResponse(format!(
                "{operation}: status {status:?} without a message"
            ));
        }

        warn!(operation, status, message = %message, "Admin API reported failure");
        ApiError::rejected(None, message)
    }
}
