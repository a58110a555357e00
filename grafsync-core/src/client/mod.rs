//! Grafana HTTP API access.
//!
//! [`GrafanaApi`] is the seam between the import/export logic and the
//! network. Implementors only provide `get` and `post_json`; the typed
//! endpoint helpers are default methods. [`HttpClient`] is the `reqwest`
//! implementation used by the CLI.

mod http;

use async_trait::async_trait;
use serde_json::{Value, json};

pub use http::HttpClient;

use crate::document::error_message_from_body;
use crate::error::{ApiError, ApiResult, ConnectivityError};

/// Endpoint paths, relative to the API base URL
pub mod paths {
    /// Health endpoint, answers without authentication
    pub const HEALTH: &str = "/api/health";
    /// Current organization, requires a valid token
    pub const CURRENT_ORG: &str = "/api/org";
    /// Datasource collection
    pub const DATASOURCES: &str = "/api/datasources";
    /// Dashboard search restricted to dashboards
    pub const DASHBOARD_SEARCH: &str = "/api/search?type=dash-db";
    /// Results per dashboard search page
    pub const SEARCH_PAGE_LIMIT: usize = 1000;
    /// Dashboard import/save
    pub const DASHBOARD_IMPORT: &str = "/api/dashboards/db";
    /// Dashboard by UID (append the UID)
    pub const DASHBOARD_BY_UID: &str = "/api/dashboards/uid/";
    /// Folder collection (append a UID to fetch one)
    pub const FOLDERS: &str = "/api/folders";
}

/// Status and body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Creates a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidResponse` if the body is not valid JSON.
    pub fn json(&self) -> ApiResult<Value> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Human-readable error message taken from the body
    #[must_use]
    pub fn error_message(&self) -> String {
        error_message_from_body(&self.body)
    }

    /// Parses the body as JSON if the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::UnexpectedStatus` for non-2xx statuses and
    /// `ApiError::InvalidResponse` for bodies that are not JSON.
    pub fn into_json(self) -> ApiResult<Value> {
        if !self.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: self.status,
                message: self.error_message(),
            });
        }
        self.json()
    }
}

/// Access to a Grafana-compatible REST API.
///
/// Request methods return `Ok` for any HTTP status; `Err` means the request
/// never produced a response.
#[async_trait]
pub trait GrafanaApi: Send + Sync {
    /// Base URL requests are sent to, for messages
    fn base_url(&self) -> &str;

    /// Issues an authenticated GET
    async fn get(&self, path: &str) -> ApiResult<ApiResponse>;

    /// Issues an authenticated POST with a JSON body
    async fn post_json(&self, path: &str, body: &Value) -> ApiResult<ApiResponse>;

    /// `GET /api/health`
    async fn health(&self) -> ApiResult<ApiResponse> {
        self.get(paths::HEALTH).await
    }

    /// `GET /api/org`
    async fn current_org(&self) -> ApiResult<ApiResponse> {
        self.get(paths::CURRENT_ORG).await
    }

    /// `GET /api/datasources`
    async fn list_datasources(&self) -> ApiResult<ApiResponse> {
        self.get(paths::DATASOURCES).await
    }

    /// `GET /api/datasources/{id}`
    async fn get_datasource(&self, id: &str) -> ApiResult<ApiResponse> {
        self.get(&format!("{}/{}", paths::DATASOURCES, id)).await
    }

    /// `POST /api/datasources`
    async fn create_datasource(&self, datasource: &Value) -> ApiResult<ApiResponse> {
        self.post_json(paths::DATASOURCES, datasource).await
    }

    /// `GET /api/search?type=dash-db`, one page of at most
    /// [`paths::SEARCH_PAGE_LIMIT`] results; pages start at 1
    async fn search_dashboards(&self, page: u32) -> ApiResult<ApiResponse> {
        self.get(&format!(
            "{}&limit={}&page={page}",
            paths::DASHBOARD_SEARCH,
            paths::SEARCH_PAGE_LIMIT
        ))
        .await
    }

    /// `GET /api/dashboards/uid/{uid}`
    async fn get_dashboard(&self, uid: &str) -> ApiResult<ApiResponse> {
        self.get(&format!("{}{}", paths::DASHBOARD_BY_UID, uid)).await
    }

    /// `POST /api/dashboards/db`
    async fn import_dashboard(&self, payload: &Value) -> ApiResult<ApiResponse> {
        self.post_json(paths::DASHBOARD_IMPORT, payload).await
    }

    /// `GET /api/folders/{uid}`
    async fn get_folder(&self, uid: &str) -> ApiResult<ApiResponse> {
        self.get(&format!("{}/{}", paths::FOLDERS, uid)).await
    }

    /// `POST /api/folders` with `{uid, title}`
    async fn create_folder(&self, uid: &str, title: &str) -> ApiResult<ApiResponse> {
        let body = json!({ "uid": uid, "title": title });
        self.post_json(paths::FOLDERS, &body).await
    }
}

/// Verifies the target is reachable and accepts the token.
///
/// `GET /api/health` must answer 2xx, then `GET /api/org` must answer 200.
///
/// # Errors
///
/// Returns `ConnectivityError::Unreachable` on transport failure,
/// `ConnectivityError::Unhealthy` for a failing health check,
/// `ConnectivityError::AuthenticationRejected` for 401/403 and
/// `ConnectivityError::UnexpectedStatus` otherwise.
pub async fn check_connection<A>(api: &A) -> Result<(), ConnectivityError>
where
    A: GrafanaApi + ?Sized,
{
    let to_unreachable = |e: ApiError| ConnectivityError::Unreachable {
        url: api.base_url().to_string(),
        reason: e.to_string(),
    };

    let health = api.health().await.map_err(to_unreachable)?;
    if !health.is_success() {
        return Err(ConnectivityError::Unhealthy(health.status));
    }

    let org = api.current_org().await.map_err(to_unreachable)?;
    match org.status {
        200 => {
            tracing::debug!(url = api.base_url(), "Connection verified");
            Ok(())
        }
        401 | 403 => Err(ConnectivityError::AuthenticationRejected(org.status)),
        other => Err(ConnectivityError::UnexpectedStatus(other)),
    }
}
