use gloo_net::http::Request;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use web_sys::RequestCache;

// -- Request status codes understood by the approval service --

/// Which subset of purchase requests the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn code(self) -> &'static str {
        match self {
            Self::Pending => "01",
            Self::Approved => "02",
            Self::Rejected => "07",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Onay Bekleyen",
            Self::Approved => "Onaylı",
            Self::Rejected => "Red Edilen",
        }
    }

    /// Approve/reject is only offered on pending requests.
    pub fn allows_actions(self) -> bool {
        self == Self::Pending
    }
}

// -- Wire types matching the approval service --

/// Missing or `null` text fields render as empty rather than failing the page.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestRow {
    #[serde(rename = "istekDtId")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(rename = "kayitTarihi", default, deserialize_with = "null_as_empty")]
    pub registered_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(rename = "onayTalepleri")]
    pub rows: Vec<RequestRow>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

impl PageResponse {
    /// Parse a list response body. The row collection must be a JSON array.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|_| ApiError::Format)?;
        if !value.get("onayTalepleri").is_some_and(serde_json::Value::is_array) {
            return Err(ApiError::Format);
        }
        serde_json::from_value(value).map_err(|_| ApiError::Format)
    }
}

// -- Errors --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Approve,
    Reject,
}

impl ActionKind {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Approve => "Onaylama işlemi başarısız",
            Self::Reject => "Reddetme işlemi başarısız",
        }
    }
}

/// Failures surfaced to the list page. `status` is `None` for network-level
/// failures and is only used for logging; the message is the same either way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Veriler alınamadı")]
    Fetch { status: Option<u16> },

    #[error("Geçersiz veri formatı")]
    Format,

    #[error("{}", .kind.failure_message())]
    Action { kind: ActionKind, status: Option<u16> },

    #[error("Lütfen red gerekçesi giriniz")]
    Validation,
}

// -- Endpoint construction --

const REQUESTS_PATH: &str = "/api/satinalma/istek-onay";

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn list_url(base_url: &str, status: RequestStatus, page: u32, size: u32) -> String {
    format!(
        "{}{}?page={}&size={}&istekDurum={}",
        trim_base(base_url),
        REQUESTS_PATH,
        page,
        size,
        status.code()
    )
}

pub fn approve_url(base_url: &str, id: i64) -> String {
    format!("{}{}/onayla/{}", trim_base(base_url), REQUESTS_PATH, id)
}

pub fn reject_url(base_url: &str, id: i64, justification: &str) -> String {
    format!(
        "{}{}/reddet/{}?redGerekcesi={}",
        trim_base(base_url),
        REQUESTS_PATH,
        id,
        urlencoding::encode(justification)
    )
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// -- Client --

/// The remote approval service. Every call carries the caller's bearer token.
#[allow(async_fn_in_trait)]
pub trait ApprovalApi {
    async fn list_requests(
        &self,
        token: &str,
        status: RequestStatus,
        page: u32,
        size: u32,
    ) -> Result<PageResponse, ApiError>;

    async fn approve(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// Callers must reject blank justifications before calling this.
    async fn reject(&self, token: &str, id: i64, justification: &str) -> Result<(), ApiError>;
}

/// Fetch-based client. No retries; each failure is reported once.
#[derive(Debug, Clone)]
pub struct HttpApprovalClient {
    base_url: String,
}

impl HttpApprovalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn post(&self, url: &str, token: &str, kind: ActionKind) -> Result<(), ApiError> {
        let response = Request::post(url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| {
                log::warn!("{:?} request to {} failed: {}", kind, url, e);
                ApiError::Action { kind, status: None }
            })?;

        if !response.ok() {
            log::warn!("{:?} request to {} returned HTTP {}", kind, url, response.status());
            return Err(ApiError::Action {
                kind,
                status: Some(response.status()),
            });
        }
        Ok(())
    }
}

impl ApprovalApi for HttpApprovalClient {
    async fn list_requests(
        &self,
        token: &str,
        status: RequestStatus,
        page: u32,
        size: u32,
    ) -> Result<PageResponse, ApiError> {
        let url = list_url(&self.base_url, status, page, size);
        log::info!("Fetching page {} with status {}", page, status.code());

        let response = Request::get(&url)
            .header("Authorization", &bearer(token))
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(|e| {
                log::warn!("List request failed: {}", e);
                ApiError::Fetch { status: None }
            })?;

        if !response.ok() {
            log::warn!("List request returned HTTP {}", response.status());
            return Err(ApiError::Fetch {
                status: Some(response.status()),
            });
        }

        let body = response.text().await.map_err(|e| {
            log::warn!("Failed to read list response body: {}", e);
            ApiError::Format
        })?;
        PageResponse::from_body(&body).inspect_err(|_| {
            log::warn!("Invalid data format: {}", body);
        })
    }

    async fn approve(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.post(&approve_url(&self.base_url, id), token, ActionKind::Approve)
            .await
    }

    async fn reject(&self, token: &str, id: i64, justification: &str) -> Result<(), ApiError> {
        self.post(
            &reject_url(&self.base_url, id, justification),
            token,
            ActionKind::Reject,
        )
        .await
    }
}
