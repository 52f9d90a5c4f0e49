use crate::domain::models::{
    GatewayStatus, LoginRequest, LoginResponse, RegistrationRequest, ScanRequest, ScanResult,
};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// No response was obtained at all.
    #[error("could not reach gateway: {0}")]
    Connectivity(String),
    /// The gateway answered with a non-2xx status.
    #[error("gateway rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("unexpected gateway response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Human readable detail supplied by the gateway, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// The three account/scan operations of the CyberShield backend, plus its
/// health route.
pub trait Gateway {
    fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError>;
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GatewayError>;
    fn scan(&self, request: &ScanRequest) -> Result<ScanResult, GatewayError>;
    fn status(&self) -> Result<GatewayStatus, GatewayError>;
}

pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, GatewayError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| connectivity(&url, e))?;
        check_status(&url, resp)
    }

    fn get(&self, path: &str) -> Result<Response, GatewayError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| connectivity(&url, e))?;
        check_status(&url, resp)
    }
}

impl Gateway for HttpGateway {
    fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
        self.post("/register", request)?;
        Ok(())
    }

    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        decode(self.post("/login", request)?)
    }

    fn scan(&self, request: &ScanRequest) -> Result<ScanResult, GatewayError> {
        decode(self.post("/scan", request)?)
    }

    fn status(&self) -> Result<GatewayStatus, GatewayError> {
        decode(self.get("/status")?)
    }
}

fn connectivity(url: &str, err: reqwest::Error) -> GatewayError {
    warn!(%url, error = %err, "gateway unreachable");
    GatewayError::Connectivity(err.to_string())
}

fn check_status(url: &str, resp: Response) -> Result<Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let detail = error_detail(&body);
    warn!(%url, status = status.as_u16(), detail = ?detail, "gateway rejected request");
    Err(GatewayError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    resp.json::<T>()
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Pulls the message out of an error body. FastAPI style `detail` first,
/// then the plain `message`/`error` keys.
pub fn error_detail(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|k| v.get(k)?.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
