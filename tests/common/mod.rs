use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// In-process stand-in for the CyberShield backend.
///
/// - `a@b.com` logs in as user 7, anything else is a 404 without a body,
///   `boom@example.com` is a 500 with a detail message.
/// - `taken@example.com` cannot register.
/// - scan urls containing `evil` are dangerous, `broken` fail upstream,
///   everything else is clean.
pub struct MockGateway {
    pub url: String,
    scans: Arc<AtomicUsize>,
}

impl MockGateway {
    pub fn start() -> Self {
        let scans = Arc::new(AtomicUsize::new(0));
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock gateway");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("mock gateway addr");
        let app = router(scans.clone());
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("serve mock gateway");
            });
        });
        Self {
            url: format!("http://{}/api", addr),
            scans,
        }
    }

    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

/// Base URL on which nothing is listening.
pub fn unreachable_gateway() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}/api", addr)
}

fn router(scans: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/scan", post(scan))
        .with_state(scans)
}

async fn status() -> Json<Value> {
    Json(json!({"message": "CyberShield API is running and ready to serve data."}))
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Email already registered"})),
        )
            .into_response();
    }
    let scope_ok = match body["scope"].as_str() {
        Some("individual") => body["first_name"].is_string() && body.get("company_name").is_none(),
        Some("enterprise") => body["company_name"].is_string() && body.get("first_name").is_none(),
        _ => false,
    };
    if !scope_ok {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "Invalid registration payload"})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"id": 8, "email": body["email"]})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    match body["email"].as_str() {
        Some("a@b.com") => Json(json!({"id": 7, "email": "a@b.com"})).into_response(),
        Some("boom@example.com") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "database unavailable"})),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn scan(State(scans): State<Arc<AtomicUsize>>, Json(body): Json<Value>) -> Response {
    scans.fetch_add(1, Ordering::SeqCst);
    if body["user_id"] != 7 {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "Unknown user"}))).into_response();
    }
    let url = body["url"].as_str().unwrap_or_default().to_string();
    if url.contains("broken") {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({"detail": "VirusTotal lookup failed"})),
        )
            .into_response();
    }
    if url.contains("evil") {
        return Json(json!({
            "url": url,
            "overall_summary": "DANGER: malicious",
            "details": {"virustotal": {
                "status": "completed",
                "malicious_count": 3,
                "harmless_count": 10,
                "results_url": "https://vt.example/report/1"
            }}
        }))
        .into_response();
    }
    Json(json!({
        "url": url,
        "overall_summary": "No threats detected",
        "details": {"google_safe_browsing": {
            "status": "clean",
            "message": "No matches found"
        }}
    }))
    .into_response()
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub gateway: MockGateway,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self {
            _tmp: tmp,
            home,
            gateway: MockGateway::start(),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.home.join(".config/cybershield/session.json")
    }

    /// Command with an isolated HOME and no gateway configured.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("shield");
        cmd.env("HOME", &self.home)
            .env_remove("CYBERSHIELD_GATEWAY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("CYBERSHIELD_GATEWAY", &self.gateway.url);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failing(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
