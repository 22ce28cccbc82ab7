//! Wizard command - HTTP backend for the setup frontend.
//!
//! Exposes the four endpoints the companion UI drives: autodetect existing
//! service configs, save a collected `.env`, test a single connection, and
//! deploy the stack. The actual work is the same blocking code the CLI
//! commands use, bridged with `spawn_blocking`.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::cli::output;
use crate::core::discover;
use crate::core::docker;
use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::render::EnvFile;
use crate::core::service::{Service, ServiceKind};
use crate::error::{Result, SurgeError};

struct WizardState {
    env: Env,
    env_path: PathBuf,
}

pub fn execute(host: &str, port: u16, env: &Env) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|err| SurgeError::Config(format!("invalid bind address: {err}")))?;

    let state = Arc::new(WizardState {
        env: env.clone(),
        env_path: PathBuf::from(".env"),
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(addr, state))
}

async fn serve(addr: SocketAddr, state: Arc<WizardState>) -> Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;

    output::success(&format!("wizard backend listening on http://{addr}"));
    output::hint("endpoints: /api/autodetect /api/save_config /api/test_connection /api/deploy_services");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<WizardState>) -> Router {
    Router::new()
        .route("/api/autodetect", get(autodetect))
        .route("/api/save_config", post(save_config))
        .route("/api/test_connection", post(test_connection))
        .route("/api/deploy_services", post(deploy_services))
        .with_state(state)
}

/// Scan the storage tree for known config files and discovered (masked) keys.
fn scan_services(env: &Env) -> Value {
    let mut services = Vec::new();

    for kind in ServiceKind::ALL {
        let service = Service::from_env(kind, env).ok();

        let config_found = kind
            .config_file()
            .map(|rel| env.storage_path().join(rel).exists())
            .unwrap_or(false);

        let api_key = service
            .as_ref()
            .and_then(|s| s.api_key.as_deref())
            .map(discover::mask);

        services.push(json!({
            "name": kind.name(),
            "slug": kind.slug(),
            "enabled": env.enabled(kind),
            "url": service.as_ref().and_then(|s| s.base_url.as_ref()).map(|u| u.as_str().trim_end_matches('/').to_string()),
            "config_found": config_found,
            "api_key": api_key,
        }));
    }

    json!({
        "storage_path": env.storage_path().display().to_string(),
        "services": services,
    })
}

async fn autodetect(State(state): State<Arc<WizardState>>) -> Json<Value> {
    let env = state.env.clone();
    let report = tokio::task::spawn_blocking(move || scan_services(&env))
        .await
        .unwrap_or_else(|err| json!({"error": err.to_string()}));
    Json(report)
}

async fn save_config(
    State(state): State<Arc<WizardState>>,
    Json(values): Json<BTreeMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let path = state.env_path.clone();
    let count = values.len();

    let result = tokio::task::spawn_blocking(move || {
        let mut file = EnvFile::new();
        for (key, value) in &values {
            file.push(key, value.clone());
        }
        file.write(&path)
    })
    .await;

    match result {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "status": "saved",
                "path": state.env_path.display().to_string(),
                "keys": count,
            })),
        ),
        Ok(Err(err)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
    }
}

#[derive(Deserialize)]
struct TestConnectionRequest {
    url: String,
    api_key: Option<String>,
}

async fn test_connection(
    Json(request): Json<TestConnectionRequest>,
) -> (StatusCode, Json<Value>) {
    let result = tokio::task::spawn_blocking(move || {
        let client = http::client()?;
        let header = request
            .api_key
            .as_deref()
            .map(|key| (http::API_KEY_HEADER, key));
        Ok::<bool, SurgeError>(Poller::once().wait(&client, &request.url, header))
    })
    .await;

    match result {
        Ok(Ok(reachable)) => (StatusCode::OK, Json(json!({"reachable": reachable}))),
        Ok(Err(err)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
    }
}

#[derive(Deserialize, Default)]
struct DeployRequest {
    #[serde(default)]
    profiles: Vec<String>,
    compose_file: Option<PathBuf>,
}

async fn deploy_services(Json(request): Json<DeployRequest>) -> (StatusCode, Json<Value>) {
    let result = tokio::task::spawn_blocking(move || {
        docker::compose_up(request.compose_file.as_deref(), &request.profiles)
    })
    .await;

    match result {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({"status": "deployed"}))),
        Ok(Err(err)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_state(dir: &std::path::Path) -> Arc<WizardState> {
        Arc::new(WizardState {
            env: Env::default(),
            env_path: dir.join(".env"),
        })
    }

    async fn call(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn save_config_persists_submitted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(dir.path()));

        let (status, body) = call(
            app,
            "POST",
            "/api/save_config",
            json!({"ENABLE_RADARR": "true", "RD_API_TOKEN": "rdtok1234567890"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "saved");
        assert_eq!(body["keys"], 2);

        let written = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert!(written.contains("ENABLE_RADARR=true\n"));
        assert!(written.contains("RD_API_TOKEN=rdtok1234567890\n"));
    }

    #[tokio::test]
    async fn test_connection_reports_reachability() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET);
                then.status(200);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (status, body) = call(
            router(test_state(dir.path())),
            "POST",
            "/api/test_connection",
            json!({"url": server.base_url()}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reachable"], true);

        // Port 9 is unassigned; the connection is refused immediately.
        let (status, body) = call(
            router(test_state(dir.path())),
            "POST",
            "/api/test_connection",
            json!({"url": "http://127.0.0.1:9/"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reachable"], false);
    }

    #[tokio::test]
    async fn deploy_services_rejects_malformed_body() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/api/deploy_services")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router(test_state(dir.path()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn autodetect_scan_masks_discovered_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("Radarr/config");
        std::fs::create_dir_all(&config).unwrap();
        std::fs::write(
            config.join("config.xml"),
            "<Config><ApiKey>ABCDEF1234567890</ApiKey></Config>",
        )
        .unwrap();

        let env = Env::from_pairs([
            ("STORAGE_PATH", dir.path().to_str().unwrap()),
            ("ENABLE_RADARR", "true"),
        ]);
        let report = scan_services(&env);

        let radarr = report["services"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["slug"] == "radarr")
            .unwrap();
        assert_eq!(radarr["config_found"], true);
        assert_eq!(radarr["enabled"], true);
        assert_eq!(radarr["api_key"], "ABCD…");
        // The full key must never leave the backend.
        assert!(!report.to_string().contains("ABCDEF1234567890"));
    }
}
