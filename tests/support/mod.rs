// Stub workspace API plus service bootstrapping shared by integration tests.
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use notion_entries::AppConfig;
use notion_entries::domain::DatabaseId;
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use url::Url;

// One query as seen by the stub API.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub database_id: String,
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct StubApi {
    pub queries: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl StubApi {
    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }
}

// Responses are keyed by database id so each test picks its scenario through configuration.
async fn query_database(
    State(stub): State<StubApi>,
    Path(database_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    stub.queries
        .lock()
        .expect("queries mutex poisoned")
        .push(RecordedQuery {
            database_id: database_id.clone(),
            authorization: header("authorization"),
            notion_version: header("notion-version"),
            body,
        });

    match database_id.as_str() {
        "db-ok" => Json(json!({
            "object": "list",
            "results": [{
                "object": "page",
                "id": "p1",
                "url": "https://www.notion.so/p1",
                "properties": {
                    "Priority": {"id": "a1", "type": "select", "select": {"name": "High"}},
                    "Name": {"id": "title", "type": "title", "title": [
                        {"type": "text", "plain_text": "Hello"}
                    ]}
                }
            }],
            "has_more": false,
            "next_cursor": null
        }))
        .into_response(),
        "db-untitled" => Json(json!({
            "results": [{
                "id": "p2",
                "properties": {"Name": {"id": "title", "type": "title", "title": []}}
            }],
            "has_more": true
        }))
        .into_response(),
        "db-limited" => api_error(StatusCode::TOO_MANY_REQUESTS, "rate_limited", "rate limited"),
        "db-garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "db-slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"results": [], "has_more": false})).into_response()
        }
        other => api_error(
            StatusCode::NOT_FOUND,
            "object_not_found",
            &format!("Could not find database with ID: {other}."),
        ),
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "object": "error",
        "status": status.as_u16(),
        "code": code,
        "message": message
    });
    (status, Json(body)).into_response()
}

// Serve the stub API on an ephemeral port and return its base URL.
pub async fn spawn_stub_api() -> (String, StubApi) {
    let stub = StubApi::default();
    let app = Router::new()
        .route("/v1/databases/{database_id}/query", post(query_database))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral stub port");
    let addr = listener.local_addr().expect("get stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub api failed");
    });

    (format!("http://{addr}"), stub)
}

pub fn config(api_url: &str, token: Option<&str>, slots: [Option<&str>; 3]) -> AppConfig {
    AppConfig {
        notion_token: token.map(str::to_string),
        database_ids: slots.map(|slot| DatabaseId::from_setting(slot.map(str::to_string))),
        notion_api_url: Url::parse(api_url).expect("stub url should parse"),
        notion_version: "2022-06-28".to_string(),
        notion_timeout: Duration::from_millis(500),
        listen_addr: "127.0.0.1:0".parse().expect("listen addr should parse"),
    }
}

// Start the service on an ephemeral port and return its base URL.
pub async fn spawn_service(config: AppConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        notion_entries::run(listener, config)
            .await
            .expect("server failed");
    });

    format!("http://{addr}")
}

pub async fn fetch_entries(base_url: &str) -> (reqwest::StatusCode, Value) {
    let res = reqwest::get(format!("{base_url}/api/notion_entries"))
        .await
        .expect("request should succeed");
    let status = res.status();
    let body = res.json::<Value>().await.expect("body should be json");
    (status, body)
}
