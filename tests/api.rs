//! End-to-end checks through the real router: bind an ephemeral port, drive
//! it with a plain HTTP client and assert on the response envelopes.

use std::net::SocketAddr;

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use fairrent::config::{Config, MatchPolicy};
use fairrent::database::MIGRATOR;
use fairrent::state::AppState;
use fairrent::web::build_router;

async fn spawn_app() -> SocketAddr {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    MIGRATOR.run(&pool).await.expect("migrations");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        openai_api_key: None,
        openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        openai_model: "test".to_string(),
        opencage_api_key: None,
        opencage_api_url: "http://127.0.0.1:9/geocode".to_string(),
        match_policy: MatchPolicy::default(),
    };

    let app = build_router(AppState::new(pool, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// Unsigned token in the shape the ingress forwards; only the payload is
/// read server-side.
fn access_token_cookie(user_id: &str, username: &str) -> String {
    let payload = general_purpose::URL_SAFE_NO_PAD
        .encode(json!({ "sub": user_id, "name": username }).to_string());
    format!("access_token=header.{payload}.signature")
}

#[tokio::test]
async fn matches_without_a_profile_return_not_found() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/api/roommate_matches"))
        .header("Cookie", access_token_cookie("u1", "asha"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("create your roommate profile"));
}

#[tokio::test]
async fn protected_routes_reject_anonymous_callers() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/api/notifications"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn profile_round_trips_through_the_api() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();
    let cookie = access_token_cookie("u1", "asha");

    let resp = client
        .post(format!("http://{addr}/api/roommate_profile"))
        .header("Cookie", &cookie)
        .json(&json!({
            "name": "Asha",
            "age": 25,
            "gender": "female",
            "location": "Leeds",
            "role": "seeking",
            "budget": 800.0,
            "preferences": ["quiet", "non-smoker"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let resp = client
        .get(format!("http://{addr}/api/roommate_profile"))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let profile = &body["data"]["profile"];
    assert_eq!(profile["name"], "Asha");
    assert_eq!(profile["role"], "seeking");
    assert_eq!(profile["budget"], 800.0);
}
