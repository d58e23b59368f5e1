//! Integration tests for the score API. Each test serves the app on
//! an ephemeral port and talks to it with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};

use server::config::Config;
use server::session::MatchSession;
use server::store::{memory::MemoryStore, ScoreStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_secret: "test_secret".to_string(),
        require_api_key: false,
        sync_url: None,
        store_path: None,
    }
}

/// Serve a fresh app and return its base URL.
async fn spawn_app(config: Config) -> String {
    let store: Arc<dyn ScoreStore> = Arc::new(MemoryStore::new());
    let session = Arc::new(MatchSession::new(store, None));
    let app = server::app(session, config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    format!("http://{addr}")
}

async fn get_score(client: &reqwest::Client, base: &str) -> Value {
    client
        .get(format!("{base}/api/score"))
        .send()
        .await
        .expect("Failed to send score request")
        .json()
        .await
        .expect("Score response was not JSON")
}

async fn post_point(client: &reqwest::Client, base: &str, player: i64) -> reqwest::Response {
    client
        .post(format!("{base}/api/match/point"))
        .json(&json!({ "player": player }))
        .send()
        .await
        .expect("Failed to send point request")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_initial_score_is_zeroed() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let score = get_score(&client, &base).await;
    assert_eq!(score["player1"], 0);
    assert_eq!(score["player2"], 0);
    assert_eq!(score["totalGames"], 0);
    assert_eq!(score["isTiebreak"], false);
    assert!(score["advantage"].is_null());
    assert!(score["lastUpdate"].is_string());
}

#[tokio::test]
async fn test_partial_update_retains_other_fields() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/score"))
        .json(&json!({ "player1": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base}/api/score"))
        .json(&json!({ "player2": 3, "isTiebreak": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Score updated successfully");
    assert_eq!(body["score"]["player1"], 2);
    assert_eq!(body["score"]["player2"], 3);
    assert_eq!(body["score"]["isTiebreak"], true);

    let score = get_score(&client, &base).await;
    assert_eq!(score["player1"], 2);
    assert_eq!(score["player2"], 3);
}

#[tokio::test]
async fn test_empty_partial_update_rejected() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/score"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Missing score data"));
}

#[tokio::test]
async fn test_full_replace_names_missing_fields() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/score"))
        .json(&json!({ "player1": 1, "player2": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("totalGames"));
    assert!(!detail.contains("player1"));
}

#[tokio::test]
async fn test_full_replace_with_zero_advantage() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/score"))
        .json(&json!({
            "player1": 3,
            "player2": 2,
            "totalGames": 4,
            "advantage": 0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["score"]["player1"], 3);
    assert_eq!(body["score"]["totalGames"], 4);
    assert!(body["score"]["advantage"].is_null());
    assert_eq!(body["score"]["isTiebreak"], false);
}

#[tokio::test]
async fn test_four_points_win_a_game() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    for _ in 0..4 {
        let resp = post_point(&client, &base, 1).await;
        assert_eq!(resp.status(), 200);
    }

    let score = get_score(&client, &base).await;
    assert_eq!(score["totalGames"], 1);
    assert_eq!(score["player1"], 0);
    assert_eq!(score["player2"], 0);
    assert!(score["advantage"].is_null());

    let history: Value = client
        .get(format!("{base}/api/match/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries: Vec<String> = history["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(entries.iter().any(|e| e == "Player 1 wins the game!"));
    assert_eq!(history["total"], entries.len());
}

#[tokio::test]
async fn test_advantage_and_deuce_over_http() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        post_point(&client, &base, 1).await;
        post_point(&client, &base, 2).await;
    }
    post_point(&client, &base, 1).await; // 4-3
    let score = get_score(&client, &base).await;
    assert_eq!(score["advantage"], 1);

    post_point(&client, &base, 2).await; // 4-4, deuce
    let score = get_score(&client, &base).await;
    assert!(score["advantage"].is_null());
}

#[tokio::test]
async fn test_invalid_player_rejected() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = post_point(&client, &base, 3).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("Invalid player"));
}

#[tokio::test]
async fn test_undo_endpoint_restores_previous_state() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    post_point(&client, &base, 1).await;
    post_point(&client, &base, 2).await;
    let before = get_score(&client, &base).await;

    post_point(&client, &base, 1).await;
    let resp = client
        .post(format!("{base}/api/match/undo"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let after = get_score(&client, &base).await;
    assert_eq!(after["player1"], before["player1"]);
    assert_eq!(after["player2"], before["player2"]);
    assert_eq!(after["totalGames"], before["totalGames"]);
}

#[tokio::test]
async fn test_tiebreak_toggle_and_win() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/match/tiebreak"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Tiebreak mode activated");
    assert_eq!(body["score"]["isTiebreak"], true);

    // 6-5, then the winning point.
    for _ in 0..6 {
        post_point(&client, &base, 1).await;
    }
    for _ in 0..5 {
        post_point(&client, &base, 2).await;
    }
    post_point(&client, &base, 1).await;

    let score = get_score(&client, &base).await;
    assert_eq!(score["totalGames"], 1);
    assert_eq!(score["player1"], 0);
    assert_eq!(score["player2"], 0);
    assert_eq!(score["isTiebreak"], false);
}

#[tokio::test]
async fn test_new_game_and_reset() {
    let base = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    for _ in 0..4 {
        post_point(&client, &base, 1).await;
    }
    post_point(&client, &base, 2).await;

    let resp = client
        .post(format!("{base}/api/match/new-game"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["score"]["player2"], 0);
    assert_eq!(body["score"]["totalGames"], 1); // games played survive

    let resp = client
        .post(format!("{base}/api/match/reset"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["score"]["totalGames"], 0);
    assert_eq!(body["score"]["player1"], 0);
}

#[tokio::test]
async fn test_api_key_enforcement() {
    let config = Config {
        require_api_key: true,
        ..test_config()
    };
    let base = spawn_app(config).await;
    let client = reqwest::Client::new();

    // Reads stay open.
    let resp = client
        .get(format!("{base}/api/score"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Writes without the key are rejected.
    let resp = client
        .post(format!("{base}/api/match/point"))
        .json(&json!({ "player": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Wrong key rejected, right key accepted.
    let resp = client
        .post(format!("{base}/api/match/point"))
        .header("x-api-key", "nope")
        .json(&json!({ "player": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .post(format!("{base}/api/match/point"))
        .header("x-api-key", "test_secret")
        .json(&json!({ "player": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
