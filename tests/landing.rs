//! End-to-end journey: a real server on an ephemeral port, the reqwest
//! client, and the headless widgets, backed by the in-memory store.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use zorodoor::{
    config::Config,
    database::MemoryStore,
    flow::{FlowState, LandingFlow},
    routes,
    scratch::ScratchCard,
    state::State,
};

async fn spawn_server(store: Arc<MemoryStore>) -> String {
    let config = Config {
        port: 0,
        redis_url: String::new(),
    };

    let app = routes::app(State::with_store(config, store));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

#[tokio::test]
async fn test_full_journey() {
    let store = Arc::new(MemoryStore::new());
    let base_url = spawn_server(store.clone()).await;
    let http = Client::new();

    let mut flow = LandingFlow::new();
    flow.open_form().unwrap();

    flow.form.name = "A".to_string();
    flow.form.number = "1234567890".to_string();
    flow.form.email = "a@b.com".to_string();

    flow.submit(&http, &base_url).await.unwrap();

    assert_eq!(flow.state(), FlowState::ScratchCardShown);
    assert_eq!(flow.take_notice(), None);

    let discount = flow.discount().unwrap();
    assert!((5..=75).contains(&discount));

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "A");
    assert_eq!(records[0].id, 1);

    // Scratch the card all the way through.
    let mut card = ScratchCard::default();
    card.pointer_down();

    for y in (0..card.height()).step_by(10) {
        for x in (0..card.width()).step_by(10) {
            card.pointer_move(x as f32, y as f32);
        }
    }

    card.pointer_up();

    assert!(card.is_revealed());
    assert!((5..=75).contains(&card.reward().unwrap()));
}

#[tokio::test]
async fn test_valid_post_echoes_record() {
    let store = Arc::new(MemoryStore::new());
    let base_url = spawn_server(store).await;

    let response = Client::new()
        .post(format!("{base_url}/api/users"))
        .json(&json!({"name": "A", "number": "1234567890", "email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["name"], json!("A"));
    assert_eq!(body["user"]["number"], json!("1234567890"));
    assert_eq!(body["user"]["email"], json!("a@b.com"));
    assert!(body["user"]["id"].is_u64());
}

#[tokio::test]
async fn test_missing_field_is_400() {
    let store = Arc::new(MemoryStore::new());
    let base_url = spawn_server(store.clone()).await;

    let response = Client::new()
        .post(format!("{base_url}/api/users"))
        .json(&json!({"name": "", "number": "123", "email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Missing fields"}));

    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_absent_field_is_400() {
    let store = Arc::new(MemoryStore::new());
    let base_url = spawn_server(store.clone()).await;

    let response = Client::new()
        .post(format!("{base_url}/api/users"))
        .json(&json!({"name": "A", "email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_500_and_flow_reopens_form() {
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true);

    let base_url = spawn_server(store.clone()).await;
    let http = Client::new();

    let response = http
        .post(format!("{base_url}/api/users"))
        .json(&json!({"name": "A", "number": "1234567890", "email": "a@b.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Server error"}));

    let mut flow = LandingFlow::new();
    flow.open_form().unwrap();

    flow.form.name = "A".to_string();
    flow.form.number = "1234567890".to_string();
    flow.form.email = "a@b.com".to_string();

    flow.submit(&http, &base_url).await.unwrap();

    assert_eq!(flow.state(), FlowState::FormOpen);
    assert_eq!(flow.discount(), None);
    assert_eq!(flow.form.name, "A");
    assert!(flow.take_notice().is_some());

    // The entered values survive, so retrying after the store recovers works.
    store.set_failing(false);
    flow.submit(&http, &base_url).await.unwrap();

    assert_eq!(flow.state(), FlowState::ScratchCardShown);
    assert_eq!(store.records().len(), 1);
}
