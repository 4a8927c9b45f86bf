use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use hand_replayer::history::HandHistory;
use hand_replayer::store::ScenarioStore;
use hand_replayer::web;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::time::{Duration, sleep};

async fn spawn_server() -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let store = Arc::new(ScenarioStore::sample());
    let app: Router = web::router(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    sleep(Duration::from_millis(25)).await;
    Ok((format!("http://{}", addr), server))
}

#[tokio::test]
async fn web_api_supports_a_training_flow() -> anyhow::Result<()> {
    let (base_url, server) = spawn_server().await?;
    let client = Client::builder().build()?;

    let created: Value = client
        .post(format!("{}/api/sessions", base_url))
        .send()
        .await?
        .json()
        .await?;
    let session_id = created["session_id"].as_str().expect("uuid").to_string();
    assert_eq!(created["stats"]["total"], 0);

    let hand: HandHistory = client
        .get(format!("{}/api/sessions/{}/hand", base_url, session_id))
        .send()
        .await?
        .json()
        .await?;
    hand.validate().expect("served hand is valid");

    // Serving the hand already counted the attempt.
    let stats: Value = client
        .get(format!("{}/api/sessions/{}/stats", base_url, session_id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["correct"], 0);

    // Grading is case-insensitive.
    let graded: Value = client
        .post(format!("{}/api/sessions/{}/decision", base_url, session_id))
        .json(&json!({ "chosen": hand.correct_decision.to_uppercase() }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(graded["correct"], true);
    assert_eq!(graded["stats"]["total"], 1);
    assert_eq!(graded["stats"]["correct"], 1);
    assert_eq!(graded["stats"]["percentage"], 100);

    // Re-answering the same hand conflicts instead of double counting.
    let repeat = client
        .post(format!("{}/api/sessions/{}/decision", base_url, session_id))
        .json(&json!({ "chosen": hand.correct_decision }))
        .send()
        .await?;
    assert_eq!(repeat.status(), reqwest::StatusCode::CONFLICT);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test]
async fn unknown_session_is_a_404() -> anyhow::Result<()> {
    let (base_url, server) = spawn_server().await?;
    let client = Client::builder().build()?;

    let response = client
        .get(format!(
            "{}/api/sessions/00000000-0000-0000-0000-000000000000/hand",
            base_url
        ))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test]
async fn requesting_a_new_hand_supersedes_an_unanswered_one() -> anyhow::Result<()> {
    let (base_url, server) = spawn_server().await?;
    let client = Client::builder().build()?;

    let created: Value = client
        .post(format!("{}/api/sessions", base_url))
        .send()
        .await?
        .json()
        .await?;
    let session_id = created["session_id"].as_str().expect("uuid").to_string();

    // Two hands served, neither answered: both count as attempts, and only
    // the second is answerable.
    for _ in 0..2 {
        let _hand: HandHistory = client
            .get(format!("{}/api/sessions/{}/hand", base_url, session_id))
            .send()
            .await?
            .json()
            .await?;
    }

    let graded: Value = client
        .post(format!("{}/api/sessions/{}/decision", base_url, session_id))
        .json(&json!({ "chosen": "fold" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(graded["stats"]["total"], 2);

    let repeat = client
        .post(format!("{}/api/sessions/{}/decision", base_url, session_id))
        .json(&json!({ "chosen": "fold" }))
        .send()
        .await?;
    assert_eq!(repeat.status(), reqwest::StatusCode::CONFLICT);

    server.abort();
    let _ = server.await;
    Ok(())
}
