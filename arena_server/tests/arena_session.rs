mod support;

use serde_json::Value;
use support::{connect, ensure_server, find_player, next_json, next_state_where, send_text};

#[tokio::test]
async fn handshake_comes_first_then_state() {
    let mut ws = connect().await;

    let init = next_json(&mut ws).await;
    assert_eq!(init["type"], "init");
    let id = init["id"].as_str().expect("string id").to_string();
    let team = init["team"].as_str().expect("team");
    assert!(team == "left" || team == "right");

    let state = next_state_where(&mut ws, |s| find_player(s, &id).is_some()).await;
    let me = find_player(&state, &id).expect("own player");
    assert_eq!(me["team"], team);
    assert_eq!(me["score"], 0);
    assert_eq!(state["balls"].as_array().expect("balls").len(), 5);
    for ball in state["balls"].as_array().expect("balls") {
        assert!(ball.get("carriedBy").is_some());
    }
}

#[tokio::test]
async fn input_moves_the_player_and_garbage_is_ignored() {
    let mut ws = connect().await;
    let init = next_json(&mut ws).await;
    let id = init["id"].as_str().expect("string id").to_string();

    let start = next_state_where(&mut ws, |s| find_player(s, &id).is_some()).await;
    let start_y = find_player(&start, &id).expect("player")["y"]
        .as_f64()
        .expect("y");

    // Malformed messages are dropped without closing the connection.
    send_text(&mut ws, "not json").await;
    send_text(&mut ws, r#"{"type":"input","x":"left"}"#).await;
    send_text(&mut ws, r#"{"type":"teleport","x":0,"y":0}"#).await;
    // Out-of-range components are clamped, not rejected.
    send_text(&mut ws, r#"{"type":"input","x":0,"y":25}"#).await;

    let moved = next_state_where(&mut ws, |s| {
        find_player(s, &id)
            .and_then(|p| p["y"].as_f64())
            .is_some_and(|y| y > start_y + 10.0)
    })
    .await;
    assert!(find_player(&moved, &id).is_some());
}

#[tokio::test]
async fn disconnected_player_leaves_the_snapshot() {
    let mut leaver = connect().await;
    let init = next_json(&mut leaver).await;
    let leaver_id = init["id"].as_str().expect("string id").to_string();

    let mut watcher = connect().await;
    let _ = next_json(&mut watcher).await;
    next_state_where(&mut watcher, |s| find_player(s, &leaver_id).is_some()).await;

    leaver.close(None).await.expect("close leaver");
    drop(leaver);

    let state = next_state_where(&mut watcher, |s| find_player(s, &leaver_id).is_none()).await;
    for ball in state["balls"].as_array().expect("balls") {
        assert_ne!(ball["carriedBy"], Value::String(leaver_id.clone()));
    }
}

#[tokio::test]
async fn static_files_are_served_outside_the_socket_route() {
    let base = format!("http://{}", ensure_server());
    let client = reqwest::Client::new();

    let index = client
        .get(format!("{base}/"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(index.status(), reqwest::StatusCode::OK);
    let body = index.text().await.expect("body");
    assert!(body.contains("<canvas"));

    let missing = client
        .get(format!("{base}/no-such-file.js"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}
