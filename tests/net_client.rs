#![cfg(feature = "net")]

use std::time::Duration;

use futures_util::SinkExt;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use velgraph::{TableSource, TelemetrySource, TelemetryValue, WsTelemetryClient};

async fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("timed out waiting for {what}");
}

#[tokio::test(flavor = "multi_thread")]
async fn client_mirrors_frames_and_tracks_the_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let table = TableSource::new();
    let client = WsTelemetryClient::spawn(&url, Duration::from_millis(50), table.clone());

    let (tcp, _) = listener.accept().await.unwrap();
    drop(listener);
    let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();

    ws.send(Message::Text(
        r#"{"type":"snapshot","values":{"a":1.0,"b":true}}"#.into(),
    ))
    .await
    .unwrap();
    ws.send(Message::Text(r#"{"type":"update","key":"a","value":1.5}"#.into()))
        .await
        .unwrap();
    ws.send(Message::Text("not json".into())).await.unwrap();

    wait_for("update", || table.get("a") == Some(TelemetryValue::Number(1.5))).await;
    assert!(client.table().is_connected().unwrap());
    assert!(table.get_flag("b", false));

    ws.close(None).await.unwrap();
    drop(ws);

    wait_for("disconnect", || !table.is_connected().unwrap()).await;
    // values survive the socket; the session decides what to do with them
    assert_eq!(table.get_value("a", 0.0), 1.5);
}

#[test]
fn unreachable_server_stays_disconnected() {
    // bind then drop to get a port nobody listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let table = TableSource::new();
    let _client = WsTelemetryClient::spawn(
        &format!("ws://{addr}"),
        Duration::from_millis(20),
        table.clone(),
    );
    std::thread::sleep(Duration::from_millis(200));
    assert!(!table.is_connected().unwrap());
}
