//! Wire-level tests for the Blockworld client
//!
//! A recording server on an ephemeral port captures every request the client
//! sends and answers with canned replies.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use blockworld::{BlockworldClient, ClientConfig, ClientError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<HashMap<String, (u16, Vec<u8>)>>,
}

impl Recorder {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }
}

async fn record(State(rec): State<Recorder>, method: Method, uri: Uri, body: Bytes) -> Response {
    rec.requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match rec.replies.get(uri.path()) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).expect("valid status"),
            body.clone(),
        )
            .into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// Start a recording server. Returns its base URL.
async fn spawn_recorder(replies: &[(&str, u16, &[u8])]) -> (String, Recorder) {
    let rec = Recorder {
        requests: Arc::default(),
        replies: Arc::new(
            replies
                .iter()
                .map(|(path, status, body)| (path.to_string(), (*status, body.to_vec())))
                .collect(),
        ),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind recorder");
    let addr = listener.local_addr().expect("recorder addr");
    let app = Router::new().fallback(record).with_state(rec.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("recorder crashed");
    });

    (format!("http://{}", addr), rec)
}

fn request(method: &str, path: &str, body: &str) -> Recorded {
    Recorded {
        method: method.to_string(),
        path: path.to_string(),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_mutating_calls_hit_expected_endpoints() {
    let (url, rec) = spawn_recorder(&[]).await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    client.create_player("steve").await.unwrap();
    client.player_move("steve", "north").await.unwrap();
    client.player_place_block("steve").await.unwrap();
    client.set_player_block("steve", "stone").await.unwrap();
    client.generate_world("12345").await.unwrap();
    client.delete_player("steve").await.unwrap();

    assert_eq!(
        rec.requests(),
        vec![
            request("PUT", "/apps/blockworld/players/steve", ""),
            request("POST", "/apps/blockworld/players/steve/move", "north"),
            request("POST", "/apps/blockworld/players/steve/place_block", ""),
            request("PUT", "/apps/blockworld/players/steve/block", "stone"),
            request("PUT", "/apps/blockworld/world/generate", "12345"),
            request("DELETE", "/apps/blockworld/players/steve", ""),
        ]
    );
}

#[tokio::test]
async fn test_list_calls_split_lines() {
    let (url, rec) = spawn_recorder(&[
        ("/apps/blockworld/players", 200, b"a\r\nb\n\nc"),
        ("/apps/blockworld/blocks", 200, b"\r\n\n"),
    ])
    .await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    assert_eq!(client.players().await.unwrap(), vec!["a", "b", "c"]);
    assert!(client.blocks().await.unwrap().is_empty());

    assert_eq!(
        rec.requests(),
        vec![
            request("GET", "/apps/blockworld/players", ""),
            request("GET", "/apps/blockworld/blocks", ""),
        ]
    );
}

#[tokio::test]
async fn test_block_color_is_raw_body() {
    let (url, rec) = spawn_recorder(&[
        ("/apps/blockworld/blocks/grass/color", 200, b"#00FF00"),
        ("/apps/blockworld/blocks/water/color", 200, b" #0000FF\n"),
    ])
    .await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    assert_eq!(client.block_color("grass").await.unwrap(), "#00FF00");
    assert_eq!(client.block_color("water").await.unwrap(), " #0000FF\n");
    assert_eq!(
        rec.requests()[0],
        request("GET", "/apps/blockworld/blocks/grass/color", "")
    );
}

#[tokio::test]
async fn test_error_statuses_are_ignored_by_default() {
    let (url, _rec) = spawn_recorder(&[
        ("/apps/blockworld/players/steve", 500, b"boom"),
        ("/apps/blockworld/players", 404, b""),
    ])
    .await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    assert!(client.delete_player("steve").await.is_ok());
    assert!(client.players().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_strict_status_surfaces_errors() {
    let (url, _rec) = spawn_recorder(&[("/apps/blockworld/players/steve", 500, b"boom")]).await;
    let config = ClientConfig {
        strict_status: true,
        ..ClientConfig::new(url)
    };
    let client = BlockworldClient::new(config).unwrap();

    let err = client.create_player("steve").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    match err {
        ClientError::Status { body, .. } => assert_eq!(body, "boom"),
        other => panic!("unexpected error: {}", other),
    }

    // Success statuses still pass.
    assert!(client.create_player("alex").await.is_ok());
}

#[tokio::test]
async fn test_non_utf8_list_body_fails() {
    let (url, _rec) = spawn_recorder(&[("/apps/blockworld/players", 200, &[0xff, 0xfe, b'\n'])]).await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    let err = client.players().await.unwrap_err();
    assert!(matches!(err, ClientError::Body(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BlockworldClient::with_base_url(format!("http://{}", addr)).unwrap();
    let err = client.players().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold connections without answering.
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ClientConfig {
        timeout: Duration::from_millis(200),
        ..ClientConfig::new(format!("http://{}", addr))
    };
    let client = BlockworldClient::new(config).unwrap();

    let err = client.generate_world("slow").await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(_)));
}

#[tokio::test]
async fn test_identifiers_are_percent_encoded_on_the_wire() {
    let (url, rec) = spawn_recorder(&[]).await;
    let client = BlockworldClient::with_base_url(url).unwrap();

    client.create_player("Jörg").await.unwrap();
    client.player_move("two words", "up").await.unwrap();
    client.block_color("a<b>").await.unwrap();

    assert_eq!(
        rec.requests(),
        vec![
            request("PUT", "/apps/blockworld/players/J%C3%B6rg", ""),
            request("POST", "/apps/blockworld/players/two%20words/move", "up"),
            request("GET", "/apps/blockworld/blocks/a%3Cb%3E/color", ""),
        ]
    );
}
