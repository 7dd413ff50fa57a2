//! Async HTTP client for the Blockworld game server
//!
//! One method per endpoint. List calls resolve to the parsed lines of the
//! response, `block_color` to the raw body, and every mutating call to `()`.
//! Response statuses are not inspected unless the client was configured with
//! `strict_status`.

use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Client, Request, StatusCode, Uri};
use std::time::Instant;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::lines::split_lines;
use crate::routes::Route;

/// Client for one Blockworld server. Cheap to clone; clones share a connection pool.
///
/// Every call is bounded by [`ClientConfig::timeout`] (10 seconds unless
/// configured), covering the connection, the response head and the full body.
/// A server slower than that yields [`ClientError::Timeout`] even if it would
/// eventually have answered; raise the timeout for slow devices.
#[derive(Clone, Debug)]
pub struct BlockworldClient {
    http: Client<HttpConnector>,
    config: ClientConfig,
}

impl BlockworldClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: Client::builder().build_http(),
            config,
        })
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// IDs of every player currently on the server.
    pub async fn players(&self) -> Result<Vec<String>> {
        let text = self.fetch_text(Route::ListPlayers, None).await?;
        Ok(split_lines(&text))
    }

    pub async fn create_player(&self, player_id: &str) -> Result<()> {
        self.send(Route::CreatePlayer(player_id), None).await
    }

    pub async fn delete_player(&self, player_id: &str) -> Result<()> {
        self.send(Route::DeletePlayer(player_id), None).await
    }

    /// Move the player's cursor. The direction is passed through untouched.
    pub async fn player_move(&self, player_id: &str, direction: &str) -> Result<()> {
        self.send(Route::MovePlayer(player_id), Some(direction)).await
    }

    /// Place the player's selected block at their cursor.
    pub async fn player_place_block(&self, player_id: &str) -> Result<()> {
        self.send(Route::PlaceBlock(player_id), None).await
    }

    pub async fn set_player_block(&self, player_id: &str, block: &str) -> Result<()> {
        self.send(Route::SetPlayerBlock(player_id), Some(block)).await
    }

    /// Regenerate the world from `seed`.
    pub async fn generate_world(&self, seed: &str) -> Result<()> {
        self.send(Route::GenerateWorld, Some(seed)).await
    }

    /// Names of every block kind the server knows.
    pub async fn blocks(&self) -> Result<Vec<String>> {
        let text = self.fetch_text(Route::ListBlocks, None).await?;
        Ok(split_lines(&text))
    }

    /// Color of `block_name`, exactly as the server renders it.
    pub async fn block_color(&self, block_name: &str) -> Result<String> {
        self.fetch_text(Route::BlockColor(block_name), None).await
    }

    async fn send(&self, route: Route<'_>, body: Option<&str>) -> Result<()> {
        self.execute(route, body).await.map(|_| ())
    }

    async fn fetch_text(&self, route: Route<'_>, body: Option<&str>) -> Result<String> {
        let bytes = self.execute(route, body).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    async fn execute(&self, route: Route<'_>, body: Option<&str>) -> Result<Bytes> {
        let request = self.build_request(route, body)?;
        let timeout = self.config.timeout;
        let start = Instant::now();

        let (status, bytes) = tokio::time::timeout(timeout, async {
            let response = self.http.request(request).await?;
            let status = response.status();
            let bytes = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<(StatusCode, Bytes), ClientError>((status, bytes))
        })
        .await
        .map_err(|_| ClientError::Timeout(timeout))??;

        tracing::debug!(
            method = %route.method(),
            path = %route.path(),
            status = %status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "client.request"
        );

        if self.config.strict_status && !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes)
    }

    fn build_request(&self, route: Route<'_>, body: Option<&str>) -> Result<Request<Body>> {
        let target = route.uri(&self.config.base_url);
        let uri: Uri = target.parse().map_err(|e: hyper::http::uri::InvalidUri| {
            ClientError::InvalidUri {
                uri: target.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = Request::builder().method(hyper::Method::from(route.method())).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                Body::from(text.to_string())
            }
            None => Body::empty(),
        };

        Ok(builder.body(body)?)
    }
}
