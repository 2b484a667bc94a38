//! REST client for the tiles backend.
//!
//! Four thin wrappers over `GET/POST/PUT/DELETE` against the collection URL.

use crate::config::Config;
use crate::tiles::error::ApiError;
use crate::tiles::models::{Tile, TileId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

/// Operations the inventory screen needs from the backend.
///
/// Implemented by [`TileClient`] over HTTP; tests plug in an in-memory
/// recorder instead.
#[async_trait]
pub trait TileApi: Send + Sync {
    /// Fetch the raw listing body. Its shape is normalized by the caller.
    async fn list_all(&self) -> Result<Value, ApiError>;

    /// Create a tile. The id, if any, is not sent.
    async fn create(&self, tile: &Tile) -> Result<(), ApiError>;

    /// Replace the tile stored under `id`.
    async fn update(&self, id: &TileId, tile: &Tile) -> Result<(), ApiError>;

    /// Delete the tile stored under `id`.
    async fn delete(&self, id: &TileId) -> Result<(), ApiError>;
}

/// HTTP client for the `/tiles` collection.
#[derive(Debug, Clone)]
pub struct TileClient {
    /// HTTP client for API requests
    client: Client,
    /// Collection URL, e.g. `http://localhost:8080/tiles`
    base_url: String,
}

impl TileClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<TileClient>` - New client or error
    ///
    /// # Details
    /// No request timeout is configured; a hung backend leaves the request
    /// outstanding until the connection drops.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("api_url must not be empty"));
        }

        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a single tile.
    pub fn item_url(&self, id: &TileId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Turn non-2xx responses into [`ApiError::Server`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TileApi for TileClient {
    async fn list_all(&self) -> Result<Value, ApiError> {
        tracing::debug!(url = %self.base_url, "fetching tiles");
        let response = self.client.get(&self.base_url).send().await?;
        let response = check_status(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn create(&self, tile: &Tile) -> Result<(), ApiError> {
        tracing::debug!(url = %self.base_url, name = %tile.name, "creating tile");
        let response = self
            .client
            .post(&self.base_url)
            .json(&tile.as_new())
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn update(&self, id: &TileId, tile: &Tile) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "updating tile");
        let response = self.client.put(&url).json(tile).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &TileId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "deleting tile");
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    impl TileClient {
        fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    /// Serve exactly one HTTP exchange on loopback.
    ///
    /// Returns the collection URL to point a client at and a handle yielding
    /// the raw request the server received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/tiles", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&raw);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8(raw).unwrap()
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    fn request_body(request: &str) -> Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn client_for(url: String) -> TileClient {
        TileClient::new(&Config {
            api_url: url,
            ..Config::default()
        })
        .unwrap()
    }

    fn sample_tile() -> Tile {
        Tile::new("Marble A", "X", "60x60", "10", "500").with_id(TileId::from(7))
    }

    #[test]
    fn test_client_new_requires_url() {
        let config = Config {
            api_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(TileClient::new(&config).is_err());
    }

    #[test]
    fn test_client_default_url() {
        let client = TileClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/tiles");
    }

    #[test]
    fn test_item_url() {
        let config = Config {
            api_url: "http://inventory.local:9000/tiles/".to_string(),
            ..Config::default()
        };
        let client = TileClient::new(&config).unwrap();
        assert_eq!(
            client.item_url(&TileId::from(12)),
            "http://inventory.local:9000/tiles/12"
        );
        assert_eq!(
            client.item_url(&TileId::Text("x1".to_string())),
            "http://inventory.local:9000/tiles/x1"
        );
    }

    #[tokio::test]
    async fn test_list_all_gets_collection_and_parses_body() {
        let (url, server) = serve_once("200 OK", r#"{"data":[{"id":1,"name":"Marble A"}]}"#).await;
        let client = client_for(url);

        let body = client.list_all().await.unwrap();

        assert_eq!(body, json!({"data": [{"id": 1, "name": "Marble A"}]}));
        let request = server.await.unwrap();
        assert!(request_line(&request).starts_with("GET /tiles "));
    }

    #[tokio::test]
    async fn test_create_posts_payload_without_id() {
        let (url, server) = serve_once("201 Created", r#"{"id":9}"#).await;
        let client = client_for(url);

        client.create(&sample_tile()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request_line(&request).starts_with("POST /tiles "));
        assert_eq!(
            request_body(&request),
            json!({"name": "Marble A", "brand": "X", "size": "60x60", "countOfBoxes": "10", "price": "500"})
        );
    }

    #[tokio::test]
    async fn test_update_puts_full_tile_to_item_url() {
        let (url, server) = serve_once("200 OK", "{}").await;
        let client = client_for(url);
        let tile = sample_tile();

        client.update(&TileId::from(7), &tile).await.unwrap();

        let request = server.await.unwrap();
        assert!(request_line(&request).starts_with("PUT /tiles/7 "));
        assert_eq!(
            request_body(&request),
            json!({"id": 7, "name": "Marble A", "brand": "X", "size": "60x60", "countOfBoxes": "10", "price": "500"})
        );
    }

    #[tokio::test]
    async fn test_delete_sends_delete_to_item_url() {
        let (url, server) = serve_once("200 OK", "").await;
        let client = client_for(url);

        client.delete(&TileId::from(7)).await.unwrap();

        let request = server.await.unwrap();
        assert!(request_line(&request).starts_with("DELETE /tiles/7 "));
    }

    #[tokio::test]
    async fn test_error_status_keeps_code_and_body() {
        let (url, server) = serve_once("500 Internal Server Error", "db down").await;
        let client = client_for(url);

        let result = client.delete(&TileId::from(7)).await;

        match result {
            Err(ApiError::Server { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "db down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_listing_that_is_not_json_is_decode_error() {
        let (url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let client = client_for(url);

        assert!(matches!(client.list_all().await, Err(ApiError::Decode(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on loopback is almost never listening.
        let config = Config {
            api_url: "http://127.0.0.1:9/tiles".to_string(),
            ..Config::default()
        };
        let client = TileClient::new(&config).unwrap();
        let result = client.list_all().await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
