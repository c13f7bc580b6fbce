use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info};

use crate::data::types::Market;

const MARKETS_TABLE: &str = "markets";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to reach market backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Market backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse markets response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Read-only client for the hosted `markets` table (PostgREST dialect).
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, MARKETS_TABLE)
    }

    /// Fetch unresolved markets, highest total volume first.
    pub async fn fetch_open_markets(&self) -> Result<Vec<Market>, FeedError> {
        let response = self
            .client
            .get(self.markets_url())
            .query(&[
                ("select", "*"),
                ("resolved", "eq.false"),
                ("order", "total_volume.desc"),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .map_err(FeedError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        response.json().await.map_err(FeedError::Decode)
    }

    /// One-shot load for start-up. Failures are logged and yield no markets.
    pub async fn load_markets(&self) -> Vec<Market> {
        match self.fetch_open_markets().await {
            Ok(markets) => {
                info!("Fetched {} open markets", markets.len());
                markets
            }
            Err(e) => {
                error!("Error fetching markets: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    const TIMEOUT: Duration = Duration::from_secs(5);

    const BODY: &str = r#"[{
        "id": "a",
        "question": "Will SOL reach $500?",
        "description": "",
        "icon": "solana",
        "category": "crypto",
        "yes_volume": 90,
        "no_volume": 10,
        "total_volume": 100,
        "liquidity": 2500,
        "end_date": "2027-01-01T00:00:00Z",
        "outcome": "unlikely",
        "resolved": false,
        "winning_side": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }]"#;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}/", addr), rx)
    }

    #[tokio::test]
    async fn test_fetch_open_markets_query_and_headers() {
        let (base_url, request) = serve_once("HTTP/1.1 200 OK", BODY).await;
        let client = SupabaseClient::new(base_url, "anon-key".to_string(), TIMEOUT).unwrap();

        let markets = client.fetch_open_markets().await.unwrap();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].icon, "solana");

        let request = request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /rest/v1/markets?"));
        assert!(request_line.contains("resolved=eq.false"));
        assert!(request_line.contains("order=total_volume.desc"));

        let lower = request.to_lowercase();
        assert!(lower.contains("apikey: anon-key"));
        assert!(lower.contains("authorization: bearer anon-key"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base_url, _request) =
            serve_once("HTTP/1.1 401 Unauthorized", r#"{"message":"Invalid API key"}"#).await;
        let client = SupabaseClient::new(base_url, "bad".to_string(), TIMEOUT).unwrap();

        match client.fetch_open_markets().await {
            Err(FeedError::Status { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_markets_degrades_to_empty() {
        let (base_url, _request) = serve_once("HTTP/1.1 200 OK", "not json").await;
        let client = SupabaseClient::new(base_url, "anon-key".to_string(), TIMEOUT).unwrap();

        assert!(client.load_markets().await.is_empty());
    }
}
