//! WebSocket implementation of the order change feed.

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ClientError;
use crate::gateway::ChangeFeed;
use crate::types::FeedEvent;

/// Buffered events per connection before backpressure drops the socket.
const FEED_CHANNEL_CAPACITY: usize = 64;

/// Connects to the server's `/api/v1/ws` endpoint and pumps frames into a
/// channel. The connection lives until the receiver is dropped or the
/// server closes the socket.
pub struct WsChangeFeed {
    url: String,
}

impl WsChangeFeed {
    /// `url` is the full WebSocket URL, e.g. `ws://host:3000/api/v1/ws`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl ChangeFeed for WsChangeFeed {
    async fn connect(&self) -> Result<mpsc::Receiver<FeedEvent>, ClientError> {
        let (socket, _response) = connect_async(&self.url)
            .await
            .map_err(|e| ClientError::Fetch(format!("Change feed connection failed: {e}")))?;

        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let (_write, mut read) = socket.split();

        tokio::spawn(async move {
            while let Some(result) = read.next().await {
                match result {
                    Ok(Message::Text(text)) => match serde_json::from_str::<FeedEvent>(&text) {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                // Receiver dropped: subscription torn down.
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Unparseable feed frame");
                        }
                    },
                    Ok(Message::Close(_)) => {
                        tracing::info!("Change feed closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Change feed receive error");
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }
}
