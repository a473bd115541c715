//! tokio-tungstenite を使った Connector 実装
//!
//! 接続した WebSocket を送信用・受信用の 2 つのチャネルに橋渡しします。
//! 受信チャネルはソケットが閉じるかエラーになった時点で終了します。

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use url::Url;

use crate::{
    domain::{Connection, Connector},
    error::ClientError,
};

/// WebSocket implementation of [`Connector`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, url: &Url) -> Result<Connection, ClientError> {
        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        tracing::info!("WebSocket connection established: {}", url);

        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<String>();

        // socket → inbound channel
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if inbound_tx.send(text.to_string()).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::debug!("Ignoring {} bytes of binary data", data.len());
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        });

        // outbound channel → socket
        tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    tracing::warn!("Failed to send frame: {}", e);
                    break;
                }
            }
            write.close().await.ok();
        });

        Ok(Connection {
            outbound: outbound_tx,
            inbound: inbound_rx,
        })
    }
}
