use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// What the conversation view receives from the channel. Frame content is
/// never inspected; every inbound data frame means "your message history
/// is stale, fetch it again".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSignal {
    Refresh,
}

/// One WebSocket connection, scoped to a single conversation view and
/// parameterized by the viewer's identity. The reader task runs until the
/// socket closes or the handle is dropped; there is no reconnection or
/// backoff if the connection drops.
pub struct ConversationChannel {
    signals: mpsc::Receiver<ChannelSignal>,
    reader: JoinHandle<()>,
}

impl ConversationChannel {
    pub async fn connect(ws_base: &str, viewer_id: Uuid) -> Result<Self, ApiError> {
        let url = format!(
            "{}/api/v1/messages/ws/{viewer_id}",
            ws_base.trim_end_matches('/')
        );
        let (mut stream, _) = connect_async(url.as_str()).await?;
        info!("conversation channel open as {viewer_id}");

        let (tx, signals) = mpsc::channel(8);
        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(WsMessage::Text(_)) | Ok(WsMessage::Binary(_)) => {
                        // Invalidate-and-refetch: the payload is opaque.
                        if tx.send(ChannelSignal::Refresh).await.is_err() {
                            break;
                        }
                    }
                    Ok(WsMessage::Close(_)) => {
                        debug!("conversation channel closed by server");
                        break;
                    }
                    // Ping/pong is handled by the protocol layer.
                    Ok(_) => {}
                    Err(e) => {
                        warn!("conversation channel error: {e}");
                        break;
                    }
                }
            }
        });

        Ok(Self { signals, reader })
    }

    /// Wait for the next invalidation signal. Returns `None` once the
    /// socket has closed and all pending signals were consumed.
    pub async fn recv(&mut self) -> Option<ChannelSignal> {
        self.signals.recv().await
    }

    /// Drain any signals that arrived since the last check, without
    /// waiting. Returns whether at least one was pending.
    pub fn drain(&mut self) -> bool {
        let mut saw_any = false;
        while self.signals.try_recv().is_ok() {
            saw_any = true;
        }
        saw_any
    }
}

impl Drop for ConversationChannel {
    fn drop(&mut self) {
        // View teardown: kill the reader, which drops the socket.
        self.reader.abort();
    }
}
