use devmarket_client::realtime::ConversationChannel;
use devmarket_client::{ApiClient, ClientConfig};
use devmarket_types::api::MessageCreate;
use devmarket_types::models::{Message, User};
use tracing::warn;
use uuid::Uuid;

use super::page_err;

/// One conversation with one peer. Sending appends the returned message to
/// the in-view list without re-fetching; any realtime signal triggers a
/// full history re-fetch instead. The channel closes with the view.
pub struct ConversationView {
    viewer: User,
    peer: Uuid,
    messages: Vec<Message>,
    channel: Option<ConversationChannel>,
}

impl ConversationView {
    pub async fn open(
        api: &ApiClient,
        config: &ClientConfig,
        viewer: &User,
        peer: Uuid,
    ) -> Result<Self, String> {
        let messages = fetch_history(api, peer).await?;

        // The page still works without realtime; it just won't notice the
        // other side until the next manual refresh.
        let channel = match ConversationChannel::connect(&config.ws_base, viewer.id).await {
            Ok(channel) => Some(channel),
            Err(e) => {
                warn!("realtime channel unavailable: {e}");
                None
            }
        };

        Ok(Self {
            viewer: viewer.clone(),
            peer,
            messages,
            channel,
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    /// POST the message and append the backend's record of it. No
    /// re-fetch on this path.
    pub async fn send(&mut self, api: &ApiClient, content: &str) -> Result<(), String> {
        let sent = api
            .send_message(&MessageCreate {
                receiver_id: self.peer,
                content: content.to_string(),
                order_id: None,
            })
            .await
            .map_err(page_err)?;
        self.messages.push(sent);
        Ok(())
    }

    /// Block until the next realtime signal, then re-fetch the full
    /// history. Returns false once the channel is gone.
    pub async fn on_signal(&mut self, api: &ApiClient) -> Result<bool, String> {
        let Some(channel) = self.channel.as_mut() else {
            return Ok(false);
        };
        if channel.recv().await.is_none() {
            self.channel = None;
            return Ok(false);
        }
        self.messages = fetch_history(api, self.peer).await?;
        Ok(true)
    }

    /// Non-blocking variant for the shell loop: collapse any pending
    /// signals into one re-fetch.
    pub async fn pump(&mut self, api: &ApiClient) -> Result<bool, String> {
        let stale = self.channel.as_mut().is_some_and(ConversationChannel::drain);
        if stale {
            self.messages = fetch_history(api, self.peer).await?;
        }
        Ok(stale)
    }

    pub fn render(&self) -> String {
        let mut out = format!("== Conversation with {} ==\n", self.peer);
        for msg in &self.messages {
            let stamp = msg.created_at.format("%H:%M");
            if msg.sender_id == self.viewer.id {
                out.push_str(&format!("{stamp}           you > {}\n", msg.content));
            } else {
                out.push_str(&format!("{stamp} {} > {}\n", msg.sender_id, msg.content));
            }
        }
        if self.messages.is_empty() {
            out.push_str("(no messages yet)\n");
        }
        out.push_str("(type `say <text>` to send, `refresh` to re-pull)\n");
        out
    }
}

/// The backend returns history newest-first; the view shows it in
/// chronological order.
async fn fetch_history(api: &ApiClient, peer: Uuid) -> Result<Vec<Message>, String> {
    let mut messages = api.message_history(peer).await.map_err(page_err)?;
    messages.reverse();
    Ok(messages)
}
