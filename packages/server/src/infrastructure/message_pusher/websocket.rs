//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `RoomEvent` を JSON フレームにエンコードして送信（broadcast）
//! - 登録時に最初のイベント（`init`）を、他のどのイベントよりも先に送信
//!
//! WebSocket の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）が行い、
//! この実装は受け取った sender を使って送信するだけです。
//! ブロードキャストではイベントを一度だけエンコードし、全宛先で共有します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, ParticipantId, PusherChannel, RoomEvent},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(participant_id.clone(), tx, &init).await?;
/// pusher.broadcast(vec![participant_id.clone()], &event).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: participant id, Value: 接続の送信チャンネル
    clients: Mutex<HashMap<ParticipantId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        client_id: ParticipantId,
        sender: PusherChannel,
        greeting: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(greeting)?;
        let mut clients = self.clients.lock().await;

        // ロックを保持したまま送信するので、greeting は他のイベントより必ず先に届く
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Client '{}' registered to MessagePusher with '{}'",
            client_id,
            greeting.kind()
        );
        clients.insert(client_id, sender);
        Ok(())
    }

    async fn unregister_client(&self, client_id: &ParticipantId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        if targets.is_empty() {
            return Ok(());
        }
        let frame = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push message to client '{}': {}", target, e);
                    } else {
                        tracing::debug!("Broadcasted '{}' to client '{}'", event.kind(), target);
                    }
                }
                None => {
                    tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
