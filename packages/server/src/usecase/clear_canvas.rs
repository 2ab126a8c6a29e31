//! UseCase: キャンバスの全消去（clear）

use std::sync::Arc;

use crate::domain::{HistoryStore, MessagePusher, ParticipantId, RoomEvent, RoomRegistry, Session};

use super::{
    error::DispatchError,
    fanout::{broadcast, room_targets},
    sequencer::RoomSequencer,
};

/// キャンバス全消去のユースケース
///
/// 誰が実行しても、ルームの履歴と全参加者の redo スタックが破棄されます。
pub struct ClearCanvasUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl ClearCanvasUseCase {
    /// 新しい ClearCanvasUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        history: Arc<dyn HistoryStore>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
    ) -> Self {
        Self {
            registry,
            history,
            message_pusher,
            sequencer,
        }
    }

    /// 全消去を実行し、`cleared` を配送したメンバーを返す
    ///
    /// セッションが既に Left の場合は何もせず `Ok(None)` を返します。
    pub async fn execute(
        &self,
        session: &Session,
    ) -> Result<Option<Vec<ParticipantId>>, DispatchError> {
        let room = session.room();
        let requester = session.participant();

        let _gate = self.sequencer.acquire(room).await;
        if !session.is_active() {
            tracing::debug!("Dropping clear from '{}' after leaving room '{}'", requester.id, room);
            return Ok(None);
        }

        self.history.clear(room).await;
        tracing::info!("Room '{}' cleared by '{}'", room, requester.id);

        let event = RoomEvent::Cleared {
            requester_id: requester.id.clone(),
            requester_name: requester.name.clone(),
        };
        let targets = room_targets(self.registry.as_ref(), room, None).await;
        broadcast(self.message_pusher.as_ref(), targets.clone(), &event).await?;

        Ok(Some(targets))
    }
}
