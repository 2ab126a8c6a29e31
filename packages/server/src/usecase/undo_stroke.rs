//! UseCase: 自分のストロークの取り消し（undo）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UndoStrokeUseCase::execute() メソッド
//! - 参加者自身の最新ストロークの取り消しと `history_after_undo` の配送
//!
//! ### なぜこのテストが必要か
//! - 他の参加者のストロークが取り消されないことを保証
//! - 取り消す対象がない場合は何も配送しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：他者のストロークと交互に描いた後の undo
//! - エッジケース：自分のストロークが無い状態での undo

use std::sync::Arc;

use crate::domain::{HistoryEdit, HistoryStore, MessagePusher, RoomEvent, RoomRegistry, Session};

use super::{
    error::DispatchError,
    fanout::{broadcast, room_targets},
    sequencer::RoomSequencer,
};

/// undo のユースケース
pub struct UndoStrokeUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl UndoStrokeUseCase {
    /// 新しい UndoStrokeUseCase を作成
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

    /// undo を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(HistoryEdit))` - 取り消したストロークと取り消し後の履歴
    /// * `Ok(None)` - 取り消せるストロークがない、またはセッションが既に Left（配送もしない）
    pub async fn execute(&self, session: &Session) -> Result<Option<HistoryEdit>, DispatchError> {
        let room = session.room();
        let requester_id = &session.participant().id;

        let _gate = self.sequencer.acquire(room).await;
        if !session.is_active() {
            tracing::debug!("Dropping undo from '{}' after leaving room '{}'", requester_id, room);
            return Ok(None);
        }

        let Some(edit) = self.history.undo(room, requester_id).await else {
            tracing::debug!("Nothing to undo for '{}' in room '{}'", requester_id, room);
            return Ok(None);
        };

        let event = RoomEvent::HistoryAfterUndo {
            stroke_id: edit.stroke.id(),
            requester_id: requester_id.clone(),
            history: edit.history.clone(),
        };
        let targets = room_targets(self.registry.as_ref(), room, None).await;
        broadcast(self.message_pusher.as_ref(), targets, &event).await?;

        Ok(Some(edit))
    }
}
