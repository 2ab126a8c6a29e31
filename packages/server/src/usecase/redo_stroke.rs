//! UseCase: 取り消したストロークの復元（redo）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RedoStrokeUseCase::execute() メソッド
//! - redo スタックからの復元と `history_after_redo` の配送
//!
//! ### なぜこのテストが必要か
//! - 復元されたストロークが元の ID・帰属を保ったまま履歴の末尾に戻ることを保証
//! - 新しいストロークの確定後は redo できないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：undo 直後の redo
//! - エッジケース：redo スタックが空、commit による redo スタックの破棄

use std::sync::Arc;

use crate::domain::{HistoryEdit, HistoryStore, MessagePusher, RoomEvent, RoomRegistry, Session};

use super::{
    error::DispatchError,
    fanout::{broadcast, room_targets},
    sequencer::RoomSequencer,
};

/// redo のユースケース
pub struct RedoStrokeUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl RedoStrokeUseCase {
    /// 新しい RedoStrokeUseCase を作成
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

    /// redo を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(HistoryEdit))` - 復元したストロークと復元後の履歴
    /// * `Ok(None)` - redo スタックが空、またはセッションが既に Left（配送もしない）
    pub async fn execute(&self, session: &Session) -> Result<Option<HistoryEdit>, DispatchError> {
        let room = session.room();
        let requester_id = &session.participant().id;

        let _gate = self.sequencer.acquire(room).await;
        if !session.is_active() {
            tracing::debug!("Dropping redo from '{}' after leaving room '{}'", requester_id, room);
            return Ok(None);
        }

        let Some(edit) = self.history.redo(room, requester_id).await else {
            tracing::debug!("Nothing to redo for '{}' in room '{}'", requester_id, room);
            return Ok(None);
        };

        let event = RoomEvent::HistoryAfterRedo {
            stroke: edit.stroke.clone(),
            requester_id: requester_id.clone(),
            history: edit.history.clone(),
        };
        let targets = room_targets(self.registry.as_ref(), room, None).await;
        broadcast(self.message_pusher.as_ref(), targets, &event).await?;

        Ok(Some(edit))
    }
}
