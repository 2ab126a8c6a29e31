//! UseCase: ストロークの確定（stroke_commit）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CommitStrokeUseCase::execute() メソッド
//! - History Store への追加と、送信者を含む全メンバーへの `stroke_saved` 配送
//!
//! ### なぜこのテストが必要か
//! - 送信者もサーバーが採番した ID 付きのストロークを受け取ることを保証
//! - 新しいストロークの確定で作成者の redo スタックが破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーのいるルームでのストローク確定
//! - 異常系：配送の失敗（ストアへの変更は残る）

use std::sync::Arc;

use crate::domain::{
    HistoryStore, MessagePusher, RoomEvent, RoomRegistry, Session, Stroke, StrokeDraft,
    StrokeSpec,
};

use super::{
    error::DispatchError,
    fanout::{broadcast, room_targets},
    sequencer::RoomSequencer,
};

/// ストローク確定のユースケース
pub struct CommitStrokeUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl CommitStrokeUseCase {
    /// 新しい CommitStrokeUseCase を作成
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

    /// ストロークを確定し、ルームの全員に配送する
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Stroke))` - ID と作成時刻が確定したストローク
    /// * `Ok(None)` - セッションが既に Left（ストアは変更しない）
    /// * `Err(DispatchError)` - 配送の失敗（履歴には追加済み）
    pub async fn execute(
        &self,
        session: &Session,
        spec: StrokeSpec,
    ) -> Result<Option<Stroke>, DispatchError> {
        let room = session.room();
        let draft = StrokeDraft::new(session.participant(), spec);

        let _gate = self.sequencer.acquire(room).await;
        if !session.is_active() {
            tracing::debug!(
                "Dropping stroke from '{}' after leaving room '{}'",
                session.participant().id,
                room
            );
            return Ok(None);
        }

        let stroke = self.history.commit(room, draft).await;
        tracing::debug!(
            "Stroke {} committed by '{}' in room '{}'",
            stroke.id(),
            stroke.owner_id(),
            room
        );

        let targets = room_targets(self.registry.as_ref(), room, None).await;
        broadcast(
            self.message_pusher.as_ref(),
            targets,
            &RoomEvent::StrokeSaved(stroke.clone()),
        )
        .await?;

        Ok(Some(stroke))
    }
}
