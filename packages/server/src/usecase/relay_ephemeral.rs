//! UseCase: 一時的なイベントのリレー（draw_segment, cursor_move）
//!
//! 描画途中の線分とカーソル位置は保存せず、送信者以外のメンバーにそのまま転送します。
//! 順序付けゲートは通りません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayEphemeralUseCase::draw_segment() / cursor_move() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者本人には届かないこと、履歴に残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーへのリレー
//! - エッジケース：送信者しかいないルーム

use std::sync::Arc;

use crate::domain::{DrawSegment, MessagePusher, ParticipantId, Point, RoomEvent, RoomRegistry, Session};

use super::{
    error::DispatchError,
    fanout::{broadcast, room_targets},
};

/// 一時的なイベントのリレーのユースケース
pub struct RelayEphemeralUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayEphemeralUseCase {
    /// 新しい RelayEphemeralUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 描画途中の線分を他のメンバーに転送
    pub async fn draw_segment(
        &self,
        session: &Session,
        segment: DrawSegment,
    ) -> Result<Vec<ParticipantId>, DispatchError> {
        let event = RoomEvent::DrawSegment {
            sender_id: session.participant().id.clone(),
            segment,
        };
        self.relay(session, &event).await
    }

    /// カーソル位置を送信者のプロフィールと一緒に他のメンバーに転送
    pub async fn cursor_move(
        &self,
        session: &Session,
        position: Point,
    ) -> Result<Vec<ParticipantId>, DispatchError> {
        let event = RoomEvent::CursorUpdate {
            sender: session.participant().clone(),
            position,
        };
        self.relay(session, &event).await
    }

    async fn relay(
        &self,
        session: &Session,
        event: &RoomEvent,
    ) -> Result<Vec<ParticipantId>, DispatchError> {
        let sender_id = &session.participant().id;
        let targets = room_targets(self.registry.as_ref(), session.room(), Some(sender_id)).await;
        broadcast(self.message_pusher.as_ref(), targets.clone(), event).await?;
        Ok(targets)
    }
}
