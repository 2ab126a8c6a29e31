//! UseCase: 参加者切断処理（Left）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Room Registry からの削除、redo スタックの破棄、残りのメンバーへの通知
//!
//! ### なぜこのテストが必要か
//! - 後片付けが一度だけ実行されることを保証
//! - 退出した参加者のストロークが履歴に残る（帰属も保持される）ことを確認
//! - 最後のメンバーが退出した場合にルームと履歴が破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし）、二重の切断

use std::sync::Arc;

use crate::domain::{HistoryStore, MessagePusher, ParticipantId, RoomEvent, RoomRegistry, Session};

use super::{fanout::room_targets, sequencer::RoomSequencer};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Vec<ParticipantId>)` - 退出を通知した残りのメンバー
    /// * `None` - 既に退出済み、またはルームのメンバーではなかった（何もしない）
    pub async fn execute(&self, session: &Session) -> Option<Vec<ParticipantId>> {
        // 1. Left への遷移は一度だけ
        if !session.mark_left() {
            return None;
        }

        let room = session.room();
        let participant_id = &session.participant().id;

        // 2. 以降のイベントを受け取らないよう、先に MessagePusher から登録解除
        self.message_pusher.unregister_client(participant_id).await;

        let (notified, room_emptied) = {
            let _gate = self.sequencer.acquire(room).await;

            // 3. Room Registry から削除（メンバーでなければ何もしない）
            let departure = self.registry.leave(room, participant_id).await?;

            // 4. redo スタックを破棄（作成したストロークは残る）
            self.history.forget(room, participant_id).await;

            // 5. ルームが空になった場合は履歴も破棄
            if let Some(epoch) = departure.emptied_epoch {
                self.history.evict(room, epoch).await;
            }

            // 6. 残りのメンバーに通知
            let targets = room_targets(self.registry.as_ref(), room, None).await;
            let left = RoomEvent::MemberLeft {
                id: departure.participant.id.clone(),
                name: departure.participant.name.clone(),
            };
            if let Err(e) = self.message_pusher.broadcast(targets.clone(), &left).await {
                tracing::warn!("Failed to broadcast member_left: {}", e);
            }

            (targets, departure.emptied_epoch.is_some())
        };

        if room_emptied {
            self.sequencer.retire(room);
        }

        tracing::info!(
            "Participant '{}' left room '{}' ({} remaining)",
            participant_id,
            room,
            notified.len()
        );
        Some(notified)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{HistoryStore, RoomRegistry, SessionPhase},
        usecase::test_helpers::{TestRoom, session},
    };

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_members() {
        // テスト項目: 切断すると残りのメンバーに member_left が届く
        // given (前提条件):
        let fixture = TestRoom::new();
        let mut alice = fixture.join("lobby", "alice").await;
        let bob = fixture.join("lobby", "bob").await;
        alice.drain();

        // when (操作):
        let notified = fixture.disconnect_usecase().execute(&bob.session).await;

        // then (期待する結果):
        assert_eq!(notified, Some(vec![alice.session.participant().id.clone()]));
        assert_eq!(bob.session.phase(), SessionPhase::Left);

        let frames = alice.drain();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "member_left");
        assert_eq!(frames[0]["id"], "bob");
        assert_eq!(frames[0]["name"], "BOB");
    }

    #[tokio::test]
    async fn test_disconnect_runs_once() {
        // テスト項目: 二回目以降の切断処理は何もしない
        let fixture = TestRoom::new();
        let mut alice = fixture.join("lobby", "alice").await;
        let bob = fixture.join("lobby", "bob").await;
        alice.drain();
        let usecase = fixture.disconnect_usecase();

        assert!(usecase.execute(&bob.session).await.is_some());
        assert_eq!(usecase.execute(&bob.session).await, None);

        // member_left は一度だけ
        assert_eq!(alice.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_keeps_strokes_and_discards_redo() {
        // テスト項目: 退出者のストロークは帰属付きで残り、redo スタックは破棄される
        // given (前提条件):
        let fixture = TestRoom::new();
        let alice = fixture.join("lobby", "alice").await;
        let _bob = fixture.join("lobby", "bob").await;
        let kept = fixture.commit(&alice).await;
        fixture.commit(&alice).await;
        fixture
            .undo_usecase()
            .execute(&alice.session)
            .await
            .unwrap()
            .unwrap();
        let room = alice.session.room().clone();
        let alice_id = alice.session.participant().id.clone();

        // when (操作):
        fixture.leave(&alice).await;

        // then (期待する結果):
        let history = fixture.history.history(&room).await;
        assert_eq!(history, vec![kept]);
        assert_eq!(history[0].owner_name().as_str(), "ALICE");
        assert_eq!(fixture.history.redo(&room, &alice_id).await, None);
    }

    #[tokio::test]
    async fn test_last_member_leaving_discards_room() {
        // テスト項目: 最後のメンバーが退出するとルーム・履歴・ゲートが破棄される
        let fixture = TestRoom::new();
        let alice = fixture.join("lobby", "alice").await;
        fixture.commit(&alice).await;
        let room = alice.session.room().clone();

        let notified = fixture.disconnect_usecase().execute(&alice.session).await;

        assert_eq!(notified, Some(vec![]));
        assert!(!fixture.registry.exists(&room).await);
        assert_eq!(fixture.history.room_count(), 0);
        assert!(fixture.sequencer.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_non_member_is_noop() {
        // テスト項目: join していないセッションの切断は何もしない
        let fixture = TestRoom::new();
        let ghost = session("lobby", "ghost");

        let notified = fixture.disconnect_usecase().execute(&ghost).await;

        assert_eq!(notified, None);
        assert_eq!(ghost.phase(), SessionPhase::Left);
        assert_eq!(fixture.history.room_count(), 0);
    }
}
