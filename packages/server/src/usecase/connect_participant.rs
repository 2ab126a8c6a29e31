//! UseCase: 参加者接続処理（Joining）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - Room Registry への登録、`init` スナップショットの配送、既存メンバーへの join 通知
//!
//! ### なぜこのテストが必要か
//! - join した参加者がルームの全履歴を受け取れることを保証
//! - `init` は本人のみ、`member_joined` は本人以外にのみ届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルーム・既存メンバーがいるルームへの接続
//! - エッジケース：一度空になったルームへの再接続（以前の履歴が見えないこと）

use std::sync::Arc;

use crate::domain::{
    HistoryStore, MessagePusher, ParticipantId, PusherChannel, RoomEvent, RoomRegistry, Session,
};

use super::{error::ConnectError, fanout::room_targets, sequencer::RoomSequencer};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
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

    /// 参加者接続を実行し、セッションを Active にする
    ///
    /// # Arguments
    ///
    /// * `session` - Joining 状態のセッション（ルームとプロフィールは確定済み）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ParticipantId>)` - join 通知を送った既存メンバー
    /// * `Err(ConnectError)` - スナップショットまたは join 通知の配送失敗
    pub async fn execute(
        &self,
        session: &Session,
        sender: PusherChannel,
    ) -> Result<Vec<ParticipantId>, ConnectError> {
        let room = session.room();
        let participant = session.participant();

        // ゲート内で登録・スナップショット・通知を行う
        let _gate = self.sequencer.acquire(room).await;

        // 1. Room Registry に登録し、履歴をこのエポック用に開く
        let epoch = self.registry.join(room, participant.clone()).await;
        self.history.open(room, epoch).await;

        let members = self.registry.members(room).await;
        let history = self.history.history(room).await;
        tracing::info!(
            "Participant '{}' ({}) joined room '{}' ({} members, {} strokes)",
            participant.id,
            participant.name.as_str(),
            room,
            members.len(),
            history.len()
        );

        // 2. MessagePusher に登録し、本人にのみ init を送信
        //    （ゲートを通らないリレーよりも init が先に届く）
        let init = RoomEvent::Init {
            participant: participant.clone(),
            room: room.clone(),
            members,
            history,
        };
        self.message_pusher
            .register_client(participant.id.clone(), sender, &init)
            .await
            .map_err(|e| ConnectError::SnapshotDeliveryFailed(e.to_string()))?;

        // 3. 本人以外に join を通知
        let targets = room_targets(self.registry.as_ref(), room, Some(&participant.id)).await;
        self.message_pusher
            .broadcast(targets.clone(), &RoomEvent::MemberJoined(participant.clone()))
            .await
            .map_err(|e| ConnectError::BroadcastFailed(e.to_string()))?;

        session.activate();
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, SessionPhase},
        usecase::test_helpers::{TestRoom, session},
    };

    #[tokio::test]
    async fn test_connect_to_empty_room() {
        // テスト項目: 空のルームに接続すると、自分だけを含む init を受け取り Active になる
        // given (前提条件):
        let fixture = TestRoom::new();

        // when (操作):
        let mut alice = fixture.join("lobby", "alice").await;

        // then (期待する結果):
        assert_eq!(alice.session.phase(), SessionPhase::Active);
        let frames = alice.drain();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "init");
        assert_eq!(frames[0]["room"], "lobby");
        assert_eq!(frames[0]["participant"]["id"], "alice");
        assert_eq!(frames[0]["members"].as_array().unwrap().len(), 1);
        assert!(frames[0]["history"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_delivers_history_and_notifies_others() {
        // テスト項目: 既存の履歴が init で届き、既存メンバーには member_joined が届く
        // given (前提条件):
        let fixture = TestRoom::new();
        let mut alice = fixture.join("lobby", "alice").await;
        fixture.commit(&alice).await;
        fixture.commit(&alice).await;
        alice.drain();

        // when (操作):
        let mut bob = fixture.join("lobby", "bob").await;

        // then (期待する結果):
        let bob_frames = bob.drain();
        assert_eq!(bob_frames.len(), 1);
        assert_eq!(bob_frames[0]["type"], "init");
        assert_eq!(bob_frames[0]["members"].as_array().unwrap().len(), 2);
        assert_eq!(bob_frames[0]["history"].as_array().unwrap().len(), 2);

        let alice_frames = alice.drain();
        assert_eq!(alice_frames.len(), 1);
        assert_eq!(alice_frames[0]["type"], "member_joined");
        assert_eq!(alice_frames[0]["id"], "bob");
        assert_eq!(alice_frames[0]["name"], "BOB");
    }

    #[tokio::test]
    async fn test_reconnect_after_room_emptied_starts_clean() {
        // テスト項目: 最後のメンバーが退出した後の再接続では、以前の履歴が見えない
        // given (前提条件):
        let fixture = TestRoom::new();
        let alice = fixture.join("lobby", "alice").await;
        fixture.commit(&alice).await;
        fixture.leave(&alice).await;

        // when (操作):
        let mut carol = fixture.join("lobby", "carol").await;

        // then (期待する結果):
        let frames = carol.drain();
        assert_eq!(frames[0]["type"], "init");
        assert!(frames[0]["history"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_fails_when_snapshot_cannot_be_delivered() {
        // テスト項目: init を配送できない場合はエラーになり、セッションは Active にならない
        // given (前提条件):
        let fixture = TestRoom::new();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_register_client().returning(|_, _, _| {
            Err(crate::domain::MessagePushError::PushFailed(
                "channel closed".to_string(),
            ))
        });
        pusher.expect_broadcast().never();
        let usecase = ConnectParticipantUseCase::new(
            fixture.registry.clone(),
            fixture.history.clone(),
            Arc::new(pusher),
            fixture.sequencer.clone(),
        );
        let alice = session("lobby", "alice");
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(&alice, tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::SnapshotDeliveryFailed(_))));
        assert_eq!(alice.phase(), SessionPhase::Joining);
    }
}
