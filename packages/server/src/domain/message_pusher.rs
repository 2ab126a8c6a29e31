//! MessagePusher trait 定義
//!
//! 参加者へのメッセージ配送（トランスポート）の抽象化です。
//! 配送は fire-and-forget で、UseCase は到達確認を待ちません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, ParticipantId, RoomEvent};

/// Per-connection outbound channel. Carries encoded frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録し、最初のイベントを送信
    ///
    /// `greeting` は登録と不可分に送信され、このクライアントが受け取る他のどのイベントよりも先に届く。
    /// 送信に失敗した場合は登録しない。
    async fn register_client(
        &self,
        client_id: ParticipantId,
        sender: PusherChannel,
        greeting: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ParticipantId);

    /// 複数のクライアントにイベントを送信（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
