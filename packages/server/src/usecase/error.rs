//! UseCase 層のエラー定義

use thiserror::Error;

/// 参加者接続（Joining）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("failed to deliver the initial snapshot: {0}")]
    SnapshotDeliveryFailed(String),

    #[error("failed to announce the new member: {0}")]
    BroadcastFailed(String),
}

/// Active 状態のアクション処理のエラー
///
/// ストアへの変更は既に適用済みで、配送のみが失敗したことを表します。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("failed to broadcast '{kind}': {reason}")]
    BroadcastFailed { kind: &'static str, reason: String },
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
