//! Repository trait 定義
//!
//! ドメイン層が必要とするデータストアのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `RoomRegistry`: ルームごとのメンバーシップ（描画データは持たない）
//! - `HistoryStore`: ルームごとのストローク履歴と参加者ごとの redo スタック
//!
//! どちらも未知のルームを「空のルーム」として扱い、エラーにはしません。

use async_trait::async_trait;

use super::{
    Participant, ParticipantId, RoomEpoch, RoomKey, RoomSummary, Stroke, StrokeDraft,
};

/// Result of removing a participant from a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Profile of the participant that left.
    pub participant: Participant,
    /// Set when the room became empty and was discarded.
    pub emptied_epoch: Option<RoomEpoch>,
}

/// Result of a successful undo or redo: the moved stroke and the history right after the move.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEdit {
    pub stroke: Stroke,
    pub history: Vec<Stroke>,
}

/// Room Registry trait
///
/// メンバーシップの管理のみを担当します。同一ルームへの変更はルーム単位で排他されます。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 参加者をルームに追加（ルームが無ければ作成）し、ルームのエポックを返す
    async fn join(&self, room: &RoomKey, participant: Participant) -> RoomEpoch;

    /// 参加者をルームから削除
    ///
    /// 参加者が存在しなければ `None`（エラーではない）。
    /// ルームが空になった場合はルームごと破棄される。
    async fn leave(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<Departure>;

    /// メンバー一覧のスナップショット（join 順）
    async fn members(&self, room: &RoomKey) -> Vec<Participant>;

    /// ルームに 1 人以上のメンバーがいるか
    async fn exists(&self, room: &RoomKey) -> bool;

    /// 存在する全ルームのサマリー
    async fn rooms(&self) -> Vec<RoomSummary>;
}

/// History Store trait
///
/// ルームのストローク履歴と redo スタックを排他的に所有します。
/// 同一ルームへの変更操作（commit / undo / redo / clear）は互いにアトミックに適用されます。
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// ルームの履歴を `epoch` のインカネーション用に開く
    ///
    /// 古いエポックの履歴が残っていれば破棄する。
    async fn open(&self, room: &RoomKey, epoch: RoomEpoch);

    /// ストロークを確定して末尾に追加し、作成者の redo スタックを破棄する
    async fn commit(&self, room: &RoomKey, draft: StrokeDraft) -> Stroke;

    /// 参加者自身の最新のストロークを取り除き、redo スタックに積む
    async fn undo(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<HistoryEdit>;

    /// redo スタックの先頭を履歴の現在の末尾に戻す
    async fn redo(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<HistoryEdit>;

    /// 履歴と全参加者の redo スタックを破棄する
    async fn clear(&self, room: &RoomKey);

    /// 履歴全体（挿入順）
    async fn history(&self, room: &RoomKey) -> Vec<Stroke>;

    /// 参加者の redo スタックのみを破棄する（作成したストロークは残る）
    async fn forget(&self, room: &RoomKey, participant_id: &ParticipantId);

    /// `epoch` のインカネーションの履歴を破棄する（新しいエポックで開かれていれば何もしない）
    async fn evict(&self, room: &RoomKey, epoch: RoomEpoch);
}
