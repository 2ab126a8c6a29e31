//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{HistoryStore, Participant, RoomKey, RoomRegistry, Stroke};

use super::error::GetRoomDetailError;

/// ルームのメンバーと履歴のスナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetail {
    pub key: RoomKey,
    pub members: Vec<Participant>,
    pub history: Vec<Stroke>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, history: Arc<dyn HistoryStore>) -> Self {
        Self { registry, history }
    }

    /// ルームのメンバーと履歴を返す
    ///
    /// メンバーのいないルームは存在しないものとして扱う。
    pub async fn execute(&self, room: &RoomKey) -> Result<RoomDetail, GetRoomDetailError> {
        let members = self.registry.members(room).await;
        if members.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound);
        }
        let history = self.history.history(room).await;

        Ok(RoomDetail {
            key: room.clone(),
            members,
            history,
        })
    }
}
