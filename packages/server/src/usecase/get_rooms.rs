//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSummary};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 現在存在する全ルームのサマリーを返す（キー順）
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_helpers::TestRoom;

    #[tokio::test]
    async fn test_get_rooms_lists_live_rooms() {
        // テスト項目: メンバーのいるルームだけが一覧に含まれる
        // given (前提条件):
        let fixture = TestRoom::new();
        let _alice = fixture.join("lobby", "alice").await;
        let _bob = fixture.join("lobby", "bob").await;
        let carol = fixture.join("studio", "carol").await;
        let _dave = fixture.join("attic", "dave").await;
        fixture.leave(&carol).await;
        let usecase = GetRoomsUseCase::new(fixture.registry.clone());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let summary: Vec<(&str, usize)> = rooms
            .iter()
            .map(|room| (room.key.as_str(), room.member_count))
            .collect();
        assert_eq!(summary, vec![("attic", 1), ("lobby", 2)]);
    }
}
