//! InMemory Room Registry 実装
//!
//! ルームキーごとのメンバーシップを `DashMap` に保持します。
//! 同一ルームへの変更はエントリのロック下で行われ、別ルームの操作同士は互いをブロックしません。

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use fusuma_shared::time::Clock;

use crate::domain::{
    Departure, Participant, ParticipantId, RoomEpoch, RoomKey, RoomRegistry, RoomSummary,
    Timestamp,
};

/// ルーム 1 つ分のメンバーシップ
#[derive(Debug)]
struct Membership {
    epoch: RoomEpoch,
    created_at: Timestamp,
    /// join 順
    members: Vec<Participant>,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    rooms: DashMap<RoomKey, Membership>,
    next_epoch: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: DashMap::new(),
            next_epoch: AtomicU64::new(1),
            clock,
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room: &RoomKey, participant: Participant) -> RoomEpoch {
        let mut membership = self.rooms.entry(room.clone()).or_insert_with(|| {
            let epoch = RoomEpoch::new(self.next_epoch.fetch_add(1, Ordering::Relaxed));
            tracing::info!("Room '{}' created (epoch {})", room, epoch.value());
            Membership {
                epoch,
                created_at: Timestamp::new(self.clock.now_millis()),
                members: Vec::new(),
            }
        });

        // プロフィールは join 時に確定するため、既存メンバーは上書きしない
        if membership.members.iter().any(|p| p.id == participant.id) {
            tracing::debug!("Participant '{}' already in room '{}'", participant.id, room);
        } else {
            tracing::debug!("Participant '{}' joined room '{}'", participant.id, room);
            membership.members.push(participant);
        }

        membership.epoch
    }

    async fn leave(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<Departure> {
        let Entry::Occupied(mut entry) = self.rooms.entry(room.clone()) else {
            return None;
        };

        let membership = entry.get_mut();
        let index = membership
            .members
            .iter()
            .position(|p| &p.id == participant_id)?;
        let participant = membership.members.remove(index);

        let emptied_epoch = if membership.members.is_empty() {
            let removed = entry.remove();
            tracing::info!("Room '{}' is empty and was discarded", room);
            Some(removed.epoch)
        } else {
            None
        };

        Some(Departure {
            participant,
            emptied_epoch,
        })
    }

    async fn members(&self, room: &RoomKey) -> Vec<Participant> {
        self.rooms
            .get(room)
            .map(|membership| membership.members.clone())
            .unwrap_or_default()
    }

    async fn exists(&self, room: &RoomKey) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|membership| !membership.members.is_empty())
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|entry| RoomSummary {
                key: entry.key().clone(),
                member_count: entry.members.len(),
                created_at: entry.created_at,
            })
            .collect();

        // Sort by room key for consistent ordering
        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        summaries
    }
}
