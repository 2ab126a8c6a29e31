//! InMemory History Store 実装
//!
//! ルームごとに `Arc<Mutex<RoomHistory>>` を持ち、同一ルームへの変更をそのロックで直列化します。
//! 書き込み（open / commit）は get-or-create（`room_slot`）、それ以外は既存のスロットだけを参照し、
//! 未知のルームは空の履歴として扱われます。

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use dashmap::DashMap;
use fusuma_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    HistoryEdit, HistoryStore, ParticipantId, RoomEpoch, RoomKey, Stroke, StrokeDraft, StrokeId,
    Timestamp,
};

/// ルーム 1 つ分の履歴と redo スタック
#[derive(Debug, Default)]
struct RoomHistory {
    epoch: RoomEpoch,
    /// 挿入順
    strokes: Vec<Stroke>,
    /// 参加者ごとの LIFO
    redo_stacks: HashMap<ParticipantId, Vec<Stroke>>,
}

impl RoomHistory {
    fn reset(&mut self, epoch: RoomEpoch) {
        self.epoch = epoch;
        self.strokes.clear();
        self.redo_stacks.clear();
    }

    fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.redo_stacks.is_empty()
    }
}

type RoomSlot = Arc<Mutex<RoomHistory>>;

/// インメモリ History Store 実装
pub struct InMemoryHistoryStore {
    rooms: DashMap<RoomKey, RoomSlot>,
    /// 全ルーム共通の採番（ID はプロセス内で一意）
    next_stroke_id: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl InMemoryHistoryStore {
    /// 新しい InMemoryHistoryStore を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: DashMap::new(),
            next_stroke_id: AtomicU64::new(1),
            clock,
        }
    }

    /// Get-or-create the slot for `room`.
    ///
    /// The map guard is released before the caller locks the slot.
    fn room_slot(&self, room: &RoomKey) -> RoomSlot {
        Arc::clone(self.rooms.entry(room.clone()).or_default().value())
    }

    /// Slot for `room` if it exists. Reads and no-op edits never create one.
    fn existing_slot(&self, room: &RoomKey) -> Option<RoomSlot> {
        self.rooms.get(room).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of rooms currently holding a slot.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn open(&self, room: &RoomKey, epoch: RoomEpoch) {
        let slot = self.room_slot(room);
        let mut history = slot.lock().await;
        if history.epoch != epoch {
            if !history.is_empty() {
                tracing::debug!(
                    "Discarding stale history of room '{}' (epoch {} -> {})",
                    room,
                    history.epoch.value(),
                    epoch.value()
                );
            }
            history.reset(epoch);
        }
    }

    async fn commit(&self, room: &RoomKey, draft: StrokeDraft) -> Stroke {
        let slot = self.room_slot(room);
        let mut history = slot.lock().await;

        let id = StrokeId::new(self.next_stroke_id.fetch_add(1, Ordering::Relaxed));
        let stroke = draft.finalize(id, Timestamp::new(self.clock.now_millis()));

        // 新しいストロークは作成者の redo の未来を無効にする
        history.redo_stacks.remove(stroke.owner_id());
        history.strokes.push(stroke.clone());

        tracing::debug!(
            "Stroke {} committed to room '{}' by '{}' ({} strokes)",
            id,
            room,
            stroke.owner_id(),
            history.strokes.len()
        );
        stroke
    }

    async fn undo(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<HistoryEdit> {
        let slot = self.existing_slot(room)?;
        let mut history = slot.lock().await;

        // 新しい順に走査し、要求者自身の最初のストロークを取り除く
        let index = history
            .strokes
            .iter()
            .rposition(|stroke| stroke.is_owned_by(participant_id))?;
        let stroke = history.strokes.remove(index);
        history
            .redo_stacks
            .entry(participant_id.clone())
            .or_default()
            .push(stroke.clone());

        tracing::debug!(
            "Stroke {} undone in room '{}' by '{}'",
            stroke.id(),
            room,
            participant_id
        );
        Some(HistoryEdit {
            stroke,
            history: history.strokes.clone(),
        })
    }

    async fn redo(&self, room: &RoomKey, participant_id: &ParticipantId) -> Option<HistoryEdit> {
        let slot = self.existing_slot(room)?;
        let mut history = slot.lock().await;

        let stack = history.redo_stacks.get_mut(participant_id)?;
        let stroke = stack.pop()?;
        if stack.is_empty() {
            history.redo_stacks.remove(participant_id);
        }

        // 元の位置ではなく、現在の末尾に戻す
        history.strokes.push(stroke.clone());

        tracing::debug!(
            "Stroke {} redone in room '{}' by '{}'",
            stroke.id(),
            room,
            participant_id
        );
        Some(HistoryEdit {
            stroke,
            history: history.strokes.clone(),
        })
    }

    async fn clear(&self, room: &RoomKey) {
        let Some(slot) = self.existing_slot(room) else {
            return;
        };
        let mut history = slot.lock().await;
        let epoch = history.epoch;
        history.reset(epoch);
        tracing::debug!("Room '{}' cleared", room);
    }

    async fn history(&self, room: &RoomKey) -> Vec<Stroke> {
        let Some(slot) = self.existing_slot(room) else {
            return Vec::new();
        };
        let history = slot.lock().await;
        history.strokes.clone()
    }

    async fn forget(&self, room: &RoomKey, participant_id: &ParticipantId) {
        let Some(slot) = self.existing_slot(room) else {
            return;
        };
        let mut history = slot.lock().await;
        history.redo_stacks.remove(participant_id);
    }

    async fn evict(&self, room: &RoomKey, epoch: RoomEpoch) {
        let Some(slot) = self.existing_slot(room) else {
            return;
        };

        {
            let mut history = slot.lock().await;
            if history.epoch != epoch {
                // 既に新しいインカネーションで開かれている
                return;
            }
            history.reset(epoch);
        }

        // 使用中（ロック中）や再利用済みのスロットは残す
        let removed = self
            .rooms
            .remove_if(room, |_, current| {
                Arc::ptr_eq(current, &slot)
                    && current
                        .try_lock()
                        .is_ok_and(|history| history.epoch == epoch && history.is_empty())
            })
            .is_some();
        if removed {
            tracing::debug!("History of room '{}' evicted", room);
        }
    }
}
