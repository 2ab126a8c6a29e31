//! ルームごとの順序付けゲート
//!
//! 永続化を伴う操作（join / leave / commit / undo / redo / clear）は
//! 「ストアの変更 → ファンアウト」をこのゲートの内側で行います。
//! これにより、クライアントが受け取るイベントの順序はストア上の変更順と一致し、
//! join した参加者は `init` より後のイベントだけを受け取ります。
//! 一時的なリレー（draw_segment, cursor_move）はゲートを通りません。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomKey;

pub type RoomGate = OwnedMutexGuard<()>;

#[derive(Default)]
pub struct RoomSequencer {
    gates: DashMap<RoomKey, Arc<Mutex<()>>>,
}

impl RoomSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room`. Other rooms are unaffected.
    pub async fn acquire(&self, room: &RoomKey) -> RoomGate {
        let gate = Arc::clone(self.gates.entry(room.clone()).or_default().value());
        gate.lock_owned().await
    }

    /// Drop the gate of a discarded room unless someone is holding or waiting on it.
    pub fn retire(&self, room: &RoomKey) {
        self.gates
            .remove_if(room, |_, gate| Arc::strong_count(gate) == 1);
    }

    /// Number of rooms currently holding a gate.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
