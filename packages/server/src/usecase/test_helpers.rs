//! UseCase テスト用のフィクスチャ
//!
//! 実際のインメモリストアと WebSocketMessagePusher を使い、
//! 各クライアントが受け取った JSON フレームを検証できるようにします。

use std::sync::Arc;

use fusuma_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        Color, DisplayName, Participant, ParticipantId, Point, RoomKey, Session, Stroke,
        StrokeSpec, StrokeWidth, Timestamp, ToolTag,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryHistoryStore, InMemoryRoomRegistry},
    },
};

use super::{
    ClearCanvasUseCase, CommitStrokeUseCase, ConnectParticipantUseCase,
    DisconnectParticipantUseCase, RedoStrokeUseCase, RelayEphemeralUseCase, RoomSequencer,
    UndoStrokeUseCase,
};

pub(crate) fn participant(id: &str) -> Participant {
    Participant::new(
        ParticipantId::new(id.to_string()).unwrap(),
        DisplayName::new(id.to_uppercase()).unwrap(),
        Color::new("#336699".to_string()).unwrap(),
        Timestamp::new(1000),
    )
}

pub(crate) fn session(room: &str, id: &str) -> Session {
    Session::new(RoomKey::new(room.to_string()).unwrap(), participant(id))
}

pub(crate) fn spec() -> StrokeSpec {
    StrokeSpec::new(
        vec![Point::new(0.0, 0.0).unwrap(), Point::new(4.0, 3.0).unwrap()],
        Color::new("#000000".to_string()).unwrap(),
        StrokeWidth::new(2.0).unwrap(),
        ToolTag::new("pen".to_string()).unwrap(),
    )
    .unwrap()
}

pub(crate) struct TestClient {
    pub session: Session,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// Decode every frame delivered so far.
    pub fn drain(&mut self) -> Vec<serde_json::Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }
}

pub(crate) struct TestRoom {
    pub registry: Arc<InMemoryRoomRegistry>,
    pub history: Arc<InMemoryHistoryStore>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub sequencer: Arc<RoomSequencer>,
}

impl TestRoom {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(5000));
        Self {
            registry: Arc::new(InMemoryRoomRegistry::new(clock.clone())),
            history: Arc::new(InMemoryHistoryStore::new(clock)),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            sequencer: Arc::new(RoomSequencer::new()),
        }
    }

    pub fn connect_usecase(&self) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn disconnect_usecase(&self) -> DisconnectParticipantUseCase {
        DisconnectParticipantUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn commit_usecase(&self) -> CommitStrokeUseCase {
        CommitStrokeUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn undo_usecase(&self) -> UndoStrokeUseCase {
        UndoStrokeUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn redo_usecase(&self) -> RedoStrokeUseCase {
        RedoStrokeUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn clear_usecase(&self) -> ClearCanvasUseCase {
        ClearCanvasUseCase::new(
            self.registry.clone(),
            self.history.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn relay_usecase(&self) -> RelayEphemeralUseCase {
        RelayEphemeralUseCase::new(self.registry.clone(), self.pusher.clone())
    }

    /// Run the full Joining phase for a new client.
    pub async fn join(&self, room: &str, id: &str) -> TestClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = session(room, id);
        self.connect_usecase()
            .execute(&session, tx)
            .await
            .expect("join should succeed");
        TestClient { session, rx }
    }

    pub async fn commit(&self, client: &TestClient) -> Stroke {
        self.commit_usecase()
            .execute(&client.session, spec())
            .await
            .expect("commit should succeed")
            .expect("session should be active")
    }

    pub async fn leave(&self, client: &TestClient) {
        self.disconnect_usecase().execute(&client.session).await;
    }
}
