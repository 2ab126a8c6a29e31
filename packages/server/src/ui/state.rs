//! Shared application state.

use std::sync::Arc;

use fusuma_shared::time::Clock;

use crate::{
    domain::{HistoryStore, MessagePusher, RoomKey, RoomRegistry},
    usecase::{
        ClearCanvasUseCase, CommitStrokeUseCase, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, GetRoomDetailUseCase, GetRoomsUseCase, RedoStrokeUseCase,
        RelayEphemeralUseCase, RoomSequencer, UndoStrokeUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// CommitStrokeUseCase（ストローク確定のユースケース）
    pub commit_stroke_usecase: Arc<CommitStrokeUseCase>,
    /// UndoStrokeUseCase（undo のユースケース）
    pub undo_stroke_usecase: Arc<UndoStrokeUseCase>,
    /// RedoStrokeUseCase（redo のユースケース）
    pub redo_stroke_usecase: Arc<RedoStrokeUseCase>,
    /// ClearCanvasUseCase（全消去のユースケース）
    pub clear_canvas_usecase: Arc<ClearCanvasUseCase>,
    /// RelayEphemeralUseCase（draw_segment / cursor_move のリレー）
    pub relay_ephemeral_usecase: Arc<RelayEphemeralUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// 参加時刻の取得に使う Clock
    pub clock: Arc<dyn Clock>,
    /// `room` クエリが無い接続の参加先
    pub default_room: RoomKey,
}

impl AppState {
    /// Wire every use case on top of the given stores and transport.
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        history: Arc<dyn HistoryStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        default_room: RoomKey,
    ) -> Self {
        let sequencer = Arc::new(RoomSequencer::new());

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            commit_stroke_usecase: Arc::new(CommitStrokeUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            undo_stroke_usecase: Arc::new(UndoStrokeUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            redo_stroke_usecase: Arc::new(RedoStrokeUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            clear_canvas_usecase: Arc::new(ClearCanvasUseCase::new(
                registry.clone(),
                history.clone(),
                message_pusher.clone(),
                sequencer,
            )),
            relay_ephemeral_usecase: Arc::new(RelayEphemeralUseCase::new(
                registry.clone(),
                message_pusher,
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry, history)),
            clock,
            default_room,
        }
    }
}
