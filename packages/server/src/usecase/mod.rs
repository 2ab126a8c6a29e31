//! UseCase 層
//!
//! Synchronization Coordinator の各アクションを、Room Registry・History Store・
//! MessagePusher の組み合わせとして実装します。

mod clear_canvas;
mod commit_stroke;
mod connect_participant;
mod disconnect_participant;
mod error;
mod fanout;
mod get_room_detail;
mod get_rooms;
mod redo_stroke;
mod relay_ephemeral;
mod sequencer;
mod undo_stroke;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use clear_canvas::ClearCanvasUseCase;
pub use commit_stroke::CommitStrokeUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DispatchError, GetRoomDetailError};
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_rooms::GetRoomsUseCase;
pub use redo_stroke::RedoStrokeUseCase;
pub use relay_ephemeral::RelayEphemeralUseCase;
pub use sequencer::RoomSequencer;
pub use undo_stroke::UndoStrokeUseCase;
