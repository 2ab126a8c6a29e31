//! ドメイン層
//!
//! ルーム・参加者・ストロークのモデルと、Infrastructure 層が実装するインターフェース
//! （`RoomRegistry`, `HistoryStore`, `MessagePusher`）を定義します。

pub mod action;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod session;
pub mod value_object;

pub use action::ParticipantAction;
pub use entity::{
    DrawSegment, MIN_STROKE_POINTS, Participant, RoomSummary, Stroke, StrokeDraft, StrokeSpec,
};
pub use error::{MessagePushError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::{PROFILE_PALETTE, ParticipantIdFactory, ProfileFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{Departure, HistoryEdit, HistoryStore, RoomRegistry};
pub use session::{Session, SessionPhase};
pub use value_object::{
    Color, DisplayName, ParticipantId, Point, RoomEpoch, RoomKey, StrokeId, StrokeWidth,
    Timestamp, ToolTag,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
