//! ルーム内の参加者に通知するイベント
//!
//! UseCase 層が生成し、MessagePusher が配送します。ワイヤーフォーマットへの変換は
//! Infrastructure 層の DTO が担当します。

use super::{DisplayName, DrawSegment, Participant, ParticipantId, Point, RoomKey, Stroke, StrokeId};

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Full snapshot delivered to a joining participant only.
    Init {
        participant: Participant,
        room: RoomKey,
        members: Vec<Participant>,
        history: Vec<Stroke>,
    },
    MemberJoined(Participant),
    MemberLeft {
        id: ParticipantId,
        name: DisplayName,
    },
    DrawSegment {
        sender_id: ParticipantId,
        segment: DrawSegment,
    },
    StrokeSaved(Stroke),
    CursorUpdate {
        sender: Participant,
        position: Point,
    },
    HistoryAfterUndo {
        stroke_id: StrokeId,
        requester_id: ParticipantId,
        history: Vec<Stroke>,
    },
    HistoryAfterRedo {
        stroke: Stroke,
        requester_id: ParticipantId,
        history: Vec<Stroke>,
    },
    Cleared {
        requester_id: ParticipantId,
        requester_name: DisplayName,
    },
}

impl RoomEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RoomEvent::Init { .. } => "init",
            RoomEvent::MemberJoined(_) => "member_joined",
            RoomEvent::MemberLeft { .. } => "member_left",
            RoomEvent::DrawSegment { .. } => "draw_segment",
            RoomEvent::StrokeSaved(_) => "stroke_saved",
            RoomEvent::CursorUpdate { .. } => "cursor_update",
            RoomEvent::HistoryAfterUndo { .. } => "history_after_undo",
            RoomEvent::HistoryAfterRedo { .. } => "history_after_redo",
            RoomEvent::Cleared { .. } => "cleared",
        }
    }
}
