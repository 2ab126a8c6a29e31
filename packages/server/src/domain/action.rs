//! 参加者が Active 状態で送ってくるアクション（検証済み）

use super::{DrawSegment, Point, StrokeSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantAction {
    /// Ephemeral preview, relayed to the rest of the room.
    DrawSegment(DrawSegment),
    /// Persisted and broadcast to the whole room.
    CommitStroke(StrokeSpec),
    /// Ephemeral pointer position, relayed to the rest of the room.
    CursorMove(Point),
    Undo,
    Redo,
    Clear,
}

impl ParticipantAction {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ParticipantAction::DrawSegment(_) => "draw_segment",
            ParticipantAction::CommitStroke(_) => "stroke_commit",
            ParticipantAction::CursorMove(_) => "cursor_move",
            ParticipantAction::Undo => "undo",
            ParticipantAction::Redo => "redo",
            ParticipantAction::Clear => "clear",
        }
    }
}
