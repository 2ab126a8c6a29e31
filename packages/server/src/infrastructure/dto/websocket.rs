//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type` (snake_case).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantInfo {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrokeDto {
    pub id: u64,
    pub owner_id: String,
    pub owner_name: String,
    pub points: Vec<PointDto>,
    pub color: String,
    pub width: f64,
    pub tool: String,
    /// Unix timestamp (milliseconds)
    pub created_at: i64,
}

/// Participant → server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    DrawSegment {
        start: PointDto,
        end: PointDto,
        color: String,
        width: f64,
        tool: String,
    },
    StrokeCommit {
        points: Vec<PointDto>,
        color: String,
        width: f64,
        tool: String,
    },
    CursorMove {
        x: f64,
        y: f64,
    },
    Undo,
    Redo,
    Clear,
}

/// Server → participant(s)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Init {
        participant: ParticipantInfo,
        room: String,
        members: Vec<ParticipantInfo>,
        history: Vec<StrokeDto>,
    },
    MemberJoined {
        id: String,
        name: String,
        color: String,
    },
    MemberLeft {
        id: String,
        name: String,
    },
    DrawSegment {
        start: PointDto,
        end: PointDto,
        color: String,
        width: f64,
        tool: String,
        sender_id: String,
    },
    StrokeSaved {
        stroke: StrokeDto,
    },
    CursorUpdate {
        sender_id: String,
        name: String,
        color: String,
        x: f64,
        y: f64,
    },
    HistoryAfterUndo {
        stroke_id: u64,
        requester_id: String,
        history: Vec<StrokeDto>,
    },
    HistoryAfterRedo {
        stroke: StrokeDto,
        requester_id: String,
        history: Vec<StrokeDto>,
    },
    Cleared {
        requester_id: String,
        requester_name: String,
    },
}
