//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{ParticipantInfo, StrokeDto};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub key: String,
    pub member_count: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub key: String,
    pub members: Vec<ParticipantInfo>,
    pub history: Vec<StrokeDto>,
}
