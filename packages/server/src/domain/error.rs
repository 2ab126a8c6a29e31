//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成（バリデーション）エラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueObjectError {
    #[error("participant id must not be empty")]
    ParticipantIdEmpty,

    #[error("room key must not be empty")]
    RoomKeyEmpty,

    #[error("room key is too long ({0} bytes)")]
    RoomKeyTooLong(usize),

    #[error("room key '{0}' contains characters other than [A-Za-z0-9_-]")]
    RoomKeyInvalid(String),

    #[error("display name must not be blank")]
    DisplayNameEmpty,

    #[error("display name is too long ({0} characters)")]
    DisplayNameTooLong(usize),

    #[error("'{0}' is not a #rgb or #rrggbb color")]
    ColorInvalid(String),

    #[error("stroke width {0} is out of range")]
    StrokeWidthOutOfRange(f64),

    #[error("tool tag '{0}' is invalid")]
    ToolTagInvalid(String),

    #[error("point ({x}, {y}) is not finite")]
    PointNotFinite { x: f64, y: f64 },

    #[error("a stroke needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
