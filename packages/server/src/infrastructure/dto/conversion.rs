//! Conversion logic between DTOs and domain types.
//!
//! Inbound conversion is where malformed input is rejected: a `ClientMessage`
//! only becomes a `ParticipantAction` if every field passes validation.

use crate::domain::{
    Color, DrawSegment, Participant, ParticipantAction, Point, RoomEvent, Stroke, StrokeSpec,
    StrokeWidth, ToolTag, ValueObjectError,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::PointDto> for Point {
    type Error = ValueObjectError;

    fn try_from(dto: dto::PointDto) -> Result<Self, Self::Error> {
        Point::new(dto.x, dto.y)
    }
}

impl TryFrom<dto::ClientMessage> for ParticipantAction {
    type Error = ValueObjectError;

    fn try_from(message: dto::ClientMessage) -> Result<Self, Self::Error> {
        let action = match message {
            dto::ClientMessage::DrawSegment {
                start,
                end,
                color,
                width,
                tool,
            } => ParticipantAction::DrawSegment(DrawSegment {
                start: start.try_into()?,
                end: end.try_into()?,
                color: Color::new(color)?,
                width: StrokeWidth::new(width)?,
                tool: ToolTag::new(tool)?,
            }),
            dto::ClientMessage::StrokeCommit {
                points,
                color,
                width,
                tool,
            } => {
                let points = points
                    .into_iter()
                    .map(Point::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                ParticipantAction::CommitStroke(StrokeSpec::new(
                    points,
                    Color::new(color)?,
                    StrokeWidth::new(width)?,
                    ToolTag::new(tool)?,
                )?)
            }
            dto::ClientMessage::CursorMove { x, y } => {
                ParticipantAction::CursorMove(Point::new(x, y)?)
            }
            dto::ClientMessage::Undo => ParticipantAction::Undo,
            dto::ClientMessage::Redo => ParticipantAction::Redo,
            dto::ClientMessage::Clear => ParticipantAction::Clear,
        };
        Ok(action)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Point> for dto::PointDto {
    fn from(point: Point) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<&Participant> for dto::ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            name: participant.name.as_str().to_string(),
            color: participant.color.as_str().to_string(),
        }
    }
}

impl From<&Stroke> for dto::StrokeDto {
    fn from(stroke: &Stroke) -> Self {
        Self {
            id: stroke.id().value(),
            owner_id: stroke.owner_id().as_str().to_string(),
            owner_name: stroke.owner_name().as_str().to_string(),
            points: stroke.points().iter().copied().map(Into::into).collect(),
            color: stroke.color().as_str().to_string(),
            width: stroke.width().value(),
            tool: stroke.tool().as_str().to_string(),
            created_at: stroke.created_at().value(),
        }
    }
}

fn strokes_to_dto(strokes: &[Stroke]) -> Vec<dto::StrokeDto> {
    strokes.iter().map(Into::into).collect()
}

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Init {
                participant,
                room,
                members,
                history,
            } => dto::ServerMessage::Init {
                participant: participant.into(),
                room: room.as_str().to_string(),
                members: members.iter().map(Into::into).collect(),
                history: strokes_to_dto(history),
            },
            RoomEvent::MemberJoined(participant) => dto::ServerMessage::MemberJoined {
                id: participant.id.as_str().to_string(),
                name: participant.name.as_str().to_string(),
                color: participant.color.as_str().to_string(),
            },
            RoomEvent::MemberLeft { id, name } => dto::ServerMessage::MemberLeft {
                id: id.as_str().to_string(),
                name: name.as_str().to_string(),
            },
            RoomEvent::DrawSegment { sender_id, segment } => dto::ServerMessage::DrawSegment {
                start: segment.start.into(),
                end: segment.end.into(),
                color: segment.color.as_str().to_string(),
                width: segment.width.value(),
                tool: segment.tool.as_str().to_string(),
                sender_id: sender_id.as_str().to_string(),
            },
            RoomEvent::StrokeSaved(stroke) => dto::ServerMessage::StrokeSaved {
                stroke: stroke.into(),
            },
            RoomEvent::CursorUpdate { sender, position } => dto::ServerMessage::CursorUpdate {
                sender_id: sender.id.as_str().to_string(),
                name: sender.name.as_str().to_string(),
                color: sender.color.as_str().to_string(),
                x: position.x(),
                y: position.y(),
            },
            RoomEvent::HistoryAfterUndo {
                stroke_id,
                requester_id,
                history,
            } => dto::ServerMessage::HistoryAfterUndo {
                stroke_id: stroke_id.value(),
                requester_id: requester_id.as_str().to_string(),
                history: strokes_to_dto(history),
            },
            RoomEvent::HistoryAfterRedo {
                stroke,
                requester_id,
                history,
            } => dto::ServerMessage::HistoryAfterRedo {
                stroke: stroke.into(),
                requester_id: requester_id.as_str().to_string(),
                history: strokes_to_dto(history),
            },
            RoomEvent::Cleared {
                requester_id,
                requester_name,
            } => dto::ServerMessage::Cleared {
                requester_id: requester_id.as_str().to_string(),
                requester_name: requester_name.as_str().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, ParticipantId, StrokeDraft, StrokeId, Timestamp};

    fn alice() -> Participant {
        Participant::new(
            ParticipantId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Color::new("#FF0000".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn commit_message(points: Vec<dto::PointDto>) -> dto::ClientMessage {
        dto::ClientMessage::StrokeCommit {
            points,
            color: "#00f".to_string(),
            width: 3.0,
            tool: "pen".to_string(),
        }
    }

    #[test]
    fn test_stroke_commit_to_action() {
        // テスト項目: 正しい stroke_commit が CommitStroke アクションに変換される
        // given (前提条件):
        let message = commit_message(vec![
            dto::PointDto { x: 0.0, y: 0.0 },
            dto::PointDto { x: 10.0, y: 5.0 },
        ]);

        // when (操作):
        let action = ParticipantAction::try_from(message).unwrap();

        // then (期待する結果):
        let ParticipantAction::CommitStroke(spec) = action else {
            panic!("expected CommitStroke");
        };
        assert_eq!(spec.points().len(), 2);
        assert_eq!(spec.points()[1], Point::new(10.0, 5.0).unwrap());
    }

    #[test]
    fn test_stroke_commit_with_one_point_is_rejected() {
        // テスト項目: 2 点未満の stroke_commit は境界で拒否される
        let message = commit_message(vec![dto::PointDto { x: 0.0, y: 0.0 }]);

        let result = ParticipantAction::try_from(message);

        assert_eq!(result, Err(ValueObjectError::TooFewPoints(1)));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        // テスト項目: 不正な色・線幅を含むメッセージは拒否される
        let bad_color = dto::ClientMessage::DrawSegment {
            start: dto::PointDto { x: 0.0, y: 0.0 },
            end: dto::PointDto { x: 1.0, y: 1.0 },
            color: "red".to_string(),
            width: 1.0,
            tool: "pen".to_string(),
        };
        let bad_width = dto::ClientMessage::StrokeCommit {
            points: vec![
                dto::PointDto { x: 0.0, y: 0.0 },
                dto::PointDto { x: 1.0, y: 1.0 },
            ],
            color: "#000".to_string(),
            width: 0.0,
            tool: "pen".to_string(),
        };

        assert!(matches!(
            ParticipantAction::try_from(bad_color),
            Err(ValueObjectError::ColorInvalid(_))
        ));
        assert!(matches!(
            ParticipantAction::try_from(bad_width),
            Err(ValueObjectError::StrokeWidthOutOfRange(_))
        ));
    }

    #[test]
    fn test_stroke_to_dto() {
        // テスト項目: ストロークが作成者情報・作成時刻を含む DTO に変換される
        // given (前提条件):
        let owner = alice();
        let spec = StrokeSpec::new(
            vec![Point::new(1.0, 2.0).unwrap(), Point::new(3.0, 4.0).unwrap()],
            Color::new("#123".to_string()).unwrap(),
            StrokeWidth::new(5.0).unwrap(),
            ToolTag::new("eraser".to_string()).unwrap(),
        )
        .unwrap();
        let stroke = StrokeDraft::new(&owner, spec).finalize(StrokeId::new(42), Timestamp::new(777));

        // when (操作):
        let dto_stroke = dto::StrokeDto::from(&stroke);

        // then (期待する結果):
        assert_eq!(dto_stroke.id, 42);
        assert_eq!(dto_stroke.owner_id, "alice");
        assert_eq!(dto_stroke.owner_name, "Alice");
        assert_eq!(dto_stroke.points[1], dto::PointDto { x: 3.0, y: 4.0 });
        assert_eq!(dto_stroke.color, "#123");
        assert_eq!(dto_stroke.width, 5.0);
        assert_eq!(dto_stroke.tool, "eraser");
        assert_eq!(dto_stroke.created_at, 777);
    }

    #[test]
    fn test_cursor_update_carries_sender_profile() {
        // テスト項目: cursor_update に送信者の ID・表示名・表示色が含まれる
        let event = RoomEvent::CursorUpdate {
            sender: alice(),
            position: Point::new(12.0, 34.0).unwrap(),
        };

        let message = dto::ServerMessage::from(&event);

        assert_eq!(
            message,
            dto::ServerMessage::CursorUpdate {
                sender_id: "alice".to_string(),
                name: "Alice".to_string(),
                color: "#ff0000".to_string(),
                x: 12.0,
                y: 34.0,
            }
        );
    }
}
