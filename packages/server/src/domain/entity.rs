//! Entity 定義
//!
//! - `Participant`: 接続中の参加者（プロフィールは join 時に確定し、以後不変）
//! - `StrokeSpec` / `StrokeDraft` / `Stroke`: 検証済みの入力・確定前・確定後のストローク
//! - `DrawSegment`: 永続化しない描画途中のプレビュー

use super::{
    error::ValueObjectError,
    value_object::{
        Color, DisplayName, ParticipantId, Point, RoomKey, StrokeId, StrokeWidth, Timestamp,
        ToolTag,
    },
};

/// Minimum number of points a stroke must carry to be persisted.
pub const MIN_STROKE_POINTS: usize = 2;

/// A connected participant and the profile assigned at join time.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: DisplayName,
    pub color: Color,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ParticipantId, name: DisplayName, color: Color, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            color,
            joined_at,
        }
    }
}

/// Validated geometry and style of a stroke, as submitted by a participant.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSpec {
    points: Vec<Point>,
    color: Color,
    width: StrokeWidth,
    tool: ToolTag,
}

impl StrokeSpec {
    /// Fails with `TooFewPoints` when fewer than two points are given.
    pub fn new(
        points: Vec<Point>,
        color: Color,
        width: StrokeWidth,
        tool: ToolTag,
    ) -> Result<Self, ValueObjectError> {
        if points.len() < MIN_STROKE_POINTS {
            return Err(ValueObjectError::TooFewPoints(points.len()));
        }
        Ok(Self {
            points,
            color,
            width,
            tool,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A stroke attributed to its owner, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDraft {
    owner_id: ParticipantId,
    owner_name: DisplayName,
    spec: StrokeSpec,
}

impl StrokeDraft {
    /// Attribution is copied from `owner`, not referenced.
    pub fn new(owner: &Participant, spec: StrokeSpec) -> Self {
        Self {
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            spec,
        }
    }

    pub fn owner_id(&self) -> &ParticipantId {
        &self.owner_id
    }

    /// Finalize the draft into an immutable stroke.
    pub fn finalize(self, id: StrokeId, created_at: Timestamp) -> Stroke {
        let StrokeSpec {
            points,
            color,
            width,
            tool,
        } = self.spec;
        Stroke {
            id,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            points,
            color,
            width,
            tool,
            created_at,
        }
    }
}

/// A persisted, immutable stroke.
///
/// Attribution is captured at creation and survives the owner leaving.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    owner_id: ParticipantId,
    owner_name: DisplayName,
    points: Vec<Point>,
    color: Color,
    width: StrokeWidth,
    tool: ToolTag,
    created_at: Timestamp,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn owner_id(&self) -> &ParticipantId {
        &self.owner_id
    }

    pub fn owner_name(&self) -> &DisplayName {
        &self.owner_name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn width(&self) -> StrokeWidth {
        self.width
    }

    pub fn tool(&self) -> &ToolTag {
        &self.tool
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_owned_by(&self, participant_id: &ParticipantId) -> bool {
        &self.owner_id == participant_id
    }
}

/// An in-progress preview segment. Relayed, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSegment {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: StrokeWidth,
    pub tool: ToolTag,
}

/// Point-in-time summary of a live room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub key: RoomKey,
    pub member_count: usize,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Participant {
        Participant::new(
            ParticipantId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Color::new("#ff0000".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn points(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new(i as f64, i as f64).unwrap())
            .collect()
    }

    #[test]
    fn test_stroke_spec_requires_two_points() {
        // テスト項目: 2 点未満のストロークは作成できない
        // given (前提条件):
        let color = Color::new("#000".to_string()).unwrap();

        // when (操作):
        let result = StrokeSpec::new(
            points(1),
            color,
            StrokeWidth::new(2.0).unwrap(),
            ToolTag::new("pen".to_string()).unwrap(),
        );

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::TooFewPoints(1)));
    }

    #[test]
    fn test_finalize_keeps_attribution_and_fields() {
        // テスト項目: 確定後のストロークは作成者情報と描画属性を保持する
        // given (前提条件):
        let owner = alice();
        let spec = StrokeSpec::new(
            points(3),
            Color::new("#00ff00".to_string()).unwrap(),
            StrokeWidth::new(4.0).unwrap(),
            ToolTag::new("eraser".to_string()).unwrap(),
        )
        .unwrap();
        let draft = StrokeDraft::new(&owner, spec);

        // when (操作):
        let stroke = draft.finalize(StrokeId::new(7), Timestamp::new(2000));

        // then (期待する結果):
        assert_eq!(stroke.id(), StrokeId::new(7));
        assert!(stroke.is_owned_by(&owner.id));
        assert_eq!(stroke.owner_name().as_str(), "Alice");
        assert_eq!(stroke.points().len(), 3);
        assert_eq!(stroke.color().as_str(), "#00ff00");
        assert_eq!(stroke.width().value(), 4.0);
        assert_eq!(stroke.tool().as_str(), "eraser");
        assert_eq!(stroke.created_at(), Timestamp::new(2000));
    }
}
