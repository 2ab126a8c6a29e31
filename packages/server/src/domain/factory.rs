//! Factory: 参加者 ID とプロフィール（表示名・表示色）の生成

use uuid::Uuid;

use super::{
    error::ValueObjectError,
    value_object::{Color, DisplayName, ParticipantId},
};

/// Colors handed out to participants that do not pick their own.
pub const PROFILE_PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
    "#469990", "#9a6324", "#800000", "#000075",
];

/// Generates participant ids (UUID v4, unique for the process lifetime).
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    pub fn generate() -> Result<ParticipantId, ValueObjectError> {
        ParticipantId::new(Uuid::new_v4().to_string())
    }
}

/// Assigns display name and color at join time.
pub struct ProfileFactory;

impl ProfileFactory {
    /// Use the requested name if given, otherwise `Guest-xxxx` derived from the id.
    pub fn display_name(
        id: &ParticipantId,
        requested: Option<String>,
    ) -> Result<DisplayName, ValueObjectError> {
        match requested {
            Some(name) => DisplayName::new(name),
            None => {
                let suffix: String = id.as_str().chars().take(4).collect();
                DisplayName::new(format!("Guest-{suffix}"))
            }
        }
    }

    /// Use the requested color if given, otherwise a palette color picked by hashing the id.
    pub fn color(id: &ParticipantId, requested: Option<String>) -> Result<Color, ValueObjectError> {
        match requested {
            Some(color) => Color::new(color),
            None => {
                let hash = id
                    .as_str()
                    .bytes()
                    .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
                let index = hash as usize % PROFILE_PALETTE.len();
                Color::new(PROFILE_PALETTE[index].to_string())
            }
        }
    }
}
