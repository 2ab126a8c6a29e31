//! ファンアウト先の選定

use crate::domain::{MessagePusher, ParticipantId, RoomEvent, RoomKey, RoomRegistry};

use super::error::DispatchError;

/// Members of `room`, optionally excluding one participant.
pub(crate) async fn room_targets(
    registry: &dyn RoomRegistry,
    room: &RoomKey,
    exclude: Option<&ParticipantId>,
) -> Vec<ParticipantId> {
    registry
        .members(room)
        .await
        .into_iter()
        .map(|member| member.id)
        .filter(|id| Some(id) != exclude)
        .collect()
}

/// Broadcast `event` and map transport failures to `DispatchError`.
pub(crate) async fn broadcast(
    pusher: &dyn MessagePusher,
    targets: Vec<ParticipantId>,
    event: &RoomEvent,
) -> Result<(), DispatchError> {
    pusher
        .broadcast(targets, event)
        .await
        .map_err(|e| DispatchError::BroadcastFailed {
            kind: event.kind(),
            reason: e.to_string(),
        })
}
