//! Collaborative drawing sync server library.
//!
//! Participants join a named room over WebSocket, receive the room's full stroke
//! history, and exchange drawing events with everyone else in the room.
//! Each participant can undo and redo only their own strokes.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
