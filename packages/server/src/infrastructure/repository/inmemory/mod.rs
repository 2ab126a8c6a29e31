//! InMemory 実装

pub mod history_store;
pub mod room_registry;

pub use history_store::InMemoryHistoryStore;
pub use room_registry::InMemoryRoomRegistry;
