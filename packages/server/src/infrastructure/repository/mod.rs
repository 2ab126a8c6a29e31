//! Repository 実装
//!
//! 現在はインメモリ実装のみ（状態はプロセスの生存期間のみ保持されます）。

pub mod inmemory;

pub use inmemory::{InMemoryHistoryStore, InMemoryRoomRegistry};
