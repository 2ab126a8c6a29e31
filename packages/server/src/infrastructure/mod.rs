//! Infrastructure 層
//!
//! ドメイン層が定義する trait の具体的な実装（インメモリストア、WebSocket 配送）と DTO。

pub mod dto;
pub mod message_pusher;
pub mod repository;
