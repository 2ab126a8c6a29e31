//! Collaborative drawing sync server.
//!
//! Participants connect over WebSocket, join a room and share strokes with everyone in it.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin fusuma-server
//! cargo run --bin fusuma-server -- --host 0.0.0.0 --port 3000 --default-room studio
//! ```

use std::sync::Arc;

use clap::Parser;
use fusuma_server::{
    domain::RoomKey,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryHistoryStore, InMemoryRoomRegistry},
    },
    ui::{AppState, Server},
};
use fusuma_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "fusuma-server")]
#[command(about = "Collaborative drawing sync server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Room joined by connections that do not specify one
    #[arg(long, default_value = "lobby")]
    default_room: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let default_room = match RoomKey::new(args.default_room) {
        Ok(room) => room,
        Err(e) => {
            tracing::error!("Invalid --default-room: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Room Registry / History Store (in-memory)
    // 3. MessagePusher
    // 4. UseCases (AppState)
    // 5. Server
    let clock = Arc::new(SystemClock);
    let registry = Arc::new(InMemoryRoomRegistry::new(clock.clone()));
    let history = Arc::new(InMemoryHistoryStore::new(clock.clone()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    let state = AppState::new(registry, history, message_pusher, clock, default_room);

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
