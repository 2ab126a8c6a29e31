//! WebSocket connection handlers.
//!
//! 1 接続につき 1 つの `Session` を作り、受信タスクと送信タスクを起動します。
//! どちらかのタスクが終了した時点で切断処理（Left）を一度だけ実行します。

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{
        Participant, ParticipantAction, ParticipantIdFactory, ProfileFactory, RoomKey, Session,
        Timestamp, ValueObjectError,
    },
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::DispatchError,
};

/// Query parameters for WebSocket connection
///
/// 空文字列は未指定として扱います。
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub room: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert query -> Session (Domain Model)
    let session = match build_session(&state, query) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Rejecting WebSocket connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!(
        "Participant '{}' ({}) connecting to room '{}'",
        session.participant().id,
        session.participant().name.as_str(),
        session.room()
    );
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the target room and allocate identity and profile for a new connection.
fn build_session(state: &AppState, query: ConnectQuery) -> Result<Session, ValueObjectError> {
    let room = match non_empty(query.room) {
        Some(room) => RoomKey::new(room)?,
        None => state.default_room.clone(),
    };

    let id = ParticipantIdFactory::generate()?;
    let name = ProfileFactory::display_name(&id, non_empty(query.name))?;
    let color = ProfileFactory::color(&id, non_empty(query.color))?;
    let participant = Participant::new(id, name, color, Timestamp::new(state.clock.now_millis()));

    Ok(Session::new(room, participant))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session: Session) {
    let session = Arc::new(session);
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Joining: init の配送と join 通知
    if let Err(e) = state
        .connect_participant_usecase
        .execute(&session, tx)
        .await
    {
        tracing::error!(
            "Failed to connect participant '{}': {}",
            session.participant().id,
            e
        );
        state.disconnect_participant_usecase.execute(&session).await;
        return;
    }

    // Spawn a task to receive actions from this client
    let recv_state = state.clone();
    let recv_session = session.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let Some(action) = parse_action(&text) else {
                        continue;
                    };
                    // Left 以降のアクションは破棄
                    if !recv_session.is_active() {
                        tracing::debug!("Dropping '{}' from inactive session", action.kind());
                        continue;
                    }
                    let kind = action.kind();
                    if let Err(e) = dispatch(&recv_state, &recv_session, action).await {
                        tracing::warn!(
                            "Failed to handle '{}' from '{}': {}",
                            kind,
                            recv_session.participant().id,
                            e
                        );
                    }
                }
                Message::Binary(_) => {
                    tracing::warn!("Binary frames are not supported, ignoring");
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Participant '{}' requested close",
                        recv_session.participant().id
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Left: 後片付けは一度だけ実行される
    if let Some(notified) = state.disconnect_participant_usecase.execute(&session).await {
        tracing::info!(
            "Participant '{}' disconnected, notified {} member(s)",
            session.participant().id,
            notified.len()
        );
    }
}

/// Decode a text frame into a validated action. Malformed frames are logged and dropped.
fn parse_action(text: &str) -> Option<ParticipantAction> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to parse message as JSON: {}", e);
            return None;
        }
    };

    match ParticipantAction::try_from(message) {
        Ok(action) => Some(action),
        Err(e) => {
            tracing::warn!("Rejected invalid message: {}", e);
            None
        }
    }
}

async fn dispatch(
    state: &AppState,
    session: &Session,
    action: ParticipantAction,
) -> Result<(), DispatchError> {
    match action {
        ParticipantAction::DrawSegment(segment) => {
            state
                .relay_ephemeral_usecase
                .draw_segment(session, segment)
                .await?;
        }
        ParticipantAction::CommitStroke(spec) => {
            state.commit_stroke_usecase.execute(session, spec).await?;
        }
        ParticipantAction::CursorMove(position) => {
            state
                .relay_ephemeral_usecase
                .cursor_move(session, position)
                .await?;
        }
        ParticipantAction::Undo => {
            state.undo_stroke_usecase.execute(session).await?;
        }
        ParticipantAction::Redo => {
            state.redo_stroke_usecase.execute(session).await?;
        }
        ParticipantAction::Clear => {
            state.clear_canvas_usecase.execute(session).await?;
        }
    }
    Ok(())
}
