//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! It applies client intents to the connection's UI state and delegates the
//! AI calls to worker tasks.

use crate::web::{
    chat_task::chat_process,
    protocol::{ClientMessage, ServerMessage},
    scan_task::scan_process,
    state::{AppState, CaptureMode, ConnectionState, Outbox},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Room above the image limit for the JSON intents sharing the socket.
const CONTROL_MESSAGE_HEADROOM: usize = 64 * 1024;

/// Largest frame or message the socket accepts for a given image limit.
pub fn socket_message_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.saturating_add(CONTROL_MESSAGE_HEADROOM)
}

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    let limit = socket_message_limit(app_state.config.max_image_bytes);
    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();
    info!("New WebSocket connection established: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (outbox, mut outbox_rx) = mpsc::unbounded_channel::<ServerMessage>();

    // --- 1. Writer Task ---
    // The only place that touches the socket sink.
    let writer = tokio::spawn(async move {
        while let Some(message) = outbox_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("Socket closed; writer task stopping.");
                break;
            }
        }
    });

    // --- 2. Initialization Phase ---
    let connection_lock = Arc::new(Mutex::new(ConnectionState::new(
        connection_id,
        app_state.catalogue.clone(),
    )));
    if outbox.send(ServerMessage::SessionInitialized { connection_id }).is_err() {
        error!("Failed to queue session initialized message.");
        writer.abort();
        return;
    }
    connection_lock.lock().await.publish(&outbox);

    // --- 3. Main Message Loop ---
    loop {
        match receiver.next().await {
            Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(client_msg) => {
                    handle_client_message(client_msg, &app_state, &connection_lock, &outbox).await
                }
                Err(e) => {
                    warn!("Failed to deserialize client message: {}", e);
                    connection_lock
                        .lock()
                        .await
                        .reject(&outbox, format!("Malformed message: {}", e));
                }
            },
            Some(Ok(Message::Binary(data))) => {
                handle_binary(&data, &app_state, &connection_lock, &outbox).await;
            }
            Some(Ok(Message::Close(_))) => {
                info!("Client sent close message.");
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
            None => {
                info!("Client disconnected.");
                break;
            }
        }
    }

    // --- 4. Cleanup ---
    connection_lock.lock().await.scan_cancellation.cancel();
    writer.abort();
    info!("WebSocket connection {} closed.", connection_id);
}

/// Applies one client intent. No-op intents publish nothing; rejected ones
/// answer with `ServerMessage::Error`.
pub async fn handle_client_message(
    client_msg: ClientMessage,
    app_state: &Arc<AppState>,
    connection_lock: &Arc<Mutex<ConnectionState>>,
    outbox: &Outbox,
) {
    let mut connection = connection_lock.lock().await;

    match client_msg {
        ClientMessage::SelectTab { tab } => {
            if connection.ui.select_tab(tab.into()) {
                connection.publish(outbox);
            }
        }
        ClientMessage::Search { query } => {
            if connection.ui.navigation().search_query() != query {
                connection.ui.set_search_query(query);
                connection.publish(outbox);
            }
        }
        ClientMessage::OpenPlant { plant_id } => match connection.ui.open_plant(&plant_id) {
            Ok(()) => connection.publish(outbox),
            Err(e) => {
                warn!("Rejected open_plant: {}", e);
                connection.reject(outbox, e.to_string());
            }
        },
        ClientMessage::OpenDisease { disease_id } => match connection.ui.open_disease(&disease_id) {
            Ok(()) => connection.publish(outbox),
            Err(e) => {
                warn!("Rejected open_disease: {}", e);
                connection.reject(outbox, e.to_string());
            }
        },
        ClientMessage::Back => {
            if connection.ui.back() {
                connection.publish(outbox);
            }
        }
        ClientMessage::SelectRemedy { plant_id } => match connection.ui.select_remedy(&plant_id) {
            Ok(()) => connection.publish(outbox),
            Err(e) => {
                warn!("Rejected select_remedy: {}", e);
                connection.reject(outbox, e.to_string());
            }
        },
        ClientMessage::SendMessage { text } => {
            let Some(request) = connection.ui.send_message(&text) else {
                debug!("Ignoring blank chat message.");
                return;
            };
            connection.publish(outbox);
            drop(connection);

            tokio::spawn(chat_process(
                app_state.clone(),
                connection_lock.clone(),
                outbox.clone(),
                request,
            ));
        }
        ClientMessage::CaptureStarted { mime_type } => {
            info!("Capture started ({}).", mime_type);
            connection.capture_mode = CaptureMode::Receiving { mime_type };
            connection.image_buffer.clear();
        }
        ClientMessage::CaptureEnded => {
            let CaptureMode::Receiving { mime_type } = std::mem::take(&mut connection.capture_mode)
            else {
                warn!("capture_ended received without a capture in progress.");
                connection.reject(outbox, "No capture in progress.");
                return;
            };
            let raw = std::mem::take(&mut connection.image_buffer);
            if connection.ui.scan().is_analyzing() {
                info!("New capture supersedes the scan in flight.");
            }

            let (ticket, image) = match connection.ui.capture_image(&raw, &mime_type) {
                Ok(captured) => captured,
                Err(e) => {
                    warn!("Rejected capture: {}", e);
                    connection.reject(outbox, e.to_string());
                    return;
                }
            };

            // A new capture supersedes whatever was still being analyzed.
            connection.scan_cancellation.cancel();
            let token = CancellationToken::new();
            connection.scan_cancellation = token.clone();
            connection.publish_preview(outbox, ticket);
            connection.publish(outbox);
            drop(connection);

            tokio::spawn(scan_process(
                app_state.clone(),
                connection_lock.clone(),
                outbox.clone(),
                ticket,
                image,
                token,
            ));
        }
        ClientMessage::CloseScan => {
            // An upload still in progress is abandoned with the overlay.
            connection.capture_mode = CaptureMode::Idle;
            connection.image_buffer.clear();
            if connection.ui.close_scan() {
                connection.scan_cancellation.cancel();
                connection.publish(outbox);
            }
        }
    }
}

/// Buffers the bytes of an ongoing capture. Frames outside a capture are ignored.
pub async fn handle_binary(
    data: &[u8],
    app_state: &Arc<AppState>,
    connection_lock: &Arc<Mutex<ConnectionState>>,
    outbox: &Outbox,
) {
    let mut connection = connection_lock.lock().await;
    if connection.capture_mode == CaptureMode::Idle {
        debug!("Ignoring {} bytes received outside a capture.", data.len());
        return;
    }

    let limit = app_state.config.max_image_bytes;
    if connection.image_buffer.len() + data.len() > limit {
        warn!("Capture exceeded {} bytes; aborting it.", limit);
        connection.capture_mode = CaptureMode::Idle;
        connection.image_buffer = Vec::new();
        connection.reject(outbox, format!("The image is larger than {} bytes.", limit));
        return;
    }
    connection.image_buffer.extend_from_slice(data);
}
