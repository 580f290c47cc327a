//! services/api/src/web/chat_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! one chat question and its reply.

use crate::web::{
    deadline::bounded,
    state::{AppState, ConnectionState, Outbox},
};
use remed_lakay_core::{chat::ChatRequest, ports::PortError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Asks the advice gateway and appends the reply to the connection's chat log.
///
/// Runs detached from the message loop. Failures never escape: they become the
/// fallback reply.
pub async fn chat_process(
    app_state: Arc<AppState>,
    connection_lock: Arc<Mutex<ConnectionState>>,
    outbox: Outbox,
    request: ChatRequest,
) {
    let start_time = Instant::now();
    info!("Chat request {} started.", request.id);

    let outcome = bounded(
        app_state.config.ai_timeout,
        app_state.advice_adapter.get_text_advice(&request.query),
    )
    .await;

    match &outcome {
        Ok(_) => info!("⏱️ Chat request {} took: {:?}", request.id, start_time.elapsed()),
        Err(PortError::NotConfigured) => {
            warn!("Chat request {} skipped: no API key configured.", request.id)
        }
        Err(e) => error!("Chat request {} failed: {}", request.id, e),
    }

    let mut connection = connection_lock.lock().await;
    connection.ui.complete_chat(outcome);
    connection.publish(&outbox);
}
