//! services/api/src/web/scan_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! identifying one captured photo.

use crate::web::{
    deadline::bounded,
    state::{AppState, ConnectionState, Outbox},
};
use remed_lakay_core::{domain::EncodedImage, ports::PortError, scan::ScanTicket};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Sends the photo to the vision gateway and stores the result in the scan overlay.
///
/// The result is applied only if `ticket` is still the capture being analyzed.
/// Cancelling `cancellation_token` stops waiting on the gateway altogether.
pub async fn scan_process(
    app_state: Arc<AppState>,
    connection_lock: Arc<Mutex<ConnectionState>>,
    outbox: Outbox,
    ticket: ScanTicket,
    image: EncodedImage,
    cancellation_token: CancellationToken,
) {
    let start_time = Instant::now();
    let generation = ticket.generation();
    info!("Scan {} started ({}).", generation, image.mime_type);

    let outcome = tokio::select! {
        _ = cancellation_token.cancelled() => {
            info!("Scan {} abandoned.", generation);
            return;
        }
        outcome = bounded(
            app_state.config.ai_timeout,
            app_state.vision_adapter.identify_image(&image),
        ) => outcome,
    };

    match &outcome {
        Ok(_) => info!("⏱️ Scan {} took: {:?}", generation, start_time.elapsed()),
        Err(PortError::NotConfigured) => {
            warn!("Scan {} skipped: no API key configured.", generation)
        }
        Err(e) => error!("Scan {} failed: {}", generation, e),
    }

    let mut connection = connection_lock.lock().await;
    if connection.ui.resolve_scan(ticket, outcome) {
        if let Some(text) = connection.ui.scan().result() {
            debug!("Scan {} resolved with {} characters.", generation, text.chars().count());
        }
        connection.publish(&outbox);
    } else {
        warn!("Discarding stale result of scan {}.", generation);
    }
}
