//! services/api/src/web/state.rs
//!
//! Defines the application's shared and connection-specific states.

use crate::config::Config;
use crate::web::{protocol::ServerMessage, view};
use remed_lakay_core::{
    catalogue::Catalogue,
    ports::{AdviceService, PlantIdentificationService},
    scan::ScanTicket,
    ui::UiState,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// Messages queued for one client. A single writer task drains it into the socket.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalogue: Arc<Catalogue>,
    pub advice_adapter: Arc<dyn AdviceService>,
    pub vision_adapter: Arc<dyn PlantIdentificationService>,
}

//=========================================================================================
// ConnectionState (Specific to One WebSocket Connection)
//=========================================================================================

/// Whether binary frames are currently expected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Idle,
    Receiving { mime_type: String },
}

/// The state for a single, active WebSocket connection.
pub struct ConnectionState {
    pub connection_id: Uuid,
    pub ui: UiState,
    pub capture_mode: CaptureMode,
    pub image_buffer: Vec<u8>,
    /// Cancels the identification worker of the current capture.
    pub scan_cancellation: CancellationToken,
}

impl ConnectionState {
    pub fn new(connection_id: Uuid, catalogue: Arc<Catalogue>) -> Self {
        Self {
            connection_id,
            ui: UiState::new(catalogue),
            capture_mode: CaptureMode::Idle,
            image_buffer: Vec::new(),
            scan_cancellation: CancellationToken::new(),
        }
    }

    /// Queues a snapshot of the current view.
    pub fn publish(&self, outbox: &Outbox) {
        let message = ServerMessage::State {
            view: view::snapshot(&self.ui),
        };
        if outbox.send(message).is_err() {
            debug!("Connection {} is gone; snapshot dropped.", self.connection_id);
        }
    }

    /// Queues the photo of the capture identified by `ticket`.
    pub fn publish_preview(&self, outbox: &Outbox, ticket: ScanTicket) {
        let Some(image) = self.ui.scan().image() else {
            return;
        };
        let message = ServerMessage::ScanPreview {
            capture: ticket.generation(),
            preview: image.data_url(),
        };
        if outbox.send(message).is_err() {
            debug!("Connection {} is gone; preview dropped.", self.connection_id);
        }
    }

    /// Queues an error for a rejected intent.
    pub fn reject(&self, outbox: &Outbox, message: impl Into<String>) {
        if outbox.send(ServerMessage::Error { message: message.into() }).is_err() {
            debug!("Connection {} is gone; error dropped.", self.connection_id);
        }
    }
}
