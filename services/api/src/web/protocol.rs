//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the mobile client and the server.

use crate::web::view::{TabName, ViewSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Client TO the Server
//=========================================================================================
// NOTE: Captured photos are sent as raw Binary frames between `CaptureStarted`
// and `CaptureEnded`, not as part of this enum.
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A tab bar (or home shortcut) tap.
    SelectTab { tab: TabName },

    /// The listing search input changed.
    Search { query: String },

    OpenPlant { plant_id: String },

    OpenDisease { disease_id: String },

    /// Leaves the open detail view.
    Back,

    /// A remedy plant tapped on the open disease page.
    SelectRemedy { plant_id: String },

    /// A chat question.
    SendMessage { text: String },

    /// The client is about to stream a photo in binary frames.
    CaptureStarted { mime_type: String },

    /// The photo is complete; the server should identify it.
    CaptureEnded,

    /// Dismisses the scan overlay, abandoning any identification in flight.
    CloseScan,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after the connection is accepted.
    SessionInitialized { connection_id: Uuid },

    /// The complete view after a change. The client re-renders from it.
    State { view: ViewSnapshot },

    /// The photo of a new capture, sent once. Later snapshots refer to it by `capture`.
    ScanPreview { capture: u64, preview: String },

    /// A rejected intent. The session keeps going.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_are_tagged_by_type() {
        let parsed: ClientMessage =
            serde_json::from_str(r#"{"type":"select_tab","tab":"diseases"}"#).unwrap();
        assert_eq!(parsed, ClientMessage::SelectTab { tab: TabName::Diseases });

        let parsed: ClientMessage =
            serde_json::from_str(r#"{"type":"capture_started","mime_type":"image/jpeg"}"#).unwrap();
        assert_eq!(
            parsed,
            ClientMessage::CaptureStarted {
                mime_type: "image/jpeg".into()
            }
        );

        let parsed: ClientMessage = serde_json::from_str(r#"{"type":"close_scan"}"#).unwrap();
        assert_eq!(parsed, ClientMessage::CloseScan);
    }

    #[test]
    fn unknown_tabs_and_types_are_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"select_tab","tab":"ai"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"reboot"}"#).is_err());
    }

    #[test]
    fn server_errors_serialize_with_their_tag() {
        let json = serde_json::to_value(ServerMessage::Error {
            message: "Unknown plant: p9".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Unknown plant: p9");
    }
}
