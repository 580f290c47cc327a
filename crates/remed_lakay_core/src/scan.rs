//! crates/remed_lakay_core/src/scan.rs
//!
//! State of the plant-scan overlay.
//!
//! Every capture gets a [`ScanTicket`] from a generation counter. A resolution
//! is applied only while its ticket is the one currently being analyzed, so a
//! late answer can never reopen a closed overlay or overwrite a newer capture.

use crate::domain::EncodedImage;
use crate::ports::{PortError, PortResult};

/// Stored as the result when identification fails or returns nothing.
pub const SCAN_FALLBACK_RESULT: &str =
    "Mwen pa t ka idantifye plant sa a. Asire w foto a klè epi eseye ankò.";

/// Stored as the result when no AI credentials are configured.
pub const SCAN_MISSING_KEY_RESULT: &str = "Tanpri konfigire yon API Key.";

/// Identifies one capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTicket(u64);

impl ScanTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No overlay.
    #[default]
    Closed,
    /// Overlay showing the preview with a loading indicator.
    Analyzing { ticket: ScanTicket, image: EncodedImage },
    /// Overlay showing the preview and the identification text.
    Finished {
        ticket: ScanTicket,
        image: EncodedImage,
        result: String,
    },
}

#[derive(Debug, Default)]
pub struct ScanSession {
    state: ScanState,
    generation: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, ScanState::Analyzing { .. })
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        match &self.state {
            ScanState::Closed => None,
            ScanState::Analyzing { image, .. } | ScanState::Finished { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&str> {
        match &self.state {
            ScanState::Finished { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Opens the overlay on a new image, dropping any previous result.
    /// Any earlier ticket becomes stale.
    pub fn capture(&mut self, image: EncodedImage) -> ScanTicket {
        self.generation += 1;
        let ticket = ScanTicket(self.generation);
        self.state = ScanState::Analyzing { ticket, image };
        ticket
    }

    /// Applies the identification outcome for `ticket`.
    /// Returns `false` and changes nothing if the ticket is stale.
    pub fn resolve(&mut self, ticket: ScanTicket, outcome: PortResult<String>) -> bool {
        let image = match &self.state {
            ScanState::Analyzing { ticket: current, image } if *current == ticket => image.clone(),
            _ => return false,
        };

        self.state = ScanState::Finished {
            ticket,
            image,
            result: result_text(outcome),
        };
        true
    }

    /// Closes the overlay. Pending tickets become stale.
    /// Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        self.generation += 1;
        !matches!(std::mem::take(&mut self.state), ScanState::Closed)
    }
}

/// Maps a gateway outcome to the text stored as the scan result.
pub fn result_text(outcome: PortResult<String>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => SCAN_FALLBACK_RESULT.to_string(),
        Err(PortError::NotConfigured) => SCAN_MISSING_KEY_RESULT.to_string(),
        Err(_) => SCAN_FALLBACK_RESULT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(byte: u8) -> EncodedImage {
        EncodedImage::encode(&[byte], "image/png").unwrap()
    }

    #[test]
    fn capture_opens_in_analyzing_state() {
        let mut scan = ScanSession::new();
        assert_eq!(scan.state(), &ScanState::Closed);

        scan.capture(image(1));
        assert!(scan.is_analyzing());
        assert_eq!(scan.image(), Some(&image(1)));
        assert_eq!(scan.result(), None);
    }

    #[test]
    fn success_and_failure_both_land_in_the_result_view() {
        let mut scan = ScanSession::new();
        let ticket = scan.capture(image(1));
        assert!(scan.resolve(ticket, Ok("Sa se Asosi.".into())));
        assert!(!scan.is_analyzing());
        assert_eq!(scan.result(), Some("Sa se Asosi."));

        let ticket = scan.capture(image(2));
        assert_eq!(scan.result(), None);
        assert!(scan.resolve(ticket, Err(PortError::Unexpected("503".into()))));
        assert_eq!(scan.result(), Some(SCAN_FALLBACK_RESULT));
        assert_eq!(scan.image(), Some(&image(2)));
    }

    #[test]
    fn missing_credentials_store_the_configuration_hint() {
        let mut scan = ScanSession::new();
        let ticket = scan.capture(image(1));
        scan.resolve(ticket, Err(PortError::NotConfigured));
        assert_eq!(scan.result(), Some(SCAN_MISSING_KEY_RESULT));
    }

    #[test]
    fn late_result_after_close_is_discarded() {
        let mut scan = ScanSession::new();
        let ticket = scan.capture(image(1));
        assert!(scan.close());

        assert!(!scan.resolve(ticket, Ok("twò ta".into())));
        assert_eq!(scan.state(), &ScanState::Closed);
        assert!(!scan.close());
    }

    #[test]
    fn late_result_for_an_older_capture_is_discarded() {
        let mut scan = ScanSession::new();
        let old = scan.capture(image(1));
        let new = scan.capture(image(2));
        assert_ne!(old, new);

        assert!(!scan.resolve(old, Ok("ansyen".into())));
        assert!(scan.is_analyzing());
        assert!(scan.resolve(new, Ok("nouvo".into())));
        assert_eq!(scan.result(), Some("nouvo"));
    }

    #[test]
    fn resolving_twice_is_ignored() {
        let mut scan = ScanSession::new();
        let ticket = scan.capture(image(1));
        assert!(scan.resolve(ticket, Ok("premye".into())));
        assert!(!scan.resolve(ticket, Ok("dezyèm".into())));
        assert_eq!(scan.result(), Some("premye"));
    }

    #[test]
    fn finished_state_remembers_its_capture() {
        let mut scan = ScanSession::new();
        let ticket = scan.capture(image(3));
        scan.resolve(ticket, Ok("Lalo".into()));
        assert!(matches!(
            scan.state(),
            ScanState::Finished { ticket: t, .. } if *t == ticket
        ));
        assert_eq!(scan.image(), Some(&image(3)));
    }
}
