//! crates/remed_lakay_core/src/ui.rs
//!
//! The complete UI state of one client: navigation, chat session and scan
//! overlay, over a shared read-only catalogue.
//!
//! Every user intent is a method here. Each method only touches the state
//! of the flow it belongs to, and validates catalogue ids before moving.

use std::sync::Arc;

use crate::catalogue::{Catalogue, RemedyPanel};
use crate::chat::{ChatRequest, ChatSession};
use crate::domain::{CaptureError, ChatMessage, Disease, EncodedImage, Plant};
use crate::navigation::{Detail, Navigation, Screen, Tab};
use crate::ports::PortResult;
use crate::scan::{ScanSession, ScanTicket};
use crate::search::filter_by_name;

/// Number of plants shown under "Plant Popilè" on the home screen.
pub const FEATURED_PLANT_COUNT: usize = 2;

pub const SAFETY_TIP: &str =
    "Toujou wè yon doktè anvan ou pran yon gwo remèd, sitou si ou ansent.";

pub const LEGAL_NOTICE: &str = "Remèd Lakay se yon aplikasyon enfòmatif. Toujou konsilte yon doktè oswa yon pwofesyonèl sante anvan ou trete tèt ou.";

pub const EMERGENCY_NOTICE: &str = "Sa se yon ijans! Kouri al lopital imedyatman. Maladi sa a pa ka trete lakay sèlman, li bezwen doktè vit-vit!";

pub const EMERGENCY_HOTLINE: &str = "RELE 116 (ANBILANS)";

pub const EMERGENCY_REMARK: &str = "Pou maladi sa a, nou pa rekòmande remèd fèy kòm premye opsyon. Ale lopital dabò!";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown plant: {0}")]
    UnknownPlant(String),
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),
    #[error("No disease is open")]
    NoDiseaseOpen,
    #[error("Plant {plant_id} is not an available remedy for disease {disease_id}")]
    RemedyUnavailable { disease_id: String, plant_id: String },
}

pub struct UiState {
    catalogue: Arc<Catalogue>,
    navigation: Navigation,
    chat: ChatSession,
    scan: ScanSession,
}

impl UiState {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            navigation: Navigation::new(),
            chat: ChatSession::new(),
            scan: ScanSession::new(),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn scan(&self) -> &ScanSession {
        &self.scan
    }

    // --- Navigation ---

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        self.navigation.select_tab(tab)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.navigation.set_search_query(query);
    }

    pub fn open_plant(&mut self, plant_id: &str) -> Result<(), NavigationError> {
        if self.catalogue.plant(plant_id).is_none() {
            return Err(NavigationError::UnknownPlant(plant_id.to_string()));
        }
        self.navigation.open_plant(plant_id);
        Ok(())
    }

    pub fn open_disease(&mut self, disease_id: &str) -> Result<(), NavigationError> {
        if self.catalogue.disease(disease_id).is_none() {
            return Err(NavigationError::UnknownDisease(disease_id.to_string()));
        }
        self.navigation.open_disease(disease_id);
        Ok(())
    }

    pub fn back(&mut self) -> bool {
        self.navigation.back()
    }

    /// Follows a remedy listed on the open disease detail.
    /// Only plants actually displayed as remedies can be followed.
    pub fn select_remedy(&mut self, plant_id: &str) -> Result<(), NavigationError> {
        let disease = self.open_disease_record().ok_or(NavigationError::NoDiseaseOpen)?;

        let listed = match self.catalogue.remedy_panel(disease) {
            RemedyPanel::Remedies(plants) => plants.iter().any(|p| p.id == plant_id),
            RemedyPanel::EmergencyReferral => false,
        };
        if !listed {
            return Err(NavigationError::RemedyUnavailable {
                disease_id: disease.id.clone(),
                plant_id: plant_id.to_string(),
            });
        }

        self.navigation.select_remedy_from_disease(plant_id);
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.navigation.screen()
    }

    /// Plants matching the current search query.
    pub fn visible_plants(&self) -> Vec<&Plant> {
        filter_by_name(self.catalogue.plants(), self.navigation.search_query())
    }

    /// Diseases matching the current search query.
    pub fn visible_diseases(&self) -> Vec<&Disease> {
        filter_by_name(self.catalogue.diseases(), self.navigation.search_query())
    }

    pub fn open_plant_record(&self) -> Option<&Plant> {
        match self.navigation.detail() {
            Some(Detail::Plant(id)) => self.catalogue.plant(id),
            _ => None,
        }
    }

    pub fn open_disease_record(&self) -> Option<&Disease> {
        match self.navigation.detail() {
            Some(Detail::Disease(id)) => self.catalogue.disease(id),
            _ => None,
        }
    }

    // --- Chat ---

    pub fn send_message(&mut self, text: &str) -> Option<ChatRequest> {
        self.chat.submit(text)
    }

    pub fn complete_chat(&mut self, outcome: PortResult<String>) -> &ChatMessage {
        self.chat.complete(outcome)
    }

    // --- Scan ---

    /// Encodes the photo and opens the scan overlay in its analyzing state.
    /// On error the overlay is left as it was.
    pub fn capture_image(
        &mut self,
        raw: &[u8],
        mime_type: &str,
    ) -> Result<(ScanTicket, EncodedImage), CaptureError> {
        let image = EncodedImage::encode(raw, mime_type)?;
        let ticket = self.scan.capture(image.clone());
        Ok((ticket, image))
    }

    pub fn resolve_scan(&mut self, ticket: ScanTicket, outcome: PortResult<String>) -> bool {
        self.scan.resolve(ticket, outcome)
    }

    pub fn close_scan(&mut self) -> bool {
        self.scan.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_catalogue;
    use crate::ports::PortError;
    use crate::scan::{ScanState, SCAN_MISSING_KEY_RESULT};

    fn ui() -> UiState {
        UiState::new(Arc::new(sample_catalogue()))
    }

    #[test]
    fn severe_disease_shows_referral_and_no_remedies() {
        let mut ui = ui();
        ui.select_tab(Tab::Diseases);
        for id in ["m4", "m5"] {
            ui.open_disease(id).unwrap();
            let disease = ui.open_disease_record().unwrap();
            assert_eq!(ui.catalogue().remedy_panel(disease), RemedyPanel::EmergencyReferral);
        }
        // m5 lists p2 as a remedy, but it is never offered.
        assert_eq!(
            ui.select_remedy("p2"),
            Err(NavigationError::RemedyUnavailable {
                disease_id: "m5".into(),
                plant_id: "p2".into()
            })
        );
        assert_eq!(ui.screen(), Screen::DiseaseDetail("m5".into()));
    }

    #[test]
    fn remedy_tap_goes_straight_to_the_plant() {
        let mut ui = ui();
        ui.select_tab(Tab::Diseases);
        ui.open_disease("m3").unwrap();

        ui.select_remedy("p1").unwrap();
        assert_eq!(ui.screen(), Screen::PlantDetail("p1".into()));
        assert!(ui.open_disease_record().is_none());

        assert!(ui.back());
        assert_eq!(ui.screen(), Screen::Diseases);
    }

    #[test]
    fn remedy_tap_rejects_plants_not_listed() {
        let mut ui = ui();
        assert_eq!(ui.select_remedy("p1"), Err(NavigationError::NoDiseaseOpen));

        ui.open_disease("m1").unwrap();
        assert!(ui.select_remedy("p3").is_err());
        assert_eq!(ui.screen(), Screen::DiseaseDetail("m1".into()));
    }

    #[test]
    fn unknown_ids_leave_navigation_unchanged() {
        let mut ui = ui();
        ui.open_plant("p2").unwrap();
        assert_eq!(ui.open_plant("p99"), Err(NavigationError::UnknownPlant("p99".into())));
        assert_eq!(ui.open_disease("m99"), Err(NavigationError::UnknownDisease("m99".into())));
        assert_eq!(ui.screen(), Screen::PlantDetail("p2".into()));
    }

    #[test]
    fn at_most_one_detail_is_ever_open() {
        let mut ui = ui();
        let ids = ["p1", "m2", "p3", "m4", "m1", "p2"];
        for id in ids {
            if id.starts_with('p') {
                ui.open_plant(id).unwrap();
            } else {
                ui.open_disease(id).unwrap();
            }
            let open = [ui.open_plant_record().is_some(), ui.open_disease_record().is_some()];
            assert_eq!(open.iter().filter(|o| **o).count(), 1);
        }
    }

    #[test]
    fn listings_follow_the_search_query() {
        let mut ui = ui();
        ui.select_tab(Tab::Plants);
        ui.set_search_query("LA");
        let names: Vec<_> = ui.visible_plants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Lalo"]);

        ui.select_tab(Tab::Diseases);
        assert_eq!(ui.visible_diseases().len(), 5);
    }

    #[test]
    fn scan_overlay_is_independent_of_navigation() {
        let mut ui = ui();
        ui.open_disease("m1").unwrap();
        let (ticket, _) = ui.capture_image(&[0xff, 0xd8], "image/jpeg").unwrap();
        ui.select_tab(Tab::Chat);
        assert!(ui.scan().is_analyzing());

        assert!(ui.resolve_scan(ticket, Err(PortError::NotConfigured)));
        assert!(!ui.scan().is_analyzing());
        assert_eq!(ui.scan().result(), Some(SCAN_MISSING_KEY_RESULT));
    }

    #[test]
    fn bad_capture_keeps_the_previous_overlay() {
        let mut ui = ui();
        let (ticket, _) = ui.capture_image(&[1], "image/png").unwrap();
        ui.resolve_scan(ticket, Ok("Vèvenn".into()));

        assert_eq!(ui.capture_image(&[], "image/png"), Err(CaptureError::EmptyImage));
        assert_eq!(ui.scan().result(), Some("Vèvenn"));
    }

    #[test]
    fn closing_mid_flight_discards_the_late_answer() {
        let mut ui = ui();
        let (ticket, _) = ui.capture_image(&[1], "image/png").unwrap();
        assert!(ui.close_scan());
        assert!(!ui.resolve_scan(ticket, Ok("Asosi".into())));
        assert_eq!(ui.scan().state(), &ScanState::Closed);
    }

    #[test]
    fn chat_survives_tab_switches() {
        let mut ui = ui();
        ui.select_tab(Tab::Chat);
        ui.send_message("bonjou").unwrap();
        ui.select_tab(Tab::Home);
        ui.complete_chat(Ok("Bonjou!".into()));
        assert_eq!(ui.chat().messages().len(), 2);
    }
}
