pub mod catalogue;
pub mod chat;
pub mod domain;
pub mod navigation;
pub mod ports;
pub mod scan;
pub mod search;
pub mod ui;

#[cfg(test)]
mod fixtures;

pub use catalogue::{Catalogue, CatalogueError, DanglingRemedy, RemedyPanel};
pub use chat::{ChatRequest, ChatSession};
pub use domain::{CaptureError, ChatMessage, ChatRole, Disease, EncodedImage, Plant, Severity};
pub use navigation::{Detail, Navigation, Screen, Tab};
pub use ports::{
    AdviceService, PlantIdentificationService, PortError, PortResult, ReferenceDataSource,
};
pub use scan::{ScanSession, ScanState, ScanTicket};
pub use ui::{NavigationError, UiState};
