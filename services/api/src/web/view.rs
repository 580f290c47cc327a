//! services/api/src/web/view.rs
//!
//! Serializable views of the core state. The WebSocket snapshots and the REST
//! endpoints both render through these types.

use chrono::{DateTime, Utc};
use remed_lakay_core::{
    catalogue::{Catalogue, RemedyPanel},
    domain::{ChatMessage, ChatRole, Disease, Plant, Severity},
    navigation::{Screen, Tab},
    scan::ScanState,
    ui::{
        UiState, EMERGENCY_HOTLINE, EMERGENCY_NOTICE, EMERGENCY_REMARK, FEATURED_PLANT_COUNT,
        LEGAL_NOTICE, SAFETY_TIP,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Catalogue Views (shared with REST)
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TabName {
    Home,
    Diseases,
    Plants,
    Chat,
    Profile,
}

impl From<TabName> for Tab {
    fn from(t: TabName) -> Self {
        match t {
            TabName::Home => Tab::Home,
            TabName::Diseases => Tab::Diseases,
            TabName::Plants => Tab::Plants,
            TabName::Chat => Tab::Chat,
            TabName::Profile => Tab::Profile,
        }
    }
}

impl From<Tab> for TabName {
    fn from(t: Tab) -> Self {
        match t {
            Tab::Home => TabName::Home,
            Tab::Diseases => TabName::Diseases,
            Tab::Plants => TabName::Plants,
            Tab::Chat => TabName::Chat,
            Tab::Profile => TabName::Profile,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeverityName {
    Mild,
    Moderate,
    Severe,
}

impl From<Severity> for SeverityName {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Mild => SeverityName::Mild,
            Severity::Moderate => SeverityName::Moderate,
            Severity::Severe => SeverityName::Severe,
        }
    }
}

/// A plant as listed in grids and remedy lists.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PlantSummary {
    pub id: String,
    pub name: String,
    pub family: String,
    pub properties: Vec<String>,
    pub image_url: String,
}

impl From<&Plant> for PlantSummary {
    fn from(p: &Plant) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            family: p.family.clone(),
            properties: p.properties.clone(),
            image_url: p.image_url.clone(),
        }
    }
}

/// Everything shown on a plant's detail page.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PlantView {
    pub id: String,
    pub name: String,
    pub french_name: String,
    pub scientific_name: String,
    pub family: String,
    pub description: String,
    pub properties: Vec<String>,
    pub contraindications: Vec<String>,
    pub side_effects: Vec<String>,
    pub image_url: String,
    pub region: String,
    pub preparation: String,
    pub dosage: String,
    pub caution: String,
}

impl From<&Plant> for PlantView {
    fn from(p: &Plant) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            french_name: p.french_name.clone(),
            scientific_name: p.scientific_name.clone(),
            family: p.family.clone(),
            description: p.description.clone(),
            properties: p.properties.clone(),
            contraindications: p.contraindications.clone(),
            side_effects: p.side_effects.clone(),
            image_url: p.image_url.clone(),
            region: p.region.clone(),
            preparation: p.preparation.clone(),
            dosage: p.dosage.clone(),
            caution: p.caution_notice(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DiseaseSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub severity: SeverityName,
    pub severity_label: String,
}

impl From<&Disease> for DiseaseSummary {
    fn from(d: &Disease) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            category: d.category.clone(),
            severity: d.severity.into(),
            severity_label: d.severity.label().to_string(),
        }
    }
}

/// What a disease page offers instead of, or as, home remedies.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemedyPanelView {
    EmergencyReferral {
        notice: String,
        hotline: String,
        remark: String,
    },
    Remedies {
        plants: Vec<PlantSummary>,
    },
}

impl From<RemedyPanel<'_>> for RemedyPanelView {
    fn from(panel: RemedyPanel<'_>) -> Self {
        match panel {
            RemedyPanel::EmergencyReferral => RemedyPanelView::EmergencyReferral {
                notice: EMERGENCY_NOTICE.to_string(),
                hotline: EMERGENCY_HOTLINE.to_string(),
                remark: EMERGENCY_REMARK.to_string(),
            },
            RemedyPanel::Remedies(plants) => RemedyPanelView::Remedies {
                plants: plants.into_iter().map(PlantSummary::from).collect(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DiseaseView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub symptoms: Vec<String>,
    pub causes: String,
    pub prevention: String,
    pub severity: SeverityName,
    pub severity_label: String,
    pub remedies: RemedyPanelView,
}

impl DiseaseView {
    pub fn new(catalogue: &Catalogue, d: &Disease) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            category: d.category.clone(),
            symptoms: d.symptoms.clone(),
            causes: d.causes.clone(),
            prevention: d.prevention.clone(),
            severity: d.severity.into(),
            severity_label: d.severity.label().to_string(),
            remedies: catalogue.remedy_panel(d).into(),
        }
    }
}

//=========================================================================================
// Session Snapshot (WebSocket only)
//=========================================================================================

/// The full state of one client, pushed after every change.
#[derive(Serialize, Debug, Clone)]
pub struct ViewSnapshot {
    pub tab: TabName,
    pub title: String,
    pub search_query: String,
    pub screen: ScreenView,
    pub chat: ChatView,
    pub scan: ScanView,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenView {
    Home {
        featured: Vec<PlantSummary>,
        safety_tip: String,
    },
    Diseases {
        diseases: Vec<DiseaseSummary>,
    },
    Plants {
        plants: Vec<PlantSummary>,
    },
    Chat,
    Profile {
        legal_notice: String,
    },
    PlantDetail {
        plant: PlantView,
    },
    DiseaseDetail {
        disease: DiseaseView,
    },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    User,
    Bot,
}

#[derive(Serialize, Debug, Clone)]
pub struct ChatMessageView {
    pub role: RoleName,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(m: &ChatMessage) -> Self {
        Self {
            role: match m.role {
                ChatRole::User => RoleName::User,
                ChatRole::Bot => RoleName::Bot,
            },
            text: m.text.clone(),
            sent_at: m.sent_at,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ChatView {
    pub messages: Vec<ChatMessageView>,
    pub awaiting_reply: bool,
    /// Set while the log is empty.
    pub greeting: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanView {
    Closed,
    /// `capture` names the preview delivered once in `scan_preview`.
    Analyzing { capture: u64 },
    Result { capture: u64, text: String },
}

/// Renders the complete view of one client's state.
pub fn snapshot(ui: &UiState) -> ViewSnapshot {
    let catalogue = ui.catalogue();
    let tab = ui.navigation().tab();

    let detail = match ui.screen() {
        Screen::PlantDetail(id) => catalogue
            .plant(&id)
            .map(|p| (p.name.clone(), ScreenView::PlantDetail { plant: p.into() })),
        Screen::DiseaseDetail(id) => catalogue.disease(&id).map(|d| {
            (
                d.name.clone(),
                ScreenView::DiseaseDetail {
                    disease: DiseaseView::new(catalogue, d),
                },
            )
        }),
        _ => None,
    };

    let (title, screen) = detail.unwrap_or_else(|| (tab.title().to_string(), tab_screen(ui, tab)));

    let chat = ui.chat();
    let chat = ChatView {
        messages: chat.messages().iter().map(ChatMessageView::from).collect(),
        awaiting_reply: chat.awaiting_reply(),
        greeting: chat
            .messages()
            .is_empty()
            .then(|| remed_lakay_core::chat::CHAT_GREETING.to_string()),
    };

    let scan = match ui.scan().state() {
        ScanState::Closed => ScanView::Closed,
        ScanState::Analyzing { ticket, .. } => ScanView::Analyzing {
            capture: ticket.generation(),
        },
        ScanState::Finished { ticket, result, .. } => ScanView::Result {
            capture: ticket.generation(),
            text: result.clone(),
        },
    };

    ViewSnapshot {
        tab: tab.into(),
        title,
        search_query: ui.navigation().search_query().to_string(),
        screen,
        chat,
        scan,
    }
}

fn tab_screen(ui: &UiState, tab: Tab) -> ScreenView {
    match tab {
        Tab::Home => ScreenView::Home {
            featured: ui
                .catalogue()
                .featured_plants(FEATURED_PLANT_COUNT)
                .iter()
                .map(PlantSummary::from)
                .collect(),
            safety_tip: SAFETY_TIP.to_string(),
        },
        Tab::Diseases => ScreenView::Diseases {
            diseases: ui.visible_diseases().into_iter().map(DiseaseSummary::from).collect(),
        },
        Tab::Plants => ScreenView::Plants {
            plants: ui.visible_plants().into_iter().map(PlantSummary::from).collect(),
        },
        Tab::Chat => ScreenView::Chat,
        Tab::Profile => ScreenView::Profile {
            legal_notice: LEGAL_NOTICE.to_string(),
        },
    }
}
