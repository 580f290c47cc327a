//! services/api/src/adapters/catalogue_file.rs
//!
//! This module contains the adapter that supplies the reference catalogue from JSON.
//! It implements the `ReferenceDataSource` port from the `core` crate.

use async_trait::async_trait;
use remed_lakay_core::{
    catalogue::Catalogue,
    domain::{Disease, Plant, Severity},
    ports::{PortError, PortResult, ReferenceDataSource},
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// The catalogue shipped inside the binary.
const EMBEDDED_CATALOGUE: &str = include_str!("../../data/catalogue.json");

//=========================================================================================
// File Format
//=========================================================================================

#[derive(Deserialize)]
struct CatalogueFile {
    plants: Vec<PlantRecord>,
    diseases: Vec<DiseaseRecord>,
}

#[derive(Deserialize)]
struct PlantRecord {
    id: String,
    name: String,
    #[serde(default)]
    french_name: String,
    scientific_name: String,
    family: String,
    description: String,
    #[serde(default)]
    properties: Vec<String>,
    #[serde(default)]
    contraindications: Vec<String>,
    #[serde(default)]
    side_effects: Vec<String>,
    image_url: String,
    region: String,
    preparation: String,
    dosage: String,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum SeverityRecord {
    Mild,
    Moderate,
    Severe,
}

#[derive(Deserialize)]
struct DiseaseRecord {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    symptoms: Vec<String>,
    causes: String,
    prevention: String,
    severity: SeverityRecord,
    #[serde(default)]
    remedy_ids: Vec<String>,
}

impl From<PlantRecord> for Plant {
    fn from(r: PlantRecord) -> Self {
        Plant {
            id: r.id,
            name: r.name,
            french_name: r.french_name,
            scientific_name: r.scientific_name,
            family: r.family,
            description: r.description,
            properties: r.properties,
            contraindications: r.contraindications,
            side_effects: r.side_effects,
            image_url: r.image_url,
            region: r.region,
            preparation: r.preparation,
            dosage: r.dosage,
        }
    }
}

impl From<SeverityRecord> for Severity {
    fn from(r: SeverityRecord) -> Self {
        match r {
            SeverityRecord::Mild => Severity::Mild,
            SeverityRecord::Moderate => Severity::Moderate,
            SeverityRecord::Severe => Severity::Severe,
        }
    }
}

impl From<DiseaseRecord> for Disease {
    fn from(r: DiseaseRecord) -> Self {
        Disease {
            id: r.id,
            name: r.name,
            category: r.category,
            symptoms: r.symptoms,
            causes: r.causes,
            prevention: r.prevention,
            severity: r.severity.into(),
            remedy_ids: r.remedy_ids,
        }
    }
}

/// Parses catalogue JSON into the core's `Catalogue`.
pub fn parse_catalogue(json: &str) -> PortResult<Catalogue> {
    let file: CatalogueFile = serde_json::from_str(json)
        .map_err(|e| PortError::Unexpected(format!("Invalid catalogue JSON: {}", e)))?;

    Catalogue::new(
        file.plants.into_iter().map(Plant::from).collect(),
        file.diseases.into_iter().map(Disease::from).collect(),
    )
    .map_err(|e| PortError::Unexpected(e.to_string()))
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Loads the catalogue from a JSON file, or from the embedded copy when no path is given.
#[derive(Clone, Debug, Default)]
pub struct JsonCatalogueAdapter {
    path: Option<PathBuf>,
}

impl JsonCatalogueAdapter {
    /// Creates a new `JsonCatalogueAdapter`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ReferenceDataSource for JsonCatalogueAdapter {
    async fn load_catalogue(&self) -> PortResult<Catalogue> {
        match &self.path {
            Some(path) => {
                info!("Loading catalogue from {}", path.display());
                let json = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => PortError::NotFound(path.display().to_string()),
                    _ => PortError::Unexpected(e.to_string()),
                })?;
                parse_catalogue(&json)
            }
            None => {
                info!("Loading embedded catalogue");
                parse_catalogue(EMBEDDED_CATALOGUE)
            }
        }
    }
}
