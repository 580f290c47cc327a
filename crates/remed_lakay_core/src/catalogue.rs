//! crates/remed_lakay_core/src/catalogue.rs
//!
//! The reference data store: an immutable, ordered collection of plants and
//! diseases, loaded once at startup and shared read-only afterwards.

use std::collections::HashSet;

use crate::domain::{Disease, Plant};

/// Errors raised while assembling a catalogue.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("Duplicate plant id: {0}")]
    DuplicatePlant(String),
    #[error("Duplicate disease id: {0}")]
    DuplicateDisease(String),
}

/// The part of a disease detail that would list home remedies.
#[derive(Debug, PartialEq, Eq)]
pub enum RemedyPanel<'a> {
    /// Severe diseases never offer remedies, only a referral to a hospital.
    EmergencyReferral,
    /// Resolved remedies in catalogue order. May be empty.
    Remedies(Vec<&'a Plant>),
}

/// A remedy id that does not resolve to any plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRemedy {
    pub disease_id: String,
    pub plant_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    plants: Vec<Plant>,
    diseases: Vec<Disease>,
}

impl Catalogue {
    /// Builds a catalogue, rejecting duplicate ids. Dangling remedy
    /// references are allowed; see [`Catalogue::dangling_remedies`].
    pub fn new(plants: Vec<Plant>, diseases: Vec<Disease>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for plant in &plants {
            if !seen.insert(plant.id.as_str()) {
                return Err(CatalogueError::DuplicatePlant(plant.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for disease in &diseases {
            if !seen.insert(disease.id.as_str()) {
                return Err(CatalogueError::DuplicateDisease(disease.id.clone()));
            }
        }

        Ok(Self { plants, diseases })
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn plant(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn disease(&self, id: &str) -> Option<&Disease> {
        self.diseases.iter().find(|d| d.id == id)
    }

    /// The plants highlighted on the home screen.
    pub fn featured_plants(&self, count: usize) -> &[Plant] {
        &self.plants[..count.min(self.plants.len())]
    }

    /// Plants referenced by the disease, in catalogue order. Unknown ids are skipped.
    pub fn remedies_for(&self, disease: &Disease) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| disease.remedy_ids.iter().any(|id| *id == p.id))
            .collect()
    }

    pub fn remedy_panel(&self, disease: &Disease) -> RemedyPanel<'_> {
        if disease.severity.is_emergency() {
            RemedyPanel::EmergencyReferral
        } else {
            RemedyPanel::Remedies(self.remedies_for(disease))
        }
    }

    /// Every remedy reference that points at no known plant.
    pub fn dangling_remedies(&self) -> Vec<DanglingRemedy> {
        self.diseases
            .iter()
            .flat_map(|d| {
                d.remedy_ids
                    .iter()
                    .filter(|id| self.plant(id).is_none())
                    .map(move |id| DanglingRemedy {
                        disease_id: d.id.clone(),
                        plant_id: id.clone(),
                    })
            })
            .collect()
    }
}
