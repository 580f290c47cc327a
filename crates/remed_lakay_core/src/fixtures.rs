//! Small catalogue used by the unit tests of this crate.

use crate::catalogue::Catalogue;
use crate::domain::{Disease, Plant, Severity};

pub(crate) fn plant(id: &str, name: &str) -> Plant {
    Plant {
        id: id.to_string(),
        name: name.to_string(),
        french_name: String::new(),
        scientific_name: String::new(),
        family: String::new(),
        description: String::new(),
        properties: vec![],
        contraindications: vec![],
        side_effects: vec![],
        image_url: String::new(),
        region: String::new(),
        preparation: String::new(),
        dosage: String::new(),
    }
}

pub(crate) fn disease(id: &str, name: &str, severity: Severity, remedy_ids: &[&str]) -> Disease {
    Disease {
        id: id.to_string(),
        name: name.to_string(),
        category: String::new(),
        symptoms: vec![],
        causes: String::new(),
        prevention: String::new(),
        severity,
        remedy_ids: remedy_ids.iter().map(|s| s.to_string()).collect(),
    }
}

pub(crate) fn sample_catalogue() -> Catalogue {
    Catalogue::new(
        vec![plant("p1", "Asosi"), plant("p2", "Vèvenn"), plant("p3", "Lalo")],
        vec![
            disease("m1", "Grip", Severity::Mild, &["p2"]),
            disease("m2", "Dyabèt", Severity::Moderate, &["p1"]),
            disease("m3", "Enfeksyon nan po", Severity::Mild, &["p1", "p3"]),
            disease("m4", "Kolera", Severity::Severe, &[]),
            disease("m5", "Emoraji", Severity::Severe, &["p2"]),
        ],
    )
    .expect("fixture ids are unique")
}
