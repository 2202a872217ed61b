use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One medicine row as returned by the paginated listing and search
/// endpoints. Never mutated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineSummary {
    pub id: String,
    pub commercial_name: String,
    pub registry_code: String,
    // Absent on the wire for uncategorized medicines.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Full medicine record from `GET /medicines/{id}`. Edited locally and
/// persisted only via an explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDetail {
    pub id: String,
    pub commercial_name: String,
    #[serde(default)]
    pub description: String,
    pub registry_code: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub leaflet_data: LeafletData,
}

impl MedicineDetail {
    pub fn basic_fields(&self) -> BasicFields {
        BasicFields {
            commercial_name: self.commercial_name.clone(),
            description: self.description.clone(),
            registry_code: self.registry_code.clone(),
        }
    }
}

/// The patchable subset of a medicine record, sent to
/// `PATCH /medicines/{id}` wrapped in `updated_fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFields {
    pub commercial_name: String,
    pub description: String,
    pub registry_code: String,
}

/// The seven leaflet sections. Wire keys are the server's Portuguese
/// field names; every section materializes as an array even when the
/// payload omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafletData {
    #[serde(rename = "indicacoes", default)]
    pub indications: Vec<String>,
    #[serde(rename = "contraindicacoes", default)]
    pub contraindications: Vec<String>,
    #[serde(rename = "reacoes_adversas", default)]
    pub adverse_reactions: Vec<String>,
    #[serde(rename = "cuidados", default)]
    pub precautions: Vec<String>,
    #[serde(rename = "posologia", default)]
    pub dosage: Vec<String>,
    #[serde(rename = "riscos", default)]
    pub risks: Vec<String>,
    #[serde(rename = "superdose", default)]
    pub overdose: Vec<String>,
}

impl LeafletData {
    pub fn section(&self, section: LeafletSection) -> &[String] {
        match section {
            LeafletSection::Indications => &self.indications,
            LeafletSection::Contraindications => &self.contraindications,
            LeafletSection::AdverseReactions => &self.adverse_reactions,
            LeafletSection::Precautions => &self.precautions,
            LeafletSection::Dosage => &self.dosage,
            LeafletSection::Risks => &self.risks,
            LeafletSection::Overdose => &self.overdose,
        }
    }

    pub fn set_section(&mut self, section: LeafletSection, paragraphs: Vec<String>) {
        match section {
            LeafletSection::Indications => self.indications = paragraphs,
            LeafletSection::Contraindications => self.contraindications = paragraphs,
            LeafletSection::AdverseReactions => self.adverse_reactions = paragraphs,
            LeafletSection::Precautions => self.precautions = paragraphs,
            LeafletSection::Dosage => self.dosage = paragraphs,
            LeafletSection::Risks => self.risks = paragraphs,
            LeafletSection::Overdose => self.overdose = paragraphs,
        }
    }
}

/// Typed handle for one leaflet section, used for CLI arguments and
/// iteration over all sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafletSection {
    Indications,
    Contraindications,
    AdverseReactions,
    Precautions,
    Dosage,
    Risks,
    Overdose,
}

impl LeafletSection {
    pub const ALL: [LeafletSection; 7] = [
        LeafletSection::Indications,
        LeafletSection::Dosage,
        LeafletSection::Contraindications,
        LeafletSection::Precautions,
        LeafletSection::AdverseReactions,
        LeafletSection::Risks,
        LeafletSection::Overdose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LeafletSection::Indications => "indications",
            LeafletSection::Contraindications => "contraindications",
            LeafletSection::AdverseReactions => "adverse-reactions",
            LeafletSection::Precautions => "precautions",
            LeafletSection::Dosage => "dosage",
            LeafletSection::Risks => "risks",
            LeafletSection::Overdose => "overdose",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LeafletSection::Indications => "Indications",
            LeafletSection::Contraindications => "Contraindications",
            LeafletSection::AdverseReactions => "Adverse Reactions",
            LeafletSection::Precautions => "Precautions",
            LeafletSection::Dosage => "Dosage",
            LeafletSection::Risks => "Risks",
            LeafletSection::Overdose => "Overdose",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            LeafletSection::Indications => "e.g. indicated for the treatment of...",
            LeafletSection::Contraindications => "e.g. do not use during pregnancy...",
            LeafletSection::AdverseReactions => "known side effects...",
            LeafletSection::Precautions => "general precautions...",
            LeafletSection::Dosage => "e.g. one tablet every 8 hours...",
            LeafletSection::Risks => "associated risks...",
            LeafletSection::Overdose => "emergency procedures...",
        }
    }
}

impl fmt::Display for LeafletSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LeafletSection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indications" => Ok(LeafletSection::Indications),
            "contraindications" => Ok(LeafletSection::Contraindications),
            "adverse-reactions" | "reactions" => Ok(LeafletSection::AdverseReactions),
            "precautions" => Ok(LeafletSection::Precautions),
            "dosage" => Ok(LeafletSection::Dosage),
            "risks" => Ok(LeafletSection::Risks),
            "overdose" => Ok(LeafletSection::Overdose),
            other => Err(format!(
                "unknown leaflet section '{}' (expected one of: {})",
                other,
                LeafletSection::ALL
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// A photo attachment. `key` is the server-side identifier used for
/// deletion; `url` is only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    pub key: String,
}
