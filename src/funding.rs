//! Funding extraction
//!
//! Derives the funding-sources table (institutions in the `Funder` sector,
//! classified by name) and the funding-relationships table (direct edges of
//! type `funding`) from a loaded dataset.

use crate::records::{Dataset, InstitutionRecord, RelationshipRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Sector value marking an institution as a funder
pub const FUNDER_SECTOR: &str = "Funder";

/// Funder classification derived from the funder's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum FunderType {
    #[serde(rename = "Private Foundation")]
    PrivateFoundation,
    #[serde(rename = "Government Agency")]
    GovernmentAgency,
    #[serde(rename = "International Organization")]
    InternationalOrganization,
    #[serde(rename = "Healthcare Institution")]
    HealthcareInstitution,
    Other,
}

impl FunderType {
    /// Classify by case-insensitive keywords; the first matching rule wins
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(k));

        if has(&["foundation", "philanthrop"]) {
            FunderType::PrivateFoundation
        } else if has(&["institute", "institut", "nih", "nci", "nichd", "niams"]) {
            FunderType::GovernmentAgency
        } else if has(&["international", "path", "orbis"]) {
            FunderType::InternationalOrganization
        } else if has(&["clinic", "hospital"]) {
            FunderType::HealthcareInstitution
        } else {
            FunderType::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FunderType::PrivateFoundation => "Private Foundation",
            FunderType::GovernmentAgency => "Government Agency",
            FunderType::InternationalOrganization => "International Organization",
            FunderType::HealthcareInstitution => "Healthcare Institution",
            FunderType::Other => "Other",
        }
    }
}

impl fmt::Display for FunderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row of the funding-sources table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    pub funding_id: String,
    pub name: String,
    pub headquarters_country: Option<String>,
    pub funder_type: FunderType,
}

/// Row of the funding-relationships table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRelationship {
    pub funding_relationship_id: String,
    pub funder_id: String,
    pub recipient_type: String,
    pub recipient_id: String,
    pub funding_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Both funding tables plus a per-type tally
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingExtraction {
    pub sources: Vec<FundingSource>,
    pub relationships: Vec<FundingRelationship>,
}

impl FundingExtraction {
    /// Funder counts per type, most frequent first (ties by type order)
    pub fn type_counts(&self) -> Vec<(FunderType, usize)> {
        let mut counts: Vec<(FunderType, usize)> = Vec::new();
        for source in &self.sources {
            match counts.iter_mut().find(|(t, _)| *t == source.funder_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((source.funder_type, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

/// Funding sources: institutions whose sector is exactly `Funder`
pub fn funding_sources(institutions: &[InstitutionRecord]) -> Vec<FundingSource> {
    institutions
        .iter()
        .filter(|inst| inst.sector.as_deref() == Some(FUNDER_SECTOR))
        .map(|inst| FundingSource {
            funding_id: inst.institution_id.clone(),
            name: inst.institution_name.clone(),
            headquarters_country: inst.country.clone(),
            funder_type: FunderType::classify(&inst.institution_name),
        })
        .collect()
}

/// Funding relationships: `funding` edges, numbered by their 1-based row in
/// the full edge table (`FREL_001`, ...)
pub fn funding_relationships(relationships: &[RelationshipRecord]) -> Vec<FundingRelationship> {
    relationships
        .iter()
        .enumerate()
        .filter(|(_, rel)| rel.relationship_type == "funding")
        .map(|(idx, rel)| FundingRelationship {
            funding_relationship_id: format!("FREL_{:03}", idx + 1),
            funder_id: rel.institution_id.clone(),
            recipient_type: "clinical_trial".to_string(),
            recipient_id: rel.trial_id.clone(),
            funding_type: "Research Grant".to_string(),
            start_date: None,
            end_date: None,
        })
        .collect()
}

/// Extract both funding tables from a dataset
pub fn extract_funding(dataset: &Dataset) -> FundingExtraction {
    let extraction = FundingExtraction {
        sources: funding_sources(&dataset.institutions),
        relationships: funding_relationships(&dataset.relationships),
    };
    info!(
        "Extracted {} funding sources and {} funding relationships",
        extraction.sources.len(),
        extraction.relationships.len()
    );
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_rules() {
        let cases = [
            ("Bill & Melinda Gates Foundation", FunderType::PrivateFoundation),
            ("Wellcome Philanthropies", FunderType::PrivateFoundation),
            ("National Cancer Institute (NCI)", FunderType::GovernmentAgency),
            ("Institut Pasteur", FunderType::GovernmentAgency),
            ("NIH Fogarty", FunderType::GovernmentAgency),
            ("PATH", FunderType::InternationalOrganization),
            ("Orbis", FunderType::InternationalOrganization),
            ("Mayo Clinic", FunderType::HealthcareInstitution),
            ("Kenyatta National Hospital", FunderType::HealthcareInstitution),
            ("Google", FunderType::Other),
        ];
        for (name, expected) in cases {
            assert_eq!(FunderType::classify(name), expected, "{}", name);
        }
    }

    #[test]
    fn test_first_rule_wins() {
        // Both "foundation" and "hospital": foundation rule comes first
        assert_eq!(
            FunderType::classify("Hospital Foundation"),
            FunderType::PrivateFoundation
        );
    }

    #[test]
    fn test_sources_only_take_funder_sector() {
        let institutions = vec![
            InstitutionRecord::new("I1", "Gates Foundation", Some("USA"), Some("Funder")),
            InstitutionRecord::new("I2", "Makerere University", Some("Uganda"), Some("Academic")),
            InstitutionRecord::new("I3", "Funder Hospital", Some("Ghana"), Some("funder")),
        ];
        let sources = funding_sources(&institutions);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].funding_id, "I1");
        assert_eq!(sources[0].headquarters_country.as_deref(), Some("USA"));
        assert_eq!(sources[0].funder_type, FunderType::PrivateFoundation);
    }

    #[test]
    fn test_relationship_numbering_follows_edge_rows() {
        let relationships = vec![
            RelationshipRecord::new("T1", "I1", "collaboration"),
            RelationshipRecord::new("T1", "I2", "funding"),
            RelationshipRecord::new("T2", "I2", "collaboration"),
            RelationshipRecord::new("T2", "I1", "funding"),
        ];
        let rels = funding_relationships(&relationships);

        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].funding_relationship_id, "FREL_002");
        assert_eq!(rels[0].funder_id, "I2");
        assert_eq!(rels[0].recipient_id, "T1");
        assert_eq!(rels[1].funding_relationship_id, "FREL_004");
        assert_eq!(rels[1].recipient_type, "clinical_trial");
        assert_eq!(rels[1].funding_type, "Research Grant");
    }

    #[test]
    fn test_type_counts() {
        let dataset = Dataset {
            institutions: vec![
                InstitutionRecord::new("F1", "A Foundation", None, Some("Funder")),
                InstitutionRecord::new("F2", "B Foundation", None, Some("Funder")),
                InstitutionRecord::new("F3", "NIH", None, Some("Funder")),
            ],
            ..Default::default()
        };
        let extraction = extract_funding(&dataset);
        assert_eq!(
            extraction.type_counts(),
            vec![
                (FunderType::PrivateFoundation, 2),
                (FunderType::GovernmentAgency, 1)
            ]
        );
    }
}
