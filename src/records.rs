//! Tabular entity records consumed by the network builder

use crate::network::PropertyMap;
use serde::{Deserialize, Serialize};

/// One row of the trials table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_id: String,
    pub title: String,
    pub country: Option<String>,
    /// Extra columns (phase, status, start_date, ...) passed through to the node
    #[serde(default)]
    pub attributes: PropertyMap,
}

impl TrialRecord {
    pub fn new(trial_id: impl Into<String>, title: impl Into<String>, country: Option<&str>) -> Self {
        TrialRecord {
            trial_id: trial_id.into(),
            title: title.into(),
            country: country.map(str::to_string),
            attributes: PropertyMap::new(),
        }
    }

    /// Pass-through attribute as text, if present and non-null
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
    }
}

/// One row of the institutions table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    pub institution_id: String,
    pub institution_name: String,
    pub country: Option<String>,
    pub sector: Option<String>,
    #[serde(default)]
    pub attributes: PropertyMap,
}

impl InstitutionRecord {
    pub fn new(
        institution_id: impl Into<String>,
        institution_name: impl Into<String>,
        country: Option<&str>,
        sector: Option<&str>,
    ) -> Self {
        InstitutionRecord {
            institution_id: institution_id.into(),
            institution_name: institution_name.into(),
            country: country.map(str::to_string),
            sector: sector.map(str::to_string),
            attributes: PropertyMap::new(),
        }
    }
}

/// One row of the direct relationships (edges) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub trial_id: String,
    pub institution_id: String,
    pub relationship_type: String,
    /// Edge attributes (strength, funding amount, project focus, ...)
    #[serde(default)]
    pub attributes: PropertyMap,
}

impl RelationshipRecord {
    pub fn new(
        trial_id: impl Into<String>,
        institution_id: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        RelationshipRecord {
            trial_id: trial_id.into(),
            institution_id: institution_id.into(),
            relationship_type: relationship_type.into(),
            attributes: PropertyMap::new(),
        }
    }
}

/// The three record sets of one dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub trials: Vec<TrialRecord>,
    pub institutions: Vec<InstitutionRecord>,
    pub relationships: Vec<RelationshipRecord>,
}
