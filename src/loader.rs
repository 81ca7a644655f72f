//! CSV entity loader
//!
//! Reads the trials, institutions and edges tables of one dataset. Columns
//! are matched by header name; required columns must be present and every
//! other column is carried through as an attribute.

use crate::network::{PropertyMap, PropertyValue};
use crate::records::{Dataset, InstitutionRecord, RelationshipRecord, TrialRecord};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TRIAL_COLUMNS: [&str; 3] = ["trial_id", "title", "country"];
pub const INSTITUTION_COLUMNS: [&str; 4] =
    ["institution_id", "institution_name", "country", "sector"];
pub const EDGE_COLUMNS: [&str; 3] = ["trial_id", "institution_id", "relationship_type"];

/// File paths of one dataset variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub trials: PathBuf,
    pub institutions: PathBuf,
    pub edges: PathBuf,
}

impl DatasetPaths {
    pub fn new(data_dir: &Path, suffix: &str) -> Self {
        DatasetPaths {
            trials: data_dir.join(format!("trials{}.csv", suffix)),
            institutions: data_dir.join(format!("institutions{}.csv", suffix)),
            edges: data_dir.join(format!("edges{}.csv", suffix)),
        }
    }
}

/// One parsed row: required cells by position, the rest as attributes
struct Row {
    required: Vec<Option<String>>,
    attributes: PropertyMap,
}

impl Row {
    fn cell(&self, idx: usize) -> Option<String> {
        self.required.get(idx).cloned().flatten()
    }

    fn require(&self, idx: usize, column: &str, path: &Path, line: usize) -> Result<String> {
        match self.cell(idx) {
            Some(value) => Ok(value),
            None => bail!(
                "{}: row {} has an empty '{}' value",
                path.display(),
                line,
                column
            ),
        }
    }
}

fn non_empty(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_table(path: &Path, required: &[&str]) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();

    let mut positions = Vec::with_capacity(required.len());
    for column in required {
        match headers.iter().position(|h| h.trim() == *column) {
            Some(pos) => positions.push(pos),
            None => bail!(
                "{} is missing required column '{}'",
                path.display(),
                column
            ),
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!("Failed to read row {} of {}", idx + 1, path.display())
        })?;

        let required_cells = positions
            .iter()
            .map(|&pos| record.get(pos).and_then(non_empty))
            .collect();

        let mut attributes = PropertyMap::new();
        for (pos, header) in headers.iter().enumerate() {
            if positions.contains(&pos) {
                continue;
            }
            let cell = record.get(pos).unwrap_or("");
            attributes.insert(header.trim().to_string(), PropertyValue::from_cell(cell));
        }

        rows.push(Row {
            required: required_cells,
            attributes,
        });
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn load_trials(path: &Path) -> Result<Vec<TrialRecord>> {
    read_table(path, &TRIAL_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(TrialRecord {
                trial_id: row.require(0, TRIAL_COLUMNS[0], path, idx + 1)?,
                title: row.cell(1).unwrap_or_default(),
                country: row.cell(2),
                attributes: row.attributes,
            })
        })
        .collect()
}

pub fn load_institutions(path: &Path) -> Result<Vec<InstitutionRecord>> {
    read_table(path, &INSTITUTION_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(InstitutionRecord {
                institution_id: row.require(0, INSTITUTION_COLUMNS[0], path, idx + 1)?,
                institution_name: row.cell(1).unwrap_or_default(),
                country: row.cell(2),
                sector: row.cell(3),
                attributes: row.attributes,
            })
        })
        .collect()
}

pub fn load_relationships(path: &Path) -> Result<Vec<RelationshipRecord>> {
    read_table(path, &EDGE_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = idx + 1;
            Ok(RelationshipRecord {
                trial_id: row.require(0, EDGE_COLUMNS[0], path, line)?,
                institution_id: row.require(1, EDGE_COLUMNS[1], path, line)?,
                relationship_type: row.cell(2).unwrap_or_default(),
                attributes: row.attributes,
            })
        })
        .collect()
}

/// Load the three tables of the dataset `<data_dir>/{trials,institutions,edges}<suffix>.csv`
pub fn load_dataset(data_dir: &Path, suffix: &str) -> Result<Dataset> {
    let paths = DatasetPaths::new(data_dir, suffix);

    let dataset = Dataset {
        trials: load_trials(&paths.trials)?,
        institutions: load_institutions(&paths.institutions)?,
        relationships: load_relationships(&paths.edges)?,
    };

    info!(
        "Loaded {} trials, {} institutions, {} relationships from {}",
        dataset.trials.len(),
        dataset.institutions.len(),
        dataset.relationships.len(),
        data_dir.display()
    );
    Ok(dataset)
}
