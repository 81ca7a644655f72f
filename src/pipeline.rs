//! End-to-end analysis pipeline
//!
//! load → build → augment → centrality → statistics → reports.
//! Every computation finishes before the first file is written, so a failed
//! run leaves no partial output behind.

use crate::analysis::{compute_centrality, summarize, CentralityScores, NetworkStatistics};
use crate::config::PipelineConfig;
use crate::funding::{extract_funding, FundingExtraction};
use crate::loader::load_dataset;
use crate::network::{build_from_dataset, AugmentationReport, TrialNetwork};
use crate::profile::{profile_dataset, DatasetProfile};
use crate::records::Dataset;
use crate::report::{self, AnalysisReport, NodeMetricsRow, ReportWriter};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

/// Everything one analysis run produced
#[derive(Debug, Clone)]
pub struct NetworkAnalysis {
    pub network: TrialNetwork,
    pub augmentation: AugmentationReport,
    pub scores: CentralityScores,
    pub statistics: NetworkStatistics,
    /// Per-node table, most central first
    pub nodes: Vec<NodeMetricsRow>,
    pub funding: Option<FundingExtraction>,
    pub profile: DatasetProfile,
}

impl NetworkAnalysis {
    pub fn top_institutions(&self, k: usize) -> Vec<NodeMetricsRow> {
        report::top_institutions(&self.nodes, k)
    }
}

/// Run the analysis on an in-memory dataset. Writes nothing.
pub fn analyze(dataset: &Dataset, config: &PipelineConfig) -> Result<NetworkAnalysis> {
    info!("Building network");
    let (network, augmentation) =
        build_from_dataset(dataset).context("Failed to build the trial network")?;
    info!(
        "Network: {} nodes, {} edges ({} co-participation)",
        network.node_count(),
        network.edge_count(),
        augmentation.added_count()
    );

    info!("Calculating centrality measures");
    let scores = compute_centrality(&network).context("Failed to compute centrality")?;
    let statistics =
        summarize(&network, &scores).context("Failed to compute network statistics")?;
    let nodes = report::node_metrics_table(&network, &scores)
        .context("Failed to build the node table")?;

    let funding = config.extract_funding.then(|| extract_funding(dataset));
    let profile = profile_dataset(&dataset.trials);

    Ok(NetworkAnalysis {
        network,
        augmentation,
        scores,
        statistics,
        nodes,
        funding,
        profile,
    })
}

/// Write every report for a finished analysis; returns the files written
pub fn write_reports(analysis: &NetworkAnalysis, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let mut writer = ReportWriter::create(&config.output_dir)?;

    writer.write_analysis_tables(&analysis.nodes, &analysis.statistics)?;
    if let Some(funding) = &analysis.funding {
        writer.write_funding(funding, &config.dataset_suffix)?;
    }
    if config.write_json {
        let json = AnalysisReport {
            generated_at: Utc::now().to_rfc3339(),
            dataset_suffix: &config.dataset_suffix,
            augmentation: &analysis.augmentation,
            statistics: &analysis.statistics,
            top_institutions: analysis.top_institutions(config.top_institutions),
            nodes: &analysis.nodes,
            funding: analysis.funding.as_ref(),
            profile: Some(&analysis.profile),
        };
        writer.json(report::JSON_REPORT_FILE, &json)?;
    }

    info!(
        "Wrote {} report files to {}",
        writer.written().len(),
        writer.output_dir().display()
    );
    Ok(writer.written().to_vec())
}

/// Load, analyze and write reports
pub fn run(config: &PipelineConfig) -> Result<NetworkAnalysis> {
    let dataset = load_dataset(&config.data_dir, &config.dataset_suffix)?;
    let analysis = analyze(&dataset, config)?;
    write_reports(&analysis, config)?;
    Ok(analysis)
}

/// Load the dataset and write only the funding tables
pub fn run_funding(config: &PipelineConfig) -> Result<FundingExtraction> {
    let dataset = load_dataset(&config.data_dir, &config.dataset_suffix)?;
    let funding = extract_funding(&dataset);

    let mut writer = ReportWriter::create(&config.output_dir)?;
    writer.write_funding(&funding, &config.dataset_suffix)?;
    Ok(funding)
}

/// Load the dataset and profile its trials; writes nothing
pub fn run_profile(config: &PipelineConfig) -> Result<DatasetProfile> {
    let dataset = load_dataset(&config.data_dir, &config.dataset_suffix)?;
    Ok(profile_dataset(&dataset.trials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkError;
    use crate::records::{InstitutionRecord, RelationshipRecord, TrialRecord};
    use crate::analysis::AnalysisError;

    fn dataset() -> Dataset {
        Dataset {
            trials: vec![
                TrialRecord::new("T1", "Trial one", Some("Kenya")),
                TrialRecord::new("T2", "Trial two", Some("Kenya")),
            ],
            institutions: vec![
                InstitutionRecord::new("I1", "Gates Foundation", Some("USA"), Some("Funder")),
                InstitutionRecord::new("I2", "Makerere University", Some("Uganda"), Some("Academic")),
                InstitutionRecord::new("I3", "Kenyatta National Hospital", Some("Kenya"), Some("Hospital")),
            ],
            relationships: vec![
                RelationshipRecord::new("T1", "I1", "funding"),
                RelationshipRecord::new("T1", "I2", "collaboration"),
                RelationshipRecord::new("T2", "I2", "collaboration"),
                RelationshipRecord::new("T2", "I3", "collaboration"),
            ],
        }
    }

    #[test]
    fn test_analyze() {
        let analysis = analyze(&dataset(), &PipelineConfig::default()).unwrap();

        assert_eq!(analysis.statistics.total_edges, 6);
        assert_eq!(analysis.augmentation.added_count(), 2);
        assert_eq!(analysis.nodes[0].node_id, "I2");
        assert_eq!(analysis.top_institutions(1)[0].node_name, "Makerere University");

        let funding = analysis.funding.unwrap();
        assert_eq!(funding.sources.len(), 1);
        assert_eq!(funding.relationships[0].funding_relationship_id, "FREL_001");
        assert_eq!(analysis.profile.geographic.country_count(), 1);
    }

    #[test]
    fn test_funding_can_be_disabled() {
        let config = PipelineConfig {
            extract_funding: false,
            ..Default::default()
        };
        assert!(analyze(&dataset(), &config).unwrap().funding.is_none());
    }

    #[test]
    fn test_integrity_error_is_reported() {
        let mut data = dataset();
        data.relationships.push(RelationshipRecord::new("T9", "I1", "funding"));

        let err = analyze(&data, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NetworkError>(),
            Some(NetworkError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_single_node_is_degenerate() {
        let data = Dataset {
            trials: vec![TrialRecord::new("T1", "Only", None)],
            ..Default::default()
        };
        let err = analyze(&data, &PipelineConfig::default()).unwrap_err();
        assert!(err.downcast_ref::<AnalysisError>().is_some());
    }
}
