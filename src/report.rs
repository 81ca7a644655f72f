//! Report tables and file emitters
//!
//! Turns an analysis run into the per-node table, the formatted summary
//! table, the correlation matrix and the JSON report, and writes them as
//! CSV/JSON files.

use crate::analysis::{
    AnalysisError, AnalysisResult, CentralityMeasure, CentralityScores, CorrelationMatrix,
    NetworkStatistics,
};
use crate::funding::{FundingExtraction, FundingRelationship, FundingSource};
use crate::network::{AugmentationReport, NodeId, NodeType, TrialNetwork};
use crate::profile::DatasetProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ALL_NODES_FILE: &str = "all_nodes_centrality.csv";
pub const INSTITUTIONS_FILE: &str = "institutions_centrality.csv";
pub const SUMMARY_FILE: &str = "network_descriptive_stats.csv";
pub const CORRELATIONS_FILE: &str = "centrality_correlations.csv";
pub const JSON_REPORT_FILE: &str = "network_report.json";

/// Cell text for an undefined correlation
pub const UNDEFINED_CELL: &str = "nan";

/// One row of the per-node centrality table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetricsRow {
    pub node_id: String,
    pub node_type: NodeType,
    pub node_name: String,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub degree: usize,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
}

/// Per-node table sorted by descending degree centrality; ties keep node
/// insertion order. Fails if `scores` miss any node of `network`.
pub fn node_metrics_table(
    network: &TrialNetwork,
    scores: &CentralityScores,
) -> AnalysisResult<Vec<NodeMetricsRow>> {
    let score = |measure: CentralityMeasure, id: &NodeId| {
        scores
            .get(measure, id)
            .ok_or(AnalysisError::ScoresMismatch {
                nodes: network.node_count(),
                scored: scores.len(),
            })
    };

    let mut rows = network
        .nodes()
        .enumerate()
        .map(|(pos, node)| {
            Ok(NodeMetricsRow {
                node_id: node.id.to_string(),
                node_type: node.node_type,
                node_name: node.name.clone(),
                country: node.country.clone(),
                sector: node.sector.clone(),
                degree: network.neighbor_positions(pos).len(),
                degree_centrality: score(CentralityMeasure::Degree, &node.id)?,
                betweenness_centrality: score(CentralityMeasure::Betweenness, &node.id)?,
                closeness_centrality: score(CentralityMeasure::Closeness, &node.id)?,
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    rows.sort_by(|a, b| b.degree_centrality.total_cmp(&a.degree_centrality));
    Ok(rows)
}

/// Institution rows only, in table order
pub fn institution_rows(rows: &[NodeMetricsRow]) -> Vec<NodeMetricsRow> {
    rows.iter()
        .filter(|row| row.node_type == NodeType::Institution)
        .cloned()
        .collect()
}

/// The `k` most central institutions by degree centrality
pub fn top_institutions(rows: &[NodeMetricsRow], k: usize) -> Vec<NodeMetricsRow> {
    rows.iter()
        .filter(|row| row.node_type == NodeType::Institution)
        .take(k)
        .cloned()
        .collect()
}

/// One (metric, formatted value) pair of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl SummaryRow {
    fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        SummaryRow {
            metric: metric.into(),
            value: value.into(),
        }
    }

    fn separator() -> Self {
        SummaryRow::new("", "")
    }

    pub fn is_separator(&self) -> bool {
        self.metric.is_empty() && self.value.is_empty()
    }
}

fn measure_rows(rows: &mut Vec<SummaryRow>, stats: &NetworkStatistics, measure: CentralityMeasure) {
    let d = stats.descriptive(measure);
    let p = match measure {
        CentralityMeasure::Betweenness => 4,
        _ => 3,
    };
    let name = measure.label();

    rows.push(SummaryRow::separator());
    rows.push(SummaryRow::new(
        format!("{} centrality (mean ± SD)", name),
        format!("{:.p$} ± {:.p$}", d.mean, d.std_dev, p = p),
    ));
    rows.push(SummaryRow::new(
        format!("{} centrality (median)", name),
        format!("{:.p$}", d.median, p = p),
    ));
    rows.push(SummaryRow::new(
        format!("{} centrality (range)", name),
        format!("[{:.p$}, {:.p$}]", d.min, d.max, p = p),
    ));
}

/// Ordered summary table with blank separator rows between sections
pub fn summary_rows(stats: &NetworkStatistics) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow::new("Total nodes", stats.total_nodes.to_string()),
        SummaryRow::new("Trials", stats.trials.to_string()),
        SummaryRow::new("Institutions", stats.institutions.to_string()),
        SummaryRow::new("Total edges", stats.total_edges.to_string()),
        SummaryRow::new("Network density", format!("{:.3}", stats.density)),
        SummaryRow::new("Number of components", stats.components.to_string()),
        SummaryRow::new("Average degree", format!("{:.2}", stats.average_degree)),
        SummaryRow::new(
            "Degree centralization",
            format!("{:.3}", stats.degree_centralization),
        ),
    ];
    for measure in CentralityMeasure::ALL {
        measure_rows(&mut rows, stats, measure);
    }
    rows
}

/// One row of the correlation matrix file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationRow {
    #[serde(rename = "Measure")]
    pub measure: String,
    #[serde(rename = "Degree")]
    pub degree: String,
    #[serde(rename = "Betweenness")]
    pub betweenness: String,
    #[serde(rename = "Closeness")]
    pub closeness: String,
}

fn correlation_cell(rho: Option<f64>) -> String {
    match rho {
        Some(r) => r.to_string(),
        None => UNDEFINED_CELL.to_string(),
    }
}

pub fn correlation_rows(matrix: &CorrelationMatrix) -> Vec<CorrelationRow> {
    CentralityMeasure::ALL
        .iter()
        .zip(matrix.rows())
        .map(|(measure, [d, b, c])| CorrelationRow {
            measure: measure.label().to_string(),
            degree: correlation_cell(d),
            betweenness: correlation_cell(b),
            closeness: correlation_cell(c),
        })
        .collect()
}

/// Machine-readable report of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    pub generated_at: String,
    pub dataset_suffix: &'a str,
    pub augmentation: &'a AugmentationReport,
    pub statistics: &'a NetworkStatistics,
    pub top_institutions: Vec<NodeMetricsRow>,
    pub nodes: &'a [NodeMetricsRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<&'a FundingExtraction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a DatasetProfile>,
}

pub fn funding_sources_file(suffix: &str) -> String {
    format!("funding_sources{}.csv", suffix)
}

pub fn funding_relationships_file(suffix: &str) -> String {
    format!("funding_relationships{}.csv", suffix)
}

/// Row type of a CSV report table
pub trait CsvTable {
    /// Column names, in serialization order
    const HEADERS: &'static [&'static str];
}

impl CsvTable for NodeMetricsRow {
    const HEADERS: &'static [&'static str] = &[
        "node_id",
        "node_type",
        "node_name",
        "country",
        "sector",
        "degree",
        "degree_centrality",
        "betweenness_centrality",
        "closeness_centrality",
    ];
}

impl CsvTable for SummaryRow {
    const HEADERS: &'static [&'static str] = &["Metric", "Value"];
}

impl CsvTable for CorrelationRow {
    const HEADERS: &'static [&'static str] = &["Measure", "Degree", "Betweenness", "Closeness"];
}

impl CsvTable for FundingSource {
    const HEADERS: &'static [&'static str] =
        &["funding_id", "name", "headquarters_country", "funder_type"];
}

impl CsvTable for FundingRelationship {
    const HEADERS: &'static [&'static str] = &[
        "funding_relationship_id",
        "funder_id",
        "recipient_type",
        "recipient_id",
        "funding_type",
        "start_date",
        "end_date",
    ];
}

/// Serialize rows to a CSV file with a header line. An empty table still
/// gets its header.
pub fn write_csv<T: Serialize + CsvTable>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    if rows.is_empty() {
        writer
            .write_record(T::HEADERS)
            .with_context(|| format!("Failed to write header to {}", path.display()))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Writes report files into one output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ReportWriter {
    /// Create the output directory if needed
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        Ok(ReportWriter {
            output_dir,
            written: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn csv<T: Serialize + CsvTable>(&mut self, name: &str, rows: &[T]) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        write_csv(&path, rows)?;
        self.written.push(path.clone());
        Ok(path)
    }

    pub fn json<T: Serialize>(&mut self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        write_json(&path, value)?;
        self.written.push(path.clone());
        Ok(path)
    }

    /// Per-node, institution, summary and correlation tables
    pub fn write_analysis_tables(
        &mut self,
        nodes: &[NodeMetricsRow],
        stats: &NetworkStatistics,
    ) -> Result<()> {
        self.csv(ALL_NODES_FILE, nodes)?;
        self.csv(INSTITUTIONS_FILE, &institution_rows(nodes))?;
        self.csv(SUMMARY_FILE, &summary_rows(stats))?;
        self.csv(CORRELATIONS_FILE, &correlation_rows(&stats.correlations))?;
        info!("Saved analysis tables to {}", self.output_dir.display());
        Ok(())
    }

    pub fn write_funding(&mut self, funding: &FundingExtraction, suffix: &str) -> Result<()> {
        self.csv(&funding_sources_file(suffix), &funding.sources)?;
        self.csv(&funding_relationships_file(suffix), &funding.relationships)?;
        info!("Saved funding tables to {}", self.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compute_centrality, summarize};
    use crate::network::build_network;
    use crate::records::{InstitutionRecord, RelationshipRecord, TrialRecord};
    use tempfile::TempDir;

    fn scenario() -> (TrialNetwork, CentralityScores, NetworkStatistics) {
        let trials = vec![
            TrialRecord::new("T1", "Trial one", Some("Kenya")),
            TrialRecord::new("T2", "Trial two", Some("Uganda")),
        ];
        let institutions = vec![
            InstitutionRecord::new("I1", "A", Some("Kenya"), Some("Academic")),
            InstitutionRecord::new("I2", "B", Some("USA"), Some("Funder")),
            InstitutionRecord::new("I3", "C", None, None),
        ];
        let relationships = vec![
            RelationshipRecord::new("T1", "I1", "collaboration"),
            RelationshipRecord::new("T1", "I2", "funding"),
            RelationshipRecord::new("T2", "I2", "funding"),
            RelationshipRecord::new("T2", "I3", "collaboration"),
        ];
        let (network, _) = build_network(&trials, &institutions, &relationships).unwrap();
        let scores = compute_centrality(&network).unwrap();
        let stats = summarize(&network, &scores).unwrap();
        (network, scores, stats)
    }

    #[test]
    fn test_node_table_order() {
        let (network, scores, _) = scenario();
        let rows = node_metrics_table(&network, &scores).unwrap();

        assert_eq!(rows.len(), 5);
        // I2 has degree 4; the rest tie at 2 and keep insertion order
        let ids: Vec<&str> = rows.iter().map(|r| r.node_id.as_str()).collect();
        assert_eq!(ids, vec!["I2", "T1", "T2", "I1", "I3"]);
        assert_eq!(rows[0].degree, 4);
        assert_eq!(rows[0].sector.as_deref(), Some("Funder"));

        let top = top_institutions(&rows, 2);
        let top_ids: Vec<&str> = top.iter().map(|r| r.node_id.as_str()).collect();
        assert_eq!(top_ids, vec!["I2", "I1"]);
        assert_eq!(institution_rows(&rows).len(), 3);
    }

    #[test]
    fn test_summary_rows_layout() {
        let (_, _, stats) = scenario();
        let rows = summary_rows(&stats);

        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0], SummaryRow::new("Total nodes", "5"));
        assert_eq!(rows[4], SummaryRow::new("Network density", "0.600"));
        assert_eq!(rows[6], SummaryRow::new("Average degree", "2.40"));
        assert_eq!(rows[7], SummaryRow::new("Degree centralization", "0.167"));
        assert!(rows[8].is_separator());
        assert_eq!(rows[9].metric, "Degree centrality (mean ± SD)");
        assert_eq!(rows[11], SummaryRow::new("Degree centrality (range)", "[0.500, 1.000]"));
        assert!(rows[12].is_separator());
        assert!(rows[13].value.contains(" ± "));
        assert_eq!(rows[15].value, "[0.0000, 0.6667]");
        assert!(rows[16].is_separator());
        assert_eq!(rows[19].metric, "Closeness centrality (range)");
    }

    #[test]
    fn test_correlation_rows() {
        let matrix = CorrelationMatrix {
            degree_betweenness: None,
            degree_closeness: None,
            betweenness_closeness: None,
        };
        let rows = correlation_rows(&matrix);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].measure, "Degree");
        assert_eq!(rows[0].degree, "1");
        assert_eq!(rows[0].betweenness, UNDEFINED_CELL);
        assert_eq!(rows[2].closeness, "1");
    }

    #[test]
    fn test_write_and_read_back() {
        let (network, scores, stats) = scenario();
        let nodes = node_metrics_table(&network, &scores).unwrap();
        let dir = TempDir::new().unwrap();
        let mut writer = ReportWriter::create(dir.path().join("results")).unwrap();

        writer.write_analysis_tables(&nodes, &stats).unwrap();
        assert_eq!(writer.written().len(), 4);

        let mut reader = csv::Reader::from_path(writer.output_dir().join(ALL_NODES_FILE)).unwrap();
        let back: Vec<NodeMetricsRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(back, nodes);

        let mut reader = csv::Reader::from_path(writer.output_dir().join(SUMMARY_FILE)).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Metric", "Value"]);
        let summary: Vec<SummaryRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(summary, summary_rows(&stats));
    }

    fn header_of(path: &Path) -> Vec<String> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.headers().unwrap().iter().map(str::to_string).collect()
    }

    #[test]
    fn test_empty_tables_keep_their_header() {
        let dir = TempDir::new().unwrap();
        let mut writer = ReportWriter::create(dir.path()).unwrap();

        writer.write_funding(&FundingExtraction::default(), "_E").unwrap();
        writer.csv(INSTITUTIONS_FILE, &Vec::<NodeMetricsRow>::new()).unwrap();

        let sources = dir.path().join(funding_sources_file("_E"));
        assert_eq!(
            header_of(&sources),
            vec!["funding_id", "name", "headquarters_country", "funder_type"]
        );
        let mut reader = csv::Reader::from_path(&sources).unwrap();
        assert_eq!(reader.records().count(), 0);

        assert_eq!(
            header_of(&dir.path().join(funding_relationships_file("_E"))),
            FundingRelationship::HEADERS
        );
        assert_eq!(header_of(&dir.path().join(INSTITUTIONS_FILE)), NodeMetricsRow::HEADERS);
    }

    #[test]
    fn test_declared_headers_match_serialized_headers() {
        let (network, scores, stats) = scenario();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");

        write_csv(&path, &node_metrics_table(&network, &scores).unwrap()).unwrap();
        assert_eq!(header_of(&path), NodeMetricsRow::HEADERS);

        write_csv(&path, &summary_rows(&stats)).unwrap();
        assert_eq!(header_of(&path), SummaryRow::HEADERS);

        write_csv(&path, &correlation_rows(&stats.correlations)).unwrap();
        assert_eq!(header_of(&path), CorrelationRow::HEADERS);

        let funding = crate::funding::extract_funding(&crate::records::Dataset {
            institutions: vec![InstitutionRecord::new("F1", "Orbis", None, Some("Funder"))],
            relationships: vec![RelationshipRecord::new("T1", "F1", "funding")],
            ..Default::default()
        });
        write_csv(&path, &funding.sources).unwrap();
        assert_eq!(header_of(&path), FundingSource::HEADERS);
        write_csv(&path, &funding.relationships).unwrap();
        assert_eq!(header_of(&path), FundingRelationship::HEADERS);
    }

    #[test]
    fn test_node_table_requires_every_score() {
        let (network, scores, _) = scenario();
        let mut partial = scores.clone();
        partial.closeness.shift_remove(&NodeId::new("I3"));

        assert!(matches!(
            node_metrics_table(&network, &partial),
            Err(AnalysisError::ScoresMismatch { nodes: 5, .. })
        ));
    }
}
