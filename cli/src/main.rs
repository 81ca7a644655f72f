//! Trialnet CLI: runs the clinical-trial network analysis from the command line

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trialnet::funding::FundingExtraction;
use trialnet::pipeline::{self, NetworkAnalysis};
use trialnet::profile::DatasetProfile;
use trialnet::report::{summary_rows, NodeMetricsRow};
use trialnet::{CentralityMeasure, PipelineConfig};

#[derive(Parser)]
#[command(name = "trialnet", version, about = "Clinical-trial network analysis")]
struct Cli {
    /// YAML pipeline configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the dataset CSV files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for report files
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Dataset variant suffix, e.g. _N11
    #[arg(long, global = true)]
    suffix: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the network, compute centrality and write all reports
    Analyze {
        /// Institutions shown in the top-centrality table
        #[arg(long)]
        top: Option<usize>,

        /// Skip the funding tables
        #[arg(long)]
        no_funding: bool,
    },
    /// Extract funding sources and relationships only
    Funding,
    /// Show geographic and temporal distribution of trials
    Profile,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(suffix) = &cli.suffix {
        config.dataset_suffix = suffix.clone();
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(&cli).and_then(|mut config| match &cli.command {
        Commands::Analyze { top, no_funding } => {
            if let Some(k) = top {
                config.top_institutions = *k;
            }
            if *no_funding {
                config.extract_funding = false;
            }
            run_analyze(&config, &cli.format)
        }
        Commands::Funding => run_funding(&config, &cli.format),
        Commands::Profile => run_profile(&config, &cli.format),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn format_rho(rho: Option<f64>) -> String {
    rho.map(|r| format!("{:.3}", r)).unwrap_or_else(|| "nan".to_string())
}

fn run_analyze(
    config: &PipelineConfig,
    format: &OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let analysis = pipeline::run(config)?;
    let top = analysis.top_institutions(config.top_institutions);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "statistics": analysis.statistics,
                "augmentation": analysis.augmentation,
                "top_institutions": top,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => print_analysis(&analysis, &top),
    }

    Ok(())
}

fn print_analysis(analysis: &NetworkAnalysis, top: &[NodeMetricsRow]) {
    let mut summary = new_table(&["Metric", "Value"]);
    for row in summary_rows(&analysis.statistics) {
        summary.add_row(vec![row.metric, row.value]);
    }
    println!("{}", summary);

    let mut institutions = new_table(&[
        "Rank",
        "Institution",
        "Country",
        "Sector",
        "Degree",
        "Betweenness",
        "Closeness",
    ]);
    for (rank, row) in top.iter().enumerate() {
        institutions.add_row(vec![
            (rank + 1).to_string(),
            row.node_name.clone(),
            row.country.clone().unwrap_or_default(),
            row.sector.clone().unwrap_or_default(),
            format!("{:.3}", row.degree_centrality),
            format!("{:.4}", row.betweenness_centrality),
            format!("{:.3}", row.closeness_centrality),
        ]);
    }
    println!("{}", institutions);

    let mut correlations = new_table(&["Measure", "Degree", "Betweenness", "Closeness"]);
    for (measure, cells) in CentralityMeasure::ALL
        .iter()
        .zip(analysis.statistics.correlations.rows())
    {
        let mut row = vec![measure.label().to_string()];
        row.extend(cells.iter().map(|rho| format_rho(*rho)));
        correlations.add_row(row);
    }
    println!("{}", correlations);
    println!(
        "{} co-participation edges added to {} direct edges",
        analysis.augmentation.added_count(),
        analysis.augmentation.direct_edges
    );
}

fn run_funding(
    config: &PipelineConfig,
    format: &OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let funding = pipeline::run_funding(config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&funding)?),
        OutputFormat::Table => print_funding(&funding),
    }

    Ok(())
}

fn print_funding(funding: &FundingExtraction) {
    let mut table = new_table(&["Funder type", "Count"]);
    for (funder_type, count) in funding.type_counts() {
        table.add_row(vec![funder_type.to_string(), count.to_string()]);
    }
    println!("{}", table);
    println!(
        "{} funding sources, {} funding relationships",
        funding.sources.len(),
        funding.relationships.len()
    );
}

fn run_profile(
    config: &PipelineConfig,
    format: &OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let profile = pipeline::run_profile(config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
        OutputFormat::Table => print_profile(&profile),
    }

    Ok(())
}

fn print_profile(profile: &DatasetProfile) {
    let mut countries = new_table(&["Country", "Trials"]);
    for c in &profile.geographic.countries {
        countries.add_row(vec![c.country.clone(), c.trials.to_string()]);
    }
    println!("{}", countries);
    println!(
        "{} countries, {} with more than one trial",
        profile.geographic.country_count(),
        profile.geographic.multi_trial_countries()
    );

    let mut years = new_table(&["Year", "New trials", "Cumulative"]);
    for y in &profile.temporal.years {
        years.add_row(vec![
            y.year.to_string(),
            y.new_trials.to_string(),
            y.cumulative.to_string(),
        ]);
    }
    println!("{}", years);
    if profile.temporal.missing_dates > 0 {
        println!("{} trials without a start date", profile.temporal.missing_dates);
    }
}
