//! CLI entry point for the dataset quality analyzer.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lex_quality::{
    AnalysisConfig, ColumnAnalysis, DatasetAnalyzer, QualityReport, load_dataset,
    recommendations_for,
};
use std::path::Path;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Dataset Quality Analyzer",
    long_about = "Infers column types and scores the completeness, consistency and accuracy \
                  of a tabular dataset.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  lex-quality -i data.csv\n\n  \
                  # Full report as JSON\n  \
                  lex-quality -i data.json --json | jq .metrics\n\n  \
                  # Details for one column\n  \
                  lex-quality -i data.csv --column email"
)]
struct Args {
    /// Path to the CSV or JSON file to analyze
    #[arg(short, long)]
    input: String,

    /// Output the full JSON report to stdout instead of a summary
    ///
    /// Disables all logging so stdout only contains JSON.
    #[arg(long)]
    json: bool,

    /// Show details for a single column
    #[arg(short, long)]
    column: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// JSON file with analysis settings
    #[arg(long)]
    config: Option<String>,

    /// Number of leading non-missing values used for type inference
    #[arg(long)]
    sample_size: Option<usize>,

    /// IQR multiplier for the outlier fence
    #[arg(long)]
    iqr_multiplier: Option<f64>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled entirely.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    debug!("Analysis config: {:?}", config);

    info!("Loading dataset from: {}", args.input);
    let dataset = load_dataset(&args.input)?;
    info!("Dataset loaded: {} rows", dataset.len());

    let analysis = DatasetAnalyzer::new(config).analyze(&dataset);

    if let Some(ref name) = args.column {
        let column = analysis.column(name)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(column)?);
        } else {
            print_column(column);
        }
        return Ok(());
    }

    let report = QualityReport::new(analysis, Some(&args.input));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let base = match args.config {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Reading config file {path}"))?;
            serde_json::from_str::<AnalysisConfig>(&content)
                .with_context(|| format!("Parsing config file {path}"))?
        }
        None => AnalysisConfig::default(),
    };

    let mut builder = AnalysisConfig::builder()
        .column_sample_size(args.sample_size.unwrap_or(base.column_sample_size))
        .max_inference_sample(base.max_inference_sample)
        .majority_threshold(base.majority_threshold)
        .min_outlier_values(base.min_outlier_values)
        .max_outlier_values(base.max_outlier_values)
        .max_format_issue_samples(base.max_format_issue_samples)
        .max_examples(base.max_examples)
        .iqr_multiplier(base.iqr_multiplier);

    if let Some(multiplier) = args.iqr_multiplier {
        builder = builder.iqr_multiplier(multiplier);
    }

    Ok(builder.build()?)
}

/// Print the human-readable summary.
///
/// Uses `println!` intentionally: this is the primary output, independent of
/// the log level.
fn print_summary(report: &QualityReport) {
    let analysis = &report.analysis;
    let metrics = &report.metrics;

    println!("\n{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    if let Some(ref file) = report.input_file {
        println!("  File: {}", file);
    }
    println!("  Rows: {}", analysis.row_count);
    println!("  Columns: {}", analysis.column_count);
    let types: Vec<String> = report
        .type_distribution
        .iter()
        .map(|(data_type, count)| format!("{data_type}={count}"))
        .collect();
    println!("  Types: {}", types.join(", "));

    println!("\nQUALITY SCORE");
    println!("{}", "-".repeat(40));
    println!(
        "  Composite: {}/100 ({})",
        metrics.composite_score, metrics.score_level
    );
    println!("  Completeness: {}", metrics.completeness);
    println!("  Consistency: {}", metrics.consistency);
    println!("  Accuracy: {}", metrics.accuracy);
    println!("  {}", metrics.summary);

    println!("\nCOLUMNS");
    println!("{}", "-".repeat(40));
    println!(
        "  {:<24} {:<8} {:>9} {:>9} {:>9} {:>9}",
        "name", "type", "missing%", "dup%", "outlier%", "format%"
    );
    for column in analysis.columns.values() {
        println!(
            "  {:<24} {:<8} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            truncate(&column.column_name, 24),
            column.data_type.as_str(),
            column.missing_percent,
            column.duplicate_percent,
            column.outliers_percent,
            column.format_issues_percent
        );
    }

    println!("\nCOLUMNS WITH ISSUES");
    println!("{}", "-".repeat(40));
    if report.column_issues.is_empty() {
        println!("  None");
    }
    for ranked in &report.column_issues {
        println!(
            "  {} ({} issue types)",
            ranked.column.column_name, ranked.issue_count
        );
        if let Some(recs) = report.recommendations.get(&ranked.column.column_name) {
            for rec in recs {
                println!("    - {}", rec.message);
            }
        }
    }
    println!();
}

/// Print details for a single column.
fn print_column(column: &ColumnAnalysis) {
    println!("\n{}", "=".repeat(80));
    println!("COLUMN: {}", column.column_name);
    println!("{}\n", "=".repeat(80));

    println!("  Type: {}", column.data_type);
    println!("  Rows: {}", column.total_rows);
    println!(
        "  Missing: {} ({:.2}%)",
        column.missing_count, column.missing_percent
    );
    println!(
        "  Unique: {} ({:.2}%)",
        column.unique_count, column.unique_percent
    );
    println!(
        "  Duplicates: {} ({:.2}%)",
        column.duplicate_count, column.duplicate_percent
    );
    println!(
        "  Outliers: {} ({:.2}%)",
        column.outliers_count, column.outliers_percent
    );
    if !column.outlier_values.is_empty() {
        let values: Vec<String> = column.outlier_values.iter().map(f64::to_string).collect();
        println!("    e.g. {}", values.join(", "));
    }
    println!(
        "  Format issues: {} ({:.2}%)",
        column.format_issues_count, column.format_issues_percent
    );
    let examples: Vec<String> = column.examples.iter().map(|v| v.to_string()).collect();
    println!("  Examples: {}", examples.join(", "));

    let recs = recommendations_for(column);
    if !recs.is_empty() {
        println!("\nRECOMMENDATIONS");
        println!("{}", "-".repeat(40));
        for rec in recs {
            println!("  {}", rec.message);
            for action in &rec.actions {
                println!("    - {}", action);
            }
        }
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
