//! Command line entry point for generating and inspecting benchmark dashboards

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evalboard_dashboard::{
    config::{DashboardConfig, DashboardConfigBuilder, Theme},
    dashboard::{Dashboard, DashboardState},
    html_report::HtmlReportGenerator,
    kpi::KpiSet,
    loader::DataSource,
    table::{FilterChange, Row, TableFilter},
    utils::{format_score, format_seconds},
    StatsByModel,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tabled::{settings::Style, Table as TextTable, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evalboard")]
#[command(about = "Static benchmark dashboards for model evaluation results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load results and write the static dashboard site
    Render {
        /// Results file path or http(s) URL
        #[arg(short, long)]
        source: Option<String>,
        /// Output directory for the site
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page title
        #[arg(short, long)]
        title: Option<String>,
        /// Color theme (dark or light)
        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Print the dataset summary, per-model stats and headline KPIs
    Summary {
        /// Results file path or http(s) URL
        #[arg(short, long)]
        source: Option<String>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Print the result rows, optionally filtered by model
    Table {
        /// Results file path or http(s) URL
        #[arg(short, long)]
        source: Option<String>,
        /// Only show rows for this model (repeatable)
        #[arg(short, long)]
        model: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Records")]
    count: usize,
    #[tabled(rename = "Avg Latency")]
    latency: String,
    #[tabled(rename = "Avg Relevance")]
    relevance: String,
    #[tabled(rename = "Avg Accuracy")]
    accuracy: String,
}

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "KPI")]
    label: &'static str,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Relevance")]
    relevance: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Latency")]
    latency: String,
}

impl From<Row<'_>> for ResultRow {
    fn from(row: Row<'_>) -> Self {
        Self {
            model: row.record.model.clone(),
            question: row.record.question.clone(),
            relevance: format!("{} ({})", row.relevance_display(), row.relevance_badge),
            accuracy: format!("{} ({})", row.accuracy_display(), row.accuracy_badge),
            latency: row.latency_display(),
        }
    }
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    summary: &'a evalboard_dashboard::DatasetSummary,
    models: &'a StatsByModel,
    kpis: &'a KpiSet,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("evalboard={},evalboard_dashboard={}", level, level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = DashboardConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Render {
            source,
            output,
            title,
            theme,
        } => {
            let mut builder = DashboardConfigBuilder::from_config(config);
            if let Some(source) = source {
                builder = builder.source(source);
            }
            if let Some(output) = output {
                builder = builder.output_dir(output);
            }
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(theme) = theme {
                builder = builder.theme(theme);
            }
            let config = builder.build();
            config.validate().context("Invalid configuration")?;
            render(config).await
        }
        Commands::Summary { source, json } => {
            let dashboard = load_dashboard(&source.unwrap_or(config.source)).await?;
            print_summary(&dashboard, json)
        }
        Commands::Table { source, model } => {
            let dashboard = load_dashboard(&source.unwrap_or(config.source)).await?;
            print_table(&dashboard, model);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml().context("Failed to serialize configuration")?);
            Ok(())
        }
    }
}

async fn render(config: DashboardConfig) -> Result<()> {
    let source = DataSource::parse(&config.source);
    let state = DashboardState::load(&source).await;

    let generator = HtmlReportGenerator::new(config);
    let index = generator
        .generate(&state)
        .context("Failed to write dashboard")?;

    if let DashboardState::Error(message) = &state {
        anyhow::bail!("{} (error page written to {})", message, index.display());
    }

    info!("Dashboard available at {}", index.display());
    println!("{}", index.display());
    Ok(())
}

async fn load_dashboard(location: &str) -> Result<Dashboard> {
    let source = DataSource::parse(location);
    match DashboardState::load(&source).await {
        DashboardState::Ready(dashboard) => Ok(dashboard),
        DashboardState::Error(message) => anyhow::bail!("{} (source: {})", message, source),
        DashboardState::Loading => anyhow::bail!("Benchmark data from {} never settled", source),
    }
}

fn print_summary(dashboard: &Dashboard, json: bool) -> Result<()> {
    if json {
        let report = SummaryReport {
            summary: dashboard.summary(),
            models: dashboard.stats(),
            kpis: dashboard.kpis(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = dashboard.summary();
    println!(
        "{} records, {} models, total latency {}, {} failed evaluations",
        summary.total_records,
        summary.model_count,
        format_seconds(summary.total_latency),
        summary.failed_evaluations
    );
    println!();

    let stats: Vec<StatsRow> = dashboard
        .stats()
        .iter()
        .map(|(model, stats)| StatsRow {
            model: model.clone(),
            count: stats.count,
            latency: format_seconds(stats.latency),
            relevance: format_score(stats.relevance),
            accuracy: format_score(stats.accuracy),
        })
        .collect();
    println!("{}", TextTable::new(stats).with(Style::rounded()));
    println!();

    let kpis = dashboard.kpis();
    let rows = vec![
        KpiRow {
            label: "Fastest Model",
            model: kpis.fastest.name.clone(),
            value: kpis.fastest_display(),
        },
        KpiRow {
            label: "Best Relevance",
            model: kpis.best_relevance.name.clone(),
            value: kpis.relevance_display(),
        },
        KpiRow {
            label: "Best Accuracy",
            model: kpis.best_accuracy.name.clone(),
            value: kpis.accuracy_display(),
        },
    ];
    println!("{}", TextTable::new(rows).with(Style::rounded()));

    Ok(())
}

fn print_table(dashboard: &Dashboard, models: Vec<String>) {
    let mut table = dashboard.table();
    let filter = TableFilter::from_models(models);
    info!(%filter, "Applying table filter");

    let rows: Vec<ResultRow> = table
        .on_filter_change(FilterChange::new(filter))
        .into_iter()
        .map(ResultRow::from)
        .collect();

    if rows.is_empty() {
        println!("No matching results.");
        return;
    }
    println!("{}", TextTable::new(rows).with(Style::rounded()));
}
