//! HTML Report Generation for benchmark dashboards
//!
//! Rendering is split in two steps. [`DashboardView::from_state`] flattens a
//! [`DashboardState`] into immutable, display-ready strings, and [`render`] turns that view
//! into a complete HTML document. [`HtmlReportGenerator`] writes the document together with
//! its stylesheet and script into the output directory.

use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardState};
use crate::error::Result;
use crate::table::{FilterOption, Row};
use crate::utils::{format_seconds, json_for_script};
use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const STYLE_CSS: &str = include_str!("../assets/style.css");
const DASHBOARD_JS: &str = include_str!("../assets/dashboard.js");

const LOADING_MESSAGE: &str = "Loading benchmark data...";

/// One headline KPI card and the element ids its slots use
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub label: &'static str,
    pub value_id: &'static str,
    pub name_id: &'static str,
    pub value: String,
    pub name: String,
}

/// Dataset counters above the KPI cards
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryStrip {
    pub total_records: usize,
    pub model_count: usize,
    pub total_latency: String,
    pub failed_evaluations: usize,
}

/// Display strings for one table row
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub model: String,
    pub question: String,
    pub prediction: String,
    pub relevance: String,
    pub relevance_class: &'static str,
    pub accuracy: String,
    pub accuracy_class: &'static str,
    pub latency: String,
    pub ground_truth: String,
    pub explanation: String,
    pub has_details: bool,
    pub evaluation_failed: bool,
}

impl<'a> From<Row<'a>> for RowView {
    fn from(row: Row<'a>) -> Self {
        let record = row.record;
        let ground_truth = record.ground_truth.clone().unwrap_or_default();
        let explanation = record.explanation.clone().unwrap_or_default();

        Self {
            model: record.model.clone(),
            question: record.question.clone(),
            prediction: record.prediction.clone(),
            relevance: row.relevance_display(),
            relevance_class: row.relevance_badge.css_class(),
            accuracy: row.accuracy_display(),
            accuracy_class: row.accuracy_badge.css_class(),
            latency: row.latency_display(),
            has_details: !ground_truth.is_empty() || !explanation.is_empty(),
            evaluation_failed: record.evaluation_failed(),
            ground_truth,
            explanation,
        }
    }
}

#[derive(Serialize)]
struct ChartBundle<'a> {
    latency: &'a crate::chart::ChartSpec,
    quality: &'a crate::chart::ChartSpec,
}

/// Immutable view state for one rendered page
#[derive(Debug, Clone, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardView {
    pub title: String,
    pub theme_class: &'static str,
    pub generated_at: String,
    /// Empty once the dashboard is ready
    pub status_message: String,
    pub status_class: &'static str,
    pub show_dashboard: bool,
    pub summary: SummaryStrip,
    pub kpis: Vec<KpiCard>,
    pub filter_options: Vec<FilterOption>,
    pub rows: Vec<RowView>,
    /// Chart.js configurations keyed `latency` and `quality`, safe to inline in a script
    pub charts_json: String,
}

impl DashboardView {
    pub fn from_state(
        state: &DashboardState,
        config: &DashboardConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let mut view = Self {
            title: config.title.clone(),
            theme_class: config.theme.css_class(),
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            status_message: String::new(),
            status_class: "",
            show_dashboard: false,
            summary: SummaryStrip::default(),
            kpis: Vec::new(),
            filter_options: Vec::new(),
            rows: Vec::new(),
            charts_json: String::new(),
        };

        match state {
            DashboardState::Loading => {
                view.status_message = LOADING_MESSAGE.to_string();
                view.status_class = "status-loading";
            }
            DashboardState::Error(message) => {
                view.status_message = message.clone();
                view.status_class = "status-error";
            }
            DashboardState::Ready(dashboard) => view.fill(dashboard)?,
        }

        Ok(view)
    }

    fn fill(&mut self, dashboard: &Dashboard) -> Result<()> {
        let summary = dashboard.summary();
        self.summary = SummaryStrip {
            total_records: summary.total_records,
            model_count: summary.model_count,
            total_latency: format_seconds(summary.total_latency),
            failed_evaluations: summary.failed_evaluations,
        };

        let kpis = dashboard.kpis();
        self.kpis = vec![
            KpiCard {
                label: "Fastest Model",
                value_id: "fastest-model-val",
                name_id: "fastest-model-name",
                value: kpis.fastest_display(),
                name: kpis.fastest.name.clone(),
            },
            KpiCard {
                label: "Best Relevance",
                value_id: "best-relevance-val",
                name_id: "best-relevance-name",
                value: kpis.relevance_display(),
                name: kpis.best_relevance.name.clone(),
            },
            KpiCard {
                label: "Best Accuracy",
                value_id: "best-accuracy-val",
                name_id: "best-accuracy-name",
                value: kpis.accuracy_display(),
                name: kpis.best_accuracy.name.clone(),
            },
        ];

        let table = dashboard.table();
        self.filter_options = table.filter_options();
        self.rows = table.visible_rows().into_iter().map(RowView::from).collect();

        let latency = dashboard.latency_chart();
        let quality = dashboard.quality_chart();
        let bundle = ChartBundle {
            latency: &latency,
            quality: &quality,
        };
        self.charts_json = json_for_script(&serde_json::to_string(&bundle)?);
        self.show_dashboard = true;

        Ok(())
    }
}

/// Render a view into a complete HTML document.
pub fn render(view: &DashboardView) -> Result<String> {
    Ok(view.render()?)
}

/// Writes the static dashboard site
pub struct HtmlReportGenerator {
    config: DashboardConfig,
}

impl HtmlReportGenerator {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Render `state` and write `index.html` plus assets. Returns the path of `index.html`.
    pub fn generate(&self, state: &DashboardState) -> Result<PathBuf> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)?;

        let view = DashboardView::from_state(state, &self.config, Utc::now())?;
        let index_path = output_dir.join("index.html");
        fs::write(&index_path, render(&view)?)?;

        self.copy_static_assets(output_dir)?;

        info!(path = %index_path.display(), "Dashboard written");
        Ok(index_path)
    }

    fn copy_static_assets(&self, output_dir: &Path) -> Result<()> {
        let css_dir = output_dir.join("assets").join("css");
        let js_dir = output_dir.join("assets").join("js");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;

        fs::write(css_dir.join("style.css"), STYLE_CSS)?;
        fs::write(js_dir.join("dashboard.js"), DASHBOARD_JS)?;

        Ok(())
    }
}
