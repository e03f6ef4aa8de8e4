//! evalboard dashboard library
//!
//! This crate turns a list of model evaluation records into a static benchmark dashboard.
//! It includes:
//! - Loading records from a local file or an HTTP(S) location
//! - Per-model aggregation and KPI selection
//! - Chart.js chart configurations for latency and quality
//! - A filterable results table with score badges
//! - Static HTML site generation

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod html_report;
pub mod kpi;
pub mod loader;
pub mod table;
pub mod utils;

use serde::{Deserialize, Serialize};

pub use aggregate::{aggregate, model_names, summarize, DatasetSummary, ModelStats, StatsByModel};
pub use config::{DashboardConfig, DashboardConfigBuilder, Theme};
pub use dashboard::{Dashboard, DashboardState};
pub use html_report::{DashboardView, HtmlReportGenerator};
pub use error::{DashboardError, LoadFailure, Result};
pub use kpi::{select_kpis, Kpi, KpiSet};
pub use loader::{load_records, parse_records, DataSource};
pub use table::{Badge, FilterChange, Row, Table, TableFilter};

/// Lowest score the judge hands out.
pub const SCORE_MIN: f64 = 0.0;
/// Highest score the judge hands out.
pub const SCORE_MAX: f64 = 10.0;

/// Judge explanations containing this marker belong to a failed evaluation.
const EVALUATION_FAILED_MARKER: &str = "Evaluation failed";

/// One evaluation result for a single (model, question) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub model: String,
    pub question: String,
    pub prediction: String,
    pub relevance_score: f64,
    pub accuracy_score: f64,
    /// Answer latency in seconds
    pub latency: f64,
    /// Reference answer the judge compared against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<String>,
    /// Free-form judge explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Record {
    /// Whether both scores are within 0..=10 and the latency is not negative.
    pub fn is_within_expected_range(&self) -> bool {
        let score_range = SCORE_MIN..=SCORE_MAX;
        score_range.contains(&self.relevance_score)
            && score_range.contains(&self.accuracy_score)
            && self.latency >= 0.0
    }

    /// Whether the judge reported that it could not evaluate this answer.
    pub fn evaluation_failed(&self) -> bool {
        self.explanation
            .as_deref()
            .is_some_and(|explanation| explanation.contains(EVALUATION_FAILED_MARKER))
    }
}
