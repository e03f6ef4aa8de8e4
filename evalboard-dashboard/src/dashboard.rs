//! Dashboard pipeline and load state
//!
//! `Loading → Ready` once the records are loaded and parsed, `Loading → Error` otherwise.
//! The error state is terminal; nothing retries. All computation happens synchronously in
//! [`Dashboard::build`] once the records are available.

use crate::aggregate::{aggregate, model_names, summarize, DatasetSummary, StatsByModel};
use crate::chart::{latency_chart, quality_chart, ChartSpec};
use crate::error::LoadFailure;
use crate::kpi::{select_kpis, KpiSet};
use crate::loader::{load_records, DataSource};
use crate::table::Table;
use crate::Record;
use tracing::{error, info};

/// Message shown in place of the dashboard when loading fails
pub const LOAD_ERROR_MESSAGE: &str =
    "Error loading benchmark data. Please ensure results.json exists.";

/// Everything derived from one set of loaded records
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<Record>,
    models: Vec<String>,
    stats: StatsByModel,
    kpis: KpiSet,
    summary: DatasetSummary,
}

impl Dashboard {
    pub fn build(records: Vec<Record>) -> Self {
        let models = model_names(&records);
        let stats = aggregate(&records);
        let kpis = select_kpis(&stats);
        let summary = summarize(&records);

        info!(
            records = summary.total_records,
            models = summary.model_count,
            fastest = %kpis.fastest.name,
            best_relevance = %kpis.best_relevance.name,
            best_accuracy = %kpis.best_accuracy.name,
            "Dashboard computed"
        );

        Self {
            records,
            models,
            stats,
            kpis,
            summary,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct models in first-appearance order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn stats(&self) -> &StatsByModel {
        &self.stats
    }

    pub fn kpis(&self) -> &KpiSet {
        &self.kpis
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A fresh table over the records with the `all` filter selected
    pub fn table(&self) -> Table<'_> {
        Table::new(&self.records)
    }

    pub fn latency_chart(&self) -> ChartSpec {
        latency_chart(&self.stats)
    }

    pub fn quality_chart(&self) -> ChartSpec {
        quality_chart(&self.stats)
    }
}

#[derive(Debug, Clone)]
pub enum DashboardState {
    Loading,
    Ready(Dashboard),
    /// Terminal; holds the user-visible message
    Error(String),
}

impl DashboardState {
    /// Settle the load outcome into `Ready` or `Error`.
    pub fn resolve(outcome: Result<Vec<Record>, LoadFailure>) -> Self {
        match outcome {
            Ok(records) => DashboardState::Ready(Dashboard::build(records)),
            Err(failure) => {
                error!(error = %failure, "Failed to load benchmark data");
                DashboardState::Error(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Load from `source` and resolve.
    pub async fn load(source: &DataSource) -> Self {
        Self::resolve(load_records(source).await)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            DashboardState::Ready(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardState::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DashboardState::Error(_))
    }
}
