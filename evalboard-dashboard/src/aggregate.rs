//! Per-model aggregation of evaluation records
//!
//! Records are grouped by their `model` identifier. Groups keep the order in which each
//! model first appears in the input so that charts, filters and KPI tie-breaking all see
//! the same model list.

use crate::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregated averages for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    /// Mean latency in seconds
    pub latency: f64,
    /// Mean relevance score
    pub relevance: f64,
    /// Mean accuracy score
    pub accuracy: f64,
    /// Number of records for the model
    pub count: usize,
}

/// Model identifier to stats, in first-appearance order
pub type StatsByModel = IndexMap<String, ModelStats>;

/// Dataset-wide counters shown above the charts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub model_count: usize,
    /// Sum of all latencies in seconds
    pub total_latency: f64,
    /// Records whose judge explanation reports a failed evaluation
    pub failed_evaluations: usize,
}

#[derive(Default)]
struct Totals {
    latency: f64,
    relevance: f64,
    accuracy: f64,
    count: usize,
}

/// Distinct model identifiers in order of first appearance.
pub fn model_names(records: &[Record]) -> Vec<String> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for record in records {
        seen.entry(record.model.as_str()).or_insert(());
    }
    seen.into_keys().map(str::to_string).collect()
}

/// Group records by model and average latency, relevance and accuracy per group.
pub fn aggregate(records: &[Record]) -> StatsByModel {
    let mut totals: IndexMap<&str, Totals> = IndexMap::new();

    for record in records {
        let entry = totals.entry(record.model.as_str()).or_default();
        entry.latency += record.latency;
        entry.relevance += record.relevance_score;
        entry.accuracy += record.accuracy_score;
        entry.count += 1;
    }

    totals
        .into_iter()
        .map(|(model, totals)| {
            let count = totals.count as f64;
            let stats = ModelStats {
                latency: totals.latency / count,
                relevance: totals.relevance / count,
                accuracy: totals.accuracy / count,
                count: totals.count,
            };
            debug!(
                model,
                latency = stats.latency,
                relevance = stats.relevance,
                accuracy = stats.accuracy,
                count = stats.count,
                "aggregated model stats"
            );
            (model.to_string(), stats)
        })
        .collect()
}

pub fn summarize(records: &[Record]) -> DatasetSummary {
    DatasetSummary {
        total_records: records.len(),
        model_count: model_names(records).len(),
        total_latency: records.iter().map(|r| r.latency).sum(),
        failed_evaluations: records.iter().filter(|r| r.evaluation_failed()).count(),
    }
}
