//! Winner selection for the three headline metrics

use crate::aggregate::StatsByModel;
use crate::utils::{format_score, format_seconds};
use serde::{Deserialize, Serialize};

/// Name shown when no model has won a metric
pub const NO_WINNER: &str = "-";

/// Starting value for the fastest-model scan
pub const LATENCY_SENTINEL: f64 = f64::INFINITY;
/// Starting value for the best-score scans
pub const SCORE_SENTINEL: f64 = -1.0;

/// The winning model for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub value: f64,
}

impl Kpi {
    fn vacant(value: f64) -> Self {
        Self {
            name: NO_WINNER.to_string(),
            value,
        }
    }

    /// Whether any model claimed this metric.
    pub fn has_winner(&self) -> bool {
        self.name != NO_WINNER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub fastest: Kpi,
    pub best_relevance: Kpi,
    pub best_accuracy: Kpi,
}

impl KpiSet {
    pub fn fastest_display(&self) -> String {
        format_seconds(self.fastest.value)
    }

    pub fn relevance_display(&self) -> String {
        format_score(self.best_relevance.value)
    }

    pub fn accuracy_display(&self) -> String {
        format_score(self.best_accuracy.value)
    }
}

/// Scan the stats once, in model-list order, tracking min latency and max scores.
///
/// Comparisons are strict, so when two models tie the one seen first keeps the title.
/// An empty map leaves every KPI at its sentinel.
pub fn select_kpis(stats: &StatsByModel) -> KpiSet {
    let mut fastest = Kpi::vacant(LATENCY_SENTINEL);
    let mut best_relevance = Kpi::vacant(SCORE_SENTINEL);
    let mut best_accuracy = Kpi::vacant(SCORE_SENTINEL);

    for (name, entry) in stats {
        if entry.latency < fastest.value {
            fastest = Kpi {
                name: name.clone(),
                value: entry.latency,
            };
        }
        if entry.relevance > best_relevance.value {
            best_relevance = Kpi {
                name: name.clone(),
                value: entry.relevance,
            };
        }
        if entry.accuracy > best_accuracy.value {
            best_accuracy = Kpi {
                name: name.clone(),
                value: entry.accuracy,
            };
        }
    }

    KpiSet {
        fastest,
        best_relevance,
        best_accuracy,
    }
}
