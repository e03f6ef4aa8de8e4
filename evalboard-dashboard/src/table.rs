//! Results table: row derivation, score badges and model filtering

use crate::aggregate::model_names;
use crate::utils::format_seconds;
use crate::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter value selecting every row
pub const ALL_MODELS: &str = "all";

/// Scores at or above this are `High`
pub const HIGH_SCORE_THRESHOLD: f64 = 8.0;
/// Scores at or above this (and below `HIGH_SCORE_THRESHOLD`) are `Medium`
pub const MEDIUM_SCORE_THRESHOLD: f64 = 5.0;

/// Discrete quality label for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    High,
    Medium,
    Low,
}

impl Badge {
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_SCORE_THRESHOLD {
            Badge::High
        } else if score >= MEDIUM_SCORE_THRESHOLD {
            Badge::Medium
        } else {
            Badge::Low
        }
    }

    /// Stylesheet class for the badge element
    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::High => "score-high",
            Badge::Medium => "score-med",
            Badge::Low => "score-low",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::High => write!(f, "high"),
            Badge::Medium => write!(f, "medium"),
            Badge::Low => write!(f, "low"),
        }
    }
}

/// Which records the table shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableFilter {
    #[default]
    All,
    Model(String),
    /// Union of several models
    Models(Vec<String>),
}

impl TableFilter {
    /// Build a filter from a list of selected values; no selection or any `all` means `All`.
    pub fn from_models(values: Vec<String>) -> Self {
        let mut models = Vec::with_capacity(values.len());
        for value in values {
            match FilterChange::from_value(&value).filter {
                TableFilter::Model(model) => models.push(model),
                _ => return TableFilter::All,
            }
        }

        match models.len() {
            0 => TableFilter::All,
            1 => TableFilter::Model(models.remove(0)),
            _ => TableFilter::Models(models),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Model(model) => record.model == *model,
            TableFilter::Models(models) => models.iter().any(|m| *m == record.model),
        }
    }
}

impl FromStr for TableFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_MODELS {
            Ok(TableFilter::All)
        } else {
            Ok(TableFilter::Model(s.to_string()))
        }
    }
}

impl fmt::Display for TableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFilter::All => write!(f, "{}", ALL_MODELS),
            TableFilter::Model(model) => write!(f, "{}", model),
            TableFilter::Models(models) => write!(f, "{}", models.join(", ")),
        }
    }
}

/// Typed filter-change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub filter: TableFilter,
}

impl FilterChange {
    pub fn new(filter: TableFilter) -> Self {
        Self { filter }
    }

    /// Event for a raw selection value as the filter control reports it.
    pub fn from_value(value: &str) -> Self {
        let filter = match value.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        };
        Self { filter }
    }
}

/// One entry of the filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// One visible table row
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub record: &'a Record,
    pub relevance_badge: Badge,
    pub accuracy_badge: Badge,
}

impl<'a> Row<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            relevance_badge: Badge::classify(record.relevance_score),
            accuracy_badge: Badge::classify(record.accuracy_score),
        }
    }

    pub fn latency_display(&self) -> String {
        format_seconds(self.record.latency)
    }

    /// Relevance as written in the input (`9`, `7.5`)
    pub fn relevance_display(&self) -> String {
        self.record.relevance_score.to_string()
    }

    pub fn accuracy_display(&self) -> String {
        self.record.accuracy_score.to_string()
    }
}

/// Filterable view over the loaded records
#[derive(Debug, Clone)]
pub struct Table<'a> {
    records: &'a [Record],
    models: Vec<String>,
    filter: TableFilter,
}

impl<'a> Table<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            models: model_names(records),
            filter: TableFilter::All,
        }
    }

    pub fn filter(&self) -> &TableFilter {
        &self.filter
    }

    /// `all` followed by every distinct model in first-appearance order
    pub fn filter_options(&self) -> Vec<FilterOption> {
        let mut options = Vec::with_capacity(self.models.len() + 1);
        options.push(FilterOption {
            value: ALL_MODELS.to_string(),
            label: "All Models".to_string(),
        });
        options.extend(self.models.iter().map(|model| FilterOption {
            value: model.clone(),
            label: model.clone(),
        }));
        options
    }

    /// Rows matching the current filter, in input order
    pub fn visible_rows(&self) -> Vec<Row<'a>> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .map(Row::new)
            .collect()
    }

    /// Apply a filter change and return the complete replacement row set.
    pub fn on_filter_change(&mut self, change: FilterChange) -> Vec<Row<'a>> {
        self.filter = change.filter;
        self.visible_rows()
    }
}
