//! Chart.js bar chart configurations
//!
//! The browser draws the charts; this module only prepares the configuration object Chart.js
//! expects (`{type, data: {labels, datasets}, options}`) so it can be embedded in the page as
//! JSON.

use crate::aggregate::StatsByModel;
use serde::Serialize;

/// Grid line colour shared by both charts
pub const GRID_COLOR: &str = "#30363d";
/// Upper bound of the score axis
pub const SCORE_AXIS_MAX: f64 = 10.0;

/// Fill and border colour pair for one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStyle {
    pub fill: &'static str,
    pub border: &'static str,
}

pub const LATENCY_STYLE: DatasetStyle = DatasetStyle {
    fill: "rgba(56, 139, 253, 0.7)",
    border: "#58a6ff",
};

pub const RELEVANCE_STYLE: DatasetStyle = DatasetStyle {
    fill: "rgba(35, 134, 54, 0.7)",
    border: "#238636",
};

pub const ACCURACY_STYLE: DatasetStyle = DatasetStyle {
    fill: "rgba(210, 153, 34, 0.7)",
    border: "#d29922",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

impl Dataset {
    fn new(label: &str, data: Vec<f64>, style: DatasetStyle) -> Self {
        Self {
            label: label.to_string(),
            data,
            background_color: style.fill.to_string(),
            border_color: style.border.to_string(),
            border_width: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl Scales {
    fn value_axis(max: Option<f64>) -> Self {
        Self {
            x: Axis {
                grid: Grid {
                    color: None,
                    display: Some(false),
                },
                ..Axis::default()
            },
            y: Axis {
                begin_at_zero: Some(true),
                max,
                grid: Grid {
                    color: Some(GRID_COLOR.to_string()),
                    display: None,
                },
                ..Axis::default()
            },
        }
    }
}

/// Average latency per model, legend hidden.
pub fn latency_chart(stats: &StatsByModel) -> ChartSpec {
    let latencies = stats.values().map(|s| s.latency).collect();

    ChartSpec {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: stats.keys().cloned().collect(),
            datasets: vec![Dataset::new(
                "Average Latency (seconds)",
                latencies,
                LATENCY_STYLE,
            )],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Some(Plugins {
                legend: Legend { display: false },
            }),
            scales: Scales::value_axis(None),
        },
    }
}

/// Average relevance and accuracy per model on a 0-10 axis.
pub fn quality_chart(stats: &StatsByModel) -> ChartSpec {
    let relevance = stats.values().map(|s| s.relevance).collect();
    let accuracy = stats.values().map(|s| s.accuracy).collect();

    ChartSpec {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: stats.keys().cloned().collect(),
            datasets: vec![
                Dataset::new("Relevance Score", relevance, RELEVANCE_STYLE),
                Dataset::new("Accuracy Score", accuracy, ACCURACY_STYLE),
            ],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: None,
            scales: Scales::value_axis(Some(SCORE_AXIS_MAX)),
        },
    }
}
