//! Report chart palette and dataset shaping.
//!
//! The browser bundle hands these structures to the chart library as plain
//! objects; field names follow the chart library's camelCase.

use serde::{Deserialize, Serialize};

pub const BASE_PALETTE: [&str; 6] = [
    "#0d6efd", "#198754", "#ffc107", "#dc3545", "#0dcaf0", "#6c757d",
];

/// `count` colours: the base palette first, then evenly spread HSL hues.
/// Palette size for a count coming from page scripts; negatives mean none.
pub fn palette_len(requested: i32) -> usize {
    usize::try_from(requested).unwrap_or(0)
}

pub fn chart_colors(count: usize) -> Vec<String> {
    if count <= BASE_PALETTE.len() {
        return BASE_PALETTE[..count].iter().map(|c| (*c).to_owned()).collect();
    }
    let step = 360.0 / count.max(1) as f64;
    BASE_PALETTE
        .iter()
        .map(|c| (*c).to_owned())
        .chain((0..count - BASE_PALETTE.len()).map(|i| {
            let hue = (step * i as f64).floor() as u32;
            format!("hsl({hue}, 65%, 55%)")
        }))
        .collect()
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SeriesInput {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Single-series chart data. Missing input yields an empty chart.
pub fn format_chart_data(input: Option<SeriesInput>, series_label: Option<&str>) -> ChartData {
    let Some(input) = input else {
        return ChartData::default();
    };
    let color = chart_colors(1).remove(0);
    ChartData {
        labels: input.labels,
        datasets: vec![Dataset {
            label: series_label
                .filter(|l| !l.is_empty())
                .unwrap_or("Series")
                .to_owned(),
            data: input.values,
            border_color: color.clone(),
            background_color: color,
        }],
    }
}
