use serde::Serialize;

use crate::coerce;
use crate::normalize::{MetricCalibration, normalize};
use crate::record::MergedRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub label: String,
    pub raw: f64,
    pub scaled: f64,
}

/// One metric across the selected players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub field: &'static str,
    pub points: Vec<BarPoint>,
}

/// One player's polygon over several metrics; `axes` and `values` line up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub label: String,
    pub axes: Vec<&'static str>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

pub fn bar_series(records: &[&MergedRecord], calib: &MetricCalibration) -> BarSeries {
    BarSeries {
        field: calib.field,
        points: records
            .iter()
            .map(|r| {
                let raw = r.number(calib.field);
                BarPoint {
                    label: r.display_name(),
                    raw,
                    scaled: normalize(raw, calib),
                }
            })
            .collect(),
    }
}

pub fn radar_series(records: &[&MergedRecord], calibs: &[MetricCalibration]) -> Vec<RadarSeries> {
    let axes: Vec<&'static str> = calibs.iter().map(|c| c.field).collect();
    records
        .iter()
        .map(|r| RadarSeries {
            label: r.display_name(),
            axes: axes.clone(),
            values: calibs
                .iter()
                .map(|c| normalize(r.number(c.field), c))
                .collect(),
        })
        .collect()
}

pub fn scatter_points(
    records: &[&MergedRecord],
    x: &MetricCalibration,
    y: &MetricCalibration,
) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            label: r.display_name(),
            x: normalize(r.number(x.field), x),
            y: normalize(r.number(y.field), y),
        })
        .collect()
}

/// Header row plus one display row per record: name, team, then each column.
/// Integer-looking rank/count columns are rounded; everything else gets one decimal.
pub fn comparison_table(records: &[&MergedRecord], columns: &[&str]) -> Vec<Vec<String>> {
    let mut header = vec!["Player".to_string(), "Team".to_string()];
    header.extend(columns.iter().map(|c| c.to_string()));
    let mut rows = vec![header];
    for r in records {
        let mut row = vec![r.display_name(), r.team_name()];
        for column in columns {
            let cell = if is_integer_column(column) {
                coerce::to_display_int(r.value(column))
            } else {
                coerce::to_display_fixed(r.value(column), 1)
            };
            row.push(cell);
        }
        rows.push(row);
    }
    rows
}

fn is_integer_column(column: &str) -> bool {
    matches!(
        column,
        "player_id" | "yas" | "mac_sayisi" | "dakika" | "gol" | "asist" | "genel_sira" | "pozisyon_sira"
    )
}
