use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::coerce;
use crate::normalize::{MetricCalibration, normalize};
use crate::panels::panels;
use crate::presentation::comparison_table;
use crate::record::MergedRecord;
use crate::schema::Position;

pub struct ExportReport {
    pub players: usize,
    pub columns: usize,
    pub normalized_columns: usize,
}

/// Write the comparison to an .xlsx: raw values plus every panel metric scaled to 0-100.
pub fn export_comparison(
    path: &Path,
    position: Position,
    records: &[&MergedRecord],
) -> Result<ExportReport> {
    let schema = position.schema();
    let columns = schema.declared_numeric_fields();
    let raw_rows = comparison_table(records, &columns);

    let mut scaled_header = vec!["Player".to_string(), "Team".to_string()];
    let mut calibs: Vec<MetricCalibration> = Vec::new();
    for panel in panels(position) {
        for calib in panel.calibrations {
            if !calibs.iter().any(|c| c.field == calib.field) {
                scaled_header.push(format!("{} ({})", calib.field, panel.title));
                calibs.push(*calib);
            }
        }
    }
    let mut scaled_rows = vec![scaled_header];
    for r in records {
        let mut row = vec![r.display_name(), r.team_name()];
        for calib in &calibs {
            row.push(coerce::fixed(normalize(r.number(calib.field), calib), 0));
        }
        scaled_rows.push(row);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Comparison")
            .context("name comparison sheet")?;
        write_rows(sheet, &raw_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Normalized")
            .context("name normalized sheet")?;
        write_rows(sheet, &scaled_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    tracing::info!(path = %path.display(), players = records.len(), "comparison exported");
    Ok(ExportReport {
        players: records.len(),
        columns: columns.len(),
        normalized_columns: calibs.len(),
    })
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
