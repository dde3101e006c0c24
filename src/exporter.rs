use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;

pub const SHEET_NAME: &str = "Venues";
pub const MAX_COLUMN_WIDTH: usize = 50;
const COLUMN_PADDING: usize = 2;

/// Writes a table of venue rows somewhere persistent.
pub trait SpreadsheetExporter {
    fn export(&self, columns: &[String], rows: &[Vec<String>], path: &Path) -> Result<()>;
}

/// Single-sheet `.xlsx` writer.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
        }
    }
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl SpreadsheetExporter for XlsxExporter {
    fn export(&self, columns: &[String], rows: &[Vec<String>], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, title) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &header)?;
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                worksheet.write_string(row_idx as u32 + 1, col as u16, cell)?;
            }
        }
        for (col, width) in column_widths(columns, rows).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }

        workbook.save(path)?;
        info!("Data saved to: {}", path.display());
        Ok(())
    }
}

/// Width per column: longest of the header and its cells, plus padding,
/// capped at [`MAX_COLUMN_WIDTH`]. Lengths are in characters.
pub fn column_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(col, title)| {
            let longest = rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Where a run writes its spreadsheet: `fixed` when given, otherwise a
/// timestamped file in `output_dir`.
pub fn output_path(output_dir: &Path, fixed: Option<&Path>, now: DateTime<Local>) -> PathBuf {
    match fixed {
        Some(path) => path.to_path_buf(),
        None => output_dir.join(format!("fresha_venues_{}.xlsx", now.format("%Y%m%d_%H%M%S"))),
    }
}
