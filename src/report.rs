use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;
use tracing::{error, info};

use crate::record::ResultSet;
use crate::settings::OutputSettings;

pub const HEADERS: [&str; 4] = ["URL", "Product Name", "Price", "Barcode"];

const SHEET_NAME: &str = "Barcodes";
const COLUMN_WIDTHS: [f64; 4] = [80.0, 50.0, 14.0, 18.0];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write spreadsheet {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

/// Result of attempting both report formats.
pub struct ReportOutcome {
    pub text: Result<PathBuf, ReportError>,
    pub xlsx: Result<PathBuf, ReportError>,
}

impl ReportOutcome {
    pub fn all_ok(&self) -> bool {
        self.text.is_ok() && self.xlsx.is_ok()
    }
}

/// Header line followed by one `", "`-joined line per record.
pub fn render_text(results: &ResultSet) -> String {
    let mut out = HEADERS.join(", ");
    out.push('\n');
    for record in results {
        out.push_str(&record.columns().join(", "));
        out.push('\n');
    }
    out
}

pub fn write_text(path: &Path, results: &ResultSet) -> Result<(), ReportError> {
    fs::write(path, render_text(results)).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_xlsx(path: &Path, results: &ResultSet) -> Result<(), ReportError> {
    build_workbook(path, results).map_err(|source| ReportError::Xlsx {
        path: path.to_path_buf(),
        source,
    })
}

fn build_workbook(path: &Path, results: &ResultSet) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, record) in results.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in record.columns().iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save(path)
}

/// Writes both reports. A failure in one never prevents the other.
pub fn write_all(results: &ResultSet, output: &OutputSettings) -> ReportOutcome {
    let text = attempt("text", &output.text_path, write_text(&output.text_path, results));
    let xlsx = attempt("xlsx", &output.xlsx_path, write_xlsx(&output.xlsx_path, results));
    ReportOutcome { text, xlsx }
}

fn attempt(
    kind: &str,
    path: &Path,
    result: Result<(), ReportError>,
) -> Result<PathBuf, ReportError> {
    match result {
        Ok(()) => {
            info!(kind, path = %path.display(), "report written");
            Ok(path.to_path_buf())
        }
        Err(e) => {
            error!(kind, "{}", e);
            Err(e)
        }
    }
}
