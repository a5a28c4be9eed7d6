// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gray matrix → .xlsx workbook.
//
// One worksheet, height rows by width columns of integer cells, no header
// row or column. The caller decides where the bytes go (save dialog).

use rust_xlsxwriter::Workbook;
use tracing::{info, instrument};

use bildwerk_core::GrayMatrix;
use bildwerk_core::error::{BildwerkError, Result};

/// MIME type of an Office Open XML workbook.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Worksheet name carrying the pixel data.
const SHEET_NAME: &str = "Gray_Data";

/// Serialize the matrix as an in-memory `.xlsx` workbook.
#[instrument(skip(matrix), fields(width = matrix.width(), height = matrix.height()))]
pub fn write_workbook(matrix: &GrayMatrix) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|err| BildwerkError::Export(err.to_string()))?;

    for (row, cells) in matrix.rows().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            worksheet
                .write_number(row as u32, col as u16, f64::from(value))
                .map_err(|err| BildwerkError::Export(err.to_string()))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|err| BildwerkError::Export(err.to_string()))?;

    info!(
        rows = matrix.height(),
        cols = matrix.width(),
        bytes = buffer.len(),
        "workbook serialized"
    );
    Ok(buffer)
}

/// Download filename encoding the chosen resolution.
pub fn export_filename(matrix: &GrayMatrix) -> String {
    format!("gray_data_{}x{}.xlsx", matrix.width(), matrix.height())
}
