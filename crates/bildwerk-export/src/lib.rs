// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-export — spreadsheet serialization of gray matrices.

pub mod workbook;

pub use workbook::{XLSX_MIME, export_filename, write_workbook};
