//! Spreadsheet row extraction: header-row discovery, column mapping, and
//! raw-field capture for every data row of every sheet in a manifest
//! workbook.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use lotdb_core::{ManifestRecord, OrderAggregate};

use crate::error::ManifestError;
use crate::fields::{is_header_cell, match_header, ManifestField};
use crate::normalize::normalize_row;

/// Raw cell text for one retained spreadsheet row, keyed by canonical field.
///
/// `None` means the column is absent from the sheet or the cell is empty;
/// the normalizer supplies the per-field default.
#[derive(Debug, Default, Clone)]
pub struct RawFields {
    cells: [Option<String>; ManifestField::COUNT],
}

impl RawFields {
    #[must_use]
    pub fn get(&self, field: ManifestField) -> Option<&str> {
        self.cells[field.index()].as_deref()
    }

    pub fn set(&mut self, field: ManifestField, value: String) {
        self.cells[field.index()] = Some(value);
    }
}

/// Parse one manifest workbook into normalized records for its order.
///
/// # Errors
///
/// Returns [`ManifestError::Workbook`] if the file cannot be opened or a
/// sheet cannot be read. Structural oddities inside a readable workbook
/// (no header row, blank sheets, junk rows) yield zero rows, not errors.
pub fn parse_manifest_file(
    path: &Path,
    order_id: &str,
    aggregate: &OrderAggregate,
) -> Result<Vec<ManifestRecord>, ManifestError> {
    let rows = extract_rows(path)?;
    Ok(rows
        .iter()
        .map(|raw| normalize_row(raw, order_id, aggregate))
        .collect())
}

/// Extract the raw field rows from every sheet of a workbook.
///
/// Per sheet: scan top-to-bottom for the first row where any cell's trimmed,
/// lowercased text is an exact member of the header vocabulary; rows above
/// it are ignored, and a sheet with no such row contributes nothing. Header
/// cells are classified through the synonym table (last duplicate wins);
/// unmapped columns are dropped.
///
/// A data row is skipped when every cell is empty or blank after trimming,
/// and when its product-name cell is blank or reads `product name` — a
/// header row re-encountered mid-sheet.
///
/// # Errors
///
/// Returns [`ManifestError::Workbook`] if the file or a sheet is unreadable.
pub fn extract_rows(path: &Path) -> Result<Vec<RawFields>, ManifestError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| ManifestError::Workbook {
        path: path.display().to_string(),
        source,
    })?;

    let mut rows = Vec::new();
    let sheet_names = workbook.sheet_names().to_owned();

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|source| ManifestError::Workbook {
                path: path.display().to_string(),
                source,
            })?;

        let Some((header_idx, columns)) = locate_header(&range) else {
            tracing::debug!(sheet = %sheet_name, "no header row found; skipping sheet");
            continue;
        };

        for row in range.rows().skip(header_idx + 1) {
            if is_blank_row(row) {
                continue;
            }
            let Some(raw) = capture_row(row, &columns) else {
                continue;
            };
            rows.push(raw);
        }
    }

    Ok(rows)
}

/// Column index for each canonical field, or `None` when the sheet lacks it.
type ColumnMap = [Option<usize>; ManifestField::COUNT];

/// Find the header row and build the column map for one sheet.
fn locate_header(range: &calamine::Range<Data>) -> Option<(usize, ColumnMap)> {
    for (idx, row) in range.rows().enumerate() {
        let is_header = row
            .iter()
            .any(|cell| !matches!(cell, Data::Empty) && is_header_cell(&cell.to_string()));
        if !is_header {
            continue;
        }

        let mut columns: ColumnMap = [None; ManifestField::COUNT];
        for (col, cell) in row.iter().enumerate() {
            if let Some(field) = match_header(&cell.to_string()) {
                // Duplicate headers: last occurrence wins.
                columns[field.index()] = Some(col);
            }
        }
        return Some((idx, columns));
    }
    None
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter()
        .all(|cell| cell_text(cell).is_none_or(|t| t.trim().is_empty()))
}

/// Capture one data row into raw fields, or `None` for rows that must never
/// be emitted (blank product name, or a header-like row repeating the
/// literal `product name` text).
fn capture_row(row: &[Data], columns: &ColumnMap) -> Option<RawFields> {
    let mut raw = RawFields::default();

    for field in [
        ManifestField::ListingId,
        ManifestField::ListingTitle,
        ManifestField::Category,
        ManifestField::ProductName,
        ManifestField::Upc,
        ManifestField::Asin,
        ManifestField::Quantity,
        ManifestField::UnitRetail,
        ManifestField::TotalRetail,
    ] {
        if let Some(col) = columns[field.index()] {
            if let Some(text) = row.get(col).and_then(cell_text) {
                raw.set(field, text);
            }
        }
    }

    let product_name = raw.get(ManifestField::ProductName).unwrap_or("").trim().to_string();
    if product_name.is_empty() || product_name.eq_ignore_ascii_case("product name") {
        return None;
    }

    Some(raw)
}

/// Text content of one cell; `None` for empty cells so the normalizer can
/// distinguish absent from present-but-blank.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        // `Display` for floats renders whole numbers without a trailing
        // fraction, so numeric UPC and quantity cells arrive as plain digits.
        other => Some(other.to_string()),
    }
}
