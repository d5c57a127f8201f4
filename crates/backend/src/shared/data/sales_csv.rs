use contracts::projections::p910_sales_transactions::SalesTransaction;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::dataset::Dataset;

/// Columns every sales file must carry
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Date",
    "Product_Name",
    "Category",
    "Region",
    "Units_Sold",
    "Revenue",
    "Cost",
    "Profit",
    "Customer_Segment",
    "Discount",
];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("sales data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },
}

/// Read the complete sales table from a CSV file.
///
/// Any unreadable file, missing column or malformed row fails the whole load.
pub fn load(path: &Path) -> Result<Dataset, DataError> {
    let unavailable = |reason: String| DataError::DataUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let rows = read_transactions(file).map_err(unavailable)?;

    tracing::debug!("Loaded {} sales rows from {}", rows.len(), path.display());
    Ok(Dataset::from_rows(rows))
}

/// Parse sales rows from any CSV source (header row required).
pub fn read_transactions<R: Read>(source: R) -> Result<Vec<SalesTransaction>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read CSV headers: {e}"))?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h.trim_start_matches('\u{FEFF}') == *column))
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing columns: {}", missing.join(", ")));
    }

    reader
        .deserialize::<SalesTransaction>()
        .map(|result| result.map_err(|e| format!("malformed row: {e}")))
        .collect()
}
