//! CSV export of the forecast table

use shared::ForecastTable;

use crate::error::{AppError, AppResult};

/// Export the table rows as CSV with a header line
pub fn export_to_csv(table: &ForecastTable) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in &table.rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}
