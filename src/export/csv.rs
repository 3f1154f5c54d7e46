//! CSV transaction export

use super::ExportResult;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

pub(crate) const CSV_HEADER: [&str; 9] = [
    "id",
    "date",
    "type",
    "amount",
    "currency",
    "description",
    "categoryId",
    "tags",
    "recurrence",
];

/// Serialize transactions to a 9-column CSV payload
///
/// Tags are joined with `;` inside one field and the recurrence column holds
/// the token form. Fields containing commas, quotes, or newlines come out
/// RFC-4180 quoted.
pub fn export_transactions_csv(transactions: &[Transaction]) -> LedgerResult<ExportResult> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for tx in transactions {
        let tags = tx.tags.iter().cloned().collect::<Vec<_>>().join(";");
        let date = tx.date.to_string();
        let kind = tx.kind.to_string();
        let amount = tx.amount.amount().to_string();
        let recurrence = tx.recurrence.to_string();
        writer
            .write_record([
                tx.id.as_str(),
                date.as_str(),
                kind.as_str(),
                amount.as_str(),
                tx.amount.currency().as_str(),
                tx.description.as_str(),
                tx.category_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
                tags.as_str(),
                recurrence.as_str(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(ExportResult {
        bytes,
        mime_type: "text/csv",
        file_name: "transactions.csv",
    })
}
