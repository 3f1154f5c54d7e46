//! CSV transaction import

use super::ImportResult;
use crate::error::{LedgerError, LedgerResult};
use crate::export::csv::CSV_HEADER;
use crate::models::{
    normalize_tags, CategoryId, CurrencyCode, Money, Recurrence, Transaction, TransactionId,
    TransactionType,
};

/// Parse a CSV transaction payload
///
/// The header must match the export header (case-insensitive) or the whole
/// import fails. Rows are then processed independently: a row that cannot
/// produce a valid transaction is skipped with a warning, while invalid
/// category, tags, or recurrence values fall back to their defaults with a
/// warning. An empty payload imports nothing.
pub fn parse_transactions_csv(bytes: &[u8]) -> LedgerResult<ImportResult> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    if text.trim().is_empty() {
        return Ok(ImportResult::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(e.to_string()))?;
    let header_ok = headers.len() == CSV_HEADER.len()
        && headers
            .iter()
            .zip(CSV_HEADER)
            .all(|(got, want)| got.trim().eq_ignore_ascii_case(want));
    if !header_ok {
        return Err(LedgerError::Import(format!(
            "CSV header mismatch. Expected: {}",
            CSV_HEADER.join(",")
        )));
    }

    let mut result = ImportResult::default();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                result.warnings.push(format!("Row {} skipped: {}", row, e));
                continue;
            }
        };
        if record.len() != CSV_HEADER.len() {
            result.warnings.push(format!(
                "Row {}: expected {} columns, got {}",
                row,
                CSV_HEADER.len(),
                record.len()
            ));
            continue;
        }
        match parse_row(&record, row, &mut result.warnings) {
            Ok(tx) => result.transactions.push(tx),
            Err(e) => result.warnings.push(format!("Row {} skipped: {}", row, e)),
        }
    }
    Ok(result)
}

fn parse_row(
    record: &csv::StringRecord,
    row: usize,
    warnings: &mut Vec<String>,
) -> LedgerResult<Transaction> {
    let id = TransactionId::new(record[0].trim())?;
    let date = record[1]
        .trim()
        .parse()
        .map_err(|_| LedgerError::validation(format!("Invalid date '{}'", &record[1])))?;
    let kind: TransactionType = record[2].parse()?;
    let currency = CurrencyCode::new(record[4].trim())?;
    let amount = Money::of(&record[3], currency)?;
    let mut tx = Transaction::new(id, date, kind, amount, &record[5])?;

    let category = record[6].trim();
    if !category.is_empty() {
        match CategoryId::new(category) {
            Ok(category_id) => tx = tx.with_category(category_id),
            Err(_) => warnings.push(format!(
                "Row {}: invalid categoryId '{}' (ignored)",
                row, category
            )),
        }
    }

    let raw_tags = &record[7];
    if !raw_tags.trim().is_empty() {
        match normalize_tags(raw_tags.split(';')) {
            Ok(tags) => tx = tx.with_tags(tags),
            Err(_) => warnings.push(format!("Row {}: invalid tags '{}', dropped", row, raw_tags)),
        }
    }

    let raw_recurrence = record[8].trim();
    if !raw_recurrence.is_empty() {
        match raw_recurrence.parse::<Recurrence>() {
            Ok(recurrence) => tx = tx.with_recurrence(recurrence),
            Err(_) => warnings.push(format!(
                "Row {}: invalid recurrence '{}', defaulted to NONE",
                row, raw_recurrence
            )),
        }
    }

    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_transactions_csv;
    use chrono::NaiveDate;

    const HEADER: &str = "id,date,type,amount,currency,description,categoryId,tags,recurrence";

    fn parse(body: &str) -> ImportResult {
        parse_transactions_csv(format!("{}\n{}", HEADER, body).as_bytes()).unwrap()
    }

    #[test]
    fn test_empty_payload_imports_nothing() {
        let result = parse_transactions_csv(b"").unwrap();
        assert!(result.transactions.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bom_is_stripped() {
        let payload = format!("\u{feff}{}\n", HEADER);
        assert!(parse_transactions_csv(payload.as_bytes()).is_ok());
    }

    #[test]
    fn test_header_mismatch_fails() {
        let err = parse_transactions_csv(b"id,date,type\nt1,2024-01-01,EXPENSE").unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
        assert!(err.to_string().contains("CSV header mismatch"));
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let payload = "ID,Date,TYPE,Amount,Currency,Description,CATEGORYID,Tags,Recurrence\n";
        assert!(parse_transactions_csv(payload.as_bytes()).is_ok());
    }

    #[test]
    fn test_mixed_batch_keeps_valid_rows() {
        let result = parse(
            "t1,2024-01-01,INCOME,1000.00,USD,Salary,salary,work,MONTHLY:1\n\
             t2,2024-01-02,EXPENSE,not-a-number,USD,Coffee,food,coffee,NONE\n\
             t3,2024-01-03,EXPENSE,5.00,USD,Snack,food,snack,NONE",
        );
        let ids: Vec<&str> = result
            .transactions
            .iter()
            .map(|tx| tx.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Row 3 skipped:"));
        assert_eq!(
            result.transactions[0].recurrence,
            Recurrence::monthly(1).unwrap()
        );
    }

    #[test]
    fn test_padded_cells_are_trimmed() {
        let result = parse("\" t1 \", 2024-01-05 ,EXPENSE, 12.50 , USD ,Lunch,food,,NONE");
        assert!(result.warnings.is_empty());
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].id.as_str(), "t1");
        assert_eq!(
            result.transactions[0].amount,
            Money::of("12.50", CurrencyCode::usd()).unwrap()
        );
    }

    #[test]
    fn test_wrong_column_count_is_row_fatal() {
        let result = parse("t1,2024-01-05,EXPENSE,12.50,USD,Lunch");
        assert!(result.transactions.is_empty());
        assert_eq!(result.warnings, vec!["Row 2: expected 9 columns, got 6"]);
    }

    #[test]
    fn test_invalid_category_recovers_with_warning() {
        let result = parse("t1,2024-01-05,EXPENSE,12.50,USD,Lunch,bad category!,,NONE");
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].category_id, None);
        assert!(result.warnings[0].contains("invalid categoryId 'bad category!'"));
    }

    #[test]
    fn test_invalid_tags_drop_to_empty() {
        let result = parse("t1,2024-01-05,EXPENSE,12.50,USD,Lunch,food,GOOD;bad tag!,NONE");
        assert_eq!(result.transactions.len(), 1);
        assert!(result.transactions[0].tags.is_empty());
        assert!(result.warnings[0].contains("invalid tags"));
    }

    #[test]
    fn test_invalid_recurrence_defaults_to_none() {
        let result = parse("t1,2024-01-05,EXPENSE,12.50,USD,Lunch,food,,EVERY_DAY");
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].recurrence, Recurrence::None);
        assert!(result.warnings[0].contains("defaulted to NONE"));
    }

    #[test]
    fn test_quoted_fields_with_commas_and_quotes() {
        let result = parse(r#"t1,2024-01-05,EXPENSE,12.50,USD,"Lunch, ""extra"" course",,,NONE"#);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(
            result.transactions[0].description,
            r#"Lunch, "extra" course"#
        );
    }

    #[test]
    fn test_export_import_round_trip() {
        let original = Transaction::new(
            TransactionId::new("t1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            TransactionType::Expense,
            Money::of("42.00", CurrencyCode::usd()).unwrap(),
            "Weekly groceries",
        )
        .unwrap()
        .with_category(CategoryId::new("food").unwrap())
        .with_tags(normalize_tags(["groceries"]).unwrap())
        .with_recurrence(Recurrence::weekly(1).unwrap());

        let exported = export_transactions_csv(std::slice::from_ref(&original)).unwrap();
        let imported = parse_transactions_csv(&exported.bytes).unwrap();
        assert!(imported.warnings.is_empty());
        assert_eq!(imported.transactions, vec![original]);
    }
}
