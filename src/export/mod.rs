//! Export pipeline
//!
//! Both formats produce an `ExportResult` carrying the serialized bytes plus
//! the metadata a caller needs to hand the payload to a user or an HTTP
//! response. Output ordering is deterministic so repeated exports of the same
//! data are byte-identical apart from the timestamp.

pub mod csv;
pub mod json;

pub use csv::export_transactions_csv;
pub use json::{export_from_store, export_snapshot, LedgerSnapshot};

/// Serialized export payload with delivery metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: &'static str,
}
