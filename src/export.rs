use crate::error::Result;
use crate::schema::Transaction;
use serde::Serialize;
use std::io::Write;

/// One canonical record flattened for serialization, fields in the stable
/// export order. The date column carries the original raw representation so
/// exports round-trip what was imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Type")]
    pub type_: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Note")]
    pub note: String,
}

impl ExportRow {
    pub fn from_transaction(tx: &Transaction) -> Self {
        ExportRow {
            date: tx.raw_date.to_string(),
            account: tx.account.clone(),
            category: tx.category.clone(),
            subcategory: tx.subcategory.clone(),
            type_: tx.type_.clone(),
            amount: tx.amount,
            note: tx.note.clone(),
        }
    }
}

/// Flattens a (filtered or unfiltered) record sequence for downstream
/// CSV/spreadsheet serialization. No further transformation is needed.
pub fn export_rows(records: &[Transaction]) -> Vec<ExportRow> {
    records.iter().map(ExportRow::from_transaction).collect()
}

/// Serializes the records as CSV, header row first, in the stable column
/// order. An empty record sequence produces empty output.
pub fn write_csv<W: Write>(records: &[Transaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in export_rows(records) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
