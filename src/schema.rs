use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The date representation exactly as it arrived from the source, kept for
/// export round-trips. Resolution into a calendar date happens separately.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawDate {
    #[schemars(description = "An already-parsed calendar date, e.g. from a typed spreadsheet cell")]
    Date(NaiveDate),

    #[schemars(
        description = "A spreadsheet serial number: whole days counted from the 1899-12-30 epoch"
    )]
    Serial(f64),

    #[schemars(description = "A free-form date string, e.g. '2024-01-15' or '15/01/2024'")]
    Text(String),

    #[default]
    #[schemars(description = "No date-like value was present on the raw record")]
    Missing,
}

impl RawDate {
    /// Captures a raw JSON value without interpreting it. Anything that is
    /// neither a number nor a non-empty string counts as missing.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => RawDate::Serial(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) if !s.is_empty() => RawDate::Text(s.clone()),
            _ => RawDate::Missing,
        }
    }
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            RawDate::Serial(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            RawDate::Text(s) => f.write_str(s),
            RawDate::Missing => Ok(()),
        }
    }
}

/// One financial event in canonical shape, regardless of how the source
/// named or encoded its fields. Records are immutable after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(
        description = "Opaque identifier, unique within a record set. Taken from the store key, or assigned positionally for import batches."
    )]
    pub id: String,

    #[serde(default)]
    #[schemars(description = "The original date value as provided, preserved for export")]
    pub raw_date: RawDate,

    #[schemars(description = "The resolved calendar date, or null when the raw value was unresolvable")]
    pub date: Option<NaiveDate>,

    #[schemars(description = "Account label; empty string when absent, never null")]
    pub account: String,

    #[schemars(description = "Category label; empty string when absent, never null")]
    pub category: String,

    #[schemars(description = "Subcategory label; empty string when absent, never null")]
    pub subcategory: String,

    #[serde(rename = "type")]
    #[schemars(
        description = "Free-text transaction kind. Income/expense classification is derived by substring matching ('inc'/'exp'), not a closed enum, because source labels are inconsistent (e.g. 'Inc.', 'Income', 'INC')."
    )]
    pub type_: String,

    #[schemars(description = "Monetary amount. Always finite; 0 when the raw value was unparseable.")]
    pub amount: f64,

    #[schemars(description = "Free-text description; empty string when absent, never null")]
    pub note: String,
}

impl Transaction {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Transaction)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// A dashboard query. Every field is optional; `None` means the dimension is
/// unconstrained. The empty query (`Query::default()`) matches every record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    #[schemars(description = "Inclusive lower date bound")]
    pub date_from: Option<NaiveDate>,

    #[schemars(description = "Inclusive upper date bound (whole day)")]
    pub date_to: Option<NaiveDate>,

    #[schemars(description = "Exact, case-sensitive category match")]
    pub category: Option<String>,

    #[serde(rename = "type")]
    #[schemars(description = "Exact, case-sensitive type match")]
    pub type_: Option<String>,

    #[schemars(description = "Exact, case-sensitive account match")]
    pub account: Option<String>,

    #[schemars(
        description = "Case-insensitive substring match over note, category, subcategory and account"
    )]
    pub search_text: Option<String>,
}

/// Income and expense sums for a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyFlow {
    pub income: f64,
    pub expense: f64,
}

/// The full set of derived statistics over one record set at one point in
/// time. Recomputed on every filter change; never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AggregateSnapshot {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub count: usize,

    #[schemars(description = "Expense sums keyed by category; empty category buckets as 'Other'")]
    pub by_category: BTreeMap<String, f64>,

    #[schemars(description = "Expense sums keyed by category, then subcategory")]
    pub by_subcategory: BTreeMap<String, BTreeMap<String, f64>>,

    #[schemars(
        description = "Income/expense sums keyed by zero-padded 'YYYY-MM'; records without a resolved date are excluded from this series only. Key order is chronological."
    )]
    pub by_month: BTreeMap<String, MonthlyFlow>,
}
