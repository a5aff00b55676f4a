//! # Expense Dashboard
//!
//! A library for normalizing heterogeneous financial-transaction records
//! (varying field names, date encodings, and currency amounts) into a
//! canonical shape and computing filtered aggregates for display.
//!
//! ## Core Concepts
//!
//! - **Raw record**: an arbitrary JSON object from an import or store read,
//!   with unpredictable field naming
//! - **Canonical record**: one [`Transaction`] with fixed field names and
//!   types regardless of source
//! - **Query**: an optional constraint per dimension (date range, category,
//!   type, account, free-text search); absence means unconstrained
//! - **Aggregate snapshot**: totals, category/subcategory breakdowns and the
//!   monthly income/expense series over one record set
//! - **Trend**: direction and magnitude of change between two successive
//!   snapshots for the same metric
//!
//! Normalization, filtering and aggregation are total, pure functions:
//! malformed input degrades to defaults (`None` dates, zero amounts, empty
//! strings) instead of erroring. Only the store/import/export boundary is
//! fallible.
//!
//! ## Example
//!
//! ```rust,ignore
//! use expense_dashboard::*;
//! use serde_json::json;
//!
//! let mut engine = DashboardEngine::new();
//! engine.apply_batch(&[
//!     json!({"Date": "2024-01-05", "Income_Expense": "Income", "INR": 1000, "Category": "Salary"}),
//!     json!({"Date": "2024-01-10", "Income_Expense": "Expense", "INR": 400, "Category": "Food"}),
//! ]);
//!
//! engine.set_query(Query {
//!     category: Some("Food".to_string()),
//!     ..Query::default()
//! });
//!
//! let view = engine.refresh();
//! println!("spent {}", view.snapshot.total_expense);
//! ```

pub mod aggregate;
pub mod dates;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingestion;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod trend;

pub use aggregate::{
    aggregate, average_monthly_expense, category_breakdown, is_expense, is_income,
    largest_expense, most_used_category, percent_share, CategoryShare, SubcategoryShare,
};
pub use dates::{month_key, parse_date_str, resolve_date, resolve_value, serial_to_date};
pub use engine::{DashboardEngine, DashboardView};
pub use error::{DashboardError, Result};
pub use export::{export_rows, write_csv, ExportRow};
pub use filter::{apply, distinct_accounts, distinct_categories, matches};
pub use ingestion::{prepare_rows, sanitize_key};
pub use normalize::{normalize, normalize_batch, normalize_map};
pub use schema::*;
pub use store::{MemoryStore, RawRecordMap, RecordStore};
pub use trend::{TotalsSnapshot, Trend, TrendDirection, TrendReport, TrendTracker};
