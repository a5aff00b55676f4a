//! Filters a record set and writes the result as CSV to stdout.
//!
//! Run with: `cargo run --example csv_export`

use expense_dashboard::*;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let mut engine = DashboardEngine::new();
    engine.apply_batch(&[
        json!({"Date": 45296, "Income_Expense": "Income", "INR": 52000, "Category": "Salary", "Account": "HDFC"}),
        json!({"Date": "10/01/2024", "Income_Expense": "Expense", "INR": 1250, "Category": "Food", "Account": "Cash", "Note": "groceries"}),
        json!({"Date": "08/02/2024", "Income_Expense": "Expense", "INR": 3200, "Category": "Rent", "Account": "HDFC"}),
    ]);

    engine.set_query(Query {
        date_from: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
        date_to: chrono::NaiveDate::from_ymd_opt(2024, 1, 31),
        ..Query::default()
    });
    engine.refresh();

    // raw date representations (serials included) survive the round trip
    write_csv(engine.filtered(), std::io::stdout())?;
    Ok(())
}
