//! End-to-end walkthrough: import a spreadsheet-like batch, push it through
//! the in-memory store, and print the dashboard aggregates.
//!
//! Run with: `cargo run --example dashboard_demo`

use expense_dashboard::*;
use futures::StreamExt;
use serde_json::{json, Map, Value};

fn main() -> anyhow::Result<()> {
    // Rows as a sheet parser would deliver them: serial dates, inconsistent
    // key names, amounts as strings.
    let parsed_rows = vec![
        json!({"Date": 45296, "Income_Expense": "Income", "INR": 52000, "Category": "Salary", "Account": "HDFC", "Note": "January pay"}),
        json!({"Date": 45301, "Income_Expense": "Exp.", "INR": 1250, "Category": "Food", "Subcategory": "Groceries", "Account": "Cash"}),
        json!({"Date": "08/02/2024", "Income_Expense": "Expense", "INR": "3200", "Category": "Rent", "Account": "HDFC"}),
        json!({"Date": "15/02/2024", "Income_Expense": "Expense", "INR": 640, "Category": "Food", "Subcategory": "Cafe", "Account": "Cash"}),
    ];

    let prepared = prepare_rows(&parsed_rows);
    let upload: Map<String, Value> = prepared
        .iter()
        .enumerate()
        .map(|(i, row)| (i.to_string(), row.clone()))
        .collect();

    let store = MemoryStore::new();
    let mut updates = store.subscribe("expenses");
    store.write("expenses", upload);

    let mut engine = DashboardEngine::new();

    // drain the initial (empty) snapshot and the upload
    futures::executor::block_on(async {
        engine.apply_snapshot(&updates.next().await.unwrap_or_default());
        engine.apply_snapshot(&updates.next().await.unwrap_or_default());
    });

    let view = engine.refresh().clone();
    println!("records: {}", view.snapshot.count);
    println!("income:  {:.0}", view.snapshot.total_income);
    println!("expense: {:.0}", view.snapshot.total_expense);
    println!("balance: {:.0}", view.snapshot.balance);

    println!("\nmonthly series:");
    for (month, flow) in &view.snapshot.by_month {
        println!("  {}  +{:<8.0} -{:.0}", month, flow.income, flow.expense);
    }

    println!("\nexpense breakdown:");
    for category in category_breakdown(&view.snapshot) {
        println!("  {:<12} {:>8.0}  ({}%)", category.name, category.amount, category.share);
        for sub in &category.subcategories {
            println!("    {:<10} {:>8.0}  ({}%)", sub.name, sub.amount, sub.share);
        }
    }

    // narrow to Food and watch the trend move
    engine.set_query(Query {
        category: Some("Food".to_string()),
        ..Query::default()
    });
    let view = engine.refresh();
    println!(
        "\nFood only: expense {:.0}, trend {:?} {}%",
        view.snapshot.total_expense, view.trends.expense.direction, view.trends.expense.percentage
    );

    Ok(())
}
