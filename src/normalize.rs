use crate::dates::resolve_date;
use crate::schema::{RawDate, Transaction};
use serde_json::{Map, Value};

// Ordered raw-key aliases per canonical field. First present, non-null,
// non-empty value wins; extend these lists to onboard a new data source.
pub const DATE_KEYS: &[&str] = &["date", "Date", "Period"];
pub const ACCOUNT_KEYS: &[&str] = &["Account", "Accounts", "account"];
pub const CATEGORY_KEYS: &[&str] = &["Category", "cat", "category"];
pub const SUBCATEGORY_KEYS: &[&str] = &["Subcategory", "SubCategory", "subcategory"];
pub const AMOUNT_KEYS: &[&str] = &["Amount", "INR", "amount"];
pub const TYPE_KEYS: &[&str] = &["Income_Expense", "type", "Type"];
pub const NOTE_KEYS: &[&str] = &["Note", "Description", "note"];

fn pick<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    for key in keys {
        match raw.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.is_empty() => continue,
            Some(value) => return Some(value),
        }
    }
    None
}

fn pick_string(raw: &Map<String, Value>, keys: &[&str]) -> String {
    match pick(raw, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn pick_amount(raw: &Map<String, Value>, keys: &[&str]) -> f64 {
    let amount = match pick(raw, keys) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

/// Maps an arbitrary raw record into the canonical shape. Total over any
/// JSON input: missing or malformed fields degrade to their defaults rather
/// than erroring, since source data quality is not guaranteed upstream.
pub fn normalize(raw: &Value, fallback_id: Option<&str>) -> Transaction {
    let empty = Map::new();
    let map = raw.as_object().unwrap_or(&empty);

    let raw_date = pick(map, DATE_KEYS)
        .map(RawDate::from_value)
        .unwrap_or_default();
    let date = resolve_date(&raw_date);

    Transaction {
        id: fallback_id.unwrap_or("").to_string(),
        raw_date,
        date,
        account: pick_string(map, ACCOUNT_KEYS),
        category: pick_string(map, CATEGORY_KEYS),
        subcategory: pick_string(map, SUBCATEGORY_KEYS),
        type_: pick_string(map, TYPE_KEYS),
        amount: pick_amount(map, AMOUNT_KEYS),
        note: pick_string(map, NOTE_KEYS),
    }
}

/// Normalizes a full store snapshot (key -> raw record), using store keys as
/// ids. Records come back newest-first with unresolved dates last, the order
/// the dashboard displays.
pub fn normalize_map(map: &Map<String, Value>) -> Vec<Transaction> {
    let mut records: Vec<Transaction> = map
        .iter()
        .map(|(key, raw)| normalize(raw, Some(key)))
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Normalizes an ordered import batch, assigning positional ids. Input order
/// is preserved.
pub fn normalize_batch(rows: &[Value]) -> Vec<Transaction> {
    rows.iter()
        .enumerate()
        .map(|(index, raw)| normalize(raw, Some(&index.to_string())))
        .collect()
}
