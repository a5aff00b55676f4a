use crate::dates::serial_to_date;
use serde_json::{Map, Value};

/// Characters the document store rejects in record keys.
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '#', '$', '/', '[', ']'];

/// Serial numbers at or below this are not rewritten as dates on import
/// (25569 = 1970-01-01).
pub const SERIAL_DATE_CUTOFF: f64 = 25569.0;

/// Replaces store-forbidden key characters with underscores.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if FORBIDDEN_KEY_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

fn is_date_column(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower.contains("date") || lower.contains("period")
}

fn prepare_row(row: &Value) -> Value {
    let map = match row.as_object() {
        Some(map) => map,
        None => return row.clone(),
    };

    let mut prepared = Map::new();
    for (key, value) in map {
        let mut value = value.clone();

        if is_date_column(key) {
            if let Some(serial) = value.as_f64() {
                if serial > SERIAL_DATE_CUTOFF {
                    if let Some(date) = serial_to_date(serial) {
                        // day-first, the format the resolver's two-separator
                        // branch reads back
                        value = Value::String(date.format("%d/%m/%Y").to_string());
                    }
                }
            }
        }

        prepared.insert(sanitize_key(key), value);
    }
    Value::Object(prepared)
}

/// Prepares a parsed spreadsheet batch for the store: sanitizes every column
/// key and rewrites spreadsheet serial numbers in date-like columns as
/// day-first date strings. Row order is preserved; rows that are not objects
/// pass through untouched.
pub fn prepare_rows(rows: &[Value]) -> Vec<Value> {
    rows.iter().map(prepare_row).collect()
}
