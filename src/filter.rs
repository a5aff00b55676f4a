use crate::schema::{Query, Transaction};

/// Whether a single record satisfies every predicate of the query.
///
/// A record with an unresolved date fails any date-bounded query: "unknown
/// date" cannot confirm inclusion. It still passes when no bound is set.
pub fn matches(record: &Transaction, query: &Query) -> bool {
    if let Some(from) = query.date_from {
        match record.date {
            Some(date) if date >= from => {}
            _ => return false,
        }
    }

    if let Some(to) = query.date_to {
        match record.date {
            Some(date) if date <= to => {}
            _ => return false,
        }
    }

    if let Some(category) = &query.category {
        if record.category != *category {
            return false;
        }
    }

    if let Some(type_) = &query.type_ {
        if record.type_ != *type_ {
            return false;
        }
    }

    if let Some(account) = &query.account {
        if record.account != *account {
            return false;
        }
    }

    if let Some(search) = &query.search_text {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = format!(
                "{} {} {} {}",
                record.note, record.category, record.subcategory, record.account
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
    }

    true
}

/// Produces the subset matching all predicates, preserving input order.
/// Pure: re-run on every query change and whenever the record set changes.
pub fn apply(records: &[Transaction], query: &Query) -> Vec<Transaction> {
    records
        .iter()
        .filter(|record| matches(record, query))
        .cloned()
        .collect()
}

fn distinct_non_empty<F>(records: &[Transaction], field: F) -> Vec<String>
where
    F: Fn(&Transaction) -> &str,
{
    let mut values: Vec<String> = records
        .iter()
        .map(|record| field(record).to_string())
        .filter(|value| !value.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Sorted, deduplicated category values for populating filter choices.
pub fn distinct_categories(records: &[Transaction]) -> Vec<String> {
    distinct_non_empty(records, |record| &record.category)
}

/// Sorted, deduplicated account values for populating filter choices.
pub fn distinct_accounts(records: &[Transaction]) -> Vec<String> {
    distinct_non_empty(records, |record| &record.account)
}
