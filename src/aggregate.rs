use crate::dates::month_key;
use crate::schema::{AggregateSnapshot, Transaction};
use serde::Serialize;
use std::cmp::Ordering;

/// Classifies a type label as income: lower-cased substring match on "inc".
/// Source labels are inconsistent free text ("Inc.", "Income", "INC"), so an
/// exact-match enum would silently drop real records.
pub fn is_income(type_label: &str) -> bool {
    type_label.to_lowercase().contains("inc")
}

/// Classifies a type label as expense: lower-cased substring match on "exp".
pub fn is_expense(type_label: &str) -> bool {
    type_label.to_lowercase().contains("exp")
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage share of `value` in `total`, rounded to one decimal. A zero
/// divisor yields 0, not NaN.
pub fn percent_share(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round1(value / total * 100.0)
}

fn bucket(label: &str) -> String {
    if label.is_empty() {
        "Other".to_string()
    } else {
        label.to_string()
    }
}

/// Computes the full aggregate snapshot over a record set.
///
/// A record whose type matches neither classification contributes to `count`
/// only. Category and subcategory breakdowns cover expense-classified
/// records; the monthly series covers every record with a resolved date.
pub fn aggregate(records: &[Transaction]) -> AggregateSnapshot {
    let mut snapshot = AggregateSnapshot {
        count: records.len(),
        ..AggregateSnapshot::default()
    };

    for record in records {
        let income = is_income(&record.type_);
        let expense = !income && is_expense(&record.type_);

        if income {
            snapshot.total_income += record.amount;
        }

        if expense {
            snapshot.total_expense += record.amount;
            let category = bucket(&record.category);
            *snapshot.by_category.entry(category.clone()).or_insert(0.0) += record.amount;
            *snapshot
                .by_subcategory
                .entry(category)
                .or_default()
                .entry(bucket(&record.subcategory))
                .or_insert(0.0) += record.amount;
        }

        if let Some(date) = record.date {
            let flow = snapshot.by_month.entry(month_key(date)).or_default();
            if income {
                flow.income += record.amount;
            } else if expense {
                flow.expense += record.amount;
            }
        }
    }

    snapshot.balance = snapshot.total_income - snapshot.total_expense;
    snapshot
}

/// One subcategory's slice of its parent category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryShare {
    pub name: String,
    pub amount: f64,
    /// Percent of the parent category total, one decimal.
    pub share: f64,
}

/// One category's slice of the total expense, with its subcategory slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    /// Percent of total expense, one decimal.
    pub share: f64,
    pub subcategories: Vec<SubcategoryShare>,
}

fn by_amount_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Presentation-ready category breakdown: categories sorted by descending
/// amount, each with its subcategories sorted the same way.
pub fn category_breakdown(snapshot: &AggregateSnapshot) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = snapshot
        .by_category
        .iter()
        .map(|(name, &amount)| {
            let mut subcategories: Vec<SubcategoryShare> = snapshot
                .by_subcategory
                .get(name)
                .map(|subs| {
                    subs.iter()
                        .map(|(sub, &value)| SubcategoryShare {
                            name: sub.clone(),
                            amount: value,
                            share: percent_share(value, amount),
                        })
                        .collect()
                })
                .unwrap_or_default();
            subcategories.sort_by(|a, b| by_amount_desc(a.amount, b.amount));

            CategoryShare {
                name: name.clone(),
                amount,
                share: percent_share(amount, snapshot.total_expense),
                subcategories,
            }
        })
        .collect();
    shares.sort_by(|a, b| by_amount_desc(a.amount, b.amount));
    shares
}

/// Mean expense over the months that actually carry expenses; 0 when none do.
pub fn average_monthly_expense(snapshot: &AggregateSnapshot) -> f64 {
    let monthly: Vec<f64> = snapshot
        .by_month
        .values()
        .map(|flow| flow.expense)
        .filter(|expense| *expense > 0.0)
        .collect();
    if monthly.is_empty() {
        return 0.0;
    }
    monthly.iter().sum::<f64>() / monthly.len() as f64
}

/// The expense-classified record with the greatest amount.
pub fn largest_expense(records: &[Transaction]) -> Option<&Transaction> {
    records
        .iter()
        .filter(|record| is_expense(&record.type_))
        .max_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal))
}

/// The modal category among expense-classified records, with its record
/// count. Ties break toward the lexicographically first category.
pub fn most_used_category(records: &[Transaction]) -> Option<(String, usize)> {
    let mut counts = std::collections::BTreeMap::new();
    for record in records {
        if is_expense(&record.type_) {
            *counts.entry(bucket(&record.category)).or_insert(0usize) += 1;
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (category, count) in counts {
        match &best {
            Some((_, top)) if count <= *top => {}
            _ => best = Some((category, count)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn records(raws: &[serde_json::Value]) -> Vec<Transaction> {
        raws.iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, Some(&i.to_string())))
            .collect()
    }

    #[test]
    fn test_fuzzy_classification() {
        assert!(is_income("Income"));
        assert!(is_income("Inc."));
        assert!(is_income("INC"));
        assert!(is_expense("Expense"));
        assert!(is_expense("EXP"));
        assert!(!is_income("Transfer"));
        assert!(!is_expense("Transfer"));
        assert!(!is_income(""));
    }

    #[test]
    fn test_unclassified_records_count_only() {
        let set = records(&[
            json!({"Type": "Transfer", "Amount": 500}),
            json!({"Type": "Income", "Amount": 1000}),
        ]);
        let snapshot = aggregate(&set);
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.total_income, 1000.0);
        assert_eq!(snapshot.total_expense, 0.0);
        assert_eq!(snapshot.balance, 1000.0);
    }

    #[test]
    fn test_by_category_sums_to_total_expense() {
        let set = records(&[
            json!({"Type": "Expense", "Amount": 400, "Category": "Food"}),
            json!({"Type": "Expense", "Amount": 100, "Category": "Food", "Subcategory": "Cafe"}),
            json!({"Type": "Expense", "Amount": 75}),
            json!({"Type": "Income", "Amount": 1000, "Category": "Salary"}),
            json!({"Type": "exp", "Amount": 25, "Category": "Travel"}),
        ]);
        let snapshot = aggregate(&set);

        let category_sum: f64 = snapshot.by_category.values().sum();
        assert!(
            (category_sum - snapshot.total_expense).abs() < 1e-9,
            "categories must partition total expense, got {} vs {}",
            category_sum,
            snapshot.total_expense
        );
        assert_eq!(snapshot.by_category.get("Other"), Some(&75.0));

        for (category, subs) in &snapshot.by_subcategory {
            let sub_sum: f64 = subs.values().sum();
            let cat_total = snapshot.by_category[category];
            assert!((sub_sum - cat_total).abs() < 1e-9);
        }
    }

    #[test]
    fn test_income_never_enters_category_breakdown() {
        let set = records(&[json!({"Type": "Income", "Amount": 1000, "Category": "Salary"})]);
        let snapshot = aggregate(&set);
        assert!(snapshot.by_category.is_empty());
        assert!(snapshot.by_subcategory.is_empty());
    }

    #[test]
    fn test_by_month_keys_and_undated_exclusion() {
        let set = records(&[
            json!({"Type": "Income", "Amount": 1000, "Date": "2024-01-05"}),
            json!({"Type": "Expense", "Amount": 400, "Date": "2024-01-10"}),
            json!({"Type": "Expense", "Amount": 100, "Date": "2024-02-01"}),
            json!({"Type": "Expense", "Amount": 999}),
        ]);
        let snapshot = aggregate(&set);

        assert_eq!(snapshot.by_month.len(), 2);
        let jan = &snapshot.by_month["2024-01"];
        assert_eq!(jan.income, 1000.0);
        assert_eq!(jan.expense, 400.0);
        let feb = &snapshot.by_month["2024-02"];
        assert_eq!(feb.income, 0.0);
        assert_eq!(feb.expense, 100.0);

        // undated expense still lands in the overall totals
        assert_eq!(snapshot.total_expense, 1499.0);

        let months: Vec<&String> = snapshot.by_month.keys().collect();
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
    }

    #[test]
    fn test_order_independence() {
        let mut set = records(&[
            json!({"Type": "Income", "Amount": 1000, "Date": "2024-01-05", "Category": "Salary"}),
            json!({"Type": "Expense", "Amount": 400, "Date": "2024-01-10", "Category": "Food"}),
            json!({"Type": "Expense", "Amount": 100, "Date": "2024-02-01", "Category": "Food"}),
            json!({"Type": "Transfer", "Amount": 50}),
        ]);
        let baseline = aggregate(&set);
        set.reverse();
        let permuted = aggregate(&set);
        set.swap(0, 2);
        let swapped = aggregate(&set);

        assert_eq!(baseline, permuted);
        assert_eq!(baseline, swapped);
    }

    #[test]
    fn test_empty_set_is_well_defined() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.total_income, 0.0);
        assert_eq!(snapshot.total_expense, 0.0);
        assert_eq!(snapshot.balance, 0.0);
        assert!(snapshot.by_category.is_empty());
        assert!(snapshot.by_month.is_empty());
    }

    #[test]
    fn test_percent_share() {
        assert_eq!(percent_share(500.0, 1500.0), 33.3);
        assert_eq!(percent_share(1.0, 3.0), 33.3);
        assert_eq!(percent_share(0.0, 0.0), 0.0);
        assert_eq!(percent_share(42.0, 0.0), 0.0);
    }

    #[test]
    fn test_category_breakdown_sorted_with_shares() {
        let set = records(&[
            json!({"Type": "Expense", "Amount": 300, "Category": "Food", "Subcategory": "Groceries"}),
            json!({"Type": "Expense", "Amount": 100, "Category": "Food", "Subcategory": "Cafe"}),
            json!({"Type": "Expense", "Amount": 600, "Category": "Rent"}),
        ]);
        let snapshot = aggregate(&set);
        let breakdown = category_breakdown(&snapshot);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "Rent");
        assert_eq!(breakdown[0].share, 60.0);
        assert_eq!(breakdown[1].name, "Food");
        assert_eq!(breakdown[1].share, 40.0);

        let food = &breakdown[1];
        assert_eq!(food.subcategories[0].name, "Groceries");
        assert_eq!(food.subcategories[0].share, 75.0);
        assert_eq!(food.subcategories[1].name, "Cafe");
        assert_eq!(food.subcategories[1].share, 25.0);

        let total_share: f64 = breakdown.iter().map(|c| c.share).sum();
        assert!((total_share - 100.0).abs() < 0.2);
    }

    #[test]
    fn test_additional_stats() {
        let set = records(&[
            json!({"Type": "Expense", "Amount": 400, "Date": "2024-01-10", "Category": "Food"}),
            json!({"Type": "Expense", "Amount": 100, "Date": "2024-02-01", "Category": "Food"}),
            json!({"Type": "Expense", "Amount": 700, "Date": "2024-02-15", "Category": "Rent"}),
            json!({"Type": "Income", "Amount": 5000, "Date": "2024-01-05"}),
        ]);
        let snapshot = aggregate(&set);

        assert_eq!(average_monthly_expense(&snapshot), 600.0);
        assert_eq!(largest_expense(&set).unwrap().amount, 700.0);
        assert_eq!(most_used_category(&set), Some(("Food".to_string(), 2)));
    }

    #[test]
    fn test_additional_stats_empty_set() {
        let snapshot = aggregate(&[]);
        assert_eq!(average_monthly_expense(&snapshot), 0.0);
        assert_eq!(largest_expense(&[]), None);
        assert_eq!(most_used_category(&[]), None);
    }
}
