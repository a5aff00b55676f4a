use crate::aggregate::round1;
use crate::schema::AggregateSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    /// No prior baseline existed for this metric.
    New,
}

/// Direction and magnitude of change for one metric between two successive
/// snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute percent change, one decimal. Fixed at 100 for `New`.
    pub percentage: f64,
}

impl Default for Trend {
    fn default() -> Self {
        Trend {
            direction: TrendDirection::New,
            percentage: 100.0,
        }
    }
}

/// The three tracked headline metrics of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalsSnapshot {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl From<&AggregateSnapshot> for TotalsSnapshot {
    fn from(snapshot: &AggregateSnapshot) -> Self {
        TotalsSnapshot {
            income: snapshot.total_income,
            expense: snapshot.total_expense,
            balance: snapshot.balance,
        }
    }
}

/// Period-over-period comparison for each tracked metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendReport {
    pub income: Trend,
    pub expense: Trend,
    pub balance: Trend,
}

/// Stateful comparator holding the previously computed totals (initially
/// zeros). Every comparison is against the immediately preceding state, not
/// a fixed baseline: `compare` reads the stored snapshot and overwrites it
/// with the current one in a single `&mut` call.
#[derive(Debug, Default)]
pub struct TrendTracker {
    previous: TotalsSnapshot,
}

fn compare_metric(current: f64, previous: f64) -> Trend {
    // A zero baseline reads as "new data" regardless of the current sign.
    if previous == 0.0 {
        return Trend {
            direction: TrendDirection::New,
            percentage: 100.0,
        };
    }

    Trend {
        direction: if current >= previous {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
        percentage: round1(((current - previous) / previous).abs() * 100.0),
    }
}

impl TrendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored baseline for the next comparison.
    pub fn previous(&self) -> &TotalsSnapshot {
        &self.previous
    }

    pub fn compare(&mut self, current: &TotalsSnapshot) -> TrendReport {
        let report = TrendReport {
            income: compare_metric(current.income, self.previous.income),
            expense: compare_metric(current.expense, self.previous.expense),
            balance: compare_metric(current.balance, self.previous.balance),
        };
        self.previous = *current;
        report
    }
}
