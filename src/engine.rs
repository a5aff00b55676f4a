use crate::aggregate::aggregate;
use crate::error::Result;
use crate::filter::apply;
use crate::normalize::{normalize_batch, normalize_map};
use crate::schema::{AggregateSnapshot, Query, Transaction};
use crate::store::{RawRecordMap, RecordStore};
use crate::trend::{TotalsSnapshot, TrendReport, TrendTracker};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// What the rendering surface consumes after a recompute: the aggregate
/// snapshot over the currently filtered set, plus the period-over-period
/// trend for each headline metric.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardView {
    pub snapshot: AggregateSnapshot,
    pub trends: TrendReport,
}

/// The single coordinating component. Owns the in-memory record set, the
/// active query, the latest view, and the trend tracker as explicit state
/// passed to the pure functions that need it.
///
/// Synchronous and single-threaded: a new store snapshot is fully normalized
/// before it replaces the record set, so partial application of two
/// snapshots is never observable, and a failed read leaves the previous set
/// active.
#[derive(Debug, Default)]
pub struct DashboardEngine {
    records: Vec<Transaction>,
    query: Query,
    filtered: Vec<Transaction>,
    view: DashboardView,
    tracker: TrendTracker,
}

impl DashboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the record set with a normalized store snapshot.
    pub fn apply_snapshot(&mut self, map: &RawRecordMap) {
        let records = normalize_map(map);
        info!(
            "Replacing record set: {} -> {} records",
            self.records.len(),
            records.len()
        );
        self.records = records;
    }

    /// Replaces the record set with a normalized import batch.
    pub fn apply_batch(&mut self, rows: &[Value]) {
        let records = normalize_batch(rows);
        info!(
            "Replacing record set from import batch: {} -> {} records",
            self.records.len(),
            records.len()
        );
        self.records = records;
    }

    /// Reads the document at `path` and replaces the record set. On failure
    /// the error is surfaced and the last successfully loaded set stays
    /// active.
    pub fn load_from_store(&mut self, store: &dyn RecordStore, path: &str) -> Result<usize> {
        let map = store.read_once(path)?;
        self.apply_snapshot(&map);
        Ok(self.records.len())
    }

    pub fn set_query(&mut self, query: Query) {
        self.query = query;
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    /// The subset produced by the last `refresh`.
    pub fn filtered(&self) -> &[Transaction] {
        &self.filtered
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Re-runs filter and aggregation over the current record set and query,
    /// compares the new totals against the previous recompute, and stores
    /// the result. Call after every query or record-set change.
    pub fn refresh(&mut self) -> &DashboardView {
        self.filtered = apply(&self.records, &self.query);
        let snapshot = aggregate(&self.filtered);
        debug!(
            "Recomputed aggregates: {} of {} records match the active query",
            self.filtered.len(),
            self.records.len()
        );

        let trends = self.tracker.compare(&TotalsSnapshot::from(&snapshot));
        self.view = DashboardView { snapshot, trends };
        &self.view
    }
}
