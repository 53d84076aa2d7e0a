//! Statistics dashboard snapshot
//!
//! Combines the summary report (whole feed), the line series and the vehicle
//! aggregate (both over the scope-filtered feed) into one serializable value.

use crate::domain::scope::{TimeScope, TimeWindow};
use crate::domain::types::{FeedOrigin, TransactionFeed};
use crate::services::bucketing::{line_series, LineSeries};
use crate::services::report::SummaryReport;
use crate::services::scope_filter::filter_by_scope;
use crate::services::vehicle_aggregator::VehicleAggregate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Time-sortable snapshot id (UUIDv7)
pub fn new_snapshot_id() -> String {
    Uuid::now_v7().to_string()
}

/// What the statistics page asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    pub scope: TimeScope,
    /// Only consulted for `TimeScope::Today`
    pub window: TimeWindow,
}

impl DashboardQuery {
    pub fn new(scope: TimeScope, window: TimeWindow) -> Self {
        Self { scope, window }
    }
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self { scope: TimeScope::Today, window: TimeWindow::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<FeedOrigin>,
    pub scope: TimeScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    /// Transactions left after scope filtering
    pub in_scope: usize,
    pub report: SummaryReport,
    pub line: LineSeries,
    pub vehicles: VehicleAggregate,
}

impl DashboardSnapshot {
    pub fn with_origin(mut self, origin: FeedOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Everything except the snapshot id, for comparing two builds
    pub fn same_content(&self, other: &Self) -> bool {
        self.generated_at == other.generated_at
            && self.origin == other.origin
            && self.scope == other.scope
            && self.window == other.window
            && self.in_scope == other.in_scope
            && self.report == other.report
            && self.line == other.line
            && self.vehicles == other.vehicles
    }

    /// Serialize as a single JSON line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub struct Dashboard;

impl Dashboard {
    /// Recompute every chart from the full feed as seen at `now`
    pub fn build(
        feed: &TransactionFeed,
        query: &DashboardQuery,
        now: DateTime<Utc>,
    ) -> DashboardSnapshot {
        let report = SummaryReport::from_feed(feed);
        let filtered = filter_by_scope(&feed.transactions, query.scope, now);
        let line = line_series(&filtered, query.scope, &query.window, now);
        let vehicles = VehicleAggregate::from_transactions(&filtered);

        info!(
            scope = %query.scope,
            feed_len = %feed.transactions.len(),
            in_scope = %filtered.len(),
            line_rows = %line.len(),
            vehicle_rows = %vehicles.len(),
            "dashboard_built"
        );

        DashboardSnapshot {
            id: new_snapshot_id(),
            generated_at: now,
            origin: None,
            scope: query.scope,
            window: query.scope.is_hourly().then_some(query.window),
            in_scope: filtered.len(),
            report,
            line,
            vehicles,
        }
    }
}
