//! Services - transaction aggregation behind the statistics charts
//!
//! Everything here is a pure function of its inputs and an explicit `now`:
//! - `vehicle_aggregator` - masuk/keluar counts per vehicle type (bar chart)
//! - `scope_filter` - today / 7 days / 30 days / 1 year filtering
//! - `bucketing` - hourly and per-date/month valid-transaction series (line chart)
//! - `labels` - tick label formatting
//! - `report` - total and car/motorcycle summary
//! - `dashboard` - full snapshot combining the above

pub mod bucketing;
pub mod dashboard;
pub mod labels;
pub mod report;
pub mod scope_filter;
pub mod vehicle_aggregator;

// Re-export commonly used types
pub use bucketing::{bucketed_series, hourly_series, line_series, BucketRow, HourlyRow, LineSeries};
pub use dashboard::{Dashboard, DashboardQuery, DashboardSnapshot};
pub use labels::format_tick;
pub use report::{EntryExit, SummaryReport};
pub use scope_filter::{filter_by_scope, in_scope, scope_lower_bound};
pub use vehicle_aggregator::{VehicleAggregate, VehicleCounts};
