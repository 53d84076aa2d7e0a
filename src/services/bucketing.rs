//! Time bucketing and valid-transaction counting for the line chart
//!
//! Two modes:
//! - hourly (scope `today`): raw masuk/keluar counts per hour inside a
//!   clock-time window
//! - bucketed (every other scope): per (owner, block, bucket) group take
//!   min(masuk, keluar), then sum those minima per bucket
//!
//! Pairing is by count only. An exit without a matching entry in the same
//! group simply clips that group's minimum.

use crate::domain::scope::{TimeScope, TimeWindow};
use crate::domain::types::{Transaction, TransactionStatus};
use crate::services::labels::format_tick;
use chrono::{DateTime, Timelike, Utc};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw entry/exit counts for one hour of today
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyRow {
    pub hour: u32,
    /// `H:00`, hour not zero-padded
    #[serde(rename = "waktu_parkir")]
    pub bucket_key: String,
    pub label: String,
    #[serde(rename = "masuk")]
    pub entries: u64,
    #[serde(rename = "keluar")]
    pub exits: u64,
}

/// Summed valid-transaction count for one date or month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketRow {
    /// `YYYY-MM-DD`, or `YYYY-MM` for the one-year scope
    #[serde(rename = "waktu_parkir")]
    pub bucket_key: String,
    pub label: String,
    #[serde(rename = "total_transaksi")]
    pub valid_count: u64,
}

/// Line chart data: dual-line for today, single-line otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum LineSeries {
    Hourly(Vec<HourlyRow>),
    Bucketed(Vec<BucketRow>),
}

impl LineSeries {
    pub fn len(&self) -> usize {
        match self {
            LineSeries::Hourly(rows) => rows.len(),
            LineSeries::Bucketed(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket key of a timestamp for a non-hourly scope
pub fn bucket_key(scope: TimeScope, timestamp: DateTime<Utc>) -> String {
    match scope {
        TimeScope::LastYear => timestamp.format("%Y-%m").to_string(),
        _ => timestamp.format("%Y-%m-%d").to_string(),
    }
}

/// Hour label as the chart shows it
#[inline]
pub fn hour_key(hour: u32) -> String {
    format!("{hour}:00")
}

/// Per-hour masuk/keluar counts for events on `now`'s date inside `window`.
///
/// Only hours with at least one entry or exit produce a row. Rows come out in
/// ascending numeric hour order.
pub fn hourly_series(
    transactions: &[Transaction],
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> Vec<HourlyRow> {
    let today = now.date_naive();
    let mut counts = [(0u64, 0u64); 24];

    for tx in transactions {
        if tx.timestamp.date_naive() != today {
            continue;
        }

        let hour = tx.timestamp.hour();
        let minutes = hour * 60 + tx.timestamp.minute();
        if !window.contains_minutes(minutes) {
            continue;
        }

        let slot = &mut counts[hour as usize];
        match tx.status {
            TransactionStatus::Entry => slot.0 += 1,
            TransactionStatus::Exit => slot.1 += 1,
            TransactionStatus::Other(_) => {}
        }
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, (entries, exits))| *entries > 0 || *exits > 0)
        .map(|(hour, &(entries, exits))| {
            let hour = hour as u32;
            let bucket_key = hour_key(hour);
            HourlyRow {
                hour,
                label: format_tick(TimeScope::Today, &bucket_key),
                bucket_key,
                entries,
                exits,
            }
        })
        .collect()
}

/// Valid-transaction counts per date (or month for `1year`).
///
/// Every bucket present in the input gets a row, including buckets whose
/// groups never pair up (count 0). Rows are sorted by bucket key.
pub fn bucketed_series(transactions: &[Transaction], scope: TimeScope) -> Vec<BucketRow> {
    let mut groups: FxHashMap<(&str, &str, String), (u64, u64)> = FxHashMap::default();

    for tx in transactions {
        let key = (
            tx.owner_email.as_str(),
            tx.parking_block.as_str(),
            bucket_key(scope, tx.timestamp),
        );
        let group = groups.entry(key).or_insert((0, 0));
        match tx.status {
            TransactionStatus::Entry => group.0 += 1,
            TransactionStatus::Exit => group.1 += 1,
            TransactionStatus::Other(_) => {}
        }
    }

    let mut per_bucket: BTreeMap<String, u64> = BTreeMap::new();
    for ((_, _, bucket), (entries, exits)) in groups {
        *per_bucket.entry(bucket).or_insert(0) += entries.min(exits);
    }

    per_bucket
        .into_iter()
        .map(|(bucket_key, valid_count)| BucketRow {
            label: format_tick(scope, &bucket_key),
            bucket_key,
            valid_count,
        })
        .collect()
}

/// Line series for `scope`, picking the hourly or bucketed mode
pub fn line_series(
    transactions: &[Transaction],
    scope: TimeScope,
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> LineSeries {
    if scope.is_hourly() {
        LineSeries::Hourly(hourly_series(transactions, window, now))
    } else {
        LineSeries::Bucketed(bucketed_series(transactions, scope))
    }
}
