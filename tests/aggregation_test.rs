//! End-to-end aggregation over wire-format feeds

use chrono::{DateTime, Duration, TimeZone, Utc};
use parkir_stats::domain::{TimeScope, TimeWindow, TransactionFeed};
use parkir_stats::io::{dummy_feed, parse_feed};
use parkir_stats::services::{
    bucketed_series, filter_by_scope, hourly_series, Dashboard, DashboardQuery, LineSeries,
    VehicleAggregate,
};

fn record(id: i64, block: &str, email: &str, vehicle: &str, status: &str, ts: &str) -> String {
    format!(
        r#"{{"blok_parkir": "{block}", "email": "{email}", "id_transaksi": {id},
            "parkiran": {{"kendaraan": "{vehicle}"}}, "status": "{status}",
            "waktu_parkir": "{ts}"}}"#
    )
}

fn feed(records: &[String]) -> TransactionFeed {
    let body = format!(
        r#"{{"totalTransaksi": {}, "transaksi": [{}]}}"#,
        records.len(),
        records.join(",")
    );
    parse_feed(&body).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn test_single_pair_seven_day_scope() {
    let feed = feed(&[
        record(1, "A1", "user1@example.com", "Motor", "masuk", "2024-06-14T10:15:00.000Z"),
        record(2, "A1", "user1@example.com", "Motor", "keluar", "2024-06-14T12:30:00.000Z"),
    ]);
    let now = utc(2024, 6, 15, 9, 0);

    let query = DashboardQuery::new(TimeScope::Last7Days, TimeWindow::default());
    let snapshot = Dashboard::build(&feed, &query, now);

    match snapshot.line {
        LineSeries::Bucketed(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].bucket_key, "2024-06-14");
            assert_eq!(rows[0].valid_count, 1);
        }
        other => panic!("expected bucketed series, got {other:?}"),
    }
}

#[test]
fn test_vehicle_totals_match_status_counts() {
    let feed = feed(&[
        record(1, "A1", "a@x", "Motor", "masuk", "2024-06-14T08:00:00Z"),
        record(2, "B1", "b@x", "Mobil", "masuk", "2024-06-14T08:10:00Z"),
        record(3, "A1", "a@x", "Motor", "keluar", "2024-06-14T09:00:00Z"),
        record(4, "C1", "c@x", "", "masuk", "2024-06-14T09:30:00Z"),
        record(5, "B1", "b@x", "Mobil", "keluar", "2024-06-14T10:00:00Z"),
        record(6, "B2", "d@x", "Mobil", "keluar", "2024-06-14T10:05:00Z"),
    ]);
    let agg = VehicleAggregate::from_transactions(&feed.transactions);

    let entries = feed.transactions.iter().filter(|t| t.is_entry()).count() as u64;
    let exits = feed.transactions.iter().filter(|t| t.is_exit()).count() as u64;
    assert_eq!(agg.total_entries(), entries);
    assert_eq!(agg.total_exits(), exits);

    let names: Vec<&str> = agg.rows().iter().map(|r| r.vehicle_type.as_str()).collect();
    assert_eq!(names, vec!["Motor", "Mobil", ""]);
}

#[test]
fn test_seven_day_boundary_is_inclusive() {
    let now = utc(2024, 6, 15, 9, 0);
    let boundary = (now - Duration::days(7)).to_rfc3339();
    let just_before = (now - Duration::days(7) - Duration::seconds(1)).to_rfc3339();
    let feed = feed(&[
        record(1, "A1", "a@x", "Motor", "masuk", &boundary),
        record(2, "A1", "a@x", "Motor", "masuk", &just_before),
    ]);

    let filtered = filter_by_scope(&feed.transactions, TimeScope::Last7Days, now);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 1);
}

#[test]
fn test_hourly_window_example() {
    let feed = feed(&[
        record(1, "A1", "a@x", "Motor", "masuk", "2024-06-14T09:05:00Z"),
        record(2, "A1", "a@x", "Motor", "keluar", "2024-06-14T09:40:00Z"),
        record(3, "A2", "b@x", "Motor", "masuk", "2024-06-14T07:59:00Z"),
    ]);
    let now = utc(2024, 6, 14, 20, 0);
    let window = TimeWindow::new("08:00".parse().unwrap(), "11:59".parse().unwrap());

    let rows = hourly_series(&feed.transactions, &window, now);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hour, 9);
    assert_eq!((rows[0].entries, rows[0].exits), (1, 1));
}

#[test]
fn test_valid_count_is_sum_of_group_minima() {
    // Date total: 3 masuk, 3 keluar. Global min would be 3; per-group sum is 1.
    let feed = feed(&[
        record(1, "A1", "a@x", "Motor", "masuk", "2024-06-14T08:00:00Z"),
        record(2, "A1", "a@x", "Motor", "masuk", "2024-06-14T08:30:00Z"),
        record(3, "B1", "b@x", "Mobil", "keluar", "2024-06-14T09:00:00Z"),
        record(4, "B1", "b@x", "Mobil", "keluar", "2024-06-14T09:30:00Z"),
        record(5, "C1", "c@x", "Motor", "masuk", "2024-06-14T10:00:00Z"),
        record(6, "C1", "c@x", "Motor", "keluar", "2024-06-14T11:00:00Z"),
    ]);

    let rows = bucketed_series(&feed.transactions, TimeScope::Last30Days);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].valid_count, 1);
}

#[test]
fn test_year_scope_buckets_by_month_and_labels() {
    let feed = feed(&[
        record(1, "A1", "a@x", "Motor", "masuk", "2024-03-01T08:00:00Z"),
        record(2, "A1", "a@x", "Motor", "keluar", "2024-03-01T09:00:00Z"),
        record(3, "A1", "a@x", "Motor", "masuk", "2023-11-20T08:00:00Z"),
        record(4, "A1", "a@x", "Motor", "keluar", "2023-11-21T09:00:00Z"),
        record(5, "A1", "a@x", "Motor", "masuk", "2022-01-01T08:00:00Z"),
    ]);
    let now = utc(2024, 6, 15, 9, 0);

    let query = DashboardQuery::new(TimeScope::LastYear, TimeWindow::default());
    let snapshot = Dashboard::build(&feed, &query, now);

    match snapshot.line {
        LineSeries::Bucketed(rows) => {
            let keys: Vec<&str> = rows.iter().map(|r| r.bucket_key.as_str()).collect();
            assert_eq!(keys, vec!["2023-11", "2024-03"]);
            assert_eq!(rows[0].valid_count, 1);
            assert_eq!(rows[1].label, "2024-03");
        }
        other => panic!("expected bucketed series, got {other:?}"),
    }
}

#[test]
fn test_idempotent_with_frozen_now() {
    let feed = dummy_feed();
    let now = utc(2024, 6, 14, 18, 0);

    for scope in [
        TimeScope::Today,
        TimeScope::Last7Days,
        TimeScope::Last30Days,
        TimeScope::LastYear,
        TimeScope::AllTime,
    ] {
        let query = DashboardQuery::new(scope, TimeWindow::default());
        let first = Dashboard::build(&feed, &query, now);
        let second = Dashboard::build(&feed, &query, now);
        assert!(first.same_content(&second), "scope {scope} not idempotent");
    }
}

#[test]
fn test_dummy_feed_today_dashboard() {
    let now = utc(2024, 6, 14, 18, 0);
    let snapshot = Dashboard::build(&dummy_feed(), &DashboardQuery::default(), now);

    assert_eq!(snapshot.report.total_transactions, 5);
    assert_eq!(snapshot.report.motorcycle.masuk, 5);
    assert_eq!(snapshot.report.motorcycle.keluar, 5);
    assert_eq!(snapshot.report.car.masuk, 0);

    // Window 08:00-11:59: masuk 08:20, 09:15, 10:15, 11:00 and keluar 10:45, 11:45
    match snapshot.line {
        LineSeries::Hourly(rows) => {
            let summary: Vec<(u32, u64, u64)> =
                rows.iter().map(|r| (r.hour, r.entries, r.exits)).collect();
            assert_eq!(summary, vec![(8, 1, 0), (9, 1, 0), (10, 1, 1), (11, 1, 1)]);
        }
        other => panic!("expected hourly series, got {other:?}"),
    }
}

#[test]
fn test_hourly_uses_utc_hour_for_offset_timestamps() {
    let feed = feed(&[
        // 02:30 UTC
        record(1, "A1", "a@x", "Motor", "masuk", "2024-06-14T09:30:00+07:00"),
        // 22:00 UTC the same day, although the local date is the 15th
        record(2, "A1", "a@x", "Motor", "keluar", "2024-06-15T05:00:00+07:00"),
        // 23:00 UTC the day before
        record(3, "A2", "b@x", "Motor", "masuk", "2024-06-14T06:00:00+07:00"),
    ]);
    let now = utc(2024, 6, 14, 23, 30);
    let window = TimeWindow::new("00:00".parse().unwrap(), "23:59".parse().unwrap());

    let rows = hourly_series(&feed.transactions, &window, now);
    let summary: Vec<(&str, u64, u64)> =
        rows.iter().map(|r| (r.label.as_str(), r.entries, r.exits)).collect();
    assert_eq!(summary, vec![("2:00", 1, 0), ("22:00", 0, 1)]);
}
