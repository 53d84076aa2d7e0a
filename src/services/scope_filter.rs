//! Time-scope filtering against an injected "now"
//!
//! Only `today` has an upper bound. The rolling scopes keep everything at or
//! after their lower bound, so future-dated events always pass them.

use crate::domain::scope::TimeScope;
use crate::domain::types::Transaction;
use chrono::{DateTime, Duration, Months, Utc};

/// Inclusive lower bound of a rolling scope, `None` for `today` and `all`
pub fn scope_lower_bound(scope: TimeScope, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match scope {
        TimeScope::Last7Days => Some(now - Duration::days(7)),
        TimeScope::Last30Days => Some(now - Duration::days(30)),
        // End-of-month clamped: 2024-02-29 minus one year is 2023-02-28
        TimeScope::LastYear => {
            Some(now.checked_sub_months(Months::new(12)).unwrap_or(DateTime::<Utc>::MIN_UTC))
        }
        TimeScope::Today | TimeScope::AllTime => None,
    }
}

/// True when the transaction falls inside `scope` as seen from `now`
#[inline]
pub fn in_scope(tx: &Transaction, scope: TimeScope, now: DateTime<Utc>) -> bool {
    match scope {
        TimeScope::Today => tx.timestamp.date_naive() == now.date_naive(),
        TimeScope::AllTime => true,
        _ => scope_lower_bound(scope, now).map_or(true, |bound| tx.timestamp >= bound),
    }
}

/// Subsequence of `transactions` inside `scope`, input order preserved
pub fn filter_by_scope(
    transactions: &[Transaction],
    scope: TimeScope,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    transactions.iter().filter(|tx| in_scope(tx, scope, now)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TransactionStatus, VehicleType};
    use chrono::TimeZone;

    fn at(ts: DateTime<Utc>) -> Transaction {
        Transaction {
            id: 0,
            vehicle_type: VehicleType::Motorcycle,
            status: TransactionStatus::Entry,
            parking_block: "A1".to_string(),
            owner_email: "user@example.com".to_string(),
            timestamp: ts,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_seven_days_boundary_inclusive() {
        let now = now();
        let txs = vec![
            at(now - Duration::days(7)),
            at(now - Duration::days(7) - Duration::seconds(1)),
            at(now - Duration::days(3)),
        ];
        let filtered = filter_by_scope(&txs, TimeScope::Last7Days, now);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].timestamp, now - Duration::days(7));
    }

    #[test]
    fn test_thirty_days_bound() {
        let now = now();
        assert!(in_scope(&at(now - Duration::days(30)), TimeScope::Last30Days, now));
        assert!(!in_scope(&at(now - Duration::days(31)), TimeScope::Last30Days, now));
        assert!(!in_scope(&at(now - Duration::days(8)), TimeScope::Last7Days, now));
    }

    #[test]
    fn test_future_events_pass_rolling_scopes() {
        let now = now();
        let future = at(now + Duration::days(400));
        assert!(in_scope(&future, TimeScope::Last7Days, now));
        assert!(in_scope(&future, TimeScope::Last30Days, now));
        assert!(in_scope(&future, TimeScope::LastYear, now));
        assert!(!in_scope(&future, TimeScope::Today, now));
    }

    #[test]
    fn test_today_excludes_yesterday_one_minute_ago() {
        let now = Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap();
        let yesterday = at(now - Duration::minutes(1));
        assert!(!in_scope(&yesterday, TimeScope::Today, now));
        assert!(in_scope(&at(now + Duration::hours(23)), TimeScope::Today, now));
    }

    #[test]
    fn test_last_year_is_calendar_year() {
        let now = now();
        let bound = Utc.with_ymd_and_hms(2023, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(scope_lower_bound(TimeScope::LastYear, now), Some(bound));
        assert!(in_scope(&at(bound), TimeScope::LastYear, now));
        assert!(!in_scope(&at(bound - Duration::seconds(1)), TimeScope::LastYear, now));
    }

    #[test]
    fn test_last_year_clamps_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap();
        let bound = scope_lower_bound(TimeScope::LastYear, now).unwrap();
        assert_eq!(bound, Utc.with_ymd_and_hms(2023, 2, 28, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_all_time_keeps_everything() {
        let now = now();
        let txs = vec![at(now - Duration::days(5000)), at(now + Duration::days(5))];
        assert_eq!(filter_by_scope(&txs, TimeScope::AllTime, now).len(), 2);
    }
}
