//! Summary report: total transactions and car/motorcycle masuk/keluar

use crate::domain::types::{TransactionFeed, VehicleType};
use crate::services::vehicle_aggregator::VehicleAggregate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntryExit {
    pub masuk: u64,
    pub keluar: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    /// Upstream `totalTransaksi`
    pub total_transactions: u64,
    pub car: EntryExit,
    pub motorcycle: EntryExit,
}

impl SummaryReport {
    /// Build from the whole, unfiltered feed. Missing vehicle types report zeros.
    pub fn from_feed(feed: &TransactionFeed) -> Self {
        let aggregate = VehicleAggregate::from_transactions(&feed.transactions);
        let counts = |vehicle: &VehicleType| {
            aggregate
                .get(vehicle)
                .map(|row| EntryExit { masuk: row.entries, keluar: row.exits })
                .unwrap_or_default()
        };

        let report = Self {
            total_transactions: feed.total,
            car: counts(&VehicleType::Car),
            motorcycle: counts(&VehicleType::Motorcycle),
        };

        debug!(
            total = %report.total_transactions,
            car_masuk = %report.car.masuk,
            car_keluar = %report.car.keluar,
            motor_masuk = %report.motorcycle.masuk,
            motor_keluar = %report.motorcycle.keluar,
            "summary_report_built"
        );

        report
    }
}
