//! Per-vehicle entry/exit counts for the bar chart and summary report

use crate::domain::types::{Transaction, TransactionStatus, VehicleType};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Entry/exit counts for one vehicle type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleCounts {
    #[serde(rename = "name", serialize_with = "serialize_vehicle")]
    pub vehicle_type: VehicleType,
    #[serde(rename = "masuk")]
    pub entries: u64,
    #[serde(rename = "keluar")]
    pub exits: u64,
}

fn serialize_vehicle<S>(vehicle: &VehicleType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(vehicle.as_str())
}

/// Vehicle aggregate in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VehicleAggregate {
    rows: Vec<VehicleCounts>,
}

impl VehicleAggregate {
    /// Count entries and exits per vehicle type in a single pass.
    ///
    /// Every vehicle type seen gets a row, even if none of its events is an
    /// entry or exit. No time filtering happens here.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut rows: Vec<VehicleCounts> = Vec::new();
        let mut index: FxHashMap<&VehicleType, usize> = FxHashMap::default();

        for tx in transactions {
            let slot = *index.entry(&tx.vehicle_type).or_insert_with(|| {
                rows.push(VehicleCounts {
                    vehicle_type: tx.vehicle_type.clone(),
                    entries: 0,
                    exits: 0,
                });
                rows.len() - 1
            });

            match tx.status {
                TransactionStatus::Entry => rows[slot].entries += 1,
                TransactionStatus::Exit => rows[slot].exits += 1,
                TransactionStatus::Other(_) => {}
            }
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[VehicleCounts] {
        &self.rows
    }

    pub fn get(&self, vehicle_type: &VehicleType) -> Option<&VehicleCounts> {
        self.rows.iter().find(|row| &row.vehicle_type == vehicle_type)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total_entries(&self) -> u64 {
        self.rows.iter().map(|row| row.entries).sum()
    }

    pub fn total_exits(&self) -> u64 {
        self.rows.iter().map(|row| row.exits).sum()
    }
}
