//! Transaction types for the parking statistics feed
//!
//! `RawTransaction` mirrors the JSON records served by the statistics
//! endpoint. `Transaction` is the validated form the aggregators work on.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vehicle type as reported by the parking slot (`parkiran.kendaraan`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Motorcycle,
    /// Any other name, including the empty string for missing fields
    Other(String),
}

impl VehicleType {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleType::Car => "Mobil",
            VehicleType::Motorcycle => "Motor",
            VehicleType::Other(name) => name,
        }
    }
}

impl From<&str> for VehicleType {
    fn from(s: &str) -> Self {
        match s {
            "Mobil" => VehicleType::Car,
            "Motor" => VehicleType::Motorcycle,
            other => VehicleType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate event recorded for a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// "masuk"
    Entry,
    /// "keluar"
    Exit,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Entry => "masuk",
            TransactionStatus::Exit => "keluar",
            TransactionStatus::Other(s) => s,
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        match s {
            "masuk" => TransactionStatus::Entry,
            "keluar" => TransactionStatus::Exit,
            other => TransactionStatus::Other(other.to_string()),
        }
    }
}

/// Nested slot info on a wire record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParkiran {
    #[serde(default)]
    pub kendaraan: Option<String>,
}

/// Transaction record exactly as served by `/api/statistic/transaksi`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub blok_parkir: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id_transaksi: i64,
    #[serde(default)]
    pub parkiran: Option<RawParkiran>,
    #[serde(default)]
    pub status: String,
    pub waktu_parkir: String,
}

/// Response envelope of the statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeed {
    #[serde(rename = "totalTransaksi", default)]
    pub total_transaksi: u64,
    #[serde(default)]
    pub transaksi: Vec<RawTransaction>,
}

/// Validated parking transaction event
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub vehicle_type: VehicleType,
    pub status: TransactionStatus,
    pub parking_block: String,
    pub owner_email: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn is_entry(&self) -> bool {
        self.status == TransactionStatus::Entry
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.status == TransactionStatus::Exit
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = anyhow::Error;

    fn try_from(raw: RawTransaction) -> anyhow::Result<Self> {
        let timestamp = DateTime::parse_from_rfc3339(&raw.waktu_parkir)
            .with_context(|| {
                format!(
                    "invalid waktu_parkir {:?} on transaction {}",
                    raw.waktu_parkir, raw.id_transaksi
                )
            })?
            .with_timezone(&Utc);

        let kendaraan = raw.parkiran.and_then(|p| p.kendaraan).unwrap_or_default();

        Ok(Self {
            id: raw.id_transaksi,
            vehicle_type: VehicleType::from(kendaraan.as_str()),
            status: TransactionStatus::from(raw.status.as_str()),
            parking_block: raw.blok_parkir,
            owner_email: raw.email,
            timestamp,
        })
    }
}

/// Where a feed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrigin {
    /// Statistics endpoint answered with a usable body
    Live,
    /// Bundled dummy dataset used after a failed fetch
    Fallback,
    /// Read from a local JSON file
    File,
}

impl FeedOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedOrigin::Live => "live",
            FeedOrigin::Fallback => "fallback",
            FeedOrigin::File => "file",
        }
    }
}

/// Transaction list plus the server-reported total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFeed {
    /// `totalTransaksi` as reported upstream, not recomputed
    pub total: u64,
    pub transactions: Vec<Transaction>,
}

impl TransactionFeed {
    /// Convert a wire feed, returning the feed and the records that failed validation
    pub fn from_raw(raw: RawFeed) -> (Self, Vec<anyhow::Error>) {
        let mut transactions = Vec::with_capacity(raw.transaksi.len());
        let mut rejected = Vec::new();

        for record in raw.transaksi {
            match Transaction::try_from(record) {
                Ok(tx) => transactions.push(tx),
                Err(e) => rejected.push(e),
            }
        }

        (Self { total: raw.total_transaksi, transactions }, rejected)
    }
}
