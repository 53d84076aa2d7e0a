//! Domain models - parking transactions and time scopes
//!
//! This module contains the canonical data types used throughout the system:
//! - `Transaction` - validated entry/exit event for a parking block
//! - `RawTransaction` / `RawFeed` - wire records from the statistics endpoint
//! - `TransactionFeed` - transaction list plus the upstream total
//! - `TimeScope` - time range selector (today, 7 days, 30 days, 1 year)
//! - `ClockTime` / `TimeWindow` - time-of-day filter for the hourly chart

pub mod scope;
pub mod types;

// Re-export commonly used types at module level
pub use scope::{ClockTime, TimeScope, TimeWindow};
pub use types::{
    FeedOrigin, RawFeed, RawParkiran, RawTransaction, Transaction, TransactionFeed,
    TransactionStatus, VehicleType,
};
