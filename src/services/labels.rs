//! Display labels for chart ticks. Presentation only, never used for ordering.

use crate::domain::scope::TimeScope;

/// Format a bucket key for display under `scope`
///
/// - `today`: unchanged (`9:00`)
/// - `7days` / `1month`: `MM-DD`
/// - `1year`: `YYYY-MM`, month zero-padded
/// - `all`: bare year
pub fn format_tick(scope: TimeScope, key: &str) -> String {
    match scope {
        TimeScope::Today => key.to_string(),
        TimeScope::Last7Days | TimeScope::Last30Days => {
            key.split_once('-').map_or(key, |(_, rest)| rest).to_string()
        }
        TimeScope::LastYear => {
            let mut parts = key.split('-');
            let year = parts.next().unwrap_or_default();
            match parts.next() {
                Some(month) => format!("{year}-{month:0>2}"),
                None => key.to_string(),
            }
        }
        TimeScope::AllTime => key.split('-').next().unwrap_or(key).to_string(),
    }
}
