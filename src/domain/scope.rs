//! Time scopes and clock-time windows used to slice the feed

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

/// Time range selector of the statistics page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScope {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days", alias = "last-7-days")]
    Last7Days,
    #[serde(rename = "1month", alias = "last-30-days")]
    Last30Days,
    #[serde(rename = "1year", alias = "last-year")]
    LastYear,
    /// No time filtering, bucketed by date, labelled by year
    #[serde(rename = "all")]
    AllTime,
}

impl TimeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeScope::Today => "today",
            TimeScope::Last7Days => "7days",
            TimeScope::Last30Days => "1month",
            TimeScope::LastYear => "1year",
            TimeScope::AllTime => "all",
        }
    }

    /// True when the scope is charted per hour instead of per date/month
    #[inline]
    pub fn is_hourly(&self) -> bool {
        matches!(self, TimeScope::Today)
    }
}

impl std::str::FromStr for TimeScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "today" => TimeScope::Today,
            "7days" | "last-7-days" => TimeScope::Last7Days,
            "1month" | "last-30-days" => TimeScope::Last30Days,
            "1year" | "last-year" => TimeScope::LastYear,
            "all" => TimeScope::AllTime,
            other => bail!(
                "unknown time scope {other:?} (expected today, 7days, 1month, 1year or all)"
            ),
        })
    }
}

impl std::fmt::Display for TimeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time of day with minute resolution, written `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> anyhow::Result<Self> {
        if hour > 23 || minute > 59 {
            bail!("clock time {hour}:{minute} out of range");
        }
        Ok(Self { hour, minute })
    }

    /// Minutes since midnight
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl std::str::FromStr for ClockTime {
    type Err = anyhow::Error;

    /// Accepts `HH:MM`, and `HH:MM:SS` with the seconds ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let hour = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow!("empty clock time"))?
            .parse::<u32>()
            .with_context(|| format!("invalid hour in clock time {s:?}"))?;
        let minute = parts
            .next()
            .ok_or_else(|| anyhow!("clock time {s:?} is missing minutes"))?
            .parse::<u32>()
            .with_context(|| format!("invalid minute in clock time {s:?}"))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Inclusive `[start, end]` window applied to today's hourly chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Both bounds inclusive. A window with start after end contains nothing.
    #[inline]
    pub fn contains_minutes(&self, minutes: u32) -> bool {
        minutes >= self.start.minutes() && minutes <= self.end.minutes()
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self { start: ClockTime { hour: 8, minute: 0 }, end: ClockTime { hour: 11, minute: 59 } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse_console_values() {
        assert_eq!("today".parse::<TimeScope>().unwrap(), TimeScope::Today);
        assert_eq!("7days".parse::<TimeScope>().unwrap(), TimeScope::Last7Days);
        assert_eq!("1month".parse::<TimeScope>().unwrap(), TimeScope::Last30Days);
        assert_eq!("1year".parse::<TimeScope>().unwrap(), TimeScope::LastYear);
        assert_eq!("all".parse::<TimeScope>().unwrap(), TimeScope::AllTime);
    }

    #[test]
    fn test_scope_parse_descriptive_names() {
        assert_eq!("last-7-days".parse::<TimeScope>().unwrap(), TimeScope::Last7Days);
        assert_eq!("last-30-days".parse::<TimeScope>().unwrap(), TimeScope::Last30Days);
        assert_eq!("last-year".parse::<TimeScope>().unwrap(), TimeScope::LastYear);
        assert!("fortnight".parse::<TimeScope>().is_err());
    }

    #[test]
    fn test_scope_serde_uses_console_values() {
        assert_eq!(serde_json::to_string(&TimeScope::Last30Days).unwrap(), "\"1month\"");
        let scope: TimeScope = serde_json::from_str("\"last-year\"").unwrap();
        assert_eq!(scope, TimeScope::LastYear);
    }

    #[test]
    fn test_clock_time_parse() {
        let t: ClockTime = "08:00".parse().unwrap();
        assert_eq!(t.minutes(), 480);
        let t: ClockTime = "11:59".parse().unwrap();
        assert_eq!(t.minutes(), 719);
        let t: ClockTime = "7:05:30".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn test_clock_time_rejects_garbage() {
        assert!("".parse::<ClockTime>().is_err());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("10:60".parse::<ClockTime>().is_err());
        assert!("10".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_window_inclusive_bounds() {
        let window = TimeWindow::default();
        assert!(window.contains_minutes(8 * 60));
        assert!(window.contains_minutes(11 * 60 + 59));
        assert!(!window.contains_minutes(7 * 60 + 59));
        assert!(!window.contains_minutes(12 * 60));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let window = TimeWindow::new("12:00".parse().unwrap(), "08:00".parse().unwrap());
        assert!(!window.contains_minutes(10 * 60));
        assert!(!window.contains_minutes(12 * 60));
    }
}
