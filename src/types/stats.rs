//! Statistics types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event counters for one day or one aggregate window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCounters {
    /// Messages processed.
    pub processed: Option<i64>,
    /// Messages delivered.
    pub delivered: Option<i64>,
    /// Messages dropped.
    pub dropped: Option<i64>,
    /// Hard bounces.
    pub hard_bounced: Option<i64>,
    /// Soft bounces.
    pub soft_bounced: Option<i64>,
    /// Opens.
    pub opened: Option<i64>,
    /// Clicks.
    pub clicked: Option<i64>,
    /// Unsubscribes.
    pub unsubscribed: Option<i64>,
    /// Spam reports. Account-level stats call this field `spams`.
    #[serde(alias = "spams")]
    pub spam: Option<i64>,
}

/// Counters for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    /// Day in `YYYY-MM-DD` form.
    pub date: Option<String>,
    /// Counters for that day.
    pub stat: Option<StatCounters>,
}

/// Running totals over a list of daily stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTotals {
    /// Number of days that carried counters.
    pub days: usize,
    /// Total processed.
    pub processed: i64,
    /// Total delivered.
    pub delivered: i64,
}

impl StatTotals {
    /// Sums processed and delivered across days; absent counters count as zero.
    ///
    /// Sums saturate at `i64::MAX`.
    pub fn from_daily(stats: &[DailyStat]) -> Self {
        stats
            .iter()
            .filter_map(|day| day.stat.as_ref())
            .fold(Self::default(), |totals, stat| Self {
                days: totals.days + 1,
                processed: totals.processed.saturating_add(stat.processed.unwrap_or(0)),
                delivered: totals.delivered.saturating_add(stat.delivered.unwrap_or(0)),
            })
    }
}

/// Inclusive date range for statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

impl StatsWindow {
    /// Returns the window `[today - days, today]`.
    pub fn trailing(today: NaiveDate, days: u64) -> Self {
        let from = today
            .checked_sub_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    /// Returns the trailing window ending on the process's local date.
    pub fn trailing_from_local_today(days: u64) -> Self {
        Self::trailing(chrono::Local::now().date_naive(), days)
    }

    /// Returns `(from, to)` formatted as `YYYY-MM-DD`.
    pub fn query_dates(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }
}

impl std::fmt::Display for StatsWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (from, to) = self.query_dates();
        write!(f, "{} to {}", from, to)
    }
}
