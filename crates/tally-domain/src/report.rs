//! Derived, output-only structures produced by the metrics engine.

use std::{fmt, ops::RangeInclusive};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed time-of-day partitions. Hours between and around them belong to none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
}

impl TimeBucket {
    /// Buckets in tie-break order.
    pub const ALL: [TimeBucket; 3] = [TimeBucket::Morning, TimeBucket::Afternoon, TimeBucket::Evening];

    pub fn hours(self) -> RangeInclusive<u32> {
        match self {
            TimeBucket::Morning => 8..=11,
            TimeBucket::Afternoon => 12..=16,
            TimeBucket::Evening => 17..=22,
        }
    }

    pub fn for_hour(hour: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.hours().contains(&hour))
    }

    pub fn id(self) -> &'static str {
        match self {
            TimeBucket::Morning => "morning",
            TimeBucket::Afternoon => "afternoon",
            TimeBucket::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The time bucket with the lowest summed income for a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeakBucket {
    pub bucket: TimeBucket,
    pub total: f64,
}

/// Entries recorded on a day compared with the tier's daily allowance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaStatus {
    pub reached: bool,
    pub count: usize,
    pub limit: usize,
}

impl QuotaStatus {
    pub fn new(count: usize, limit: usize) -> Self {
        Self {
            reached: count >= limit,
            count,
            limit,
        }
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.count)
    }
}

/// Everything the dashboard needs to display for a tenant on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    pub today: NaiveDate,
    pub today_total: f64,
    pub average_7: f64,
    pub average_30: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakest_bucket: Option<WeakBucket>,
    pub quota: QuotaStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_map_to_expected_buckets() {
        assert_eq!(TimeBucket::for_hour(7), None);
        assert_eq!(TimeBucket::for_hour(8), Some(TimeBucket::Morning));
        assert_eq!(TimeBucket::for_hour(11), Some(TimeBucket::Morning));
        assert_eq!(TimeBucket::for_hour(12), Some(TimeBucket::Afternoon));
        assert_eq!(TimeBucket::for_hour(16), Some(TimeBucket::Afternoon));
        assert_eq!(TimeBucket::for_hour(17), Some(TimeBucket::Evening));
        assert_eq!(TimeBucket::for_hour(22), Some(TimeBucket::Evening));
        assert_eq!(TimeBucket::for_hour(23), None);
    }

    #[test]
    fn quota_status_reports_reached_at_limit() {
        assert!(!QuotaStatus::new(0, 1).reached);
        assert!(QuotaStatus::new(1, 1).reached);
        assert!(QuotaStatus::new(4, 3).reached);
        assert_eq!(QuotaStatus::new(4, 3).remaining(), 0);
        assert_eq!(QuotaStatus::new(1, 3).remaining(), 2);
    }
}
