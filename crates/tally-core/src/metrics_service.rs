//! Metrics computed from a full ledger snapshot.
//!
//! Every function here is pure: the engine keeps no state between calls and
//! always recomputes from the entries it is handed.

use chrono::NaiveDate;

use tally_domain::{DailyTotals, Entry, MetricsReport, Tier, TimeBucket, WeakBucket};

use crate::quota_service::QuotaService;

/// Short rolling window, in active days.
pub const WEEK_WINDOW: usize = 7;
/// Long rolling window, in active days.
pub const MONTH_WINDOW: usize = 30;

pub struct MetricsService;

impl MetricsService {
    /// Sums income per date. Dates without entries are not present in the result.
    pub fn daily_totals(entries: &[Entry]) -> DailyTotals {
        let mut totals = DailyTotals::new();
        for entry in entries {
            *totals.entry(entry.date).or_insert(0.0) += entry.income;
        }
        totals
    }

    /// Averages the totals of the most recent `window` dates that have entries.
    ///
    /// The window counts active dates, not calendar days: a tenant idle for
    /// three weeks and then active for three days is averaged over those three
    /// days only. Every date in `daily` is a candidate, including any dated
    /// after `_today`. Returns 0.0 with no data.
    pub fn rolling_average(daily: &DailyTotals, _today: NaiveDate, window: usize) -> f64 {
        let active: Vec<f64> = daily.values().copied().collect();
        let start = active.len().saturating_sub(window);
        average(&active[start..])
    }

    /// Total income recorded on `today`, rounded to cents.
    pub fn today_total(entries: &[Entry], today: NaiveDate) -> f64 {
        round_cents(
            entries
                .iter()
                .filter(|entry| entry.is_on(today))
                .map(|entry| entry.income)
                .sum(),
        )
    }

    /// Finds the time bucket with the lowest income today.
    ///
    /// Only entries dated `today` that carry a time take part. Hours outside
    /// every bucket and unreadable times add nothing, so an empty bucket sums
    /// to zero and usually wins. Ties go to the earlier bucket.
    pub fn weakest_time_bucket(entries: &[Entry], today: NaiveDate) -> Option<WeakBucket> {
        let timed: Vec<&Entry> = entries
            .iter()
            .filter(|entry| entry.is_on(today) && entry.has_time())
            .collect();
        if timed.is_empty() {
            return None;
        }

        let mut sums = [0.0_f64; 3];
        for entry in timed {
            let Some(bucket) = entry.hour().and_then(TimeBucket::for_hour) else {
                continue;
            };
            if let Some(slot) = TimeBucket::ALL.iter().position(|b| *b == bucket) {
                sums[slot] += entry.income;
            }
        }

        let mut weakest = WeakBucket {
            bucket: TimeBucket::ALL[0],
            total: sums[0],
        };
        for (bucket, total) in TimeBucket::ALL.into_iter().zip(sums).skip(1) {
            if total < weakest.total {
                weakest = WeakBucket { bucket, total };
            }
        }
        Some(weakest)
    }

    /// Newest-first view of the last `limit` entries.
    pub fn recent_entries(entries: &[Entry], limit: usize) -> Vec<Entry> {
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Composes the complete dashboard report for a tenant.
    pub fn build_report(entries: &[Entry], tier: &Tier, today: NaiveDate) -> MetricsReport {
        let daily = Self::daily_totals(entries);
        MetricsReport {
            today,
            today_total: Self::today_total(entries, today),
            average_7: Self::rolling_average(&daily, today, WEEK_WINDOW),
            average_30: Self::rolling_average(&daily, today, MONTH_WINDOW),
            weakest_bucket: Self::weakest_time_bucket(entries, today),
            quota: QuotaService::quota_status(entries, tier, today),
        }
    }
}

/// Rounds to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round_cents(values.iter().sum::<f64>() / values.len() as f64)
}
