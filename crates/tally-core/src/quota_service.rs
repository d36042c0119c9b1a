//! Daily entry allowances per subscription tier.

use chrono::NaiveDate;

use tally_domain::{Entry, QuotaStatus, Tier};

use crate::CoreError;

/// Quota granted to tiers the policy does not recognise.
///
/// This is the platinum allowance, which makes an unknown tier permissive.
pub const FALLBACK_QUOTA: usize = 3;

pub struct QuotaService;

impl QuotaService {
    /// Maximum number of entries a tenant of `tier` may record per day.
    pub fn quota_for(tier: &Tier) -> usize {
        match tier {
            Tier::Basic => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
            Tier::Other(name) => {
                tracing::debug!(tier = %name, "unknown tier, using fallback quota");
                FALLBACK_QUOTA
            }
        }
    }

    /// Counts the entries dated `today` and compares them to the tier allowance.
    pub fn quota_status(entries: &[Entry], tier: &Tier, today: NaiveDate) -> QuotaStatus {
        let count = entries.iter().filter(|entry| entry.is_on(today)).count();
        QuotaStatus::new(count, Self::quota_for(tier))
    }

    /// Turns a reached quota into [`CoreError::QuotaExceeded`].
    pub fn ensure_open(status: QuotaStatus) -> Result<(), CoreError> {
        if status.reached {
            return Err(CoreError::QuotaExceeded {
                count: status.count,
                limit: status.limit,
            });
        }
        Ok(())
    }
}
