//! Expiry evaluation for saved credentials.

use chrono::{Days, Local, NaiveDateTime};

use super::entry::TIMESTAMP_FORMAT;

/// Credentials with this many days left or fewer are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// Result of an expiry check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    /// `true` when `days_remaining <= EXPIRY_WARNING_DAYS`.
    pub is_expiring: bool,
    /// Whole days until expiry, rounded down.  Negative once expired.
    pub days_remaining: i64,
}

impl ExpiryStatus {
    /// Returned for timestamps that cannot be parsed: unknown, not urgent.
    pub const UNKNOWN: Self = Self {
        is_expiring: false,
        days_remaining: 0,
    };

    pub fn is_expired(&self) -> bool {
        self.days_remaining < 0
    }
}

/// Check a saved timestamp against the local clock.
pub fn check_expiry(timestamp: &str, expiry_days: i64) -> ExpiryStatus {
    check_expiry_at(timestamp, expiry_days, Local::now().naive_local())
}

/// Check a saved timestamp against an explicit `now`.
///
/// The expiry date is `timestamp + expiry_days` calendar days.
pub fn check_expiry_at(timestamp: &str, expiry_days: i64, now: NaiveDateTime) -> ExpiryStatus {
    let Ok(saved) = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT) else {
        return ExpiryStatus::UNKNOWN;
    };

    let days = Days::new(expiry_days.unsigned_abs());
    let expires = if expiry_days >= 0 {
        saved.checked_add_days(days)
    } else {
        saved.checked_sub_days(days)
    };
    let Some(expires) = expires else {
        return ExpiryStatus::UNKNOWN;
    };

    let days_remaining = (expires - now).num_seconds().div_euclid(SECONDS_PER_DAY);

    ExpiryStatus {
        is_expiring: days_remaining <= EXPIRY_WARNING_DAYS,
        days_remaining,
    }
}
