//! Refresh timing and the business-hours gate
//!
//! Report panels refresh hourly, but only while the clock in the call
//! center's timezone reads business hours. The sync-status poll runs around
//! the clock. Decisions are pure over a UTC instant so they test without
//! faking the wall clock.

use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Call-center timezone for the business-hours gate
pub const BUSINESS_TZ: Tz = chrono_tz::America::Chicago;

/// First hour (inclusive) of the refresh window
pub const BUSINESS_OPEN_HOUR: u32 = 10;

/// Last hour (exclusive) of the refresh window
pub const BUSINESS_CLOSE_HOUR: u32 = 17;

/// Interval between gated report refreshes
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Interval between sync-status polls; not gated
pub const SYNC_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// True when the local Chicago time falls within 10:00-17:00
pub fn within_business_hours(now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&BUSINESS_TZ);
    (BUSINESS_OPEN_HOUR..BUSINESS_CLOSE_HOUR).contains(&local.hour())
}

/// Whether an hourly tick should trigger a report refresh
pub fn should_refresh(now: DateTime<Utc>) -> bool {
    within_business_hours(now)
}
