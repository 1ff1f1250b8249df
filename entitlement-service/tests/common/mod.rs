//! Test helpers for entitlement-service integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use entitlement_service::config::DisplayConfig;
use entitlement_service::{
    EntitlementService, FixedClock, Plan, SubscriptionDetails, SubscriptionStatus, UsageTracking,
};

/// Fixed "now" shared by every integration test.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 3, 15, 9, 30, 0).unwrap()
}

/// Service bound to [`test_now`].
pub fn test_service() -> EntitlementService<FixedClock> {
    EntitlementService::with_clock(FixedClock(test_now()), DisplayConfig::default())
}

pub fn active(plan: Plan) -> SubscriptionDetails {
    SubscriptionDetails::new(plan, SubscriptionStatus::Active)
}

pub fn active_for_days(plan: Plan, days: i64) -> SubscriptionDetails {
    active(plan).with_expires_at(test_now() + Duration::days(days))
}

pub fn with_status(plan: Plan, status: SubscriptionStatus) -> SubscriptionDetails {
    SubscriptionDetails::new(plan, status)
}

pub fn usage(ai: u32, courses: u32, downloads: u32, webinars: u32) -> UsageTracking {
    UsageTracking {
        ai_questions_today: ai,
        courses_this_month: courses,
        downloads_this_month: downloads,
        webinars_this_month: webinars,
        last_reset: None,
    }
}
