//! Subscription entitlement model for the learning platform.
//!
//! Maps a user's subscription record and usage counters to access decisions,
//! remaining quotas and display strings. Everything here is a pure function
//! of its inputs; callers fetch the subscription and usage documents and
//! supply the current time.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::EntitlementError;
pub use models::{
    plan_catalog, Feature, Limit, LimitResource, LimitStatus, Plan, PlanFeatures, Quota,
    RawTimestamp, SubscriptionDetails, SubscriptionStatus, UsageLimits, UsageTracking,
};
pub use services::{Clock, EntitlementService, FixedClock, SystemClock};
