//! Entitlement errors and their mapping onto the shared `AppError`.

use chrono::{DateTime, Duration, Utc};
use platform_core::error::AppError;
use thiserror::Error;

use crate::models::{Feature, Limit, LimitResource, Plan};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Unknown subscription status: {0}")]
    UnknownStatus(String),

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Unknown usage resource: {0}")]
    UnknownResource(String),

    #[error("No active subscription")]
    NoActiveSubscription,

    #[error("Feature {feature} is not included in the {plan} plan")]
    FeatureNotIncluded { plan: Plan, feature: Feature },

    #[error("Resource {resource} is not included in the {plan} plan")]
    ResourceNotIncluded { plan: Plan, resource: LimitResource },

    #[error("Usage limit reached for {resource}: {used} used of {limit}")]
    QuotaExceeded {
        resource: LimitResource,
        limit: Limit,
        used: u32,
    },
}

impl EntitlementError {
    /// Seconds until the quota behind this error refills, when that is known.
    ///
    /// Only daily quotas have a predictable refill (next UTC midnight).
    pub fn retry_after(&self, now: DateTime<Utc>) -> Option<u64> {
        match self {
            EntitlementError::QuotaExceeded { resource, limit, .. }
                if resource.is_daily() && *limit != Limit::Disabled =>
            {
                let tomorrow = now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?.and_utc();
                let wait: Duration = tomorrow - now;
                u64::try_from(wait.num_seconds()).ok()
            }
            _ => None,
        }
    }

    /// Convert into the shared error type, filling in the retry hint.
    ///
    /// There is no `From` impl: the retry hint depends on `now`, which callers
    /// take from their `Clock`.
    pub fn into_app_error(self, now: DateTime<Utc>) -> AppError {
        let retry_after = self.retry_after(now);
        match self {
            EntitlementError::UnknownPlan(_)
            | EntitlementError::UnknownStatus(_)
            | EntitlementError::UnknownFeature(_)
            | EntitlementError::UnknownResource(_) => {
                AppError::BadRequest(anyhow::Error::new(self))
            }
            EntitlementError::NoActiveSubscription
            | EntitlementError::FeatureNotIncluded { .. }
            | EntitlementError::ResourceNotIncluded { .. } => {
                AppError::Forbidden(anyhow::Error::new(self))
            }
            EntitlementError::QuotaExceeded { .. } => {
                AppError::TooManyRequests(self.to_string(), retry_after)
            }
        }
    }
}
