//! Enforcing checks for API routes.
//!
//! The query functions in `access` and `usage` answer questions; these turn
//! a "no" into an [`EntitlementError`] the route can return, and record the
//! denial.

use chrono::{DateTime, Utc};

use super::access::has_feature_access;
use super::evaluator::effective_plan;
use super::metrics;
use crate::error::EntitlementError;
use crate::models::{
    plan_catalog, Feature, Limit, LimitResource, Plan, Quota, SubscriptionDetails,
};

/// Effective plan, or `NoActiveSubscription`.
pub fn require_active(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
) -> Result<Plan, EntitlementError> {
    active_plan(subscription, now, "require_active")
}

fn active_plan(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
    operation: &'static str,
) -> Result<Plan, EntitlementError> {
    effective_plan(subscription, now).ok_or_else(|| {
        tracing::info!(
            operation = operation,
            status = subscription.map(|s| s.status.as_str()).unwrap_or("none"),
            "Access denied: no active subscription"
        );
        metrics::record_inactive_subscription(operation);
        EntitlementError::NoActiveSubscription
    })
}

pub fn require_feature(
    subscription: Option<&SubscriptionDetails>,
    feature: Feature,
    now: DateTime<Utc>,
) -> Result<(), EntitlementError> {
    let plan = active_plan(subscription, now, "require_feature")?;
    let allowed = has_feature_access(subscription, feature, now);
    metrics::record_feature_check(feature.as_str(), allowed);

    if allowed {
        Ok(())
    } else {
        tracing::info!(
            plan = %plan,
            feature = %feature,
            "Access denied: feature not included in plan"
        );
        Err(EntitlementError::FeatureNotIncluded { plan, feature })
    }
}

/// Check that one more unit of `resource` may be consumed.
///
/// Returns the quota remaining before the new unit is consumed. A resource the
/// plan doesn't include at all is `ResourceNotIncluded`, not a quota error.
pub fn require_quota(
    subscription: Option<&SubscriptionDetails>,
    resource: LimitResource,
    used: u32,
    now: DateTime<Utc>,
) -> Result<Quota, EntitlementError> {
    let plan = active_plan(subscription, now, "require_quota")?;
    let limit = plan_catalog().get(plan).limits.get(resource);
    if limit == Limit::Disabled {
        tracing::info!(
            plan = %plan,
            resource = %resource,
            "Access denied: resource not included in plan"
        );
        metrics::record_quota_denial(resource.as_str(), plan.as_str());
        return Err(EntitlementError::ResourceNotIncluded { plan, resource });
    }

    let remaining = limit.remaining(used);

    if remaining.is_available() {
        Ok(remaining)
    } else {
        tracing::info!(
            plan = %plan,
            resource = %resource,
            limit = %limit,
            used = used,
            "Usage limit reached"
        );
        metrics::record_quota_denial(resource.as_str(), plan.as_str());
        Err(EntitlementError::QuotaExceeded {
            resource,
            limit,
            used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_require_active() {
        let sub = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::Active);
        assert_eq!(require_active(Some(&sub), now()), Ok(Plan::Premium));
        assert_eq!(
            require_active(None, now()),
            Err(EntitlementError::NoActiveSubscription)
        );

        let past_due = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::PastDue);
        assert_eq!(
            require_active(Some(&past_due), now()),
            Err(EntitlementError::NoActiveSubscription)
        );
    }

    #[test]
    fn test_require_feature() {
        let basic = SubscriptionDetails::new(Plan::Basic, SubscriptionStatus::Active);
        assert_eq!(require_feature(Some(&basic), Feature::MobileApp, now()), Ok(()));
        assert_eq!(
            require_feature(Some(&basic), Feature::AiAssistant, now()),
            Err(EntitlementError::FeatureNotIncluded {
                plan: Plan::Basic,
                feature: Feature::AiAssistant
            })
        );
    }

    #[test]
    fn test_require_feature_on_expired_subscription() {
        let sub = SubscriptionDetails::new(Plan::Pro, SubscriptionStatus::Active)
            .with_expires_at(now() - Duration::days(3));
        assert_eq!(
            require_feature(Some(&sub), Feature::MobileApp, now()),
            Err(EntitlementError::NoActiveSubscription)
        );
    }

    #[test]
    fn test_require_quota_allows_last_unit() {
        let sub = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::Active);
        assert_eq!(
            require_quota(Some(&sub), LimitResource::AiQuestionsPerDay, 49, now()),
            Ok(Quota::Remaining(1))
        );
    }

    #[test]
    fn test_require_quota_denies_at_limit() {
        let sub = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::Active);
        assert_eq!(
            require_quota(Some(&sub), LimitResource::AiQuestionsPerDay, 50, now()),
            Err(EntitlementError::QuotaExceeded {
                resource: LimitResource::AiQuestionsPerDay,
                limit: Limit::Capped(50),
                used: 50
            })
        );
    }

    #[test]
    fn test_require_quota_disabled_resource() {
        let sub = SubscriptionDetails::new(Plan::Basic, SubscriptionStatus::Active);
        assert_eq!(
            require_quota(Some(&sub), LimitResource::AiQuestionsPerDay, 0, now()),
            Err(EntitlementError::ResourceNotIncluded {
                plan: Plan::Basic,
                resource: LimitResource::AiQuestionsPerDay
            })
        );
    }

    #[test]
    fn test_require_quota_unlimited() {
        let sub = SubscriptionDetails::new(Plan::Pro, SubscriptionStatus::Active);
        assert_eq!(
            require_quota(Some(&sub), LimitResource::WebinarsPerMonth, 9_999, now()),
            Ok(Quota::Unlimited)
        );
    }
}
