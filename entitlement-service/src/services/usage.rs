//! Remaining-quota calculation.
//!
//! Without an effective plan every resource is treated as disabled, so the
//! caller sees zero remaining rather than a separate "no subscription" case.

use chrono::{DateTime, Utc};

use super::evaluator::effective_plan;
use crate::models::{
    plan_catalog, Limit, LimitResource, LimitStatus, Quota, SubscriptionDetails, UsageLimits,
    UsageTracking,
};

/// Cap that applies to `resource` for this subscription right now.
pub fn limit_for(
    subscription: Option<&SubscriptionDetails>,
    resource: LimitResource,
    now: DateTime<Utc>,
) -> Limit {
    effective_plan(subscription, now)
        .map(|plan| plan_catalog().get(plan).limits.get(resource))
        .unwrap_or(Limit::Disabled)
}

/// Units of `resource` still available after `used_so_far`.
pub fn remaining_quota(
    subscription: Option<&SubscriptionDetails>,
    resource: LimitResource,
    used_so_far: u32,
    now: DateTime<Utc>,
) -> Quota {
    limit_for(subscription, resource, now).remaining(used_so_far)
}

pub fn remaining_ai_questions(
    subscription: Option<&SubscriptionDetails>,
    usage: &UsageTracking,
    now: DateTime<Utc>,
) -> Quota {
    remaining_quota(
        subscription,
        LimitResource::AiQuestionsPerDay,
        usage.ai_questions_today,
        now,
    )
}

/// Limit report for every tracked resource.
pub fn check_all_limits(
    subscription: Option<&SubscriptionDetails>,
    usage: &UsageTracking,
    now: DateTime<Utc>,
) -> UsageLimits {
    let status = |resource: LimitResource| {
        LimitStatus::new(limit_for(subscription, resource, now), usage.used(resource))
    };

    UsageLimits {
        ai_questions: status(LimitResource::AiQuestionsPerDay),
        courses: status(LimitResource::CoursesPerMonth),
        downloads: status(LimitResource::DownloadableResources),
        webinars: status(LimitResource::WebinarsPerMonth),
    }
}
