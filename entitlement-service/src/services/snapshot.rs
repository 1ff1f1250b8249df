//! One-shot evaluation of everything a subscription grants.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::access::enabled_features;
use super::evaluator::effective_plan;
use super::formatter::{
    format_subscription, upgrade_suggestions, FormattedSubscription, UpgradeSuggestion,
};
use super::usage::check_all_limits;
use crate::config::DisplayConfig;
use crate::models::{Feature, Plan, SubscriptionDetails, UsageLimits, UsageTracking};

/// Entitlements of one user at one instant, ready to serialise for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSnapshot {
    pub has_subscription: bool,
    pub is_active: bool,
    pub plan: Option<Plan>,
    pub features: Vec<Feature>,
    pub limits: UsageLimits,
    pub subscription: FormattedSubscription,
    pub upgrades: Vec<UpgradeSuggestion>,
    pub evaluated_at: DateTime<Utc>,
}

impl EntitlementSnapshot {
    pub fn evaluate(
        subscription: Option<&SubscriptionDetails>,
        usage: &UsageTracking,
        now: DateTime<Utc>,
        display: &DisplayConfig,
    ) -> Self {
        let plan = effective_plan(subscription, now);
        Self {
            has_subscription: subscription.is_some(),
            is_active: plan.is_some(),
            plan,
            features: enabled_features(subscription, now),
            limits: check_all_limits(subscription, usage, now),
            subscription: format_subscription(subscription, now, display),
            upgrades: upgrade_suggestions(subscription, now),
            evaluated_at: now,
        }
    }
}
