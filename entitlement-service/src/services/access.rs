//! Feature gating by effective plan.

use chrono::{DateTime, Utc};

use super::evaluator::effective_plan;
use crate::models::{plan_catalog, Feature, SubscriptionDetails};

/// Whether the subscription grants `feature` right now.
pub fn has_feature_access(
    subscription: Option<&SubscriptionDetails>,
    feature: Feature,
    now: DateTime<Utc>,
) -> bool {
    match effective_plan(subscription, now) {
        Some(plan) => plan_catalog().get(plan).access.get(feature),
        None => false,
    }
}

/// String-keyed variant for callers holding a feature name from a request.
///
/// Unknown names are denied and logged.
pub fn has_feature_access_by_name(
    subscription: Option<&SubscriptionDetails>,
    feature_name: &str,
    now: DateTime<Utc>,
) -> bool {
    match Feature::parse(feature_name) {
        Ok(feature) => has_feature_access(subscription, feature, now),
        Err(e) => {
            tracing::warn!(feature = feature_name, error = %e, "Feature check for unknown feature");
            false
        }
    }
}

pub fn can_access_premium_content(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
) -> bool {
    has_feature_access(subscription, Feature::PremiumContent, now)
}

pub fn can_access_ai(subscription: Option<&SubscriptionDetails>, now: DateTime<Utc>) -> bool {
    has_feature_access(subscription, Feature::AiAssistant, now)
}

/// Every feature the subscription currently grants.
pub fn enabled_features(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
) -> Vec<Feature> {
    effective_plan(subscription, now)
        .map(|plan| plan_catalog().get(plan).access.enabled())
        .unwrap_or_default()
}
