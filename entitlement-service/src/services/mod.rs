//! Services module for entitlement-service.
//!
//! The submodules expose pure functions taking `now` explicitly.
//! [`EntitlementService`] bundles them with a [`Clock`] and display settings
//! for callers that don't want to thread both through every call.

pub mod access;
pub mod clock;
pub mod evaluator;
pub mod formatter;
pub mod guard;
pub mod metrics;
pub mod snapshot;
pub mod usage;

pub use access::{
    can_access_ai, can_access_premium_content, enabled_features, has_feature_access,
    has_feature_access_by_name,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use evaluator::{effective_plan, is_active};
pub use formatter::{
    days_until, expiry_text, format_subscription, upgrade_suggestions, FormattedSubscription,
    UpgradeSuggestion,
};
pub use guard::{require_active, require_feature, require_quota};
pub use metrics::{get_metrics, init_metrics};
pub use snapshot::EntitlementSnapshot;
pub use usage::{check_all_limits, limit_for, remaining_ai_questions, remaining_quota};

use crate::config::DisplayConfig;
use crate::error::EntitlementError;
use crate::models::{
    Feature, LimitResource, Plan, Quota, SubscriptionDetails, UsageLimits, UsageTracking,
};

/// Entitlement checks bound to a clock.
#[derive(Debug, Clone)]
pub struct EntitlementService<C: Clock = SystemClock> {
    clock: C,
    display: DisplayConfig,
}

impl EntitlementService<SystemClock> {
    pub fn new(display: DisplayConfig) -> Self {
        Self::with_clock(SystemClock, display)
    }
}

impl Default for EntitlementService<SystemClock> {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl<C: Clock> EntitlementService<C> {
    pub fn with_clock(clock: C, display: DisplayConfig) -> Self {
        Self { clock, display }
    }

    pub fn is_active(&self, subscription: Option<&SubscriptionDetails>) -> bool {
        is_active(subscription, self.clock.now())
    }

    pub fn effective_plan(&self, subscription: Option<&SubscriptionDetails>) -> Option<Plan> {
        effective_plan(subscription, self.clock.now())
    }

    pub fn has_feature_access(
        &self,
        subscription: Option<&SubscriptionDetails>,
        feature: Feature,
    ) -> bool {
        has_feature_access(subscription, feature, self.clock.now())
    }

    pub fn has_feature_access_by_name(
        &self,
        subscription: Option<&SubscriptionDetails>,
        feature_name: &str,
    ) -> bool {
        has_feature_access_by_name(subscription, feature_name, self.clock.now())
    }

    pub fn can_access_premium_content(&self, subscription: Option<&SubscriptionDetails>) -> bool {
        can_access_premium_content(subscription, self.clock.now())
    }

    pub fn can_access_ai(&self, subscription: Option<&SubscriptionDetails>) -> bool {
        can_access_ai(subscription, self.clock.now())
    }

    pub fn remaining_quota(
        &self,
        subscription: Option<&SubscriptionDetails>,
        resource: LimitResource,
        used_so_far: u32,
    ) -> Quota {
        remaining_quota(subscription, resource, used_so_far, self.clock.now())
    }

    pub fn check_all_limits(
        &self,
        subscription: Option<&SubscriptionDetails>,
        usage: &UsageTracking,
    ) -> UsageLimits {
        check_all_limits(subscription, usage, self.clock.now())
    }

    pub fn format_subscription(
        &self,
        subscription: Option<&SubscriptionDetails>,
    ) -> FormattedSubscription {
        format_subscription(subscription, self.clock.now(), &self.display)
    }

    pub fn upgrade_suggestions(
        &self,
        subscription: Option<&SubscriptionDetails>,
    ) -> Vec<UpgradeSuggestion> {
        upgrade_suggestions(subscription, self.clock.now())
    }

    pub fn require_feature(
        &self,
        subscription: Option<&SubscriptionDetails>,
        feature: Feature,
    ) -> Result<(), EntitlementError> {
        require_feature(subscription, feature, self.clock.now())
    }

    pub fn require_quota(
        &self,
        subscription: Option<&SubscriptionDetails>,
        resource: LimitResource,
        used: u32,
    ) -> Result<Quota, EntitlementError> {
        require_quota(subscription, resource, used, self.clock.now())
    }

    pub fn snapshot(
        &self,
        subscription: Option<&SubscriptionDetails>,
        usage: &UsageTracking,
    ) -> EntitlementSnapshot {
        EntitlementSnapshot::evaluate(subscription, usage, self.clock.now(), &self.display)
    }
}
