//! Domain models for entitlement-service.

mod feature;
mod plan;
mod subscription;
mod usage;

pub use feature::{Feature, Limit, LimitResource, Quota};
pub use plan::{
    plan_catalog, BillingCycle, FeatureAccess, Plan, PlanCatalog, PlanFeatures, PlanLimits,
};
pub use subscription::{RawTimestamp, SubscriptionDetails, SubscriptionStatus};
pub use usage::{LimitStatus, UsageLimits, UsageTracking};
