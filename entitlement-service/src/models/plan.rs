//! Plan tiers and the static plan catalog.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::feature::{Feature, Limit, LimitResource};
use crate::error::EntitlementError;

/// Plan tier, ordered from cheapest to most complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Basic,
    Premium,
    Pro,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Premium, Plan::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
            Plan::Pro => "pro",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EntitlementError> {
        match s {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            "pro" => Ok(Plan::Pro),
            other => Err(EntitlementError::UnknownPlan(other.to_string())),
        }
    }

    /// Tiers strictly above this one, cheapest first.
    pub fn higher_tiers(&self) -> Vec<Plan> {
        Plan::ALL.into_iter().filter(|p| p > self).collect()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing cycle recorded on a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// Numeric caps for each tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub ai_questions_per_day: Limit,
    pub courses_per_month: Limit,
    pub downloadable_resources: Limit,
    pub webinars_per_month: Limit,
}

impl PlanLimits {
    pub fn get(&self, resource: LimitResource) -> Limit {
        match resource {
            LimitResource::AiQuestionsPerDay => self.ai_questions_per_day,
            LimitResource::CoursesPerMonth => self.courses_per_month,
            LimitResource::DownloadableResources => self.downloadable_resources,
            LimitResource::WebinarsPerMonth => self.webinars_per_month,
        }
    }
}

/// Capability flags for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    pub all_courses: bool,
    pub premium_content: bool,
    pub exclusive_webinars: bool,
    pub ai_assistant: bool,
    pub progress_tracking: bool,
    pub mobile_app: bool,
    pub community_access: bool,
    pub mentorship_program: bool,
}

impl FeatureAccess {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::AllCourses => self.all_courses,
            Feature::PremiumContent => self.premium_content,
            Feature::ExclusiveWebinars => self.exclusive_webinars,
            Feature::AiAssistant => self.ai_assistant,
            Feature::ProgressTracking => self.progress_tracking,
            Feature::MobileApp => self.mobile_app,
            Feature::CommunityAccess => self.community_access,
            Feature::MentorshipProgram => self.mentorship_program,
        }
    }

    /// Features switched on, in declaration order.
    pub fn enabled(&self) -> Vec<Feature> {
        Feature::ALL.into_iter().filter(|f| self.get(*f)).collect()
    }
}

/// Everything a plan tier grants, plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    pub plan: Plan,
    pub display_name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub limits: PlanLimits,
    pub access: FeatureAccess,
}

/// Immutable table of every plan tier.
#[derive(Debug)]
pub struct PlanCatalog {
    basic: PlanFeatures,
    premium: PlanFeatures,
    pro: PlanFeatures,
}

impl PlanCatalog {
    pub fn get(&self, plan: Plan) -> &PlanFeatures {
        match plan {
            Plan::Basic => &self.basic,
            Plan::Premium => &self.premium,
            Plan::Pro => &self.pro,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanFeatures> {
        Plan::ALL.into_iter().map(move |p| self.get(p))
    }
}

static PLAN_CATALOG: Lazy<PlanCatalog> = Lazy::new(|| PlanCatalog {
    basic: PlanFeatures {
        plan: Plan::Basic,
        display_name: "Basic".to_string(),
        description: "Core courses with progress tracking".to_string(),
        price: Decimal::new(999, 2),
        currency: "USD".to_string(),
        billing_cycle: BillingCycle::Monthly,
        limits: PlanLimits {
            ai_questions_per_day: Limit::Disabled,
            courses_per_month: Limit::Capped(5),
            downloadable_resources: Limit::Capped(10),
            webinars_per_month: Limit::Capped(2),
        },
        access: FeatureAccess {
            all_courses: false,
            premium_content: false,
            exclusive_webinars: false,
            ai_assistant: false,
            progress_tracking: true,
            mobile_app: true,
            community_access: true,
            mentorship_program: false,
        },
    },
    premium: PlanFeatures {
        plan: Plan::Premium,
        display_name: "Premium".to_string(),
        description: "Full course library, premium content and the AI assistant".to_string(),
        price: Decimal::new(1999, 2),
        currency: "USD".to_string(),
        billing_cycle: BillingCycle::Monthly,
        limits: PlanLimits {
            ai_questions_per_day: Limit::Capped(50),
            courses_per_month: Limit::Unlimited,
            downloadable_resources: Limit::Capped(100),
            webinars_per_month: Limit::Capped(10),
        },
        access: FeatureAccess {
            all_courses: true,
            premium_content: true,
            exclusive_webinars: true,
            ai_assistant: true,
            progress_tracking: true,
            mobile_app: true,
            community_access: true,
            mentorship_program: false,
        },
    },
    pro: PlanFeatures {
        plan: Plan::Pro,
        display_name: "Pro".to_string(),
        description: "Everything unlimited, plus one-to-one mentorship".to_string(),
        price: Decimal::new(3999, 2),
        currency: "USD".to_string(),
        billing_cycle: BillingCycle::Monthly,
        limits: PlanLimits {
            ai_questions_per_day: Limit::Unlimited,
            courses_per_month: Limit::Unlimited,
            downloadable_resources: Limit::Unlimited,
            webinars_per_month: Limit::Unlimited,
        },
        access: FeatureAccess {
            all_courses: true,
            premium_content: true,
            exclusive_webinars: true,
            ai_assistant: true,
            progress_tracking: true,
            mobile_app: true,
            community_access: true,
            mentorship_program: true,
        },
    },
});

/// The process-wide plan catalog.
pub fn plan_catalog() -> &'static PlanCatalog {
    &PLAN_CATALOG
}
