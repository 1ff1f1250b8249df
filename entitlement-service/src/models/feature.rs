//! Feature flags, usage resources and the limit/quota value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EntitlementError;

/// Boolean capability gated by plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    AllCourses,
    PremiumContent,
    ExclusiveWebinars,
    AiAssistant,
    ProgressTracking,
    MobileApp,
    CommunityAccess,
    MentorshipProgram,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::AllCourses,
        Feature::PremiumContent,
        Feature::ExclusiveWebinars,
        Feature::AiAssistant,
        Feature::ProgressTracking,
        Feature::MobileApp,
        Feature::CommunityAccess,
        Feature::MentorshipProgram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AllCourses => "allCourses",
            Feature::PremiumContent => "premiumContent",
            Feature::ExclusiveWebinars => "exclusiveWebinars",
            Feature::AiAssistant => "aiAssistant",
            Feature::ProgressTracking => "progressTracking",
            Feature::MobileApp => "mobileApp",
            Feature::CommunityAccess => "communityAccess",
            Feature::MentorshipProgram => "mentorshipProgram",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EntitlementError> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| EntitlementError::UnknownFeature(s.to_string()))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource with a numeric per-plan cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitResource {
    AiQuestionsPerDay,
    CoursesPerMonth,
    DownloadableResources,
    WebinarsPerMonth,
}

impl LimitResource {
    pub const ALL: [LimitResource; 4] = [
        LimitResource::AiQuestionsPerDay,
        LimitResource::CoursesPerMonth,
        LimitResource::DownloadableResources,
        LimitResource::WebinarsPerMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitResource::AiQuestionsPerDay => "aiQuestionsPerDay",
            LimitResource::CoursesPerMonth => "coursesPerMonth",
            LimitResource::DownloadableResources => "downloadableResources",
            LimitResource::WebinarsPerMonth => "webinarsPerMonth",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EntitlementError> {
        LimitResource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| EntitlementError::UnknownResource(s.to_string()))
    }

    /// True for counters that refill every day rather than every month.
    pub fn is_daily(&self) -> bool {
        matches!(self, LimitResource::AiQuestionsPerDay)
    }
}

impl fmt::Display for LimitResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plan's cap on one resource.
///
/// Stored documents use `-1` for unlimited and `0` for no access; this type
/// keeps that wire format while making the three cases explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Limit {
    Unlimited,
    Disabled,
    /// Always greater than zero.
    Capped(u32),
}

impl Limit {
    pub const UNLIMITED_RAW: i64 = -1;

    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            Self::UNLIMITED_RAW => Some(Limit::Unlimited),
            0 => Some(Limit::Disabled),
            n if n > 0 => u32::try_from(n).ok().map(Limit::Capped),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> i64 {
        match self {
            Limit::Unlimited => Self::UNLIMITED_RAW,
            Limit::Disabled => 0,
            Limit::Capped(n) => i64::from(*n),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// Finite cap, `None` when unlimited.
    pub fn max(&self) -> Option<u32> {
        match self {
            Limit::Unlimited => None,
            Limit::Disabled => Some(0),
            Limit::Capped(n) => Some(*n),
        }
    }

    /// Quota left after `used` units, clamped at zero.
    pub fn remaining(&self, used: u32) -> Quota {
        match self {
            Limit::Unlimited => Quota::Unlimited,
            Limit::Disabled => Quota::NONE,
            Limit::Capped(n) => Quota::Remaining(n.saturating_sub(used)),
        }
    }

    pub fn is_exceeded(&self, used: u32) -> bool {
        self.max().is_some_and(|max| used >= max)
    }
}

impl TryFrom<i64> for Limit {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Limit::from_raw(raw).ok_or_else(|| format!("invalid limit value: {}", raw))
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        limit.as_raw()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => f.write_str("unlimited"),
            other => write!(f, "{}", other.as_raw()),
        }
    }
}

/// Remaining quota for a resource.
///
/// Serialises as `-1` when unlimited, otherwise as the remaining count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Quota {
    Unlimited,
    Remaining(u32),
}

impl Quota {
    pub const NONE: Quota = Quota::Remaining(0);

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Quota::Unlimited)
    }

    /// True when at least one more unit may be consumed.
    pub fn is_available(&self) -> bool {
        match self {
            Quota::Unlimited => true,
            Quota::Remaining(n) => *n > 0,
        }
    }
}

impl TryFrom<i64> for Quota {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            Limit::UNLIMITED_RAW => Ok(Quota::Unlimited),
            n => u32::try_from(n)
                .map(Quota::Remaining)
                .map_err(|_| format!("invalid quota value: {}", raw)),
        }
    }
}

impl From<Quota> for i64 {
    fn from(quota: Quota) -> Self {
        match quota {
            Quota::Unlimited => Limit::UNLIMITED_RAW,
            Quota::Remaining(n) => i64::from(n),
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Unlimited => f.write_str("unlimited"),
            Quota::Remaining(n) => write!(f, "{}", n),
        }
    }
}
