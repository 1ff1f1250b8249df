//! Usage counters and per-resource limit reports.

use serde::{Deserialize, Serialize};

use super::feature::{Limit, LimitResource, Quota};
use super::subscription::RawTimestamp;

/// Per-user consumption counters.
///
/// Maintained by the API routes that record usage; read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTracking {
    #[serde(default)]
    pub ai_questions_today: u32,
    #[serde(default)]
    pub courses_this_month: u32,
    #[serde(default)]
    pub downloads_this_month: u32,
    #[serde(default)]
    pub webinars_this_month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<RawTimestamp>,
}

impl UsageTracking {
    /// Counter that measures consumption of `resource`.
    pub fn used(&self, resource: LimitResource) -> u32 {
        match resource {
            LimitResource::AiQuestionsPerDay => self.ai_questions_today,
            LimitResource::CoursesPerMonth => self.courses_this_month,
            LimitResource::DownloadableResources => self.downloads_this_month,
            LimitResource::WebinarsPerMonth => self.webinars_this_month,
        }
    }
}

/// Limit report for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    pub allowed: Limit,
    pub used: u32,
    pub remaining: Quota,
    pub exceeded: bool,
}

impl LimitStatus {
    pub fn new(allowed: Limit, used: u32) -> Self {
        Self {
            allowed,
            used,
            remaining: allowed.remaining(used),
            exceeded: allowed.is_exceeded(used),
        }
    }
}

/// Limit reports for every tracked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimits {
    pub ai_questions: LimitStatus,
    pub courses: LimitStatus,
    pub downloads: LimitStatus,
    pub webinars: LimitStatus,
}

impl UsageLimits {
    pub fn get(&self, resource: LimitResource) -> &LimitStatus {
        match resource {
            LimitResource::AiQuestionsPerDay => &self.ai_questions,
            LimitResource::CoursesPerMonth => &self.courses,
            LimitResource::DownloadableResources => &self.downloads,
            LimitResource::WebinarsPerMonth => &self.webinars,
        }
    }

    /// Resources whose limit has been reached, in `LimitResource::ALL` order.
    pub fn exceeded(&self) -> Vec<LimitResource> {
        LimitResource::ALL
            .into_iter()
            .filter(|r| self.get(*r).exceeded)
            .collect()
    }
}
