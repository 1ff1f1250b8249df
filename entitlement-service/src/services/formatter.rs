//! Human-readable subscription summaries and upgrade suggestions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::evaluator::effective_plan;
use crate::config::DisplayConfig;
use crate::models::{plan_catalog, Plan, SubscriptionDetails};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display-ready view of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSubscription {
    pub plan_name: String,
    pub status: String,
    pub price: Decimal,
    pub currency: String,
    pub expiry_text: String,
}

impl FormattedSubscription {
    fn no_subscription(display: &DisplayConfig) -> Self {
        Self {
            plan_name: "No Subscription".to_string(),
            status: "inactive".to_string(),
            price: Decimal::ZERO,
            currency: display.default_currency.clone(),
            expiry_text: "No access".to_string(),
        }
    }
}

/// A higher tier worth offering, with the pitch for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSuggestion {
    pub plan: Plan,
    pub reason: String,
    pub benefits: Vec<String>,
}

pub fn format_subscription(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
    display: &DisplayConfig,
) -> FormattedSubscription {
    let (Some(plan), Some(sub)) = (effective_plan(subscription, now), subscription) else {
        return FormattedSubscription::no_subscription(display);
    };

    let features = plan_catalog().get(plan);
    FormattedSubscription {
        plan_name: features.display_name.clone(),
        status: sub.status.as_str().to_string(),
        price: features.price,
        currency: features.currency.clone(),
        expiry_text: expiry_text(sub.expires_at_utc(), now, display),
    }
}

/// Whole days until `expires_at`, rounded up.
///
/// 23.5 hours left counts as one day; 12 hours past counts as zero.
pub fn days_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expires_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

pub fn expiry_text(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    display: &DisplayConfig,
) -> String {
    let Some(expires_at) = expires_at else {
        return "Never expires".to_string();
    };

    match days_until(expires_at, now) {
        d if d < 0 => "Expired".to_string(),
        0 => "Expires today".to_string(),
        1 => "Expires tomorrow".to_string(),
        d if d <= display.expiry_warning_days => format!("Expires in {} days", d),
        _ => format!("Expires on {}", format_date(expires_at, &display.date_format)),
    }
}

fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        tracing::warn!(date_format = date_format, "Invalid date format, using ISO date");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Higher tiers to offer, cheapest first.
///
/// Users without an active subscription are offered every tier, the same as
/// someone who never subscribed.
pub fn upgrade_suggestions(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
) -> Vec<UpgradeSuggestion> {
    let targets = match effective_plan(subscription, now) {
        Some(plan) => plan.higher_tiers(),
        None => Plan::ALL.to_vec(),
    };

    targets.into_iter().map(suggestion_for).collect()
}

fn suggestion_for(plan: Plan) -> UpgradeSuggestion {
    let (reason, benefits): (&str, &[&str]) = match plan {
        Plan::Basic => (
            "Start learning with structured courses and progress tracking",
            &[
                "Up to 5 courses per month",
                "Progress tracking",
                "Mobile app access",
                "Community access",
            ],
        ),
        Plan::Premium => (
            "Unlock the full course library and the AI study assistant",
            &[
                "Unlimited courses",
                "Premium content",
                "Exclusive webinars",
                "50 AI assistant questions per day",
            ],
        ),
        Plan::Pro => (
            "Get unlimited everything plus one-to-one mentorship",
            &[
                "Unlimited AI assistant questions",
                "Unlimited downloadable resources",
                "Unlimited webinars",
                "Mentorship program",
            ],
        ),
    };

    UpgradeSuggestion {
        plan,
        reason: reason.to_string(),
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
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

    fn display() -> DisplayConfig {
        DisplayConfig::default()
    }

    #[test]
    fn test_days_until_rounds_up() {
        assert_eq!(days_until(now() + Duration::minutes(23 * 60 + 30), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(24), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(25), now()), 2);
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(12), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(36), now()), -1);
    }

    #[test]
    fn test_expiry_text_buckets() {
        let d = display();
        assert_eq!(expiry_text(None, now(), &d), "Never expires");
        assert_eq!(
            expiry_text(Some(now() - Duration::days(2)), now(), &d),
            "Expired"
        );
        assert_eq!(
            expiry_text(Some(now() - Duration::hours(3)), now(), &d),
            "Expires today"
        );
        assert_eq!(
            expiry_text(Some(now() + Duration::hours(5)), now(), &d),
            "Expires tomorrow"
        );
        assert_eq!(
            expiry_text(Some(now() + Duration::days(2)), now(), &d),
            "Expires in 2 days"
        );
        assert_eq!(
            expiry_text(Some(now() + Duration::days(7)), now(), &d),
            "Expires in 7 days"
        );
        assert_eq!(
            expiry_text(Some(now() + Duration::days(8)), now(), &d),
            "Expires on June 9, 2027"
        );
    }

    #[test]
    fn test_expiry_text_respects_warning_window() {
        let d = DisplayConfig {
            expiry_warning_days: 14,
            ..display()
        };
        assert_eq!(
            expiry_text(Some(now() + Duration::days(10)), now(), &d),
            "Expires in 10 days"
        );
    }

    #[test]
    fn test_invalid_date_format_falls_back_to_iso() {
        let d = DisplayConfig {
            date_format: "%Q".to_string(),
            ..display()
        };
        assert_eq!(
            expiry_text(Some(now() + Duration::days(30)), now(), &d),
            "Expires on 2027-07-01"
        );
    }

    #[test]
    fn test_format_active_premium() {
        let sub = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::Active)
            .with_expires_at(now() + Duration::days(2));
        let formatted = format_subscription(Some(&sub), now(), &display());
        assert_eq!(formatted.plan_name, "Premium");
        assert_eq!(formatted.status, "active");
        assert_eq!(formatted.price, Decimal::new(1999, 2));
        assert_eq!(formatted.currency, "USD");
        assert_eq!(formatted.expiry_text, "Expires in 2 days");
    }

    #[test]
    fn test_format_without_subscription() {
        let formatted = format_subscription(None, now(), &display());
        assert_eq!(formatted.plan_name, "No Subscription");
        assert_eq!(formatted.status, "inactive");
        assert_eq!(formatted.price, Decimal::ZERO);
        assert_eq!(formatted.expiry_text, "No access");
    }

    #[test]
    fn test_format_cancelled_is_no_subscription() {
        let sub = SubscriptionDetails::new(Plan::Pro, SubscriptionStatus::Cancelled);
        let formatted = format_subscription(Some(&sub), now(), &display());
        assert_eq!(formatted, format_subscription(None, now(), &display()));
    }

    #[test]
    fn test_upgrade_table() {
        let plans = |sub: Option<&SubscriptionDetails>| {
            upgrade_suggestions(sub, now())
                .into_iter()
                .map(|s| s.plan)
                .collect::<Vec<_>>()
        };

        assert_eq!(plans(None), vec![Plan::Basic, Plan::Premium, Plan::Pro]);

        let basic = SubscriptionDetails::new(Plan::Basic, SubscriptionStatus::Active);
        assert_eq!(plans(Some(&basic)), vec![Plan::Premium, Plan::Pro]);

        let premium = SubscriptionDetails::new(Plan::Premium, SubscriptionStatus::Active);
        assert_eq!(plans(Some(&premium)), vec![Plan::Pro]);

        let pro = SubscriptionDetails::new(Plan::Pro, SubscriptionStatus::Active);
        assert!(plans(Some(&pro)).is_empty());
    }

    #[test]
    fn test_cancelled_basic_starts_from_basic() {
        let sub = SubscriptionDetails::new(Plan::Basic, SubscriptionStatus::Cancelled);
        let suggestions = upgrade_suggestions(Some(&sub), now());
        assert_eq!(suggestions[0].plan, Plan::Basic);
        assert_eq!(suggestions.len(), 3);
        assert!(!suggestions[0].benefits.is_empty());
    }
}
