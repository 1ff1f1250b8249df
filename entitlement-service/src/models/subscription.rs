//! Subscription record as stored by the checkout and webhook flows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::plan::{BillingCycle, Plan};
use crate::error::EntitlementError;

/// Subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Cancelled,
    Expired,
    PastDue,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::PastDue => "past_due",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EntitlementError> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "inactive" => Ok(SubscriptionStatus::Inactive),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "expired" => Ok(SubscriptionStatus::Expired),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            other => Err(EntitlementError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamp as it arrives from storage.
///
/// Documents carry dates in several shapes: Firestore timestamp objects,
/// epoch milliseconds, or ISO-8601 strings. [`RawTimestamp::to_datetime`]
/// is the only place those shapes are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Built in-process; never produced by deserialisation.
    #[serde(skip_deserializing)]
    Native(DateTime<Utc>),
    Firestore {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    EpochMillis(i64),
    Text(String),
}

impl RawTimestamp {
    /// Coerce to a UTC date-time, `None` when the value can't be interpreted.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let parsed = match self {
            RawTimestamp::Native(dt) => Some(*dt),
            RawTimestamp::Firestore {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            RawTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
            RawTimestamp::Text(s) => parse_text_timestamp(s),
        };

        if parsed.is_none() {
            tracing::warn!(timestamp = ?self, "Unparseable timestamp, ignoring");
        }
        parsed
    }
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_text_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    parse_date_only(s)
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, taken as midnight UTC on the first day.
fn parse_date_only(s: &str) -> Option<DateTime<Utc>> {
    let date = match s.len() {
        4 => NaiveDate::parse_from_str(&format!("{}-01-01", s), "%Y-%m-%d"),
        7 => NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d"),
    }
    .ok()?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        RawTimestamp::Native(dt)
    }
}

/// A user's subscription record.
///
/// Only `plan`, `status` and `expires_at` drive access decisions; the rest is
/// billing metadata carried for display and auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<RawTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<RawTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<RawTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<BillingCycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

impl SubscriptionDetails {
    pub fn new(plan: Plan, status: SubscriptionStatus) -> Self {
        Self {
            plan,
            status,
            expires_at: None,
            started_at: None,
            cancelled_at: None,
            amount: None,
            currency: None,
            billing_cycle: None,
            payment_method: None,
            auto_renew: None,
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(RawTimestamp::Native(expires_at));
        self
    }

    /// Expiry coerced to UTC; `None` when absent or unparseable.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.as_ref().and_then(RawTimestamp::to_datetime)
    }
}
