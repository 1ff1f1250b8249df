//! Subscription state evaluation.
//!
//! `effective_plan` is the single rule every gate and quota builds on: no
//! active subscription means no entitlements at all.

use chrono::{DateTime, Utc};

use crate::models::{Plan, SubscriptionDetails, SubscriptionStatus};

/// Whether the subscription currently grants access.
///
/// A missing or unparseable `expires_at` on an active subscription is
/// treated as never expiring.
pub fn is_active(subscription: Option<&SubscriptionDetails>, now: DateTime<Utc>) -> bool {
    let Some(sub) = subscription else {
        return false;
    };

    if sub.status != SubscriptionStatus::Active {
        return false;
    }

    match sub.expires_at_utc() {
        Some(expires_at) => expires_at > now,
        None => true,
    }
}

/// Plan the user is entitled to right now.
pub fn effective_plan(
    subscription: Option<&SubscriptionDetails>,
    now: DateTime<Utc>,
) -> Option<Plan> {
    if is_active(subscription, now) {
        subscription.map(|s| s.plan)
    } else {
        None
    }
}
