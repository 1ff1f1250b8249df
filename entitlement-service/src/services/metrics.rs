//! Metrics module for entitlement-service.
//! Provides Prometheus counters for access and quota decisions.

use prometheus::{opts, register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use std::sync::OnceLock;

/// Feature checks by feature and outcome
pub static FEATURE_CHECKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Quota denials by resource and plan
pub static QUOTA_DENIALS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Requests rejected for lacking an active subscription
pub static INACTIVE_SUBSCRIPTION_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    FEATURE_CHECKS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "entitlement_feature_checks_total",
                "Total feature gate checks by feature and outcome"
            ),
            &["feature", "outcome"]
        )
        .expect("Failed to register FEATURE_CHECKS_TOTAL")
    });

    QUOTA_DENIALS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "entitlement_quota_denials_total",
                "Total requests denied for exhausted quota"
            ),
            &["resource", "plan"]
        )
        .expect("Failed to register QUOTA_DENIALS_TOTAL")
    });

    INACTIVE_SUBSCRIPTION_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "entitlement_inactive_subscription_total",
                "Total requests rejected without an active subscription"
            ),
            &["operation"]
        )
        .expect("Failed to register INACTIVE_SUBSCRIPTION_TOTAL")
    });
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record the outcome of a feature gate.
pub fn record_feature_check(feature: &str, allowed: bool) {
    if let Some(counter) = FEATURE_CHECKS_TOTAL.get() {
        let outcome = if allowed { "allowed" } else { "denied" };
        counter.with_label_values(&[feature, outcome]).inc();
    }
}

/// Record a quota denial.
pub fn record_quota_denial(resource: &str, plan: &str) {
    if let Some(counter) = QUOTA_DENIALS_TOTAL.get() {
        counter.with_label_values(&[resource, plan]).inc();
    }
}

/// Record a rejection for lacking an active subscription.
pub fn record_inactive_subscription(operation: &str) {
    if let Some(counter) = INACTIVE_SUBSCRIPTION_TOTAL.get() {
        counter.with_label_values(&[operation]).inc();
    }
}
