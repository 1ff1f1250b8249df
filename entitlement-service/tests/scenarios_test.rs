//! End-to-end entitlement scenarios against a fixed clock.

mod common;

use common::{active, active_for_days, test_now, test_service, usage, with_status};
use entitlement_service::services::{has_feature_access, remaining_quota};
use entitlement_service::{
    Feature, Limit, LimitResource, Plan, Quota, SubscriptionDetails, SubscriptionStatus,
};

#[test]
fn premium_with_future_expiry_has_ai_assistant() {
    let service = test_service();
    let sub = active_for_days(Plan::Premium, 1);

    assert!(service.has_feature_access(Some(&sub), Feature::AiAssistant));
    assert!(service.has_feature_access_by_name(Some(&sub), "aiAssistant"));
}

#[test]
fn missing_subscription_has_no_plan_and_no_quota() {
    let service = test_service();

    assert_eq!(service.effective_plan(None), None);
    assert_eq!(
        service.remaining_quota(None, LimitResource::AiQuestionsPerDay, 0),
        Quota::Remaining(0)
    );
}

#[test]
fn basic_has_zero_ai_quota() {
    let service = test_service();
    let sub = active(Plan::Basic);

    assert_eq!(
        service.remaining_quota(Some(&sub), LimitResource::AiQuestionsPerDay, 5),
        Quota::Remaining(0)
    );
}

#[test]
fn pro_downloads_are_unlimited() {
    let service = test_service();
    let sub = active(Plan::Pro);

    let quota = service.remaining_quota(Some(&sub), LimitResource::DownloadableResources, 1000);
    assert_eq!(quota, Quota::Unlimited);
    assert_eq!(serde_json::to_value(quota).unwrap(), -1);
}

#[test]
fn premium_expiring_in_two_days() {
    let service = test_service();
    let sub = active_for_days(Plan::Premium, 2);

    let formatted = service.format_subscription(Some(&sub));
    assert_eq!(formatted.expiry_text, "Expires in 2 days");
    assert_eq!(formatted.plan_name, "Premium");
}

#[test]
fn cancelled_basic_gets_suggestions_starting_with_basic() {
    let service = test_service();
    let sub = with_status(Plan::Basic, SubscriptionStatus::Cancelled);

    let suggestions = service.upgrade_suggestions(Some(&sub));
    let plans: Vec<Plan> = suggestions.iter().map(|s| s.plan).collect();
    assert_eq!(plans, vec![Plan::Basic, Plan::Premium, Plan::Pro]);
    assert_eq!(
        suggestions,
        service.upgrade_suggestions(None),
        "cancelled subscription should match no subscription"
    );
}

#[test]
fn expired_subscription_loses_everything() {
    let service = test_service();
    let sub = active_for_days(Plan::Pro, -1);

    assert!(!service.is_active(Some(&sub)));
    assert!(!service.can_access_ai(Some(&sub)));
    assert!(!service.can_access_premium_content(Some(&sub)));

    let limits = service.check_all_limits(Some(&sub), &usage(0, 0, 0, 0));
    assert_eq!(limits.downloads.allowed, Limit::Disabled);
    assert_eq!(limits.downloads.remaining, Quota::Remaining(0));
}

#[test]
fn subscription_document_from_storage() {
    let json = r#"{
        "plan": "premium",
        "status": "active",
        "expiresAt": "2027-03-20T09:30:00Z",
        "amount": "19.99",
        "currency": "USD",
        "billingCycle": "monthly",
        "autoRenew": false
    }"#;
    let sub: SubscriptionDetails = serde_json::from_str(json).unwrap();
    let service = test_service();

    assert_eq!(service.effective_plan(Some(&sub)), Some(Plan::Premium));
    assert_eq!(
        service.format_subscription(Some(&sub)).expiry_text,
        "Expires in 5 days"
    );
}

#[test]
fn past_expiry_stored_without_seconds_revokes_access() {
    let service = test_service();
    let sub: SubscriptionDetails = serde_json::from_str(
        r#"{"plan": "pro", "status": "active", "expiresAt": "2020-01-01T00:00Z"}"#,
    )
    .unwrap();

    assert!(!service.is_active(Some(&sub)));
    assert!(!service.has_feature_access(Some(&sub), Feature::MentorshipProgram));
}

#[test]
fn usage_document_drives_limit_report() {
    let usage_json = r#"{
        "aiQuestionsToday": 50,
        "coursesThisMonth": 12,
        "downloadsThisMonth": 40,
        "webinarsThisMonth": 10,
        "lastReset": {"seconds": 1805000000, "nanoseconds": 0}
    }"#;
    let tracked = serde_json::from_str(usage_json).unwrap();
    let service = test_service();
    let sub = active(Plan::Premium);

    let limits = service.check_all_limits(Some(&sub), &tracked);
    assert!(limits.ai_questions.exceeded);
    assert!(!limits.courses.exceeded);
    assert_eq!(limits.courses.remaining, Quota::Unlimited);
    assert_eq!(limits.downloads.remaining, Quota::Remaining(60));
    assert!(limits.webinars.exceeded);

    let json = serde_json::to_value(limits).unwrap();
    assert_eq!(json["aiQuestions"]["allowed"], 50);
    assert_eq!(json["aiQuestions"]["remaining"], 0);
    assert_eq!(json["courses"]["allowed"], -1);
    assert_eq!(json["webinars"]["exceeded"], true);
}

#[test]
fn service_and_free_functions_agree() {
    let service = test_service();
    let sub = active(Plan::Basic);

    for feature in Feature::ALL {
        assert_eq!(
            service.has_feature_access(Some(&sub), feature),
            has_feature_access(Some(&sub), feature, test_now())
        );
    }
    for resource in LimitResource::ALL {
        assert_eq!(
            service.remaining_quota(Some(&sub), resource, 3),
            remaining_quota(Some(&sub), resource, 3, test_now())
        );
    }
}
