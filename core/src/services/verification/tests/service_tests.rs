//! Tests for the two-step verification lifecycle service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::TwoStepRecord;
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockTwoStepRepository, TwoStepRepository};
use crate::services::verification::{
    DeliveryChannel, TwoStepService, TwoStepServiceConfig, VerificationStatus,
};

use super::mocks::{MockEmailDelivery, MockSmsDelivery};

type TestService = TwoStepService<MockTwoStepRepository, MockSmsDelivery, MockEmailDelivery>;

struct Harness {
    repository: Arc<MockTwoStepRepository>,
    sms: Arc<MockSmsDelivery>,
    email: Arc<MockEmailDelivery>,
    service: TestService,
}

fn harness(repository: MockTwoStepRepository, config: TwoStepServiceConfig) -> Harness {
    harness_with_delivery(
        repository,
        MockSmsDelivery::new(),
        MockEmailDelivery::new(),
        config,
    )
}

fn harness_with_delivery(
    repository: MockTwoStepRepository,
    sms: MockSmsDelivery,
    email: MockEmailDelivery,
    config: TwoStepServiceConfig,
) -> Harness {
    let repository = Arc::new(repository);
    let sms = Arc::new(sms);
    let email = Arc::new(email);
    let service = TwoStepService::new(
        repository.clone(),
        sms.clone(),
        email.clone(),
        config,
    );
    Harness {
        repository,
        sms,
        email,
        service,
    }
}

fn verified_record(user_id: Uuid, minutes_ago: i64) -> TwoStepRecord {
    let mut record = TwoStepRecord::new(user_id);
    record.auth_status = true;
    record.auth_date = Some(Utc::now() - Duration::minutes(minutes_ago));
    record
}

#[tokio::test]
async fn test_fresh_user_is_unverified() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());
    let user_id = Uuid::new_v4();

    assert!(!h.service.is_verified(user_id).await.unwrap());

    // exactly one record was lazily created
    assert_eq!(h.repository.record_count().await, 1);
    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert!(!record.auth_status);
    assert_eq!(record.auth_count, 0);

    // a second check does not create another record
    assert!(!h.service.is_verified(user_id).await.unwrap());
    assert_eq!(h.repository.record_count().await, 1);
}

#[tokio::test]
async fn test_expired_verification_resets_record() {
    let user_id = Uuid::new_v4();
    let seeded = verified_record(user_id, 11);
    let old_code = seeded.auth_code.clone();

    let config = TwoStepServiceConfig {
        verified_lifetime_minutes: 10,
        ..Default::default()
    };
    let h = harness(MockTwoStepRepository::with_record(seeded), config);

    assert!(!h.service.is_verified(user_id).await.unwrap());

    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert!(!record.auth_status);
    assert!(record.auth_date.is_none());
    assert!(record.request_date.is_none());
    assert_eq!(record.auth_count, 0);
    assert_ne!(record.auth_code, old_code);
}

#[tokio::test]
async fn test_live_verification_renews_on_check() {
    let user_id = Uuid::new_v4();
    let seeded = verified_record(user_id, 1);
    let old_code = seeded.auth_code.clone();
    let old_date = seeded.auth_date.unwrap();

    let config = TwoStepServiceConfig {
        verified_lifetime_minutes: 10,
        ..Default::default()
    };
    let h = harness(MockTwoStepRepository::with_record(seeded), config);

    assert!(h.service.is_verified(user_id).await.unwrap());

    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert!(record.auth_status);
    assert_ne!(record.auth_code, old_code);
    assert!(record.auth_date.unwrap() > old_date);
    assert_eq!(record.auth_count, 0);
}

#[tokio::test]
async fn test_status_reads_without_writing() {
    let user_id = Uuid::new_v4();
    let seeded = verified_record(user_id, 1);

    let config = TwoStepServiceConfig {
        verified_lifetime_minutes: 10,
        ..Default::default()
    };
    let h = harness(MockTwoStepRepository::with_record(seeded.clone()), config);

    let status = h.service.status(user_id).await.unwrap();
    assert!(matches!(status, VerificationStatus::Verified { .. }));

    // unlike is_verified, the record is untouched
    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(record, seeded);
}

#[tokio::test]
async fn test_status_variants() {
    let config = TwoStepServiceConfig {
        verified_lifetime_minutes: 10,
        ..Default::default()
    };

    let user_id = Uuid::new_v4();
    let h = harness(MockTwoStepRepository::new(), config.clone());
    assert_eq!(
        h.service.status(user_id).await.unwrap(),
        VerificationStatus::Unverified
    );

    let expired = verified_record(user_id, 11);
    let h = harness(MockTwoStepRepository::with_record(expired), config.clone());
    assert_eq!(
        h.service.status(user_id).await.unwrap(),
        VerificationStatus::Expired
    );

    let mut locked = TwoStepRecord::new(user_id);
    locked.auth_count = config.max_attempts;
    let h = harness(MockTwoStepRepository::with_record(locked), config);
    assert_eq!(
        h.service.status(user_id).await.unwrap(),
        VerificationStatus::Locked
    );
}

#[tokio::test]
async fn test_renew_requires_live_verification() {
    let user_id = Uuid::new_v4();
    let h = harness(
        MockTwoStepRepository::with_record(TwoStepRecord::new(user_id)),
        TwoStepServiceConfig::default(),
    );

    let result = h.service.renew(user_id).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::NotVerified))
    ));
}

#[tokio::test]
async fn test_get_record_fails_loudly_when_missing() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());

    let result = h.service.get_record(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_confirm_code_success_marks_verified() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());
    let user_id = Uuid::new_v4();

    let record = h.service.get_or_create(user_id).await.unwrap();
    let code = record.auth_code.clone();

    let outcome = h.service.confirm_code(user_id, &code).await.unwrap();
    assert!(outcome.success);
    assert!(outcome.error_message.is_none());

    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert!(record.auth_status);
    assert!(record.auth_date.is_some());
    assert_eq!(record.auth_count, 0);
    assert_ne!(record.auth_code, code);
}

#[tokio::test]
async fn test_confirm_code_counts_misses_until_lockout() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());
    let user_id = Uuid::new_v4();
    h.service.get_or_create(user_id).await.unwrap();

    for expected_remaining in (0..3).rev() {
        let outcome = h.service.confirm_code(user_id, "no-match").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.remaining_attempts, Some(expected_remaining));
    }

    // locked now, and the lockout never started a cooldown clock
    let outcome = h.service.confirm_code(user_id, "no-match").await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.remaining_attempts, Some(0));
    assert!(outcome
        .error_message
        .unwrap()
        .contains("Maximum attempts exceeded"));
}

#[tokio::test]
async fn test_confirm_code_clears_expired_lockout() {
    let user_id = Uuid::new_v4();
    let mut seeded = TwoStepRecord::new(user_id);
    seeded.auth_count = 3;
    seeded.request_date = Some(Utc::now() - Duration::minutes(1441));
    let old_code = seeded.auth_code.clone();

    let h = harness(
        MockTwoStepRepository::with_record(seeded),
        TwoStepServiceConfig::default(),
    );

    // stale submission misses the rotated code but the counter restarted
    let outcome = h.service.confirm_code(user_id, &old_code).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.remaining_attempts, Some(2));

    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(record.auth_count, 1);
    assert_ne!(record.auth_code, old_code);
}

#[tokio::test]
async fn test_register_failed_attempt() {
    let user_id = Uuid::new_v4();
    let h = harness(
        MockTwoStepRepository::with_record(TwoStepRecord::new(user_id)),
        TwoStepServiceConfig::default(),
    );

    assert_eq!(h.service.register_failed_attempt(user_id).await.unwrap(), 2);
    assert_eq!(h.service.register_failed_attempt(user_id).await.unwrap(), 1);

    let record = h.repository.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(record.auth_count, 2);
}

#[tokio::test]
async fn test_clear_lockout_resets_counter_and_code() {
    let user_id = Uuid::new_v4();
    let mut seeded = TwoStepRecord::new(user_id);
    seeded.auth_count = 3;
    let old_code = seeded.auth_code.clone();

    let h = harness(
        MockTwoStepRepository::with_record(seeded),
        TwoStepServiceConfig::default(),
    );

    let record = h.service.clear_lockout(user_id).await.unwrap();
    assert_eq!(record.auth_count, 0);
    assert_ne!(record.auth_code, old_code);
}

#[tokio::test]
async fn test_send_code_uses_email_without_mobile() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());
    let user = AuthenticatedUser::new(Uuid::new_v4(), "user@example.com");

    let result = h.service.send_code(&user).await.unwrap();
    assert_eq!(result.channel, DeliveryChannel::Email);
    assert_eq!(h.email.sent_count(), 1);
    assert_eq!(h.sms.sent_count(), 0);

    let record = h.repository.find_by_user(user.id).await.unwrap().unwrap();
    assert!(record.request_date.is_some());

    // the delivered code is the one on the record
    let sent = h.email.sent.lock().unwrap();
    assert_eq!(sent[0], ("user@example.com".to_string(), record.auth_code));
}

#[tokio::test]
async fn test_send_code_uses_sms_with_mobile() {
    let h = harness(MockTwoStepRepository::new(), TwoStepServiceConfig::default());
    let user =
        AuthenticatedUser::new(Uuid::new_v4(), "user@example.com").with_mobile("+31612345678");

    let result = h.service.send_code(&user).await.unwrap();
    assert_eq!(result.channel, DeliveryChannel::Sms);
    assert_eq!(h.sms.sent_count(), 1);
    assert_eq!(h.email.sent_count(), 0);

    let sent = h.sms.sent.lock().unwrap();
    assert_eq!(sent[0].0, "+31612345678");

    let record = h.repository.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(record.request_date, Some(result.requested_at));
}

#[tokio::test]
async fn test_send_code_email_failure_propagates() {
    let h = harness_with_delivery(
        MockTwoStepRepository::new(),
        MockSmsDelivery::new(),
        MockEmailDelivery::failing("relay refused connection"),
        TwoStepServiceConfig::default(),
    );
    let user = AuthenticatedUser::new(Uuid::new_v4(), "user@example.com");

    let result = h.service.send_code(&user).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DeliveryFailure { .. }))
    ));
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn test_send_code_failure_leaves_no_request_stamp() {
    let h = harness_with_delivery(
        MockTwoStepRepository::new(),
        MockSmsDelivery::failing("gateway unreachable"),
        MockEmailDelivery::new(),
        TwoStepServiceConfig::default(),
    );
    let user =
        AuthenticatedUser::new(Uuid::new_v4(), "user@example.com").with_mobile("+31612345678");

    let result = h.service.send_code(&user).await;
    match result {
        Err(DomainError::Auth(AuthError::DeliveryFailure { reason })) => {
            assert_eq!(reason, "gateway unreachable");
        }
        other => panic!("expected delivery failure, got {:?}", other.map(|_| ())),
    }

    let record = h.repository.find_by_user(user.id).await.unwrap().unwrap();
    assert!(record.request_date.is_none());
}
