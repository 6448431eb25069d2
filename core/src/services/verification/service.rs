//! Main two-step verification service implementation

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use crate::domain::entities::{has_lockout_expired, TwoStepRecord};
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::TwoStepRepository;

use super::config::TwoStepServiceConfig;
use super::traits::{EmailDeliveryTrait, SmsDeliveryTrait};
use super::types::{ConfirmCodeResult, DeliveryChannel, SendCodeResult, VerificationStatus};

/// Two-step verification lifecycle service
///
/// Tracks whether a user has completed the secondary verification step
/// recently enough to be treated as authenticated, and manages code
/// issuance, lockout, and reset. Persistence and delivery sit behind the
/// repository and delivery traits.
pub struct TwoStepService<R, S, M>
where
    R: TwoStepRepository,
    S: SmsDeliveryTrait,
    M: EmailDeliveryTrait,
{
    /// Record persistence
    repository: Arc<R>,
    /// SMS delivery for users with a registered mobile number
    sms_delivery: Arc<S>,
    /// Email delivery for everyone else
    email_delivery: Arc<M>,
    /// Service configuration
    config: TwoStepServiceConfig,
}

impl<R, S, M> TwoStepService<R, S, M>
where
    R: TwoStepRepository,
    S: SmsDeliveryTrait,
    M: EmailDeliveryTrait,
{
    /// Create a new two-step verification service
    pub fn new(
        repository: Arc<R>,
        sms_delivery: Arc<S>,
        email_delivery: Arc<M>,
        config: TwoStepServiceConfig,
    ) -> Self {
        Self {
            repository,
            sms_delivery,
            email_delivery,
            config,
        }
    }

    /// Check whether the user currently counts as verified.
    ///
    /// Lazily creates the record on first contact. An expired verification
    /// resets the record back to unverified; a live one is renewed in
    /// place, which rotates the code and extends the window. Callers that
    /// want a side-effect-free answer use [`status`](Self::status) instead.
    pub async fn is_verified(&self, user_id: Uuid) -> DomainResult<bool> {
        let record = self.get_or_create(user_id).await?;

        if !record.auth_status {
            return Ok(false);
        }

        if record.lifetime_expired(self.config.verified_lifetime_minutes) {
            tracing::info!(
                user_id = %user_id,
                event = "verification_expired",
                "Verified lifetime elapsed, resetting two-step record"
            );
            self.reset_record(record).await?;
            return Ok(false);
        }

        self.renew_record(record).await?;
        Ok(true)
    }

    /// Report the verification state without mutating the record.
    pub async fn status(&self, user_id: Uuid) -> DomainResult<VerificationStatus> {
        let record = self.get_or_create(user_id).await?;
        Ok(self.derive_status(&record))
    }

    /// Explicitly extend a live verification, rotating the code.
    ///
    /// # Returns
    /// * `Ok(TwoStepRecord)` - The renewed record
    /// * `Err(DomainError::Auth(AuthError::NotVerified))` - No live verification to extend
    pub async fn renew(&self, user_id: Uuid) -> DomainResult<TwoStepRecord> {
        let record = self.get_record(user_id).await?;

        if !record.auth_status || record.lifetime_expired(self.config.verified_lifetime_minutes) {
            return Err(DomainError::Auth(AuthError::NotVerified));
        }

        self.renew_record(record).await
    }

    /// Get or lazily create the verification record for a user.
    ///
    /// On creation the record starts unverified with a fresh code and a
    /// zeroed attempt counter.
    pub async fn get_or_create(&self, user_id: Uuid) -> DomainResult<TwoStepRecord> {
        self.repository
            .find_or_create(TwoStepRecord::new_with_code_length(
                user_id,
                self.config.code_length,
            ))
            .await
    }

    /// Fetch an existing record, failing loudly when none exists.
    pub async fn get_record(&self, user_id: Uuid) -> DomainResult<TwoStepRecord> {
        self.repository
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("TwoStepRecord for user {}", user_id),
            })
    }

    /// Confirm a submitted verification code.
    ///
    /// A locked record whose cooldown has elapsed is cleared first (the
    /// rotated code means the stale submission then counts as a miss). On a
    /// match the record becomes verified as of now; on a miss the attempt
    /// counter grows and the remaining budget is reported.
    pub async fn confirm_code(
        &self,
        user_id: Uuid,
        submitted: &str,
    ) -> DomainResult<ConfirmCodeResult> {
        let mut record = self.get_record(user_id).await?;

        if record.is_locked(self.config.max_attempts) {
            let lockout_start = record.request_date.or(record.auth_date);
            match lockout_start {
                Some(start)
                    if has_lockout_expired(start, self.config.exceeded_cooldown_minutes) =>
                {
                    tracing::info!(
                        user_id = %user_id,
                        event = "lockout_cleared",
                        "Cooldown elapsed, clearing lockout"
                    );
                    record.clear_lockout(self.config.code_length);
                    record = self.repository.save(record).await?;
                }
                _ => {
                    tracing::warn!(
                        user_id = %user_id,
                        event = "confirm_while_locked",
                        "Confirmation attempted during lockout cooldown"
                    );
                    return Ok(ConfirmCodeResult {
                        success: false,
                        remaining_attempts: Some(0),
                        error_message: Some(
                            "Maximum attempts exceeded. Wait for the cooldown to pass."
                                .to_string(),
                        ),
                    });
                }
            }
        }

        let matched = submitted.len() == record.auth_code.len()
            && constant_time_eq(submitted.as_bytes(), record.auth_code.as_bytes());

        if matched {
            record.mark_verified(self.config.code_length);
            self.repository.save(record).await?;

            tracing::info!(
                user_id = %user_id,
                event = "two_step_confirmed",
                "Verification code confirmed"
            );

            Ok(ConfirmCodeResult {
                success: true,
                remaining_attempts: None,
                error_message: None,
            })
        } else {
            record.register_attempt();
            let remaining = record.remaining_attempts(self.config.max_attempts);
            self.repository.save(record).await?;

            tracing::warn!(
                user_id = %user_id,
                event = "two_step_rejected",
                remaining_attempts = remaining,
                "Verification code rejected"
            );

            let error_message = if remaining > 0 {
                format!("Invalid verification code. {} attempt(s) remaining", remaining)
            } else {
                "Invalid verification code. No attempts remaining".to_string()
            };

            Ok(ConfirmCodeResult {
                success: false,
                remaining_attempts: Some(remaining),
                error_message: Some(error_message),
            })
        }
    }

    /// Record a failed attempt made by an external confirmation flow.
    ///
    /// # Returns
    /// The number of remaining attempts (0 once exceeded).
    pub async fn register_failed_attempt(&self, user_id: Uuid) -> DomainResult<i32> {
        let mut record = self.get_record(user_id).await?;

        record.register_attempt();
        let remaining = record.remaining_attempts(self.config.max_attempts);
        self.repository.save(record).await?;

        Ok(remaining)
    }

    /// Reset the attempt counter and rotate the code after a lockout.
    pub async fn clear_lockout(&self, user_id: Uuid) -> DomainResult<TwoStepRecord> {
        let mut record = self.get_record(user_id).await?;

        record.clear_lockout(self.config.code_length);
        let record = self.repository.save(record).await?;

        tracing::info!(
            user_id = %record.user_id,
            event = "lockout_cleared",
            "Attempt counter reset and code rotated"
        );

        Ok(record)
    }

    /// Send the current verification code to the user.
    ///
    /// Users with a registered mobile number receive the code over SMS;
    /// everyone else receives it by email. The request timestamp is only
    /// stamped once the provider accepts the message, so a failed delivery
    /// never leaves the user in a phantom "code sent" state.
    pub async fn send_code(&self, user: &AuthenticatedUser) -> DomainResult<SendCodeResult> {
        let mut record = self.get_or_create(user.id).await?;

        let (channel, outcome) = match user.mobile.as_deref() {
            Some(mobile) => (
                DeliveryChannel::Sms,
                self.sms_delivery
                    .send_code_sms(mobile, &record.auth_code)
                    .await,
            ),
            None => (
                DeliveryChannel::Email,
                self.email_delivery
                    .send_code_email(&user.email, &record.auth_code)
                    .await,
            ),
        };

        let message_id = outcome.map_err(|reason| {
            tracing::error!(
                user_id = %user.id,
                channel = ?channel,
                error = %reason,
                event = "code_delivery_failed",
                "Failed to deliver verification code"
            );
            DomainError::Auth(AuthError::DeliveryFailure { reason })
        })?;

        let requested_at = record.mark_code_sent();
        self.repository.save(record).await?;

        tracing::info!(
            user_id = %user.id,
            channel = ?channel,
            message_id = %message_id,
            event = "code_sent",
            "Verification code delivered"
        );

        Ok(SendCodeResult {
            channel,
            message_id,
            requested_at,
        })
    }

    fn derive_status(&self, record: &TwoStepRecord) -> VerificationStatus {
        if record.is_locked(self.config.max_attempts) {
            return VerificationStatus::Locked;
        }
        if !record.auth_status {
            return VerificationStatus::Unverified;
        }
        match record.auth_date {
            Some(date) if !record.lifetime_expired(self.config.verified_lifetime_minutes) => {
                VerificationStatus::Verified {
                    expires_at: date + Duration::minutes(self.config.verified_lifetime_minutes),
                }
            }
            _ => VerificationStatus::Expired,
        }
    }

    async fn renew_record(&self, mut record: TwoStepRecord) -> DomainResult<TwoStepRecord> {
        record.mark_verified(self.config.code_length);
        self.repository.save(record).await
    }

    async fn reset_record(&self, mut record: TwoStepRecord) -> DomainResult<TwoStepRecord> {
        record.reset(self.config.code_length);
        self.repository.save(record).await
    }
}
