//! Walks the full two-step verification flow with in-memory services.
//!
//! Run with: cargo run -p vs_infra --example send_code_demo

use std::sync::Arc;

use vs_core::domain::value_objects::AuthenticatedUser;
use vs_core::repositories::MockTwoStepRepository;
use vs_core::services::verification::{TwoStepService, TwoStepServiceConfig};
use vs_infra::email::{ConsoleMailer, MailerCodeDeliveryAdapter};
use vs_infra::sms::MockSmsServiceAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let repository = Arc::new(MockTwoStepRepository::new());
    let sms = Arc::new(MockSmsServiceAdapter::new());
    let email = Arc::new(MailerCodeDeliveryAdapter::new(Arc::new(
        ConsoleMailer::new(),
    )));
    let service = TwoStepService::new(
        repository,
        sms,
        email,
        TwoStepServiceConfig::default(),
    );

    let user = AuthenticatedUser::new(uuid::Uuid::new_v4(), "demo@example.com");

    println!(
        "verified before confirmation: {}",
        service.is_verified(user.id).await?
    );

    let sent = service.send_code(&user).await?;
    println!(
        "code sent over {:?} (message id {})",
        sent.channel, sent.message_id
    );

    let record = service.get_record(user.id).await?;
    let outcome = service.confirm_code(user.id, &record.auth_code).await?;
    println!("confirmation accepted: {}", outcome.success);

    println!(
        "verified after confirmation: {}",
        service.is_verified(user.id).await?
    );

    Ok(())
}
