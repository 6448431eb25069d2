//! SMS Gateway Module
//!
//! SMS delivery implementations for sending verification codes:
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Spryng Gateway**: Production delivery via a form-encoded HTTP POST
//! - **Mock Implementation**: Tracing output for development
//! - **Trait Adapters**: Bridges to the core delivery seam

pub mod mock_sms;
pub mod sms_service;
pub mod spryng;
pub mod spryng_trait_adapter;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use sms_service::{is_valid_phone_number, mask_phone_number, SmsService};
pub use spryng::{SpryngConfig, SpryngSmsService, DEFAULT_ENDPOINT};
pub use spryng_trait_adapter::{MockSmsServiceAdapter, SpryngSmsServiceAdapter};


/// Create an SMS service based on configuration
///
/// Returns the implementation matching the configured provider; unknown
/// providers and broken gateway setups fall back to the mock service.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Box<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        "spryng" => {
            let spryng_config = SpryngConfig {
                account: config.account.clone(),
                auth_token: config.auth_token.clone(),
                from: config.from.clone(),
                route: config.route.clone(),
                endpoint: config
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                request_timeout_secs: 30,
            };

            match SpryngSmsService::new(spryng_config) {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize Spryng SMS gateway: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Box::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Box::new(MockSmsService::new())
        }
    }
}
