//! Email Delivery Module
//!
//! Email sending for verification codes with two backends:
//!
//! - `ConsoleMailer` - logs emails instead of sending (development)
//! - `SmtpMailer` - sends via an SMTP relay using lettre
//!
//! The `MailerCodeDeliveryAdapter` bridges any backend to the core email
//! delivery seam.

mod adapter;
mod console;
mod mailer;
mod smtp;

pub use adapter::MailerCodeDeliveryAdapter;
pub use console::ConsoleMailer;
pub use mailer::{Email, Mailer};
pub use smtp::{SmtpConfig, SmtpMailer};
