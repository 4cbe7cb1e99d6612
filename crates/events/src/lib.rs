//! Outbound notifications.
//!
//! - [`delivery::email`]: SMTP delivery through `lettre`.
//! - [`welcome`]: the message sent to a newly created staff account.

pub mod delivery;
pub mod welcome;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, OutboundEmail};
pub use welcome::{welcome_email, WelcomeRecipient};
