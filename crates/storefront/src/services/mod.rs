//! External service clients and capability sinks.

pub mod chat;
pub mod contact;
pub mod stripe;

pub use chat::{ChatClient, ChatError, ChatMessage};
pub use contact::{ContactError, ContactSink, ContactSubmission, JsonlContactSink};
pub use stripe::{CheckoutRedirect, StripeClient, StripeError};
