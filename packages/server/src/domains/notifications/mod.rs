pub mod actions;
pub mod messages;

pub use actions::{notify, request_attention};
pub use messages::{attention_message, notification_message, Priority};
