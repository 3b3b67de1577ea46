//! Telegram message bodies (HTML parse mode).

use serde::Deserialize;

use crate::common::utils::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }
}

/// `message` is inserted as markup; `title` is escaped.
pub fn notification_message(title: &str, message: &str, priority: Priority) -> String {
    format!(
        "{} <b>{}</b>\n\n{}",
        priority.emoji(),
        escape_html(title),
        message
    )
}

pub fn attention_message(requester: &str, reason: &str, dashboard_url: &str) -> String {
    format!(
        "👋 <b>Attention Requested</b>\n\nFrom: {}\nReason: {}\n\n<a href=\"{}\">Open Dashboard</a>",
        requester, reason, dashboard_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_emoji_by_priority() {
        assert_eq!(
            notification_message("Imported to Barry", "\"Song\" is now in Barry", Priority::Low),
            "🟢 <b>Imported to Barry</b>\n\n\"Song\" is now in Barry"
        );
        assert!(notification_message("t", "m", Priority::High).starts_with("🔴 "));
        assert!(notification_message("t", "m", Priority::Medium).starts_with("🟡 "));
    }

    #[test]
    fn test_attention_message() {
        assert_eq!(
            attention_message("Stephen Ackroyd", "Cover story sign-off", "https://dash.example"),
            "👋 <b>Attention Requested</b>\n\nFrom: Stephen Ackroyd\nReason: Cover story sign-off\n\n<a href=\"https://dash.example\">Open Dashboard</a>"
        );
    }
}
