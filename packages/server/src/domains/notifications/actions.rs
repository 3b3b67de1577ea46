use anyhow::Result;
use tracing::{info, warn};

use super::messages::{attention_message, notification_message, Priority};
use crate::common::utils::escape_html;
use crate::common::Editor;
use crate::kernel::ServerDeps;

/// Send a workflow notification. The step that triggered it has already
/// happened, so a failed send is only logged.
pub async fn notify(deps: &ServerDeps, title: &str, message: &str, priority: Priority) {
    let text = notification_message(title, message, priority);
    if let Err(e) = deps.notifier.send(&text).await {
        warn!(title, error = %e, "Failed to send notification");
    }
}

/// Ping the editorial chat on behalf of an editor.
pub async fn request_attention(deps: &ServerDeps, requester: Editor, reason: &str) -> Result<()> {
    let text = attention_message(
        requester.display_name(),
        &escape_html(reason),
        &deps.dashboard_url,
    );
    deps.notifier.send(&text).await?;
    info!(requester = %requester, "Attention requested");
    Ok(())
}
