//! Implementation of the `inspect boot` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::cli::output::{create_spinner, output, CommandOutput, TableFormatter};
use crate::cli::AppContext;
use crate::domain::models::{Config, DesiredRoute, NotificationPayload, ShareObject};
use crate::services::IngestionOutcome;

/// Arguments for `inspect boot`.
#[derive(Args, Debug)]
pub struct BootArgs {
    /// URL the app is opened with
    #[arg(long)]
    pub deep_link: Option<String>,

    /// Summary id of a tapped notification that launched the app
    #[arg(long)]
    pub notification_id: Option<String>,

    /// Text delivered by the share sheet at launch
    #[arg(long)]
    pub share_text: Option<String>,

    /// Link delivered by the share sheet at launch
    #[arg(long)]
    pub share_link: Option<String>,

    /// Device push token to register once the session is restored
    #[arg(long)]
    pub push_token: Option<String>,

    /// How long to wait for navigation to settle
    #[arg(long, default_value = "5000")]
    pub timeout_ms: u64,
}

/// Result of a cold start.
#[derive(Debug, Serialize)]
pub struct BootOutput {
    /// Navigation settled before the timeout.
    pub settled: bool,
    /// A session exists at the end.
    pub signed_in: bool,
    /// Route shown at the end.
    pub final_route: Option<DesiredRoute>,
    /// Every route shown, in order.
    pub trail: Vec<DesiredRoute>,
    /// Navigate actions issued by the resolver.
    pub navigate_actions: usize,
    /// Outcome of the launch share, if one was given.
    pub share: Option<String>,
    /// The push token was uploaded.
    pub push_token_registered: bool,
    /// Alerts shown during the run.
    pub alerts: Vec<String>,
}

impl CommandOutput for BootOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![TableFormatter::new().format_trail(&self.trail)];
        match &self.final_route {
            Some(route) if self.settled => lines.push(format!("Settled on {route}")),
            Some(route) => lines.push(format!("Timed out on {route}")),
            None => lines.push("Navigation never became ready".to_string()),
        }
        lines.push(format!(
            "Session: {}",
            if self.signed_in { "signed in" } else { "signed out" }
        ));
        if let Some(share) = &self.share {
            lines.push(format!("Share: {share}"));
        }
        if self.push_token_registered {
            lines.push("Push token registered".to_string());
        }
        for alert in &self.alerts {
            lines.push(format!("Alert: {alert}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub(crate) fn describe_outcome(outcome: Option<&IngestionOutcome>) -> String {
    match outcome {
        Some(IngestionOutcome::Routed { route, .. }) => format!("routed to {route}"),
        Some(IngestionOutcome::Duplicate) => "duplicate delivery skipped".to_string(),
        Some(IngestionOutcome::Busy) => "skipped, another share is in progress".to_string(),
        Some(IngestionOutcome::Ignored) => "nothing to ingest".to_string(),
        None => "failed".to_string(),
    }
}

/// A notification id as the server would send it: numeric when it parses.
fn notification_for(id: &str) -> NotificationPayload {
    match id.parse::<i64>() {
        Ok(number) => NotificationPayload::with_summary_id(number),
        Err(_) => NotificationPayload::with_summary_id(id),
    }
}

/// Run `inspect boot`.
pub async fn execute(args: BootArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let spinner = create_spinner("Booting", json_mode);

    // Launch intents arrive before the navigation container is mounted.
    ctx.start();
    if let Some(url) = &args.deep_link {
        if ctx.runtime.open_url(url).is_none() {
            tracing::info!(url = %url, "launch URL is not a summary link");
        }
    }
    if let Some(id) = &args.notification_id {
        ctx.runtime.notification_response(&notification_for(id));
    }
    let share_task = if args.share_text.is_some() || args.share_link.is_some() {
        let batch = ctx.inbox.receive([ShareObject {
            text: args.share_text.clone(),
            weblink: args.share_link.clone(),
        }]);
        Some(ctx.runtime.share_received(batch))
    } else {
        None
    };
    ctx.mount();

    let share = match share_task {
        Some(task) => {
            spinner.set_message("Ingesting shared item");
            let outcome = task.await.context("Share ingestion task panicked")?;
            Some(describe_outcome(outcome.as_ref()))
        }
        None => None,
    };

    spinner.set_message("Waiting for navigation");
    let settled = ctx.settle(Duration::from_millis(args.timeout_ms)).await;

    let push_token_registered = match &args.push_token {
        Some(token) => ctx.runtime.attach_push_token(token).await,
        None => false,
    };
    spinner.finish_and_clear();

    let result = BootOutput {
        settled,
        signed_in: ctx.runtime.session().is_signed_in(),
        final_route: ctx.navigator.state().current,
        trail: ctx.navigator.history(),
        navigate_actions: ctx.navigator.actions().len(),
        share,
        push_token_registered,
        alerts: ctx.alerts.messages(),
    };
    ctx.runtime.shutdown().await;

    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_id_keeps_server_type() {
        let numeric = notification_for("42");
        assert_eq!(numeric.summary_id(), Some(&json!(42)));
        let text = notification_for("a1");
        assert_eq!(text.summary_id(), Some(&json!("a1")));
    }
}
