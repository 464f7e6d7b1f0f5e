//! Implementation of the `inspect share` command.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::boot::describe_outcome;
use crate::cli::output::{create_spinner, output, CommandOutput, TableFormatter};
use crate::cli::AppContext;
use crate::domain::models::{Config, DesiredRoute, ShareObject};

/// Arguments for `inspect share`.
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("content").required(true).multiple(true).args(["text", "link"])))]
pub struct ShareArgs {
    /// Shared text
    #[arg(long)]
    pub text: Option<String>,

    /// Shared web link
    #[arg(long)]
    pub link: Option<String>,

    /// Summary currently open for annotation
    #[arg(long)]
    pub annotate: Option<i64>,

    /// How long to wait for navigation to settle
    #[arg(long, default_value = "5000")]
    pub timeout_ms: u64,
}

/// Result of a share delivery.
#[derive(Debug, Serialize)]
pub struct ShareOutput {
    /// How ingestion ended.
    pub outcome: String,
    /// Route shown at the end.
    pub final_route: Option<DesiredRoute>,
    /// Every route shown, in order.
    pub trail: Vec<DesiredRoute>,
    /// Alerts shown during the run.
    pub alerts: Vec<String>,
}

impl CommandOutput for ShareOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            TableFormatter::new().format_trail(&self.trail),
            format!("Share: {}", self.outcome),
        ];
        for alert in &self.alerts {
            lines.push(format!("Alert: {alert}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `inspect share`.
pub async fn execute(args: ShareArgs, config: Config, json_mode: bool) -> Result<()> {
    let timeout = Duration::from_millis(args.timeout_ms);
    let ctx = AppContext::build(config)?;
    let spinner = create_spinner("Starting client", json_mode);

    ctx.start();
    ctx.mount();
    ctx.settle(timeout).await;
    if let Some(summary_id) = args.annotate {
        ctx.runtime.open_annotation(summary_id);
    }

    spinner.set_message("Ingesting shared item");
    let batch = ctx.inbox.receive([ShareObject {
        text: args.text,
        weblink: args.link,
    }]);
    let outcome = ctx.runtime.ingest_share(&batch).await;
    ctx.settle(timeout).await;
    spinner.finish_and_clear();

    let result = ShareOutput {
        outcome: describe_outcome(outcome.as_ref()),
        final_route: ctx.navigator.state().current,
        trail: ctx.navigator.history(),
        alerts: ctx.alerts.messages(),
    };
    ctx.runtime.shutdown().await;
    output(&result, json_mode);

    if outcome.is_none() {
        bail!("Share ingestion failed");
    }
    Ok(())
}
