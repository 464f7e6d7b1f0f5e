//! Implementation of the `inspect profile` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::Config;
use crate::domain::ports::AuthApi;

/// Arguments for `inspect profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// User to look up (defaults to the signed-in user)
    pub user_id: Option<i64>,
}

/// A user profile as returned by the API.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ProfileOutput {
    /// Raw profile record.
    pub profile: Value,
}

impl CommandOutput for ProfileOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.profile).unwrap_or_else(|_| self.profile.to_string())
    }

    fn to_json(&self) -> Value {
        self.profile.clone()
    }
}

/// Run `inspect profile`.
pub async fn execute(args: ProfileArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let profile = match args.user_id {
        Some(id) => ctx
            .api
            .get_profile_information(id)
            .await
            .with_context(|| format!("Failed to load profile for user {id}"))?,
        None => {
            let user = ctx
                .api
                .get_auth_user()
                .await
                .context("Failed to load the signed-in user")?;
            serde_json::to_value(user)?
        }
    };
    output(&ProfileOutput { profile }, json_mode);
    Ok(())
}
