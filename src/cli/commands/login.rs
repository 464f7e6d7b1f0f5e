//! Implementation of the `inspect login` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{create_spinner, output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::{Config, Credentials, SessionUser};

/// Arguments for `inspect login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Result of an account command.
#[derive(Debug, Serialize)]
pub struct SessionOutput {
    /// The command succeeded.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

impl SessionOutput {
    /// Successful output for `user`.
    pub fn signed_in(message: &str, user: &SessionUser) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user_id: Some(user.id),
            username: user.username.clone(),
        }
    }
}

impl CommandOutput for SessionOutput {
    fn to_human(&self) -> String {
        match (&self.username, self.user_id) {
            (Some(name), _) => format!("{} ({name})", self.message),
            (None, Some(id)) => format!("{} (user {id})", self.message),
            _ => self.message.clone(),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `inspect login`.
pub async fn execute(args: LoginArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };

    let spinner = create_spinner("Signing in", json_mode);
    let result = ctx.runtime.login(&credentials).await;
    spinner.finish_and_clear();

    let user = result?;
    output(&SessionOutput::signed_in("Signed in", &user), json_mode);
    Ok(())
}
