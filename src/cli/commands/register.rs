//! Implementation of the `inspect register` command.

use anyhow::Result;
use clap::Args;

use super::login::SessionOutput;
use crate::cli::output::{create_spinner, output};
use crate::cli::AppContext;
use crate::domain::models::{Config, Registration};

/// Arguments for `inspect register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    pub username: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,

    /// Repeat the password
    #[arg(long = "confirm")]
    pub confirm_password: String,
}

/// Run `inspect register`.
pub async fn execute(args: RegisterArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let form = Registration {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };

    let spinner = create_spinner("Creating account", json_mode);
    let result = ctx.runtime.register(&form).await;
    spinner.finish_and_clear();

    let user = result?;
    output(&SessionOutput::signed_in("Account created", &user), json_mode);
    Ok(())
}
