//! Implementation of the `inspect logout` command.

use anyhow::Result;

use super::login::SessionOutput;
use crate::cli::output::output;
use crate::cli::AppContext;
use crate::domain::models::Config;

/// Run `inspect logout`.
pub async fn execute(config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::build(config)?;
    ctx.runtime.logout().await?;

    output(
        &SessionOutput {
            success: true,
            message: "Signed out".to_string(),
            user_id: None,
            username: None,
        },
        json_mode,
    );
    Ok(())
}
