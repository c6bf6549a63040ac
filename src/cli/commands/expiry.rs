//! `securepass expiry`: check the current credential of an identity.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `expiry` command.
pub fn execute(cli: &Cli, website: &str, account: &str) -> Result<()> {
    let (session, _) = open_session(cli)?;

    let Some(latest) = session.latest(website, account)? else {
        output::info("No passwords found.");
        return Ok(());
    };

    output::info(&format!(
        "{account} @ {website}: saved on {}, expires after {} day(s)",
        latest.timestamp, latest.expiry_days
    ));
    output::print_expiry_status(session.check_expiry(&latest));

    Ok(())
}
