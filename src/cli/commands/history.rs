//! `securepass history`: show every saved credential for an identity.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `history` command.
pub fn execute(cli: &Cli, website: &str, account: &str) -> Result<()> {
    let (session, _) = open_session(cli)?;
    let entries = session.history(website, account)?;

    output::print_history_table(website, account, &entries);

    Ok(())
}
