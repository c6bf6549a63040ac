//! `securepass search`: find identities by website or account.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, term: &str) -> Result<()> {
    let (session, _) = open_session(cli)?;
    let results = session.search(term)?;

    output::print_search_results(&results);

    Ok(())
}
