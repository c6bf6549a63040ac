//! `securepass save`: append a credential to an identity's history.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, prompt_error, Cli};
use crate::errors::Result;

/// Execute the `save` command.
pub fn execute(cli: &Cli, website: &str, account: &str, expiry_days: i64) -> Result<()> {
    // Piped input wins; otherwise ask without echo.
    let value = if io::stdin().is_terminal() {
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Enter password for {account} @ {website}"))
                .interact()
                .map_err(prompt_error)?,
        )
    } else {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        buf
    };

    let (session, _) = open_session(cli)?;
    session.save(website, account, &value, expiry_days)?;

    let count = session.history(website, account)?.len();
    output::success(&format!(
        "Password saved for {account} @ {website} ({count} in history)"
    ));

    Ok(())
}
