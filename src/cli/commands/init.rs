//! `securepass init`: create the master record on first run.

use std::fs;

use crate::cli::output;
use crate::cli::{data_dir, ensure_initialized, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli);

    // 1. Create the data directory if it doesn't exist.
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        output::info(&format!("Created data directory: {}", dir.display()));
    }

    // 2. Set up the master record unless one is already there.
    let settings = Settings::load(&dir)?;
    let master_path = settings.master_path(&dir);
    if !ensure_initialized(&master_path)? {
        output::info(&format!(
            "Vault already initialized at {}",
            master_path.display()
        ));
        return Ok(());
    }

    output::tip("Run `securepass save <WEBSITE> <ACCOUNT>` to store a credential.");
    output::tip("Run `securepass` with no arguments for the interactive menu.");

    Ok(())
}
