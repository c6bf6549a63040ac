//! `securepass generate`: print a random password.

use crate::errors::Result;
use crate::generator::{self, PasswordOptions};

/// Execute the `generate` command.
///
/// Prints only the password so the output can be piped.
pub fn execute(opts: &PasswordOptions) -> Result<()> {
    let password = generator::generate(opts)?;
    println!("{password}");
    Ok(())
}
