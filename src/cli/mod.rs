//! Command-line interface: clap parser, prompts, output helpers and commands.

pub mod commands;
pub mod menu;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SecurePassError};
use crate::storage::SqliteBackend;
use crate::vault::{master, VaultSession, DEFAULT_EXPIRY_DAYS};

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "SECUREPASS_MASTER_PASSWORD";

/// SecurePass CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "securepass",
    about = "Local encrypted credential vault with history and expiry tracking",
    version
)]
pub struct Cli {
    /// Command to run (default: interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the master record, database and config
    #[arg(long, default_value = ".", global = true, env = "SECUREPASS_DATA_DIR")]
    pub data_dir: String,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the master password (first-run setup)
    Init,

    /// Save a credential (appends to its history)
    Save {
        /// Website or app name
        website: String,
        /// Account name
        account: String,
        /// Days until the credential expires
        #[arg(short, long, default_value_t = DEFAULT_EXPIRY_DAYS, allow_negative_numbers = true)]
        expiry: i64,
    },

    /// Show every saved credential for an identity
    History {
        /// Website or app name
        website: String,
        /// Account name
        account: String,
    },

    /// Generate a random password
    Generate {
        /// Password length (minimum 8)
        #[arg(short, long, default_value_t = 16)]
        length: usize,
        /// Leave out lowercase letters
        #[arg(long)]
        no_lower: bool,
        /// Leave out uppercase letters
        #[arg(long)]
        no_upper: bool,
        /// Leave out digits
        #[arg(long)]
        no_numbers: bool,
        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,
        /// Leave out look-alike characters (I, l, 1, O, 0)
        #[arg(long)]
        exclude_ambiguous: bool,
    },

    /// Search websites and accounts (case-insensitive)
    Search {
        /// Text to look for
        term: String,
    },

    /// Check whether the current credential is close to expiry
    Expiry {
        /// Website or app name
        website: String,
        /// Account name
        account: String,
    },

    /// Run the interactive menu
    Menu,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Map a dialoguer failure into our error type.  An interrupted prompt
/// (Ctrl-C, closed terminal) counts as a cancellation.
pub(crate) fn prompt_error(e: dialoguer::Error) -> SecurePassError {
    match e {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            SecurePassError::UserCancelled
        }
        other => SecurePassError::CommandFailed(format!("input prompt: {other}")),
    }
}

/// Read the master password from `SECUREPASS_MASTER_PASSWORD` if it is set
/// and non-empty.
fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Get the master password, from the environment or an interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(prompt_error)?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation.
///
/// Both values are returned so that first-run setup can reject a
/// mismatch.  With `SECUREPASS_MASTER_PASSWORD` set, the same value is
/// used for both.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Some(pw) = password_from_env() {
        let confirm = pw.clone();
        return Ok((pw, confirm));
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .interact()
        .map_err(prompt_error)?;
    let confirm = dialoguer::Password::new()
        .with_prompt("Confirm master password")
        .interact()
        .map_err(prompt_error)?;

    Ok((Zeroizing::new(password), Zeroizing::new(confirm)))
}

/// The data directory from the CLI arguments.
pub fn data_dir(cli: &Cli) -> PathBuf {
    PathBuf::from(&cli.data_dir)
}

/// Run first-run setup if no master record exists yet.
///
/// Returns `true` if a new record was created.
pub fn ensure_initialized(master_path: &Path) -> Result<bool> {
    if master::is_initialized(master_path) {
        return Ok(false);
    }

    output::info("First time setup: create a master password.");
    let (password, confirm) = prompt_new_password()?;
    master::setup(master_path, password.as_bytes(), confirm.as_bytes())?;
    output::success(&format!(
        "Master record created at {}",
        master_path.display()
    ));
    output::warning("There is no way to recover or change the master password. Keep it safe.");
    Ok(true)
}

/// Load settings, run first-run setup if needed, ask for the master
/// password, and open a session on the SQLite store.
pub fn open_session(cli: &Cli) -> Result<(VaultSession<SqliteBackend>, Settings)> {
    let dir = data_dir(cli);
    let settings = Settings::load(&dir)?;
    let master_path = settings.master_path(&dir);

    ensure_initialized(&master_path)?;

    let password = prompt_password()?;
    let backend = SqliteBackend::new(settings.database_path(&dir));
    let session = VaultSession::unlock(&master_path, password.as_bytes(), backend)?;

    Ok((session, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_prompt_is_a_cancellation() {
        let interrupted = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(prompt_error(interrupted), SecurePassError::UserCancelled));

        let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(prompt_error(broken), SecurePassError::CommandFailed(_)));
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::parse_from(["securepass"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, ".");
        assert!(!cli.verbose);
    }

    #[test]
    fn save_defaults_expiry_to_ninety() {
        let cli = Cli::parse_from(["securepass", "save", "example.com", "alice"]);
        match cli.command {
            Some(Commands::Save {
                website,
                account,
                expiry,
            }) => {
                assert_eq!(website, "example.com");
                assert_eq!(account, "alice");
                assert_eq!(expiry, 90);
            }
            _ => panic!("expected save command"),
        }
    }

    #[test]
    fn save_accepts_custom_expiry() {
        let cli = Cli::parse_from(["securepass", "save", "site", "bob", "--expiry", "30"]);
        assert!(matches!(cli.command, Some(Commands::Save { expiry: 30, .. })));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["securepass", "search", "foo", "--data-dir", "/tmp/v", "-v"]);
        assert_eq!(cli.data_dir, "/tmp/v");
        assert!(cli.verbose);
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::parse_from([
            "securepass",
            "generate",
            "--length",
            "24",
            "--no-symbols",
            "--exclude-ambiguous",
        ]);
        match cli.command {
            Some(Commands::Generate {
                length,
                no_symbols,
                exclude_ambiguous,
                no_lower,
                ..
            }) => {
                assert_eq!(length, 24);
                assert!(no_symbols);
                assert!(exclude_ambiguous);
                assert!(!no_lower);
            }
            _ => panic!("expected generate command"),
        }
    }
}
