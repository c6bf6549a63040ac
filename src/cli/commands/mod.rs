//! One module per subcommand.  Each exposes an `execute` function that
//! `main` dispatches to.

pub mod expiry;
pub mod generate;
pub mod history;
pub mod init;
pub mod save;
pub mod search;
