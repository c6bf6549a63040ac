//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::expiry::EXPIRY_WARNING_DAYS;
use crate::vault::{check_expiry, CredentialEntry, ExpiryStatus, SearchResult};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Short human-readable expiry label for table cells.
pub fn expiry_label(status: ExpiryStatus) -> String {
    if status.is_expired() {
        format!("expired {} day(s) ago", status.days_remaining.unsigned_abs())
    } else if status.is_expiring {
        format!("expires in {} day(s)", status.days_remaining)
    } else {
        format!("valid for {} day(s)", status.days_remaining)
    }
}

/// Print a credential history, oldest first.
pub fn print_history_table(website: &str, account: &str, entries: &[CredentialEntry]) {
    if entries.is_empty() {
        info("No password history found.");
        tip("Run `securepass save <WEBSITE> <ACCOUNT>` to store one.");
        return;
    }

    info(&format!(
        "Password history for {website} - {account} ({} entries)",
        entries.len()
    ));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Password", "Saved on", "Expiry (days)", "Status"]);

    for (i, entry) in entries.iter().enumerate() {
        let status = check_expiry(&entry.timestamp, entry.expiry_days);
        table.add_row(vec![
            (i + 1).to_string(),
            entry.password.clone(),
            entry.timestamp.clone(),
            entry.expiry_days.to_string(),
            expiry_label(status),
        ]);
    }

    println!("{table}");
}

/// Print search hits without revealing the credentials themselves.
pub fn print_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        info("No matches found.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Website", "Account", "Saved on", "Status"]);

    let mut expiring = 0;
    for (i, hit) in results.iter().enumerate() {
        let status = check_expiry(&hit.entry.timestamp, hit.entry.expiry_days);
        if status.is_expiring {
            expiring += 1;
        }
        table.add_row(vec![
            (i + 1).to_string(),
            hit.website.clone(),
            hit.account.clone(),
            hit.entry.timestamp.clone(),
            expiry_label(status),
        ]);
    }

    println!("{table}");

    if expiring > 0 {
        warning(&format!(
            "{expiring} credential(s) expire within {EXPIRY_WARNING_DAYS} days or have already expired."
        ));
    }
}

/// Print the expiry verdict for one credential.
pub fn print_expiry_status(status: ExpiryStatus) {
    if status.is_expired() {
        warning(&format!(
            "Password expired {} day(s) ago!",
            status.days_remaining.unsigned_abs()
        ));
    } else if status.is_expiring {
        warning(&format!(
            "Password will expire in {} day(s)!",
            status.days_remaining
        ));
    } else {
        success(&format!(
            "Password is valid for {} more day(s).",
            status.days_remaining
        ));
    }
}
