//! The interactive menu.
//!
//! Authentication happens once before the loop starts; a failure there
//! ends the process.  Inside the loop, every action's error is printed
//! and the menu continues.

use dialoguer::{Confirm, Input, Password, Select};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, prompt_error, Cli};
use crate::clipboard;
use crate::config::Settings;
use crate::errors::Result;
use crate::generator::{self, PasswordOptions, MIN_LENGTH};
use crate::storage::Backend;
use crate::vault::{VaultSession, DEFAULT_EXPIRY_DAYS};

const ITEMS: &[&str] = &[
    "Save password",
    "Get password history",
    "Generate strong password",
    "Search passwords",
    "Check password expiry status",
    "Copy password to clipboard",
    "Exit",
];

/// Run the menu until the operator picks "Exit".
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, settings) = open_session(cli)?;

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Password manager")
            .items(ITEMS)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let outcome = match choice {
            0 => handle_save(&session),
            1 => handle_history(&session),
            2 => handle_generate(&session),
            3 => handle_search(&session),
            4 => handle_expiry(&session),
            5 => handle_copy(&session, &settings),
            _ => {
                output::info("Goodbye!");
                return Ok(());
            }
        };

        if let Err(e) = outcome {
            tracing::debug!(action = ITEMS[choice], error = %e, "menu action failed");
            output::error(&e.to_string());
        }
    }
}

fn ask(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_error)
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn ask_identity() -> Result<(String, String)> {
    let website = ask("Website/App name")?;
    let account = ask("Account name")?;
    Ok((website, account))
}

fn ask_expiry() -> Result<i64> {
    if !ask_yes_no("Set a custom expiry period?")? {
        return Ok(DEFAULT_EXPIRY_DAYS);
    }
    Input::<i64>::new()
        .with_prompt("Days until expiry")
        .default(DEFAULT_EXPIRY_DAYS)
        .interact_text()
        .map_err(prompt_error)
}

fn store_credential<B: Backend>(session: &VaultSession<B>, password: &str) -> Result<()> {
    let (website, account) = ask_identity()?;
    let expiry = ask_expiry()?;
    session.save(&website, &account, password, expiry)?;
    output::success("Password saved successfully!");
    Ok(())
}

fn handle_save<B: Backend>(session: &VaultSession<B>) -> Result<()> {
    let password = Zeroizing::new(
        Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_error)?,
    );
    store_credential(session, &password)
}

fn handle_history<B: Backend>(session: &VaultSession<B>) -> Result<()> {
    let (website, account) = ask_identity()?;
    let entries = session.history(&website, &account)?;
    output::print_history_table(&website, &account, &entries);
    Ok(())
}

fn handle_generate<B: Backend>(session: &VaultSession<B>) -> Result<()> {
    let length = Input::<usize>::new()
        .with_prompt(format!("Password length (minimum {MIN_LENGTH})"))
        .default(16)
        .interact_text()
        .map_err(prompt_error)?;

    let opts = PasswordOptions {
        length: length.max(MIN_LENGTH),
        include_lower: ask_yes_no("Include lowercase letters?")?,
        include_upper: ask_yes_no("Include uppercase letters?")?,
        include_numbers: ask_yes_no("Include numbers?")?,
        include_symbols: ask_yes_no("Include symbols?")?,
        exclude_ambiguous: ask_yes_no("Exclude ambiguous characters (I, l, 1, O, 0)?")?,
    };

    let password = Zeroizing::new(generator::generate(&opts)?);
    println!("\nGenerated password: {}", password.as_str());

    if ask_yes_no("Save this password?")? {
        store_credential(session, &password)?;
    }
    Ok(())
}

fn handle_search<B: Backend>(session: &VaultSession<B>) -> Result<()> {
    let term = ask("Search term")?;
    let results = session.search(&term)?;
    output::print_search_results(&results);
    Ok(())
}

fn handle_expiry<B: Backend>(session: &VaultSession<B>) -> Result<()> {
    let (website, account) = ask_identity()?;
    match session.latest(&website, &account)? {
        Some(latest) => output::print_expiry_status(session.check_expiry(&latest)),
        None => output::info("No passwords found."),
    }
    Ok(())
}

fn handle_copy<B: Backend>(session: &VaultSession<B>, settings: &Settings) -> Result<()> {
    let (website, account) = ask_identity()?;
    let Some(latest) = session.latest(&website, &account)? else {
        output::info("No passwords found.");
        return Ok(());
    };

    let delay = settings.clipboard_clear_delay();
    clipboard::copy_with_auto_clear(&latest.password, delay)?;
    output::success(&format!(
        "Password copied to clipboard! (will clear in {} seconds)",
        delay.as_secs()
    ));
    Ok(())
}
