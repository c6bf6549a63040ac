use clap::Parser;
use securepass::cli::{Cli, Commands};
use securepass::generator::PasswordOptions;

fn main() {
    let cli = Cli::parse();
    securepass::logging::init(cli.verbose);

    let result = match cli.command {
        None | Some(Commands::Menu) => securepass::cli::menu::execute(&cli),
        Some(Commands::Init) => securepass::cli::commands::init::execute(&cli),
        Some(Commands::Save {
            ref website,
            ref account,
            expiry,
        }) => securepass::cli::commands::save::execute(&cli, website, account, expiry),
        Some(Commands::History {
            ref website,
            ref account,
        }) => securepass::cli::commands::history::execute(&cli, website, account),
        Some(Commands::Generate {
            length,
            no_lower,
            no_upper,
            no_numbers,
            no_symbols,
            exclude_ambiguous,
        }) => securepass::cli::commands::generate::execute(&PasswordOptions {
            length,
            include_upper: !no_upper,
            include_lower: !no_lower,
            include_numbers: !no_numbers,
            include_symbols: !no_symbols,
            exclude_ambiguous,
        }),
        Some(Commands::Search { ref term }) => {
            securepass::cli::commands::search::execute(&cli, term)
        }
        Some(Commands::Expiry {
            ref website,
            ref account,
        }) => securepass::cli::commands::expiry::execute(&cli, website, account),
    };

    if let Err(e) = result {
        securepass::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
