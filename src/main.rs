use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register { ref username } => {
            credvault::cli::commands::register::execute(&cli, username)
        }
        Commands::Set {
            ref account,
            ref value,
            generate,
            length,
        } => credvault::cli::commands::set::execute(&cli, account, value.as_deref(), generate, length),
        Commands::Get { ref account } => credvault::cli::commands::get::execute(&cli, account),
        Commands::Delete { ref account, force } => {
            credvault::cli::commands::delete::execute(&cli, account, force)
        }
        Commands::List => credvault::cli::commands::list::execute(&cli),
        Commands::Generate { length } => {
            credvault::cli::commands::generate_cmd::execute(&cli, length)
        }
        Commands::Completions { ref shell } => credvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
