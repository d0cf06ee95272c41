//! `credvault generate` — print a random password to stdout.

use crate::cli::Cli;
use crate::config::Settings;
use crate::errors::Result;
use crate::generate::PasswordGenerator;

/// Execute the `generate` command.
pub fn execute(_cli: &Cli, length: Option<usize>) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;
    let length = length.unwrap_or(settings.generate_length);

    let mut generator = PasswordGenerator::new();
    println!("{}", generator.generate(length));

    Ok(())
}
