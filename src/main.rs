use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use boxbreath::cli::args::{Cli, Commands};
use boxbreath::cli::commands;
use boxbreath::config::Paths;
use boxbreath::features::shell::completion_install_instructions;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let format = cli.output;

    let output = match cli.command {
        Commands::Start(args) => commands::start(&paths, &args, format)?,
        Commands::Config(args) => commands::config(&paths, args.command, format)?,
        Commands::Tracks => commands::tracks(&paths, format)?,
        Commands::Completions { shell } => {
            if std::io::stderr().is_terminal() {
                let hint = completion_install_instructions(shell);
                if !hint.is_empty() {
                    eprintln!("{}", hint.dimmed());
                }
            }
            commands::completions(shell)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
