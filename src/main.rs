use clap::Parser;
use taskui::cli::commands::Cli;
use taskui::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = taskui::tui::run(cli.db.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            if let Err(e) = handlers::dispatch(command, cli.json, cli.db.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
