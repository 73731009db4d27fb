use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tk",
    about = concat!("taskui v", env!("CARGO_PKG_VERSION"), " - a tiny terminal task tracker"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different task database
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks (completed tasks drop out 24h after creation)
    List(ListArgs),
    /// Mark a task done
    Done(IdArg),
    /// Mark a task not done
    Undone(IdArg),
    /// Delete a task permanently
    Delete(IdArg),
    /// Rename a task
    Rename(RenameArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Due date (free text)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include tasks hidden from the default view
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Task id
    pub id: i64,
    /// New name
    pub name: String,
}
