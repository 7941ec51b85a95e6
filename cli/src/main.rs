//! Command-line interface for the Todo service.
//!
//! Commands:
//! - list: List all todos
//! - get: Show one todo with its notes
//! - add: Create a todo
//! - note: Append a note to a todo
//!
//! Configuration via environment:
//! - TODO_URL: Base URL of the todo server (default: http://localhost:4000)
//! - TODO_TOKEN: Bearer token sent with every request

mod commands;

use clap::{Parser, Subcommand};

use commands::{add::AddArgs, get::GetArgs, list::ListArgs, note::NoteArgs};

/// Todo service CLI
///
/// Prints JSON by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Todo server URL
    #[arg(
        long,
        env = "TODO_URL",
        default_value = "http://localhost:4000",
        global = true
    )]
    url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "TODO_TOKEN", global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all todos
    List(ListArgs),

    /// Show a todo and its notes
    Get(GetArgs),

    /// Create a todo
    Add(AddArgs),

    /// Append a note to a todo
    Note(NoteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(cli.token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&client, url, cli.human, args).await,
        Commands::Get(args) => commands::get::execute(&client, url, cli.human, args).await,
        Commands::Add(args) => commands::add::execute(&client, url, cli.human, args).await,
        Commands::Note(args) => commands::note::execute(&client, url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
