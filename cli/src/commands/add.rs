//! ADD command - Create a todo.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use todo_core::{NewTodo, Todo};

use super::{HumanReadable, make_request, output};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Name of the todo
    pub name: String,

    /// Optional longer description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<AddArgs> for NewTodo {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
        }
    }
}

/// Wrapper so a created todo prints with a confirmation header.
#[derive(serde::Serialize)]
#[serde(transparent)]
struct Created(Todo);

impl HumanReadable for Created {
    fn print_human(&self) {
        println!("{}", "Todo created.".green().bold());
        println!();
        self.0.print_human();
    }
}

/// Execute the add command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: AddArgs,
) -> Result<()> {
    let url = format!("{}/todos", base_url);
    let body = NewTodo::from(args);

    let todo: Todo = make_request(client.post(&url).json(&body)).await?;

    output(&Created(todo), human)
}
