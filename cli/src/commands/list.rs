//! LIST command - List all todos.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use todo_core::Todo;

use super::{HumanReadable, make_request, output};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {}

/// Todos as returned by GET /todos.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TodoList(pub Vec<Todo>);

impl HumanReadable for TodoList {
    fn print_human(&self) {
        println!("{}", "Todos".green().bold());
        println!("{}", "=".repeat(60));

        if self.0.is_empty() {
            println!("  {}", "(No todos)".dimmed());
            return;
        }

        for todo in &self.0 {
            println!();
            todo.print_human();
        }

        println!();
        println!("  {} {}", "Total:".cyan(), self.0.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    _args: ListArgs,
) -> Result<()> {
    let url = format!("{}/todos", base_url);
    let todos: Vec<Todo> = make_request(client.get(&url)).await?;

    output(&TodoList(todos), human)
}
