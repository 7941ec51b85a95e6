//! GET command - Show one todo with its notes.

use anyhow::Result;
use clap::Args;
use todo_core::{Todo, TodoId};

use super::{make_request, output};

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// ID of the todo
    pub id: TodoId,
}

/// Execute the get command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: GetArgs,
) -> Result<()> {
    let url = format!("{}/todos/{}", base_url, args.id);
    let todo: Todo = make_request(client.get(&url)).await?;

    output(&todo, human)
}
