//! NOTE command - Append a note to a todo.

use anyhow::Result;
use clap::Args;
use todo_core::{NewNote, Note, TodoId};

use super::{make_request, output};

/// Arguments for the note command.
#[derive(Args)]
pub struct NoteArgs {
    /// ID of the todo to annotate
    pub todo_id: TodoId,

    /// Note text
    pub text: String,
}

/// Execute the note command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: NoteArgs,
) -> Result<()> {
    let url = format!("{}/todos/{}/notes", base_url, args.todo_id);
    let body = NewNote::new(args.text);

    let note: Note = make_request(client.post(&url).json(&body)).await?;

    output(&note, human)
}
