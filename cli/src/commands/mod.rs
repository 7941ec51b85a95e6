//! Command implementations for the todo CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod add;
pub mod get;
pub mod list;
pub mod note;

use anyhow::Result;
use colored::Colorize;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use todo_core::{Note, Todo};

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build an HTTP client, optionally configured with a Bearer token.
pub fn build_client(token: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(token) = token {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| anyhow::anyhow!("Invalid token value: {}", e))?;
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    Ok(builder.build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

impl HumanReadable for Todo {
    fn print_human(&self) {
        println!("{}", self.name.bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        if !self.description.is_empty() {
            println!("  {} {}", "Description:".cyan(), self.description);
        }
        if self.notes.is_empty() {
            println!("  {}", "(no notes)".dimmed());
        } else {
            println!("  {}", "Notes:".cyan());
            for note in &self.notes {
                println!("    - {} {}", note.text, format!("[{}]", note.id).dimmed());
            }
        }
    }
}

impl HumanReadable for Note {
    fn print_human(&self) {
        println!("{}", "Note added.".green().bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Text:".cyan(), self.text);
    }
}

/// Send a request and decode the JSON body, turning error envelopes into
/// `CliError::Server`.
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `error.message` out of an error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"code":"NOT_FOUND","message":"todo not found: x"}}"#;
        assert_eq!(error_message(body), "todo not found: x");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_build_client_rejects_bad_token() {
        assert!(build_client(Some("bad\ntoken")).is_err());
        assert!(build_client(Some("fine")).is_ok());
        assert!(build_client(None).is_ok());
    }
}
