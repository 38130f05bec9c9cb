//! JSON response types and formatting for CLI output.

use serde::Serialize;

/// Response for successful memory creation.
#[derive(Serialize)]
pub struct AddResponse {
    pub status: String,
    pub id: String,
}

/// Response for listing memories.
#[derive(Serialize)]
pub struct ListResponse {
    pub memories: Vec<ListItem>,
}

/// Individual list item.
#[derive(Serialize)]
pub struct ListItem {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

/// Response for successful memory deletion.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: String,
    pub id: String,
}

/// Response for a grounded answer.
#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub context_used: usize,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}
