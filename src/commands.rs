//! Command handlers for the engram CLI.

use std::process::ExitCode;

use engram::config::Config;
use engram::errors::Error;
use engram::provider::OpenAiClient;
use engram::rag::RagEngine;
use engram::MemoryStore;

use crate::output::*;

/// Commands supported by the engram CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a new memory
    Add {
        /// Memory text content
        text: String,
    },
    /// List all stored memories, newest first
    List,
    /// Delete a memory by id
    Delete {
        /// Memory ID
        id: String,
    },
    /// Ask a question answered from your stored memories
    Ask {
        /// Question text
        query: String,
    },
    Version,
}

/// Execute a CLI command.
pub fn execute(
    command: &Commands,
    store: &mut MemoryStore,
    config: &Config,
    json: bool,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Add { text } => handle_add(store, config, text, json),
        Commands::List => handle_list(store, json),
        Commands::Delete { id } => handle_delete(store, id, json),
        Commands::Ask { query } => handle_ask(store, config, query, json),
        Commands::Version => handle_version(json),
    }
}

fn engine(config: &Config) -> Result<RagEngine<OpenAiClient>, Error> {
    let settings = config.provider_settings()?;
    Ok(RagEngine::new(OpenAiClient::new(settings)))
}

fn handle_add(
    store: &mut MemoryStore,
    config: &Config,
    text: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let id = engine(config)?.remember(store, text)?;
    if json {
        print_json(&AddResponse {
            status: "saved".to_string(),
            id,
        });
    } else {
        println!("Saved memory: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_list(store: &mut MemoryStore, json: bool) -> Result<ExitCode, Error> {
    let memories = store.list()?;
    if json {
        let items: Vec<ListItem> = memories
            .into_iter()
            .map(|m| ListItem {
                id: m.id,
                content: m.content,
                created_at: m.created_at,
            })
            .collect();
        print_json(&ListResponse { memories: items });
    } else {
        for memory in memories {
            println!("{} [{}]\n  {}\n", memory.id, memory.created_at, memory.content);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_delete(store: &mut MemoryStore, id: &str, json: bool) -> Result<ExitCode, Error> {
    store.remove(id)?;
    if json {
        print_json(&DeleteResponse {
            status: "deleted".to_string(),
            id: id.to_string(),
        });
    } else {
        println!("Deleted memory: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_ask(
    store: &mut MemoryStore,
    config: &Config,
    query: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let answer = engine(config)?.answer(store, query)?;
    if json {
        print_json(&AskResponse {
            answer: answer.text,
            context_used: answer.context_count,
        });
    } else {
        println!("{}", answer.text);
        tracing::debug!(context_used = answer.context_count, "answer grounded");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
