//! Command-line front end for the todo record store.
//!
//! # Responsibility
//! - Parse flags/env into store and logging configuration.
//! - Drive `TodoService` against a local SQLite record store.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::db::open_db;
use todo_core::{
    default_log_level, init_logging, to_record, SqliteRecordStore, Todo, TodoService,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Manage todo items in a local record store")]
struct Cli {
    /// SQLite file holding the records.
    #[arg(long, env = "TODO_DB", default_value = "todo.sqlite3", global = true)]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "TODO_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TODO_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new open todo.
    Add { title: String },
    /// List all todos.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Mark a todo done.
    Done { id: Uuid },
    /// Mark a todo open again.
    Undone { id: Uuid },
    /// Replace a todo title.
    Rename { id: Uuid, title: String },
    /// Delete a todo.
    Rm { id: Uuid },
    /// Show one todo.
    Show {
        id: Uuid,
        /// Print the encoded store record as JSON.
        #[arg(long)]
        record: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        let log_dir = log_dir.to_str().context("log dir must be valid UTF-8")?;
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open record store `{}`", cli.db.display()))?;
    let service = TodoService::new(SqliteRecordStore::new(&conn));

    match cli.command {
        Commands::Add { title } => {
            let todo = service.create_todo(title)?;
            println!("{}", todo.id());
        }
        Commands::List { json } => {
            let listing = service.list_todos()?;
            for skipped in &listing.skipped {
                eprintln!("skipped record {}: {}", skipped.record_name, skipped.reason);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&listing.todos)?);
            } else {
                listing.todos.iter().for_each(print_line);
            }
        }
        Commands::Done { id } => print_line(&service.set_done(id, true)?),
        Commands::Undone { id } => print_line(&service.set_done(id, false)?),
        Commands::Rename { id, title } => print_line(&service.rename(id, title)?),
        Commands::Rm { id } => {
            service.delete_todo(id)?;
            println!("deleted {id}");
        }
        Commands::Show { id, record } => {
            let todo = service
                .get_todo(id)?
                .with_context(|| format!("todo not found: {id}"))?;
            if record {
                println!("{}", serde_json::to_string_pretty(&to_record(&todo))?);
            } else {
                println!("{}", serde_json::to_string_pretty(&todo)?);
            }
        }
    }

    Ok(())
}

fn print_line(todo: &Todo) {
    let mark = if todo.is_done() { 'x' } else { ' ' };
    println!("[{mark}] {} {}", todo.id(), todo.title());
}
