use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todo_api_core::Priority;

#[derive(Parser)]
#[command(
    name = "todo-api",
    about = "Local task list served through a REST-shaped client",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite file holding the task document (env: TODO_API_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (env: TODO_API_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every todo
    List,
    /// Show one todo
    Get(IdArgs),
    /// Create a todo
    Add(AddArgs),
    /// Change fields of a todo
    Update(UpdateArgs),
    /// Delete a todo
    Delete(IdArgs),
    /// Flip the completed flag of a todo
    Toggle(IdArgs),
    /// Search titles and descriptions
    Search(SearchArgs),
    /// Filter by status, priority and creation time
    Filter(FilterArgs),
    /// Remove every todo and restart ids at 1
    Clear,
    /// Show storage statistics
    Stats,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub completed: Option<bool>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Args)]
pub struct FilterArgs {
    /// `true` for completed, `false` for open todos
    #[arg(long)]
    pub status: Option<bool>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    /// RFC 3339 instant or `YYYY-MM-DD` (UTC midnight), inclusive
    #[arg(long)]
    pub created_after: Option<String>,
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    raw.parse()
}
