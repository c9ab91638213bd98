use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tf", about = concat!("[x] taskflow v", env!("CARGO_PKG_VERSION"), " - your to-dos in one JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks with deadlines and countdowns
    List(ListArgs),
    /// Complete or reopen a task
    Toggle(ToggleArgs),
    /// Rewrite a task's description
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Delete every task
    Clear(ClearArgs),
    /// Import tasks from the remote demo API
    Sync(SyncArgs),
    /// View the recovery log
    Recovery(RecoveryArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (pending, completed)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
    /// Print the path of the recovery log and exit
    #[arg(long)]
    pub path: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub description: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: String,
    /// New description
    pub description: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Maximum number of records to import (default: from config)
    #[arg(long)]
    pub limit: Option<usize>,
}
