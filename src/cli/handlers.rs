use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::api;
use crate::io::config_io;
use crate::io::discover;
use crate::io::lock::StoreLock;
use crate::io::recovery;
use crate::io::store;
use crate::model::config::Config;
use crate::model::list::TaskList;
use crate::model::task::{Task, TaskStatus};
use crate::ops::import;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = data_dir(cli.dir.as_deref())?;

    match cli.command {
        // Read commands
        Commands::List(args) => cmd_list(args, &dir, json),
        Commands::Recovery(args) => cmd_recovery(args, &dir),

        // Write commands
        Commands::Add(args) => cmd_add(args, &dir, json),
        Commands::Toggle(args) => cmd_toggle(args, &dir, json),
        Commands::Edit(args) => cmd_edit(args, &dir, json),
        Commands::Rm(args) => cmd_rm(args, &dir),
        Commands::Clear(args) => cmd_clear(args, &dir),
        Commands::Sync(args) => cmd_sync(args, &dir, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the data directory from the -C override or the working directory.
fn data_dir(override_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let start = match override_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    Ok(discover::discover_dir(&start))
}

/// Load the config and the stored task list.
fn load_state(dir: &Path) -> Result<(Config, TaskList), Box<dyn std::error::Error>> {
    let config = config_io::load_config(dir)?;
    let list = TaskList::from_tasks(store::load_tasks(dir, &config.store.file));
    Ok((config, list))
}

fn save_state(dir: &Path, config: &Config, list: &TaskList) -> Result<(), store::StoreError> {
    store::save_tasks(dir, &config.store.file, list.tasks())
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a --due value. Date format is the input boundary's contract, so it
/// is enforced here, not in the model.
fn parse_due(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid due date '{}' (expected YYYY-MM-DD)", s))
}

fn print_task(task: &Task, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let now = local_now();
    if json {
        let rendered = serde_json::to_string_pretty(&output::task_to_json(task, now))?;
        println!("{}", rendered);
    } else {
        println!("{}", output::format_task_line(task, now));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, list) = load_state(dir)?;
    let now = local_now();

    let status_filter = args
        .status
        .as_deref()
        .map(output::parse_status)
        .transpose()?;

    let tasks: Vec<&Task> = list
        .tasks()
        .iter()
        .filter(|t| status_filter.is_none_or(|s| t.status == s))
        .collect();

    if json {
        let rendered: Vec<_> = tasks.iter().map(|t| output::task_to_json(t, now)).collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for line in output::format_task_listing(&tasks, now) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_recovery(args: RecoveryArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if args.path {
        println!("{}", recovery::recovery_log_path(dir).display());
        return Ok(());
    }

    let entries = recovery::read_entries(dir, Some(args.limit));
    if entries.is_empty() {
        println!("recovery log is empty");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{} [{}] {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.category,
            entry.description
        );
        for line in entry.body.lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let deadline = args.due.as_deref().map(parse_due).transpose()?;

    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;

    let task = list.add(&args.description, deadline, TaskStatus::Pending)?;
    save_state(dir, &config, &list)?;

    if json {
        print_task(&task, true)?;
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;

    let task = list
        .toggle_status(&args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    save_state(dir, &config, &list)?;

    print_task(&task, json)
}

fn cmd_edit(args: EditArgs, dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;

    let task = list
        .update_description(&args.id, &args.description)?
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    save_state(dir, &config, &list)?;

    print_task(&task, json)
}

fn cmd_rm(args: RmArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;

    // A missing id is a no-op, not a failure
    if list.remove(&args.id) {
        save_state(dir, &config, &list)?;
        println!("removed {}", args.id);
    } else {
        println!("no task with id {}", args.id);
    }
    Ok(())
}

fn cmd_clear(args: ClearArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;

    if list.is_empty() {
        println!("nothing to clear");
        return Ok(());
    }

    if !args.yes {
        print!("delete all {} tasks? [y/N] ", list.len());
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("cancelled");
            return Ok(());
        }
    }

    let count = list.len();
    list.clear();
    store::clear_store(dir, &config.store.file)?;
    println!("cleared {} tasks", count);
    Ok(())
}

fn cmd_sync(args: SyncArgs, dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(dir)?;
    let limit = args.limit.unwrap_or(config.sync.limit);

    // Fetch before taking the lock; the network has no business inside it.
    let todos = api::fetch_todos(&config.sync.url, limit)?;

    let _lock = StoreLock::acquire(dir)?;
    let (config, mut list) = load_state(dir)?;
    let outcome = import::import_todos(&mut list, todos)?;
    save_state(dir, &config, &list)?;

    if json {
        let now = local_now();
        let added: Vec<_> = outcome
            .added_ids
            .iter()
            .filter_map(|id| list.find_by_id(id))
            .map(|t| output::task_to_json(t, now))
            .collect();
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        println!("imported {} tasks", outcome.added_ids.len());
    }
    Ok(())
}
