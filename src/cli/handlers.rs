use std::path::Path;

use crate::cli::commands::Commands;
use crate::cli::output::format_task_line;
use crate::io::config_io;
use crate::model::{Config, Task};
use crate::store::{SqliteStore, TaskStore};

/// Execute one CLI subcommand against the store and print the result.
pub fn dispatch(
    command: Commands,
    json: bool,
    db_flag: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_io::load_config(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: {e}");
            Config::default()
        }
    };
    let db_path = config_io::resolve_db_path(db_flag, &config);
    let mut store = SqliteStore::open(&db_path)?;

    match command {
        Commands::Add(args) => {
            let mut task = Task::new(args.name);
            if let Some(due) = args.due {
                task.due_date = due;
            }
            let task = store.save(task)?;
            print_task(&task, json)?;
        }
        Commands::List(args) => {
            let tasks = if args.all {
                store.list_all()?
            } else {
                store.list_visible()?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("no tasks");
            } else {
                for task in &tasks {
                    println!("{}", format_task_line(task));
                }
            }
        }
        Commands::Done(arg) => {
            let task = find_task(&store, arg.id)?;
            store.set_completion(task.id, true)?;
            print_task(&find_task(&store, arg.id)?, json)?;
        }
        Commands::Undone(arg) => {
            let task = find_task(&store, arg.id)?;
            store.set_completion(task.id, false)?;
            print_task(&find_task(&store, arg.id)?, json)?;
        }
        Commands::Delete(arg) => {
            let task = find_task(&store, arg.id)?;
            store.delete(task.id)?;
            if json {
                println!("{}", serde_json::json!({ "deleted": task.id }));
            } else {
                println!("deleted {}", format_task_line(&task));
            }
        }
        Commands::Rename(args) => {
            let mut task = find_task(&store, args.id)?;
            task.name = args.name;
            let task = store.save(task)?;
            print_task(&task, json)?;
        }
    }

    Ok(())
}

/// Look up a task by id across the whole table, hidden rows included.
fn find_task(store: &SqliteStore, id: i64) -> Result<Task, String> {
    store
        .list_all()
        .map_err(|e| e.to_string())?
        .into_iter()
        .find(|task| task.id == id)
        .ok_or_else(|| format!("no task with id {id}"))
}

fn print_task(task: &Task, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("{}", format_task_line(task));
    }
    Ok(())
}
