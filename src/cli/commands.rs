use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use serde_json::{Map, Value};

use crate::completion::{Completion, mark_done};
use crate::config::Config;
use crate::filters::{filter_todos, select_todo};
use crate::indexer::build_todo_list;
use crate::logging::init_logging;
use crate::models::TodoItem;
use crate::models::fields::{ACTION_FIELD, DONE_FIELD};
use crate::store::{DocStore, FileStore};
use crate::utils::{get_config_path, green};

const AS_OF_PREFIX: &str = "asof:";
const ADD_COMMAND: &str = "add";
const DONE_ACTION: &str = "done";

const USAGE: &str = "\
Usage:
    # add a new todo
    $ todos add new todo item

    # list all todos
    $ todos

    # filter by text
    $ todos +work

    # mark as done (any prefix of the id is enough, even one letter)
    $ todos <idprefix> done

    # read as of an older store version
    $ todos asof:<version>";

#[derive(Parser)]
#[command(name = "todos")]
#[command(version)]
#[command(about = "To-do list aggregated from Markdown notes and task records", long_about = None)]
#[command(after_help = USAGE)]
pub struct Cli {
    /// Free words: nothing, a filter, `add <words...>`, or `<idprefix> done`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// What the remaining free words ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Filter(String),
    Add(String),
    Act { prefix: String, action: String },
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Snapshot every read is bounded to; empty for the latest state
    pub as_of: String,
    pub command: Command,
}

/// Split the free words into a snapshot token and a command
///
/// Every `asof:<token>` word is removed wherever it appears; the last one
/// wins.
pub fn parse_invocation(args: Vec<String>) -> Invocation {
    let mut as_of = String::new();
    let mut words = Vec::with_capacity(args.len());
    for arg in args {
        match arg.strip_prefix(AS_OF_PREFIX) {
            Some(token) => as_of = token.to_string(),
            None => words.push(arg),
        }
    }

    let command = match words.as_slice() {
        [] => Command::List,
        [query] => Command::Filter(query.clone()),
        [first, rest @ ..] if first == ADD_COMMAND => Command::Add(rest.join(" ").trim().to_string()),
        [prefix, action] => Command::Act { prefix: prefix.clone(), action: action.clone() },
        _ => Command::Usage,
    };

    Invocation { as_of, command }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let invocation = parse_invocation(cli.args);

    let config_path = get_config_path()?;
    let Some(config) = Config::load(&config_path)? else {
        println!("Please create config file at {}", config_path.display());
        return Ok(());
    };

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let store_dir = config.store_dir();
    let mut store = FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&mut store, &config, &invocation, &mut out)
}

/// Run one command against a store, writing user-facing output to `out`
///
/// # Errors
///
/// Store failures propagate. User mistakes (unknown action, unmatched id)
/// are reported on `out` and are not errors.
pub fn execute<S: DocStore, W: Write>(
    store: &mut S,
    config: &Config,
    invocation: &Invocation,
    out: &mut W,
) -> Result<()> {
    debug!("event=command command={:?} as_of={:?}", invocation.command, invocation.as_of);

    match &invocation.command {
        Command::List => {
            let todos = build_todo_list(&*store, config, &invocation.as_of)?;
            print_todos(out, &todos)?;
        }
        Command::Filter(query) => {
            let todos = build_todo_list(&*store, config, &invocation.as_of)?;
            print_todos(out, &filter_todos(todos, query))?;
        }
        Command::Add(text) => {
            let mut fields = Map::new();
            fields.insert(ACTION_FIELD.to_string(), Value::from(text.as_str()));
            fields.insert(DONE_FIELD.to_string(), Value::from(false));
            let task =
                store.insert(&config.todos_col, fields).context("Failed to add task")?;
            debug!("event=task_added id={}", task.id);
            writeln!(out, "{}", green("Task added"))?;
        }
        Command::Act { prefix, action } => {
            if action != DONE_ACTION {
                writeln!(out, "Action '{}' is an invalid", action)?;
                return Ok(());
            }

            // Selection always runs on the latest, unfiltered list
            let todos = build_todo_list(&*store, config, "")?;
            let Some(todo) = select_todo(&todos, prefix) else {
                writeln!(out, "No task matching id '{}'", prefix)?;
                return Ok(());
            };

            match mark_done(store, config, todo)? {
                Completion::Completed => writeln!(out, "{}", green(format!("Task {} done", todo.id)))?,
                Completion::AlreadyDone => writeln!(out, "Task {} already done", todo.id)?,
            }
        }
        Command::Usage => writeln!(out, "{}", USAGE)?,
    }

    Ok(())
}

fn print_todos<W: Write>(out: &mut W, todos: &[TodoItem]) -> Result<()> {
    for todo in todos {
        writeln!(out, "{}\t{}\t{}", todo.id, todo.date(), todo.display_text())?;
    }
    Ok(())
}
