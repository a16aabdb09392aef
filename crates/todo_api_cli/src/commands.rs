use crate::cli::{AddArgs, Command, FilterArgs, UpdateArgs};
use crate::settings::Settings;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::process::ExitCode;
use todo_api_core::{
    init_logging, ApiResponse, CreateTodoData, TodoApiClient, TodoFilters, UpdateTodoData,
};

pub fn run_command(command: Command, settings: &Settings) -> Result<ExitCode> {
    if let Some(log_dir) = settings.log_dir.as_deref() {
        init_logging(&settings.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let client = TodoApiClient::open(&settings.db_path, &settings.client).with_context(|| {
        format!(
            "failed to open task store at `{}`",
            settings.db_path.display()
        )
    })?;

    match command {
        Command::List => print_response(&client.get_all_todos()),
        Command::Get(args) => print_response(&client.get_todo_by_id(args.id)),
        Command::Add(args) => print_response(&client.create_todo(&create_data(args))),
        Command::Update(args) => {
            let id = args.id;
            print_response(&client.update_todo(id, &update_data(args)))
        }
        Command::Delete(args) => print_response(&client.delete_todo(args.id)),
        Command::Toggle(args) => print_response(&client.toggle_todo_completion(args.id)),
        Command::Search(args) => print_response(&client.search_todos(&args.query)),
        Command::Filter(args) => {
            let filters = filters(args)?;
            print_response(&client.filter_todos(&filters))
        }
        Command::Clear => print_response(&client.clear_all_todos()),
        Command::Stats => print_response(&client.get_storage_stats()),
    }
}

fn create_data(args: AddArgs) -> CreateTodoData {
    CreateTodoData {
        title: args.title,
        description: args.description,
        priority: args.priority,
    }
}

fn update_data(args: UpdateArgs) -> UpdateTodoData {
    UpdateTodoData {
        title: args.title,
        description: args.description,
        completed: args.completed,
        priority: args.priority,
    }
}

fn filters(args: FilterArgs) -> Result<TodoFilters> {
    let created_after = args
        .created_after
        .as_deref()
        .map(parse_instant)
        .transpose()?;
    Ok(TodoFilters {
        status: args.status,
        priority: args.priority,
        created_after,
    })
}

/// Accepts an RFC 3339 instant or a bare date at UTC midnight.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("invalid --created-after `{raw}`; expected RFC 3339 or YYYY-MM-DD"))
}

fn print_response<T: Serialize>(response: &ApiResponse<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
