//! Command handlers. Each handler runs against a hydrated store and writes
//! its report to `out`.

use std::io::Write;

use kanban_store::{
    board::AddBoard, task::AddTask, BoardId, ColumnId, KanbanError, KanbanState, KanbanStore,
    TaskId, TaskPatch,
};

use crate::cli::{BoardAction, ColumnAction, Commands, TaskAction};
use crate::error::CliError;
use crate::table;

pub type CliResult<T = ()> = std::result::Result<T, CliError>;

pub async fn run(store: &KanbanStore, command: Commands, out: &mut dyn Write) -> CliResult {
    match command {
        Commands::Show { board, json } => show(store, board.as_deref(), json, out),
        Commands::Export => {
            let state = store.snapshot()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&*state)?)?;
            Ok(())
        }
        Commands::Board { action } => board(store, action, out).await,
        Commands::Column { action } => column(store, action, out).await,
        Commands::Task { action } => task(store, action, out).await,
    }
}

fn show(store: &KanbanStore, board: Option<&str>, json: bool, out: &mut dyn Write) -> CliResult {
    let state = store.snapshot()?;
    let board_id = resolve_board(&state, board)?;

    if json {
        let columns: Vec<_> = state
            .columns_in(&board_id)
            .into_iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "title": c.title,
                    "tasks": state.tasks_in(&c.id),
                })
            })
            .collect();
        let view = serde_json::json!({
            "id": board_id,
            "title": state.boards[&board_id].title,
            "columns": columns,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    let marker = if state.active_board_id.as_ref() == Some(&board_id) {
        " (active)"
    } else {
        ""
    };
    writeln!(out, "{}{}  [{}]", state.boards[&board_id].title, marker, board_id)?;
    writeln!(out, "{}", table::board_table(&state, &board_id))?;
    Ok(())
}

async fn board(store: &KanbanStore, action: BoardAction, out: &mut dyn Write) -> CliResult {
    match action {
        BoardAction::Add { title, columns } => {
            let mut op = AddBoard::new(title);
            if let Some(columns) = columns {
                op = op.with_columns(columns);
            }
            let id = store.execute(&op).await?.into_inner();
            writeln!(out, "Added board {}", id)?;
        }
        BoardAction::Use { board, none } => {
            let id = if none {
                None
            } else {
                let state = store.snapshot()?;
                Some(resolve_board(&state, board.as_deref())?)
            };
            let changed = store.set_active_board(id.clone()).await?;
            match id {
                Some(id) => report(out, changed, &format!("Active board is now {}", id))?,
                None => report(out, changed, "No active board")?,
            }
        }
        BoardAction::Rename { board, title } => {
            let id = resolve_board(&*store.snapshot()?, Some(&board))?;
            let changed = store.update_board(id.clone(), title).await?;
            report(out, changed, &format!("Renamed board {}", id))?;
        }
        BoardAction::Delete { board } => {
            let id = resolve_board(&*store.snapshot()?, Some(&board))?;
            let changed = store.delete_board(id.clone()).await?;
            report(out, changed, &format!("Deleted board {}", id))?;
        }
    }
    Ok(())
}

async fn column(store: &KanbanStore, action: ColumnAction, out: &mut dyn Write) -> CliResult {
    match action {
        ColumnAction::Add { title, board } => {
            let board = resolve_board(&*store.snapshot()?, board.as_deref())?;
            let id = store.add_column(board, title).await?;
            writeln!(out, "Added column {}", id)?;
        }
        ColumnAction::Rename { column, title } => {
            let id = resolve_column(&*store.snapshot()?, &column)?;
            let changed = store.update_column(id.clone(), title).await?;
            report(out, changed, &format!("Renamed column {}", id))?;
        }
        ColumnAction::Move { column, index } => {
            let state = store.snapshot()?;
            let id = resolve_column(&state, &column)?;
            let board = state
                .board_of(&id)
                .map(|b| b.id.clone())
                .ok_or_else(|| KanbanError::ColumnNotFound { id: id.to_string() })?;
            let changed = store.move_column(board, id.clone(), index).await?;
            report(out, changed, &format!("Moved column {} to {}", id, index))?;
        }
        ColumnAction::Delete { column } => {
            let id = resolve_column(&*store.snapshot()?, &column)?;
            let changed = store.delete_column(id.clone()).await?;
            report(out, changed, &format!("Deleted column {}", id))?;
        }
    }
    Ok(())
}

async fn task(store: &KanbanStore, action: TaskAction, out: &mut dyn Write) -> CliResult {
    match action {
        TaskAction::Add {
            column,
            title,
            description,
            priority,
            due,
        } => {
            let column = resolve_column(&*store.snapshot()?, &column)?;
            let mut op = AddTask::new(column, title);
            if let Some(description) = description {
                op = op.with_description(description);
            }
            if let Some(priority) = priority {
                op = op.with_priority(priority);
            }
            if let Some(due) = due {
                op = op.with_due_date(due);
            }
            let id = store.execute(&op).await?.into_inner();
            writeln!(out, "Added task {}", id)?;
        }
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            due,
        } => {
            let id = existing_task(&*store.snapshot()?, &id)?;
            let patch = TaskPatch {
                title,
                description,
                priority,
                due_date: due,
            };
            let changed = store.update_task(id.clone(), patch).await?;
            report(out, changed, &format!("Updated task {}", id))?;
        }
        TaskAction::Move { id, column, index } => {
            let state = store.snapshot()?;
            let id = existing_task(&state, &id)?;
            let source = state
                .column_of(&id)
                .map(|c| c.id.clone())
                .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
            let target = resolve_column(&state, &column)?;
            let changed = store.move_task(id.clone(), source, target.clone(), index).await?;
            report(out, changed, &format!("Moved task {} to {}", id, target))?;
        }
        TaskAction::Delete { id } => {
            let id = existing_task(&*store.snapshot()?, &id)?;
            let changed = store.delete_task(id.clone()).await?;
            report(out, changed, &format!("Deleted task {}", id))?;
        }
    }
    Ok(())
}

fn report(out: &mut dyn Write, changed: bool, message: &str) -> CliResult {
    if changed {
        writeln!(out, "{}", message)?;
    } else {
        writeln!(out, "Nothing to change")?;
    }
    Ok(())
}

/// Find a board by ID, then by case-insensitive title. `None` means the
/// active board.
fn resolve_board(state: &KanbanState, reference: Option<&str>) -> CliResult<BoardId> {
    let Some(reference) = reference else {
        return state
            .active_board()
            .map(|b| b.id.clone())
            .ok_or(CliError::NoActiveBoard);
    };

    let id = BoardId::from(reference);
    if state.boards.contains_key(&id) {
        return Ok(id);
    }
    unique(
        "board",
        reference,
        state
            .boards
            .values()
            .filter(|b| b.title.eq_ignore_ascii_case(reference))
            .map(|b| b.id.clone()),
    )?
    .ok_or_else(|| KanbanError::BoardNotFound { id: reference.to_string() }.into())
}

/// Find a column by ID, then by case-insensitive title on the active board
fn resolve_column(state: &KanbanState, reference: &str) -> CliResult<ColumnId> {
    let id = ColumnId::from(reference);
    if state.columns.contains_key(&id) {
        return Ok(id);
    }
    let candidates = state
        .active_board()
        .map(|b| state.columns_in(&b.id))
        .unwrap_or_default();
    unique(
        "column",
        reference,
        candidates
            .into_iter()
            .filter(|c| c.title.eq_ignore_ascii_case(reference))
            .map(|c| c.id.clone()),
    )?
    .ok_or_else(|| KanbanError::ColumnNotFound { id: reference.to_string() }.into())
}

fn existing_task(state: &KanbanState, reference: &str) -> CliResult<TaskId> {
    let id = TaskId::from(reference);
    if state.tasks.contains_key(&id) {
        Ok(id)
    } else {
        Err(KanbanError::TaskNotFound { id: id.to_string() }.into())
    }
}

fn unique<T>(
    kind: &'static str,
    reference: &str,
    mut matches: impl Iterator<Item = T>,
) -> CliResult<Option<T>> {
    let first = matches.next();
    if first.is_some() && matches.next().is_some() {
        return Err(CliError::Ambiguous {
            kind,
            reference: reference.to_string(),
        });
    }
    Ok(first)
}
