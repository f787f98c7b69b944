//! Terminal-aware board rendering.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use kanban_store::{BoardId, KanbanState, Task};

/// Create a table pre-configured for terminal-width-aware output.
///
/// Falls back to 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn card(task: &Task) -> String {
    format!(
        "{}\n{} · due {}\n{}",
        truncate_str(&task.title, 40),
        task.priority,
        task.due_date,
        task.id
    )
}

/// One table column per board column, tasks stacked top to bottom
pub fn board_table(state: &KanbanState, board_id: &BoardId) -> Table {
    let columns = state.columns_in(board_id);
    let mut table = new_table();
    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(format!("{} ({})", c.title, c.task_ids.len()))),
    );

    let depth = columns.iter().map(|c| c.task_ids.len()).max().unwrap_or(0);
    let lanes: Vec<Vec<&Task>> = columns.iter().map(|c| state.tasks_in(&c.id)).collect();
    for row in 0..depth {
        table.add_row(
            lanes
                .iter()
                .map(|tasks| tasks.get(row).map(|t| card(t)).unwrap_or_default()),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("ääääää", 5), "ää...");
    }

    #[test]
    fn test_board_table_lists_columns_and_tasks() {
        let mut state = KanbanState::seeded("Render", &["Todo", "Done"]);
        let board = state.active_board_id.clone().unwrap();
        let todo = state.boards[&board].column_ids[0].clone();
        let task = Task::new("Write the docs");
        state.columns[&todo].task_ids.push(task.id.clone());
        state.tasks.insert(task.id.clone(), task);

        let rendered = board_table(&state, &board).to_string();
        assert!(rendered.contains("Todo (1)"));
        assert!(rendered.contains("Done (0)"));
        assert!(rendered.contains("Write the docs"));
        assert!(rendered.contains("medium"));
    }
}
