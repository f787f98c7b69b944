//! Drag-and-drop reordering.
//!
//! The gesture layer reports a stream of hover events while an item is
//! dragged and one drop event at the end. [`ReorderController`] turns that
//! stream into discrete [`MoveIntent`]s. Within one list an item only passes
//! the item under the pointer once the pointer crosses that item's midpoint
//! in the direction of travel, so jitter around an edge never flips the order
//! back and forth.

use crate::column::MoveColumn;
use crate::task::MoveTask;
use crate::types::{BoardId, ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The thing being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DragItem {
    Task(TaskId),
    Column(ColumnId),
}

/// Extent of the hovered item along the list axis (y for cards, x for columns)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> f64 {
        self.start + (self.end - self.start) / 2.0
    }
}

/// Pointer is over another item while dragging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverEvent {
    /// Dragged item id and type
    pub item: DragItem,
    /// Index of the hovered item within its list
    pub current_index_hint: usize,
    /// Column holding the hovered card; ignored for column drags
    pub over_column: Option<ColumnId>,
    /// Pointer coordinate on the list axis
    pub pointer_position: f64,
    pub hovered_bounds: Span,
}

impl HoverEvent {
    /// A dragged task over the card at `index` of `column`
    pub fn task(
        task_id: impl Into<TaskId>,
        column: impl Into<ColumnId>,
        index: usize,
        pointer_position: f64,
        hovered_bounds: Span,
    ) -> Self {
        Self {
            item: DragItem::Task(task_id.into()),
            current_index_hint: index,
            over_column: Some(column.into()),
            pointer_position,
            hovered_bounds,
        }
    }

    /// A dragged column over the column at `index`
    pub fn column(
        column_id: impl Into<ColumnId>,
        index: usize,
        pointer_position: f64,
        hovered_bounds: Span,
    ) -> Self {
        Self {
            item: DragItem::Column(column_id.into()),
            current_index_hint: index,
            over_column: None,
            pointer_position,
            hovered_bounds,
        }
    }
}

/// The drag ended over something (or nothing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEvent {
    pub item: DragItem,
    /// Column-level drop target, if any
    pub target_column_id: Option<ColumnId>,
    /// True when a card target already absorbed the drop
    pub handled: bool,
}

impl DropEvent {
    pub fn new(item: DragItem, target_column_id: Option<ColumnId>, handled: bool) -> Self {
        Self {
            item,
            target_column_id,
            handled,
        }
    }
}

/// A discrete reorder request for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveIntent {
    Task(MoveTask),
    Column(MoveColumn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Container {
    Column(ColumnId),
    Board(BoardId),
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    item: DragItem,
    container: Container,
    index: usize,
}

/// Tracks one drag gesture: the dragged item, where it is, and nothing else
#[derive(Debug, Default)]
pub struct ReorderController {
    active: Option<ActiveDrag>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging the task at `index` of `column`
    pub fn begin_task(
        &mut self,
        task_id: impl Into<TaskId>,
        column: impl Into<ColumnId>,
        index: usize,
    ) {
        self.active = Some(ActiveDrag {
            item: DragItem::Task(task_id.into()),
            container: Container::Column(column.into()),
            index,
        });
    }

    /// Start dragging the column at `index` of `board`
    pub fn begin_column(
        &mut self,
        column_id: impl Into<ColumnId>,
        board: impl Into<BoardId>,
        index: usize,
    ) {
        self.active = Some(ActiveDrag {
            item: DragItem::Column(column_id.into()),
            container: Container::Board(board.into()),
            index,
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Last-known index of the dragged item
    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Feed one pointer-move. Returns an intent only when the pointer has
    /// crossed the hovered item's midpoint (or entered another column).
    pub fn hover(&mut self, event: &HoverEvent) -> Option<MoveIntent> {
        let active = self.active.as_mut()?;
        if active.item != event.item {
            return None;
        }

        let hover_index = event.current_index_hint;
        let midpoint = event.hovered_bounds.midpoint();
        let pointer = event.pointer_position;

        match (&active.item, &active.container) {
            (DragItem::Task(task_id), Container::Column(column)) => {
                let target = event.over_column.as_ref()?;
                if target != column {
                    let index = if pointer <= midpoint {
                        hover_index
                    } else {
                        hover_index.saturating_add(1)
                    };
                    let intent = MoveTask::new(task_id.clone(), column.clone(), target.clone(), index);
                    trace!(task = %task_id, from = %column, to = %target, index, "cross-column hover");
                    active.container = Container::Column(target.clone());
                    active.index = index;
                    return Some(MoveIntent::Task(intent));
                }
                if !crosses_midpoint(active.index, hover_index, pointer, midpoint) {
                    return None;
                }
                let intent = MoveTask::within(task_id.clone(), column.clone(), hover_index);
                active.index = hover_index;
                Some(MoveIntent::Task(intent))
            }
            (DragItem::Column(column_id), Container::Board(board)) => {
                if !crosses_midpoint(active.index, hover_index, pointer, midpoint) {
                    return None;
                }
                let intent = MoveColumn::new(board.clone(), column_id.clone(), hover_index);
                active.index = hover_index;
                Some(MoveIntent::Column(intent))
            }
            _ => None,
        }
    }

    /// Finish the drag.
    ///
    /// A drop a card already handled needs nothing more. A task dropped on a
    /// column-level target goes to the head of that column, unless that is the
    /// column the task already sits in: hovering has placed it there. Anything
    /// else ends the drag without an intent.
    pub fn drop(&mut self, event: &DropEvent) -> Option<MoveIntent> {
        if self.active.as_ref()?.item != event.item {
            return None;
        }
        let active = self.active.take()?;
        if event.handled {
            return None;
        }

        match (active.item, active.container) {
            (DragItem::Task(task_id), Container::Column(column)) => {
                let target = event.target_column_id.clone()?;
                if target == column {
                    trace!(task = %task_id, column = %target, "drop on own column");
                    return None;
                }
                Some(MoveIntent::Task(MoveTask::new(task_id, column, target, 0)))
            }
            _ => None,
        }
    }

    /// Abandon the drag (escape, or dropped outside any target)
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Midpoint hysteresis: moving down/right requires the pointer past the
/// hovered item's midpoint, moving up/left requires it before the midpoint.
fn crosses_midpoint(drag_index: usize, hover_index: usize, pointer: f64, midpoint: f64) -> bool {
    if drag_index == hover_index {
        return false;
    }
    if drag_index < hover_index {
        pointer > midpoint
    } else {
        pointer < midpoint
    }
}
