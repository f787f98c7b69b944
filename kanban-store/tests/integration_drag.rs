//! Integration tests for drag-and-drop reordering through the store

use kanban_store::{
    ColumnId, DragItem, DropEvent, HoverEvent, KanbanState, KanbanStore, ReorderController, Span,
    TaskId,
};

/// Cards and columns are 100 units long, laid out from 0
fn slot(index: usize) -> Span {
    let start = index as f64 * 100.0;
    Span::new(start, start + 100.0)
}

/// A store with columns "A" and "B"; A holds [t3, t2, t1], B holds [b1]
async fn setup() -> (KanbanStore, ColumnId, ColumnId, Vec<TaskId>, TaskId) {
    let store = KanbanStore::in_memory(KanbanState::seeded("Drag", &["A", "B"]));
    let columns = store.snapshot().unwrap().active_board().unwrap().column_ids.clone();
    let (a, b) = (columns[0].clone(), columns[1].clone());

    let t1 = store.add_task(a.clone(), "t1").await.unwrap();
    let t2 = store.add_task(a.clone(), "t2").await.unwrap();
    let t3 = store.add_task(a.clone(), "t3").await.unwrap();
    let b1 = store.add_task(b.clone(), "b1").await.unwrap();

    (store, a, b, vec![t3, t2, t1], b1)
}

fn order(store: &KanbanStore, column: &ColumnId) -> Vec<TaskId> {
    store.snapshot().unwrap().columns[column].task_ids.clone()
}

#[tokio::test]
async fn test_reorder_within_column_with_hysteresis() {
    let (store, a, _b, tasks, _b1) = setup().await;
    let dragged = tasks[0].clone();

    let mut drag = ReorderController::new();
    drag.begin_task(dragged.clone(), a.clone(), 0);

    // Hovering the first half of the third card does nothing
    for y in [210.0, 230.0, 250.0] {
        let event = HoverEvent::task(dragged.clone(), a.clone(), 2, y, slot(2));
        assert!(drag.hover(&event).is_none());
    }
    assert_eq!(order(&store, &a), tasks);

    // Crossing its midpoint moves the card exactly once
    let event = HoverEvent::task(dragged.clone(), a.clone(), 2, 260.0, slot(2));
    let intent = drag.hover(&event).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());
    assert!(drag.hover(&event).is_none());

    assert_eq!(
        order(&store, &a),
        vec![tasks[1].clone(), tasks[2].clone(), dragged.clone()]
    );

    // A card target already handled the drop
    let end = DropEvent::new(DragItem::Task(dragged), None, true);
    assert!(drag.drop(&end).is_none());
    assert!(!drag.is_dragging());
    store.snapshot().unwrap().verify().unwrap();
}

#[tokio::test]
async fn test_drag_into_another_column() {
    let (store, a, b, tasks, b1) = setup().await;
    let dragged = tasks[2].clone();

    let mut drag = ReorderController::new();
    drag.begin_task(dragged.clone(), a.clone(), 2);

    // Trailing half of B's only card: land after it
    let event = HoverEvent::task(dragged.clone(), b.clone(), 0, 80.0, slot(0));
    let intent = drag.hover(&event).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());

    assert_eq!(order(&store, &a), vec![tasks[0].clone(), tasks[1].clone()]);
    assert_eq!(order(&store, &b), vec![b1.clone(), dragged.clone()]);
    assert_eq!(drag.current_index(), Some(1));

    // Back up over b1: now within B, passing b1 needs its midpoint
    let event = HoverEvent::task(dragged.clone(), b.clone(), 0, 60.0, slot(0));
    assert!(drag.hover(&event).is_none());
    let event = HoverEvent::task(dragged.clone(), b.clone(), 0, 40.0, slot(0));
    let intent = drag.hover(&event).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());

    assert_eq!(order(&store, &b), vec![dragged, b1]);
    store.snapshot().unwrap().verify().unwrap();
}

#[tokio::test]
async fn test_unhandled_drop_on_column_goes_to_head() {
    let (store, a, b, tasks, b1) = setup().await;
    let dragged = tasks[1].clone();

    let mut drag = ReorderController::new();
    drag.begin_task(dragged.clone(), a.clone(), 1);
    let end = DropEvent::new(DragItem::Task(dragged.clone()), Some(b.clone()), false);
    let intent = drag.drop(&end).unwrap();

    assert!(store.apply_intent(&intent).await.unwrap());
    assert_eq!(order(&store, &b), vec![dragged, b1]);
    assert_eq!(order(&store, &a).len(), 2);
}

#[tokio::test]
async fn test_drop_on_column_whitespace_keeps_reorder() {
    let (store, a, _b, tasks, _b1) = setup().await;
    let dragged = tasks[0].clone();

    let mut drag = ReorderController::new();
    drag.begin_task(dragged.clone(), a.clone(), 0);
    let event = HoverEvent::task(dragged.clone(), a.clone(), 2, 260.0, slot(2));
    let intent = drag.hover(&event).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());
    let reordered = vec![tasks[1].clone(), tasks[2].clone(), dragged.clone()];
    assert_eq!(order(&store, &a), reordered);

    // Released below the cards: the column itself is the drop target
    let end = DropEvent::new(DragItem::Task(dragged), Some(a.clone()), false);
    assert!(drag.drop(&end).is_none());
    assert!(!drag.is_dragging());
    assert_eq!(order(&store, &a), reordered);
}

#[tokio::test]
async fn test_cancel_leaves_store_untouched() {
    let (store, a, _b, tasks, _b1) = setup().await;
    let before = store.snapshot().unwrap();

    let mut drag = ReorderController::new();
    drag.begin_task(tasks[0].clone(), a.clone(), 0);
    drag.cancel();

    let end = DropEvent::new(DragItem::Task(tasks[0].clone()), Some(a), false);
    assert!(drag.drop(&end).is_none());
    assert_eq!(*before, *store.snapshot().unwrap());
}

#[tokio::test]
async fn test_stale_intent_is_ignored() {
    let (store, a, b, tasks, _b1) = setup().await;
    let dragged = tasks[0].clone();

    let mut drag = ReorderController::new();
    drag.begin_task(dragged.clone(), a.clone(), 0);
    let intent = drag
        .hover(&HoverEvent::task(dragged.clone(), b.clone(), 0, 10.0, slot(0)))
        .unwrap();

    // The task disappears before the intent reaches the store
    assert!(store.delete_task(dragged).await.unwrap());
    let before = store.snapshot().unwrap();

    assert!(!store.apply_intent(&intent).await.unwrap());
    assert_eq!(*before, *store.snapshot().unwrap());
}

#[tokio::test]
async fn test_column_drag_reorders_board() {
    let store = KanbanStore::in_memory(KanbanState::seeded("Cols", &["c1", "c2", "c3"]));
    let state = store.snapshot().unwrap();
    let board = state.active_board_id.clone().unwrap();
    let columns = state.active_board().unwrap().column_ids.clone();

    let mut drag = ReorderController::new();
    drag.begin_column(columns[0].clone(), board.clone(), 0);

    let hover = |x: f64, index: usize| HoverEvent::column(columns[0].clone(), index, x, slot(index));
    assert!(drag.hover(&hover(120.0, 1)).is_none());
    let intent = drag.hover(&hover(160.0, 1)).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());
    let intent = drag.hover(&hover(260.0, 2)).unwrap();
    assert!(store.apply_intent(&intent).await.unwrap());

    let order = store.snapshot().unwrap().boards[&board].column_ids.clone();
    assert_eq!(
        order,
        vec![columns[1].clone(), columns[2].clone(), columns[0].clone()]
    );

    // Dropping a column never needs another intent
    let end = DropEvent::new(DragItem::Column(columns[0].clone()), None, false);
    assert!(drag.drop(&end).is_none());
}
