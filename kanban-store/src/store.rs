//! KanbanStore - the single entry point for reading and mutating state.
//!
//! Readers take an `Arc<KanbanState>` snapshot. Mutations run one at a time:
//! each is applied to a copy of the current snapshot, and the copy replaces
//! the snapshot only if the mutation succeeded and changed something. Changed
//! states are written through to the persistence bridge and announced to
//! subscribers.

use crate::board::{AddBoard, DeleteBoard, SetActiveBoard, UpdateBoard};
use crate::column::{AddColumn, DeleteColumn, MoveColumn, UpdateColumn};
use crate::config::{DefaultBoard, KanbanConfig};
use crate::error::{KanbanError, Result};
use crate::hydration::Hydration;
use crate::listeners::{Listeners, Subscription};
use crate::operation::{Applied, Mutate};
use crate::persist::{FileBlobStore, PersistenceBridge};
use crate::reorder::MoveIntent;
use crate::task::{AddTask, DeleteTask, MoveTask, UpdateTask};
use crate::types::{BoardId, ColumnId, KanbanState, TaskId, TaskPatch};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

/// Notification sent to store subscribers
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A mutation changed the state
    Changed {
        /// Op string of the mutation, e.g. "move task"
        op: String,
        state: Arc<KanbanState>,
    },
    /// Loading or saving failed; the in-memory state is still authoritative
    PersistenceFailed { message: String },
}

enum Phase {
    Hydrating,
    Ready(Arc<KanbanState>),
}

/// Injectable state container for one kanban workspace
pub struct KanbanStore {
    phase: RwLock<Phase>,
    /// Held across apply and save so mutations form a single sequence
    turn: Mutex<()>,
    bridge: Option<PersistenceBridge>,
    default_board: DefaultBoard,
    hydration: Hydration,
    listeners: Listeners<StoreEvent>,
}

impl KanbanStore {
    /// A store backed by `bridge`. It stays unreadable until [`hydrate`]
    /// completes; `default_board` seeds it when nothing usable was saved.
    ///
    /// [`hydrate`]: KanbanStore::hydrate
    pub fn new(bridge: PersistenceBridge, default_board: DefaultBoard) -> Self {
        Self {
            phase: RwLock::new(Phase::Hydrating),
            turn: Mutex::new(()),
            bridge: Some(bridge),
            default_board,
            hydration: Hydration::new(),
            listeners: Listeners::new(),
        }
    }

    /// A store persisting to files under `base.join(config.storage_dir)`
    pub fn from_config(config: &KanbanConfig, base: &Path) -> Self {
        let backend = FileBlobStore::new(base.join(&config.storage_dir));
        let bridge = PersistenceBridge::new(Arc::new(backend), config.storage_key.clone());
        Self::new(bridge, config.default_board.clone())
    }

    /// A hydrated store holding `state` with no persistence
    pub fn in_memory(state: KanbanState) -> Self {
        let store = Self {
            phase: RwLock::new(Phase::Ready(Arc::new(state))),
            turn: Mutex::new(()),
            bridge: None,
            default_board: DefaultBoard::default(),
            hydration: Hydration::new(),
            listeners: Listeners::new(),
        };
        store.hydration.complete();
        store
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Load persisted state and open the store for reads and writes.
    ///
    /// Missing, unreachable, corrupt or inconsistent data all fall back to a
    /// freshly seeded default board; the last three also emit
    /// [`StoreEvent::PersistenceFailed`]. Calling this again is a no-op.
    pub async fn hydrate(&self) {
        let _turn = self.turn.lock().await;
        if self.hydration.has_hydrated() {
            return;
        }

        let state = match &self.bridge {
            Some(bridge) => self.load_or_seed(bridge).await,
            None => self.seed(),
        };
        info!(
            boards = state.boards.len(),
            columns = state.columns.len(),
            tasks = state.tasks.len(),
            "store hydrated"
        );

        self.replace(Arc::new(state));
        self.hydration.complete();
    }

    async fn load_or_seed(&self, bridge: &PersistenceBridge) -> KanbanState {
        match bridge.load().await {
            Ok(Some(mut state)) => {
                if state.clear_dangling_active() {
                    debug!("cleared active board that no longer exists");
                }
                match state.verify() {
                    Ok(()) => state,
                    Err(e) => {
                        self.report_failure(format!("saved state rejected: {}", e));
                        self.seed()
                    }
                }
            }
            Ok(None) => {
                info!(key = %bridge.key(), "no saved state, seeding default board");
                self.seed()
            }
            Err(e) => {
                self.report_failure(format!("failed to load saved state: {}", e));
                self.seed()
            }
        }
    }

    fn seed(&self) -> KanbanState {
        self.default_board.initial_state()
    }

    pub fn has_hydrated(&self) -> bool {
        self.hydration.has_hydrated()
    }

    /// Run `callback` once hydration completes (immediately if it already
    /// has)
    pub fn on_hydration_complete(
        &self,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        self.hydration.on_complete(callback)
    }

    /// Wait until hydration completes
    pub async fn wait_hydrated(&self) {
        self.hydration.wait().await
    }

    // =========================================================================
    // Reads and notifications
    // =========================================================================

    /// The current state
    pub fn snapshot(&self) -> Result<Arc<KanbanState>> {
        match &*self.phase.read().unwrap_or_else(PoisonError::into_inner) {
            Phase::Hydrating => Err(KanbanError::Hydrating),
            Phase::Ready(state) => Ok(state.clone()),
        }
    }

    /// Receive a [`StoreEvent`] for every change and persistence failure
    pub fn subscribe(
        &self,
        callback: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.subscribe(callback)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Apply a mutation.
    ///
    /// On error or `Unchanged` the state is untouched and nothing is saved
    /// or announced.
    pub async fn execute<M: Mutate>(&self, op: &M) -> Result<Applied<M::Output>> {
        let _turn = self.turn.lock().await;
        let start = Instant::now();
        let op_string = op.op_string();

        let mut next = (*self.snapshot()?).clone();
        let output = match op.apply(&mut next)? {
            Applied::Changed(output) => output,
            Applied::Unchanged(output) => {
                trace!(op = %op_string, "operation left state unchanged");
                return Ok(Applied::Unchanged(output));
            }
        };

        let next = Arc::new(next);
        self.replace(next.clone());
        self.persist(&next).await;

        trace!(
            op = %op_string,
            duration_ms = start.elapsed().as_millis() as u64,
            "operation applied"
        );
        self.listeners.emit(&StoreEvent::Changed {
            op: op_string,
            state: next,
        });
        Ok(Applied::Changed(output))
    }

    /// Apply a reorder intent from the drag controller. Returns true if the
    /// state changed.
    pub async fn apply_intent(&self, intent: &MoveIntent) -> Result<bool> {
        let applied = match intent {
            MoveIntent::Task(op) => self.execute(op).await?,
            MoveIntent::Column(op) => self.execute(op).await?,
        };
        Ok(applied.is_changed())
    }

    pub async fn set_active_board(&self, id: Option<BoardId>) -> Result<bool> {
        let op = SetActiveBoard { id };
        Ok(self.execute(&op).await?.is_changed())
    }

    /// Add a task at the head of `column_id`
    pub async fn add_task(
        &self,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Result<TaskId> {
        let op = AddTask::new(column_id, title);
        Ok(self.execute(&op).await?.into_inner())
    }

    pub async fn update_task(&self, id: impl Into<TaskId>, patch: TaskPatch) -> Result<bool> {
        let op = UpdateTask::new(id, patch);
        Ok(self.execute(&op).await?.is_changed())
    }

    pub async fn delete_task(&self, id: impl Into<TaskId>) -> Result<bool> {
        let op = DeleteTask::new(id);
        Ok(self.execute(&op).await?.is_changed())
    }

    pub async fn move_task(
        &self,
        task_id: impl Into<TaskId>,
        source_column_id: impl Into<ColumnId>,
        target_column_id: impl Into<ColumnId>,
        target_index: usize,
    ) -> Result<bool> {
        let op = MoveTask::new(task_id, source_column_id, target_column_id, target_index);
        Ok(self.execute(&op).await?.is_changed())
    }

    /// Append a column to `board_id`
    pub async fn add_column(
        &self,
        board_id: impl Into<BoardId>,
        title: impl Into<String>,
    ) -> Result<ColumnId> {
        let op = AddColumn::new(board_id, title);
        Ok(self.execute(&op).await?.into_inner())
    }

    pub async fn update_column(
        &self,
        id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Result<bool> {
        let op = UpdateColumn::new(id, title);
        Ok(self.execute(&op).await?.is_changed())
    }

    pub async fn delete_column(&self, id: impl Into<ColumnId>) -> Result<bool> {
        let op = DeleteColumn::new(id);
        Ok(self.execute(&op).await?.is_changed())
    }

    pub async fn move_column(
        &self,
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        target_index: usize,
    ) -> Result<bool> {
        let op = MoveColumn::new(board_id, column_id, target_index);
        Ok(self.execute(&op).await?.is_changed())
    }

    /// Create a board with the default columns
    pub async fn add_board(&self, title: impl Into<String>) -> Result<BoardId> {
        let op = AddBoard::new(title);
        Ok(self.execute(&op).await?.into_inner())
    }

    pub async fn update_board(
        &self,
        id: impl Into<BoardId>,
        title: impl Into<String>,
    ) -> Result<bool> {
        let op = UpdateBoard::new(id, title);
        Ok(self.execute(&op).await?.is_changed())
    }

    pub async fn delete_board(&self, id: impl Into<BoardId>) -> Result<bool> {
        let op = DeleteBoard::new(id);
        Ok(self.execute(&op).await?.is_changed())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn replace(&self, state: Arc<KanbanState>) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = Phase::Ready(state);
    }

    async fn persist(&self, state: &KanbanState) {
        let Some(bridge) = &self.bridge else {
            return;
        };
        if let Err(e) = bridge.save(state).await {
            self.report_failure(format!("failed to save state: {}", e));
        }
    }

    fn report_failure(&self, message: String) {
        warn!("{}", message);
        self.listeners.emit(&StoreEvent::PersistenceFailed { message });
    }
}

impl std::fmt::Debug for KanbanStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanStore")
            .field("bridge", &self.bridge)
            .field("hydrated", &self.has_hydrated())
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
