//! The board state store: owns the authoritative [`BoardState`] and applies
//! add/delete/move, persisting after every change.

use crate::{
    config::FlowboardConfig,
    domain::{BoardState, ColumnId, Direction, Task, TaskId},
    notification::{NotificationSink, Severity},
    persistence::{self, LoadOrigin},
    storage::Storage,
};

/// Result of [`BoardStore::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The task was created at the top of To Do
    Added(TaskId),
    /// Another task already has this title (ignoring case); nothing changed
    Duplicate,
    /// The title was empty after trimming; nothing changed
    EmptyTitle,
}

/// Board state container
///
/// Storage and notification sink are supplied at construction. Every
/// operation finishes its in-memory change before the single persistence
/// write, and a failed write never rolls the change back.
pub struct BoardStore<S, N> {
    state: BoardState,
    storage: S,
    notifier: N,
    storage_key: String,
    load_origin: LoadOrigin,
}

impl<S: Storage, N: NotificationSink> BoardStore<S, N> {
    /// Opens the store, loading any board saved under the configured key
    pub async fn open(storage: S, notifier: N, config: &FlowboardConfig) -> Self {
        let key = config.storage.key.clone();
        let loaded = persistence::load_board(&storage, &key).await;
        tracing::debug!(
            key = %key,
            origin = ?loaded.origin,
            tasks = loaded.state.len(),
            "board loaded"
        );

        Self {
            state: loaded.state,
            storage,
            notifier,
            storage_key: key,
            load_origin: loaded.origin,
        }
    }

    /// Creates a store around an existing state without reading storage
    pub fn with_state(
        state: BoardState,
        storage: S,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            state,
            storage,
            notifier,
            storage_key: storage_key.into(),
            load_origin: LoadOrigin::Stored,
        }
    }

    /// Current board
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// How the board was obtained when the store was opened
    pub fn load_origin(&self) -> LoadOrigin {
        self.load_origin
    }

    /// Adds a task titled `title` to the top of To Do
    pub async fn add(&mut self, title: &str) -> AddOutcome {
        let title = title.trim();
        if title.is_empty() {
            return AddOutcome::EmptyTitle;
        }

        if self.state.contains_title(title) {
            tracing::debug!(title, "rejected duplicate task title");
            self.notifier.notify(
                format!(
                    "Task \"{}\" already exists. Please choose a different name.",
                    title
                ),
                Severity::Error,
            );
            return AddOutcome::Duplicate;
        }

        let task = Task::new(title, ColumnId::Todo);
        let id = task.id.clone();
        self.state.push_top(task);
        tracing::debug!(task_id = %id, title, "task added");

        self.persist().await;
        self.notifier.notify(
            format!("Task \"{}\" added successfully!", title),
            Severity::Success,
        );
        AddOutcome::Added(id)
    }

    /// Removes a task, returning it. Unknown ids change nothing.
    pub async fn delete(&mut self, id: &TaskId) -> Option<Task> {
        let (column, task) = self.state.take(id)?;
        tracing::debug!(task_id = %id, column = column.as_key(), "task deleted");

        self.persist().await;
        self.notifier.notify(
            format!("Task \"{}\" deleted successfully", task.title),
            Severity::Success,
        );
        Some(task)
    }

    /// Moves a task to the top of `target`, including when it is already in
    /// `target`. Returns `false` for unknown ids. Never notifies.
    pub async fn move_task(&mut self, id: &TaskId, target: ColumnId) -> bool {
        let Some((from, mut task)) = self.state.take(id) else {
            return false;
        };

        task.column_id = target;
        self.state.push_top(task);
        tracing::debug!(
            task_id = %id,
            from = from.as_key(),
            to = target.as_key(),
            "task moved"
        );

        self.persist().await;
        true
    }

    /// Moves a task one column to the left; no-op in To Do
    pub async fn move_left(&mut self, id: &TaskId) -> bool {
        self.move_toward(id, Direction::Left).await
    }

    /// Moves a task one column to the right; no-op in Done
    pub async fn move_right(&mut self, id: &TaskId) -> bool {
        self.move_toward(id, Direction::Right).await
    }

    async fn move_toward(&mut self, id: &TaskId, direction: Direction) -> bool {
        let Some((current, _)) = self.state.find(id) else {
            return false;
        };
        match current.neighbor(direction) {
            Some(target) => self.move_task(id, target).await,
            None => false,
        }
    }

    async fn persist(&self) {
        if let Err(e) =
            persistence::save_board(&self.storage, &self.storage_key, &self.state).await
        {
            tracing::warn!(
                key = %self.storage_key,
                error = %e,
                "failed to save board, keeping in-memory state"
            );
        }
    }
}
