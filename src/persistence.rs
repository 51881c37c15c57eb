//! Board document codec and the load/save round-trip against a [`Storage`]
//! slot.
//!
//! The stored value is a JSON object with `todo`, `inprogress` and `done`
//! arrays of `{id, title, columnId}`. Loading never fails from the caller's
//! point of view: absent or corrupt values yield the empty board, and
//! [`LoadOrigin`] records which case applied.

use crate::{
    domain::{BoardState, Task},
    error::Result,
    storage::Storage,
};
use serde::Deserialize;

/// Default slot key for the board document
pub const STORAGE_KEY: &str = "flowboard_state_v1";

/// Where a loaded board came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Decoded from the stored document
    Stored,
    /// Slot was empty, default board used
    Absent,
    /// Slot held something that is not a board document, default board used
    Corrupt,
    /// Storage could not be read, default board used
    Unreadable,
}

/// Result of [`load_board`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub state: BoardState,
    pub origin: LoadOrigin,
}

impl Loaded {
    fn fallback(origin: LoadOrigin) -> Self {
        Self {
            state: BoardState::default(),
            origin,
        }
    }
}

/// Stored document shape; any column may be missing or `null`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoardDocument {
    todo: Option<Vec<Task>>,
    inprogress: Option<Vec<Task>>,
    done: Option<Vec<Task>>,
}

/// Serializes a board to its stored JSON form
pub fn encode(state: &BoardState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parses a stored JSON document, substituting empty sequences for missing
/// columns
pub fn decode(raw: &str) -> Result<BoardState> {
    let document: BoardDocument = serde_json::from_str(raw)?;
    Ok(BoardState::from_columns(
        document.todo.unwrap_or_default(),
        document.inprogress.unwrap_or_default(),
        document.done.unwrap_or_default(),
    ))
}

/// Loads the board from a slot
pub async fn load_board<S: Storage + ?Sized>(storage: &S, key: &str) -> Loaded {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return Loaded::fallback(LoadOrigin::Absent),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read board, starting empty");
            return Loaded::fallback(LoadOrigin::Unreadable);
        }
    };

    match decode(&raw) {
        Ok(state) => Loaded {
            state,
            origin: LoadOrigin::Stored,
        },
        Err(e) => {
            tracing::warn!(key, error = %e, "stored board is corrupt, starting empty");
            Loaded::fallback(LoadOrigin::Corrupt)
        }
    }
}

/// Writes the full board to a slot
pub async fn save_board<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
    state: &BoardState,
) -> Result<()> {
    let json = encode(state)?;
    storage.set(key, &json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnId, TaskId};
    use crate::storage::MemoryStorage;

    fn task(id: &str, title: &str, column_id: ColumnId) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            column_id,
        }
    }

    fn sample_board() -> BoardState {
        BoardState::from_columns(
            vec![
                task("1", "Buy milk", ColumnId::Todo),
                task("2", "Call mum", ColumnId::Todo),
            ],
            vec![task("3", "Write report", ColumnId::InProgress)],
            vec![task("4", "Pay rent", ColumnId::Done)],
        )
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_board() {
        let storage = MemoryStorage::new();
        let board = sample_board();

        save_board(&storage, STORAGE_KEY, &board).await.unwrap();
        let loaded = load_board(&storage, STORAGE_KEY).await;

        assert_eq!(loaded.origin, LoadOrigin::Stored);
        assert_eq!(loaded.state, board);
    }

    #[tokio::test]
    async fn test_absent_slot_yields_default() {
        let storage = MemoryStorage::new();
        let loaded = load_board(&storage, STORAGE_KEY).await;
        assert_eq!(loaded.origin, LoadOrigin::Absent);
        assert_eq!(loaded.state, BoardState::default());

        storage.insert(STORAGE_KEY, "");
        let loaded = load_board(&storage, STORAGE_KEY).await;
        assert_eq!(loaded.origin, LoadOrigin::Absent);
    }

    #[tokio::test]
    async fn test_corrupt_slot_yields_default() {
        let storage = MemoryStorage::new();

        for raw in ["not json at all", "{\"todo\": [", "42", "[1, 2, 3]", "{\"todo\": 5}"] {
            storage.insert(STORAGE_KEY, raw);
            let loaded = load_board(&storage, STORAGE_KEY).await;
            assert_eq!(loaded.origin, LoadOrigin::Corrupt, "input: {}", raw);
            assert_eq!(loaded.state, BoardState::default());
        }
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let state = decode(r#"{"done":[{"id":"9","title":"Old","columnId":"done"}]}"#).unwrap();
        assert_eq!(state.count(ColumnId::Todo), 0);
        assert_eq!(state.count(ColumnId::InProgress), 0);
        assert_eq!(state.count(ColumnId::Done), 1);

        let state = decode(r#"{"todo":null,"inprogress":[]}"#).unwrap();
        assert!(state.is_empty());

        let state = decode("{}").unwrap();
        assert_eq!(state, BoardState::default());
    }

    #[test]
    fn test_decode_does_not_repair_tasks() {
        // A task filed under the wrong key is kept where it was stored
        let state = decode(r#"{"todo":[{"id":"1","title":"Stray","columnId":"done"}]}"#).unwrap();
        assert_eq!(state.column(ColumnId::Todo)[0].column_id, ColumnId::Done);
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_null_document_is_corrupt() {
        assert!(decode("null").is_err());
    }

    #[test]
    fn test_encoded_shape() {
        let json = encode(&BoardState::from_columns(
            vec![task("1", "Buy milk", ColumnId::Todo)],
            vec![],
            vec![],
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"todo":[{"id":"1","title":"Buy milk","columnId":"todo"}],"inprogress":[],"done":[]}"#
        );
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);
        assert!(save_board(&storage, STORAGE_KEY, &sample_board()).await.is_err());
    }
}
