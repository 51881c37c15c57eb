//! # FlowBoard Core
//!
//! Board state store, persistence codec and notification queue for the
//! FlowBoard kanban board.
//!
//! The crate owns the three-column board state and the rules that mutate it.
//! Rendering, drag-and-drop wiring and toast animation belong to whatever view
//! layer drives a [`BoardStore`]; the store only needs a [`Storage`] slot and a
//! [`NotificationSink`] handed to it at construction.

pub mod config;
pub mod domain;
pub mod error;
pub mod notification;
pub mod persistence;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::FlowboardConfig;
pub use domain::{
    board::BoardState,
    column::{ColumnId, Direction},
    task::{Task, TaskId},
};
pub use error::{FlowboardError, Result};
pub use notification::{Notification, NotificationId, NotificationQueue, NotificationSink, Severity};
pub use persistence::{LoadOrigin, Loaded, STORAGE_KEY};
pub use storage::Storage;
pub use store::{AddOutcome, BoardStore};
