pub mod board;
pub mod column;
pub mod task;

pub use board::BoardState;
pub use column::{ColumnId, Direction};
pub use task::{Task, TaskId};
