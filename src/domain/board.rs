use crate::domain::{
    column::ColumnId,
    task::{Task, TaskId},
};
use crate::error::{FlowboardError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Kanban board state: one ordered task sequence per column
///
/// The most recently added or moved task sits at the front of its column.
/// All three columns always exist; the fields are private so changes go
/// through [`crate::BoardStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardState {
    todo: Vec<Task>,
    inprogress: Vec<Task>,
    done: Vec<Task>,
}

impl BoardState {
    /// Builds a state from existing column sequences, without validation
    pub fn from_columns(todo: Vec<Task>, inprogress: Vec<Task>, done: Vec<Task>) -> Self {
        Self {
            todo,
            inprogress,
            done,
        }
    }

    /// Tasks in a column, top first
    pub fn column(&self, column: ColumnId) -> &[Task] {
        match column {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.inprogress,
            ColumnId::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: ColumnId) -> &mut Vec<Task> {
        match column {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.inprogress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Number of tasks in a column
    pub fn count(&self, column: ColumnId) -> usize {
        self.column(column).len()
    }

    /// Total number of tasks on the board
    pub fn len(&self) -> usize {
        self.todo.len() + self.inprogress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every task, column by column in board order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        ColumnId::ALL
            .into_iter()
            .flat_map(move |column| self.column(column).iter())
    }

    /// Finds a task and the column holding it
    pub fn find(&self, id: &TaskId) -> Option<(ColumnId, &Task)> {
        ColumnId::ALL.into_iter().find_map(|column| {
            self.column(column)
                .iter()
                .find(|task| &task.id == id)
                .map(|task| (column, task))
        })
    }

    /// Checks whether any task on the board has this title, ignoring case
    pub fn contains_title(&self, title: &str) -> bool {
        self.iter().any(|task| task.title_matches(title))
    }

    /// Places a task at the top of its column
    pub(crate) fn push_top(&mut self, task: Task) {
        self.column_mut(task.column_id).insert(0, task);
    }

    /// Removes a task, keeping the relative order of the rest of its column
    pub(crate) fn take(&mut self, id: &TaskId) -> Option<(ColumnId, Task)> {
        ColumnId::ALL.into_iter().find_map(|column| {
            let tasks = self.column_mut(column);
            let position = tasks.iter().position(|task| &task.id == id)?;
            Some((column, tasks.remove(position)))
        })
    }

    /// Verifies that no id appears twice and every task sits in the column
    /// its `column_id` names
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in ColumnId::ALL {
            for task in self.column(column) {
                if !seen.insert(&task.id) {
                    return Err(FlowboardError::InvariantViolation(format!(
                        "task {} appears more than once",
                        task.id
                    )));
                }
                if task.column_id != column {
                    return Err(FlowboardError::InvariantViolation(format!(
                        "task {} is in {} but claims {}",
                        task.id,
                        column.as_key(),
                        task.column_id.as_key()
                    )));
                }
            }
        }
        Ok(())
    }
}
