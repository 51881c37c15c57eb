use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the three fixed board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

/// Direction for the card arrow controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl ColumnId {
    /// Column order as laid out on the board, left to right
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    /// Returns the key used for this column in the stored document
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Returns the column heading shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Position of the column in [`ColumnId::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Returns the adjacent column in the given direction, or `None` at the
    /// edge of the board.
    pub fn neighbor(&self, direction: Direction) -> Option<ColumnId> {
        let index = self.index();
        let target = match direction {
            Direction::Left => index.checked_sub(1)?,
            Direction::Right => index + 1,
        };
        Self::ALL.get(target).copied()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for ColumnId {
    type Err = crate::error::FlowboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(crate::error::FlowboardError::InvalidColumn(s.to_string())),
        }
    }
}
