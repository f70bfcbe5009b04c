use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: i64 = 9;
pub const DEFAULT_COLUMNS: i64 = 9;
pub const DEFAULT_MINES: i64 = 15;

/// Body of `POST /minesweeper/game`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub user: String,
    pub rows: i64,
    pub columns: i64,
    pub mines: i64,
}

impl NewGameRequest {
    /// Request with the server's standard 9x9 board and 15 mines
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            mines: DEFAULT_MINES,
        }
    }
}

/// Body of `PUT /minesweeper/game/{gameId}/reveal`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotRequest {
    pub row: i64,
    pub col: i64,
}

/// Body of `PUT /minesweeper/game/{gameId}/mark`
///
/// `mark` is a free-form tag; the server decides whether it is legal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRequest {
    pub row: i64,
    pub col: i64,
    pub mark: String,
}
