use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Player annotation on a cell, independent of its reveal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    QuestionMark,
    FlagMark,
}

impl Mark {
    /// Wire tag sent in the `mark` field of a mark request
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::None => "None",
            Mark::QuestionMark => "QuestionMark",
            Mark::FlagMark => "FlagMark",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a game session as reported by the server.
///
/// Tags the client does not know about are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameStatus {
    Active,
    Lose,
    Win,
    Other(String),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Active => "Active",
            GameStatus::Lose => "Lose",
            GameStatus::Win => "Win",
            GameStatus::Other(tag) => tag,
        }
    }
}

impl From<String> for GameStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => GameStatus::Active,
            "Lose" => GameStatus::Lose,
            "Win" => GameStatus::Win,
            _ => GameStatus::Other(value),
        }
    }
}

impl From<GameStatus> for String {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq<&str> for GameStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single spot of the minefield.
///
/// Only `revealed` and `mark` are interpreted; mine and adjacency fields are
/// kept in `extra` exactly as the server sent them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    #[serde(default)]
    pub mark: Mark,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Number of cells in each display state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub hidden: usize,
    pub revealed: usize,
    pub question: usize,
    pub flagged: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    pub rows: i64,
    pub columns: i64,
    pub board: Vec<Vec<Cell>>,
}

impl Minefield {
    /// Get the cell at the specified position
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.board.get(row)?.get(col)
    }

    /// Count the number of cells in each state
    pub fn count_cells(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in self.board.iter().flatten() {
            match (cell.revealed, cell.mark) {
                (true, _) => counts.revealed += 1,
                (false, Mark::QuestionMark) => counts.question += 1,
                (false, Mark::FlagMark) => counts.flagged += 1,
                (false, Mark::None) => counts.hidden += 1,
            }
        }
        counts
    }
}

impl fmt::Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            let line: String = row
                .iter()
                .map(|cell| match (cell.revealed, cell.mark) {
                    (true, _) => '.',
                    (false, Mark::FlagMark) => 'F',
                    (false, Mark::QuestionMark) => '?',
                    (false, Mark::None) => '#',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Game state returned by every successful game operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_id: String,
    pub game_status: GameStatus,
    pub paused: bool,
    pub minefield: Minefield,
}

impl GameResult {
    /// Check if the server reports the game as won or lost
    pub fn is_finished(&self) -> bool {
        matches!(self.game_status, GameStatus::Win | GameStatus::Lose)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryResult {
    pub historic: Vec<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(revealed: bool, mark: Mark) -> Cell {
        Cell {
            revealed,
            mark,
            extra: Map::new(),
        }
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: GameStatus = serde_json::from_value(json!("Abandoned")).unwrap();
        assert_eq!(status, GameStatus::Other("Abandoned".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("Abandoned"));

        let status: GameStatus = serde_json::from_value(json!("Lose")).unwrap();
        assert_eq!(status, GameStatus::Lose);
    }

    #[test]
    fn cell_keeps_server_fields() {
        let raw = json!({ "revealed": true, "mark": "None", "hasMine": false, "minesAround": 2 });
        let cell: Cell = serde_json::from_value(raw.clone()).unwrap();
        assert!(cell.revealed);
        assert_eq!(cell.extra.get("minesAround"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&cell).unwrap(), raw);
    }

    #[test]
    fn counts_and_renders_board() {
        let field = Minefield {
            rows: 2,
            columns: 2,
            board: vec![
                vec![cell(true, Mark::None), cell(false, Mark::FlagMark)],
                vec![cell(false, Mark::QuestionMark), cell(false, Mark::None)],
            ],
        };

        assert_eq!(
            field.count_cells(),
            CellCounts {
                hidden: 1,
                revealed: 1,
                question: 1,
                flagged: 1,
            }
        );
        assert_eq!(field.to_string(), ".F\n?#\n");
        assert_eq!(field.cell(0, 1).map(|c| c.mark), Some(Mark::FlagMark));
        assert!(field.cell(2, 0).is_none());
    }
}
