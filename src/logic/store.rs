use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::plot::PlotSnapshot;
use crate::models::Matrix;

/// File the game board document is written to, inside the storage directory.
const STORE_FILE: &str = "game_board.json";

/// On-disk document: a single `gameBoard` key holding the board snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct SavedGame {
    #[serde(rename = "gameBoard")]
    game_board: Matrix<PlotSnapshot>,
}

/// Reads and writes the one JSON document the game persists.
///
/// A document that exists but cannot be used (unparseable, or written for a
/// different grid geometry) degrades to "no document" with a warning — a
/// corrupt save must never keep the game from starting.
#[derive(Debug)]
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(STORE_FILE)
    }

    /// Loads the persisted board snapshot, expecting a `rows` x `cols` grid.
    /// `Ok(None)` means "start fresh": the file is absent, unreadable as a
    /// document, or sized for a different board.
    pub fn load(&self, rows: usize, cols: usize) -> io::Result<Option<Matrix<PlotSnapshot>>> {
        let path = self.file_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let saved: SavedGame = match serde_json::from_str(&raw) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!(
                    "discarding unreadable game board at {}: {e}",
                    path.display()
                );
                return Ok(None);
            }
        };

        let board = saved.game_board;
        if board.len() != rows || board.iter().any(|r| r.len() != cols) {
            log::warn!(
                "discarding persisted board sized {}x{}, expected {rows}x{cols}",
                board.len(),
                board.first().map_or(0, Vec::len),
            );
            return Ok(None);
        }
        Ok(Some(board))
    }

    /// Writes the whole board document, creating the storage directory on
    /// demand. The board is always persisted as a unit, never per plot.
    pub fn save(&self, snapshot: Matrix<PlotSnapshot>) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let saved = SavedGame {
            game_board: snapshot,
        };
        let raw = serde_json::to_string_pretty(&saved).map_err(io::Error::other)?;
        fs::write(self.file_path(), raw)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
