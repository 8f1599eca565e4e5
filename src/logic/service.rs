use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::logic::store::BoardStore;
use crate::models::board::Board;
use crate::models::plot::{PlotSnapshot, PlotState, TransitionError};
use crate::models::Matrix;

pub const ROWS: usize = 4;
pub const COLS: usize = 5;

/// How long a watered plant takes to become ready to harvest.
pub const GROWTH_DURATION: Duration = Duration::from_millis(5_000);

/// Directory the game board document lives in, relative to the working
/// directory of the server binary.
pub const STORAGE_DIR: &str = "storage";

/// Why a plot action was refused.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid plot coordinates.")]
    OutOfBounds,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Failed to save the game board: {0}")]
    Storage(#[from] io::Error),
}

/// Owns the board, schedules and rehydrates growth timers, and drives
/// persistence. Cloning shares the same board and store.
///
/// Every mutation — request-driven or timer-driven — runs under one mutex and
/// persists before releasing it, so a caller that observes success knows the
/// change is durable, and a timer firing can never see a half-applied action.
#[derive(Clone)]
pub struct BoardService {
    board: Arc<Mutex<Board>>,
    store: Arc<BoardStore>,
}

impl BoardService {
    pub fn new(storage_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::new(ROWS, COLS))),
            store: Arc::new(BoardStore::new(storage_dir)),
        }
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        // A poisoned lock still holds a usable board.
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the persisted board and resumes interrupted growth, or persists a
    /// fresh all-empty board when no usable document exists. Growth that
    /// already elapsed while the process was down completes immediately;
    /// otherwise a timer is armed for the remaining time only.
    ///
    /// I/O failures here are fatal: the server must not start serving with an
    /// unknown board state.
    pub fn initialize(&self) -> io::Result<()> {
        let mut board = self.board();
        match self.store.load(board.rows, board.cols)? {
            Some(cells) => {
                *board = Board::restore(cells);
                self.rehydrate(&mut board);
                log::info!("restored game board from {}", self.store.dir().display());
            }
            None => {
                log::info!("starting with a fresh {ROWS}x{COLS} board");
            }
        }
        self.store.save(board.snapshot())
    }

    /// Read-only snapshot of every plot. Never fails, never mutates.
    pub fn game_state(&self) -> Matrix<PlotSnapshot> {
        self.board().snapshot()
    }

    pub fn plant(&self, row: usize, col: usize) -> Result<String, ActionError> {
        let mut board = self.board();
        let plot = board.plot_mut(row, col).ok_or(ActionError::OutOfBounds)?;
        plot.plant()?;
        self.store.save(board.snapshot())?;
        Ok("Seed planted! Water it to make it grow.".into())
    }

    pub fn water(&self, row: usize, col: usize) -> Result<String, ActionError> {
        let mut board = self.board();
        let plot = board.plot_mut(row, col).ok_or(ActionError::OutOfBounds)?;
        plot.water(now_ms())?;
        let handle = self.arm_timer(row, col, GROWTH_DURATION);
        plot.set_timer(handle);
        self.store.save(board.snapshot())?;
        Ok(format!(
            "Plot watered! It will be ready to harvest in {} seconds.",
            GROWTH_DURATION.as_secs()
        ))
    }

    pub fn harvest(&self, row: usize, col: usize) -> Result<String, ActionError> {
        let mut board = self.board();
        let plot = board.plot_mut(row, col).ok_or(ActionError::OutOfBounds)?;
        plot.harvest()?;
        self.store.save(board.snapshot())?;
        Ok("Harvested! The plot is ready for a new seed.".into())
    }

    /// Re-arms growth for every plot loaded mid-growth. The timer handle is
    /// never persisted; it is reconstructed here from the stored watering
    /// timestamp and the fixed growth duration.
    fn rehydrate(&self, board: &mut Board) {
        let now = now_ms();
        let duration_ms = GROWTH_DURATION.as_millis() as i64;
        for row in 0..board.rows {
            for col in 0..board.cols {
                let Some(plot) = board.plot_mut(row, col) else {
                    continue;
                };
                if plot.state != PlotState::Watered {
                    continue;
                }
                let elapsed = plot.last_watered_time.map_or(0, |t| now.saturating_sub(t));
                if elapsed >= duration_ms {
                    plot.finish_growth();
                    log::info!("plot ({row}, {col}) finished growing while the server was down");
                } else {
                    let remaining = Duration::from_millis((duration_ms - elapsed) as u64);
                    let handle = self.arm_timer(row, col, remaining);
                    plot.set_timer(handle);
                    log::info!(
                        "plot ({row}, {col}) resumes growing, {}ms left",
                        remaining.as_millis()
                    );
                }
            }
        }
    }

    fn arm_timer(&self, row: usize, col: usize, delay: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            service.complete_growth(row, col);
        })
    }

    /// Timer callback. Delivered through the same guarded transition as every
    /// other action: if the plot is no longer watered when the timer fires,
    /// nothing happens and nothing is persisted.
    fn complete_growth(&self, row: usize, col: usize) {
        let mut board = self.board();
        let Some(plot) = board.plot_mut(row, col) else {
            return;
        };
        if !plot.finish_growth() {
            return;
        }
        log::debug!("plot ({row}, {col}) finished growing");
        if let Err(e) = self.store.save(board.snapshot()) {
            log::error!("failed to save the game board after growth completion: {e}");
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
