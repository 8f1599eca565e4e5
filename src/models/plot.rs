use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use utoipa::ToSchema;

/// Lifecycle of a single plot: Empty → Planted → Watered → Ready → Empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlotState {
    #[default]
    Empty,
    Planted,
    Watered,
    Ready,
}

/// An action that is not legal for the plot's current state.
/// The message is what the player sees, so it says what to do instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("That plot is not empty. Harvest it before planting again.")]
    NotEmpty,
    #[error("There is nothing planted there. Plant a seed first.")]
    NothingPlanted,
    #[error("That plot is already watered or ready to harvest.")]
    AlreadyWatered,
    #[error("There is nothing to harvest on that plot.")]
    NothingToHarvest,
    #[error("That plant is not ready yet. Give it time to grow.")]
    NotReady,
}

/// One grid cell.
///
/// `timer` is the handle of the scheduled growth-completion task. It exists
/// only while the plot is watered and growth is still pending, and it is never
/// serialized — restarts rebuild it from `last_watered_time`.
#[derive(Debug, Default)]
pub struct Plot {
    pub state: PlotState,
    /// Epoch milliseconds of the last watering. Set only in the watered state.
    pub last_watered_time: Option<i64>,
    timer: Option<JoinHandle<()>>,
}

impl Plot {
    /// Puts a seed in the plot. Only an empty plot accepts one.
    pub fn plant(&mut self) -> Result<(), TransitionError> {
        match self.state {
            PlotState::Empty => {
                self.state = PlotState::Planted;
                self.last_watered_time = None;
                self.clear_timer();
                Ok(())
            }
            _ => Err(TransitionError::NotEmpty),
        }
    }

    /// Waters a planted seed and records when. The caller is responsible for
    /// arming the growth timer via [`Plot::set_timer`].
    pub fn water(&mut self, now_ms: i64) -> Result<(), TransitionError> {
        match self.state {
            PlotState::Planted => {
                self.state = PlotState::Watered;
                self.last_watered_time = Some(now_ms);
                Ok(())
            }
            PlotState::Empty => Err(TransitionError::NothingPlanted),
            PlotState::Watered | PlotState::Ready => Err(TransitionError::AlreadyWatered),
        }
    }

    /// Harvests a grown plant, returning the plot to empty.
    pub fn harvest(&mut self) -> Result<(), TransitionError> {
        match self.state {
            PlotState::Ready => {
                self.state = PlotState::Empty;
                self.last_watered_time = None;
                self.clear_timer();
                Ok(())
            }
            PlotState::Empty => Err(TransitionError::NothingToHarvest),
            PlotState::Planted | PlotState::Watered => Err(TransitionError::NotReady),
        }
    }

    /// Completes growth, guarded: a fired timer is not proof the plot is still
    /// watered, so the current state is re-checked here rather than trusted.
    /// Returns whether the transition applied; a stale firing is a silent no-op.
    pub fn finish_growth(&mut self) -> bool {
        match self.state {
            PlotState::Watered => {
                self.state = PlotState::Ready;
                self.last_watered_time = None;
                self.timer = None;
                true
            }
            _ => false,
        }
    }

    /// Stores the handle of the pending growth task. At most one timer may be
    /// pending per plot, so any predecessor is aborted first.
    pub fn set_timer(&mut self, handle: JoinHandle<()>) {
        self.clear_timer();
        self.timer = Some(handle);
    }

    fn clear_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    /// The serializable projection of the plot, with the timer handle stripped.
    pub fn snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            state: self.state,
            last_watered_time: self.last_watered_time,
        }
    }

    /// Rebuilds a plot from its persisted form. Timers are not resurrected
    /// here — the board service recomputes them from the watering timestamp.
    pub fn restore(snapshot: PlotSnapshot) -> Self {
        Self {
            state: snapshot.state,
            last_watered_time: snapshot.last_watered_time,
            timer: None,
        }
    }
}

/// Wire and storage form of a [`Plot`]: `{state, lastWateredTime}`.
/// `lastWateredTime` serializes as an explicit `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlotSnapshot {
    pub state: PlotState,
    pub last_watered_time: Option<i64>,
}
