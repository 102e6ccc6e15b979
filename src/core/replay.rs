//! # Replay
//!
//! Folds an action log over a state snapshot:
//!
//! ```text
//! state.json + actions.json  →  update() × N  →  new state.json
//! ```
//!
//! Snapshots are plain JSON `GlobalState`. All writes use atomic rename
//! (write `.tmp`, then `rename()`) so a crash never leaves half a snapshot.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use crate::core::action::{Action, update};
use crate::core::state::{GlobalState, TabId};

#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "replay I/O error: {e}"),
            ReplayError::Json(e) => write!(f, "replay JSON error: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        ReplayError::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Json(e)
    }
}

/// Load a state snapshot. A missing file is an empty state.
pub fn load_state(path: &Path) -> Result<GlobalState, ReplayError> {
    if !path.exists() {
        info!("No state at {}, starting empty", path.display());
        return Ok(GlobalState::default());
    }
    let json = fs::read_to_string(path)?;
    let state = serde_json::from_str(&json)?;
    debug!("Loaded state from {}", path.display());
    Ok(state)
}

/// Load an action log (a JSON array of actions).
pub fn load_actions(path: &Path) -> Result<Vec<Action>, ReplayError> {
    let json = fs::read_to_string(path)?;
    let actions: Vec<Action> = serde_json::from_str(&json)?;
    debug!("Loaded {} actions from {}", actions.len(), path.display());
    Ok(actions)
}

/// Apply `actions` in order.
pub fn replay(
    state: GlobalState,
    actions: impl IntoIterator<Item = Action>,
    current_tab: TabId,
) -> GlobalState {
    actions
        .into_iter()
        .fold(state, |state, action| update(state, action, current_tab))
}

/// Render a state as JSON text.
pub fn to_json(state: &GlobalState, pretty: bool) -> Result<String, ReplayError> {
    let json = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    Ok(json)
}

/// Atomically write a state snapshot to `path`.
pub fn save_state(path: &Path, state: &GlobalState, pretty: bool) -> Result<(), ReplayError> {
    atomic_write(path, &to_json(state, pretty)?)?;
    info!("Saved state to {}", path.display());
    Ok(())
}

fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
