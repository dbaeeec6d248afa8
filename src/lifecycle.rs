// lifecycle.rs - Shared run/pause/stop control flag

use std::sync::Mutex;

/// The game state. The simulation loop switches its behavior on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Paused,
    Stopped,
}

/// Control flag shared between the UI thread and the simulation thread.
///
/// The shell writes it on lifecycle transitions; the loop reads it once
/// per iteration, so a change takes effect within one tick or poll
/// interval. `Stopped` ends the loop for good - a new session is needed to
/// run again.
pub struct Lifecycle {
    state: Mutex<State>,
}

impl Lifecycle {
    pub fn new(initial: State) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    pub fn set(&self, state: State) {
        log::debug!("setting game state to {:?}", state);
        *self.state.lock().unwrap() = state;
    }

    pub fn get(&self) -> State {
        *self.state.lock().unwrap()
    }
}
