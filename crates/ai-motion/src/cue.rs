use std::cell::Cell;
use std::rc::Rc;

use ai_core::Vec3;

/// Where and which way a launched effect leaves the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Invoked by the rig at its fire moment. Rigs call it once per cue.
pub type FireCallback = Box<dyn FnMut(&SpawnPoint)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueState {
    Playing,
    Fired,
    Finished,
}

/// Caller-side view of a cue the rig is playing.
///
/// Dropping the handle does not stop the cue.
#[derive(Debug, Clone)]
pub struct CueHandle {
    id: u64,
    state: Rc<Cell<CueState>>,
}

impl CueHandle {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: Rc::new(Cell::new(CueState::Playing)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> CueState {
        self.state.get()
    }

    pub fn has_fired(&self) -> bool {
        matches!(self.state(), CueState::Fired | CueState::Finished)
    }

    pub fn is_finished(&self) -> bool {
        self.state() == CueState::Finished
    }

    pub fn mark(&self, state: CueState) {
        self.state.set(state);
    }
}
