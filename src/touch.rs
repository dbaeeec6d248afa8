// touch.rs - Thread-safe double buffer for pointer input

use std::collections::HashSet;
use std::mem;
use std::sync::Mutex;

use crate::grid::Cell;

/// How many screen pixels one grid cell covers.
pub const DEFAULT_SCALE: f32 = 20.0;

/// Maps continuous pixel coordinates to the cell they land on,
/// round-to-nearest by the configured scale.
pub fn quantize(scale: f32, x: f32, y: f32) -> Cell {
    ((x / scale).round() as i32, (y / scale).round() as i32)
}

/// Buffers screen touches between the UI thread and the simulation thread.
///
/// Cells painted while the finger is down collect in `live`. Releasing the
/// finger commits them: `ready` is replaced wholesale with the live set and
/// `live` starts over. The simulation drains `ready` on its next tick, and
/// draining clears it, so a committed cell is delivered at most once. A
/// second commit before a drain overwrites the pending set - newest input
/// wins.
///
/// A single lock guards both sets, which makes each operation atomic and
/// keeps a commit from racing a concurrent record.
pub struct TouchBuffer {
    scale: f32,
    inner: Mutex<Buffers>,
}

struct Buffers {
    /// Cells painted since the last release, still under the finger.
    live: HashSet<Cell>,
    /// Committed cells waiting for the next tick.
    ready: HashSet<Cell>,
}

impl TouchBuffer {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            inner: Mutex::new(Buffers {
                live: HashSet::new(),
                ready: HashSet::new(),
            }),
        }
    }

    /// Quantizes raw pixel coordinates to a cell and adds it to the live
    /// set. Touches landing on an already-recorded cell are absorbed.
    pub fn record(&self, x: f32, y: f32) {
        let cell = quantize(self.scale, x, y);
        self.inner.lock().unwrap().live.insert(cell);
    }

    /// Adds pre-quantized cells to the live set. Used for stamping
    /// patterns through the same pipeline as finger input.
    pub fn record_cells(&self, cells: impl IntoIterator<Item = Cell>) {
        let mut buffers = self.inner.lock().unwrap();
        for cell in cells {
            buffers.live.insert(cell);
        }
    }

    /// The finger-released transition: promotes the live set to `ready`
    /// and clears `live` in one critical section. Whatever was pending in
    /// `ready` and never drained is dropped.
    pub fn commit(&self) {
        let mut buffers = self.inner.lock().unwrap();
        buffers.ready = mem::take(&mut buffers.live);
    }

    /// Snapshot of the live set for preview rendering.
    pub fn peek_live(&self) -> Vec<Cell> {
        self.inner.lock().unwrap().live.iter().copied().collect()
    }

    /// Takes the committed cells, leaving `ready` empty. Calling again
    /// before the next commit returns an empty set.
    pub fn drain_ready(&self) -> HashSet<Cell> {
        mem::take(&mut self.inner.lock().unwrap().ready)
    }
}
