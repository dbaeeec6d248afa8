// driver.rs - Fixed-rate simulation loop and the session handle

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::grid::{Cell, Grid};
use crate::lifecycle::{Lifecycle, State};
use crate::touch::TouchBuffer;

/// Tuning knobs for the loop. Nothing here is persisted.
#[derive(Clone, Copy, Debug)]
pub struct DriverConfig {
    /// Our desired frame duration. Ticks that finish early sleep the
    /// remainder; slow ticks are never skipped.
    pub min_tick: Duration,
    /// How long to sleep between lifecycle checks while paused.
    pub pause_poll: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_tick: Duration::from_millis(200),
            pause_poll: Duration::from_millis(100),
        }
    }
}

/// Everything the shell needs to repaint after a tick: the new generation,
/// the still-uncommitted touches for preview, and a generation counter.
/// The pair is taken inside one tick, so it is internally consistent.
pub struct TickReport {
    pub alive: Vec<Cell>,
    pub preview: Vec<Cell>,
    pub generation: u32,
}

/// Called once per completed tick, on the simulation thread.
pub type TickSink = Box<dyn FnMut(TickReport) + Send>;

/// The main task of the game. Controls the pulse.
struct Driver {
    touch: Arc<TouchBuffer>,
    lifecycle: Arc<Lifecycle>,
    config: DriverConfig,
    grid: Grid,
    generation: u32,
    /// Time when the last update finished. Used to cap the frame rate.
    last_update: Option<Instant>,
    sink: TickSink,
}

impl Driver {
    /// The main loop. Runs until the lifecycle flag turns `Stopped`.
    fn run(&mut self) {
        log::debug!("starting game loop");
        loop {
            match self.lifecycle.get() {
                State::Stopped => break,
                // While paused, nothing is computed and no input is
                // consumed. Just wait for the state to change.
                State::Paused => thread::sleep(self.config.pause_poll),
                State::Running => self.update(),
            }
        }
        log::debug!("stopping game loop");
    }

    /// One running iteration: tick, then cap the frame rate.
    ///
    /// A panic inside the tick is caught and logged and the loop moves
    /// on. The alive set is only replaced at the end of a successful
    /// step, so a failed tick leaves the previous generation in place.
    fn update(&mut self) {
        if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(|| self.tick())) {
            log::error!(
                "unexpected panic in main loop: {}",
                describe_panic(cause.as_ref())
            );
        }
        self.limit_fps();
    }

    /// One tick: promote committed input, advance the automaton, report.
    fn tick(&mut self) {
        let ready = self.touch.drain_ready();
        self.grid.merge(ready);
        self.grid.step();
        self.generation += 1;

        (self.sink)(TickReport {
            alive: self.grid.snapshot(),
            preview: self.touch.peek_live(),
            generation: self.generation,
        });
    }

    /// Sleeps away whatever is left of `min_tick` since the previous
    /// update finished. Keeps the game from racing on fast machines
    /// without dropping ticks on slow ones.
    fn limit_fps(&mut self) {
        if let Some(last) = self.last_update {
            let elapsed = last.elapsed();
            if elapsed < self.config.min_tick {
                thread::sleep(self.config.min_tick - elapsed);
            }
        }
        self.last_update = Some(Instant::now());
    }
}

fn describe_panic(cause: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = cause.downcast_ref::<&str>() {
        message
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

/// A live simulation session.
///
/// Owns the shared touch buffer, the lifecycle flag and the simulation
/// thread. The shell holds one of these, feeds it raw pointer coordinates
/// and lifecycle transitions, and gets tick reports through the sink it
/// provided at start. Dropping the handle stops the session.
pub struct GameCore {
    touch: Arc<TouchBuffer>,
    lifecycle: Arc<Lifecycle>,
    handle: Option<JoinHandle<()>>,
}

impl GameCore {
    /// Spawns the simulation thread, already running.
    pub fn start(scale: f32, config: DriverConfig, sink: TickSink) -> Self {
        Self::start_in(State::Running, scale, config, sink)
    }

    fn start_in(initial: State, scale: f32, config: DriverConfig, sink: TickSink) -> Self {
        let touch = Arc::new(TouchBuffer::new(scale));
        let lifecycle = Arc::new(Lifecycle::new(initial));

        let mut driver = Driver {
            touch: Arc::clone(&touch),
            lifecycle: Arc::clone(&lifecycle),
            config,
            grid: Grid::new(),
            generation: 0,
            last_update: None,
            sink,
        };
        let handle = thread::spawn(move || driver.run());

        Self {
            touch,
            lifecycle,
            handle: Some(handle),
        }
    }

    /// Raw pointer coordinates from the shell, in pixels. Quantization
    /// happens in the buffer.
    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.touch.record(x, y);
    }

    /// Finger released: commit the stroke for the next tick.
    pub fn pointer_released(&self) {
        self.touch.commit();
    }

    /// Injects pre-quantized cells as if they had been painted and
    /// released. Used by the pattern picker.
    pub fn stamp(&self, cells: impl IntoIterator<Item = Cell>) {
        self.touch.record_cells(cells);
        self.touch.commit();
    }

    pub fn set_state(&self, state: State) {
        self.lifecycle.set(state);
    }

    pub fn state(&self) -> State {
        self.lifecycle.get()
    }

    /// Current uncommitted touches, for per-frame preview painting.
    pub fn preview(&self) -> Vec<Cell> {
        self.touch.peek_live()
    }

    /// Stops the session and waits for the simulation thread to exit.
    /// Takes at most one tick or poll interval.
    pub fn stop(&mut self) {
        self.lifecycle.set(State::Stopped);
        if let Some(handle) = self.handle.take() {
            if let Err(cause) = handle.join() {
                log::warn!(
                    "simulation thread panicked: {}",
                    describe_panic(cause.as_ref())
                );
            }
        }
    }
}

impl Drop for GameCore {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn fast_config() -> DriverConfig {
        DriverConfig {
            min_tick: Duration::from_millis(5),
            pause_poll: Duration::from_millis(5),
        }
    }

    fn channel_sink() -> (TickSink, mpsc::Receiver<TickReport>) {
        let (tx, rx) = mpsc::channel();
        let sink: TickSink = Box::new(move |report: TickReport| {
            let _ = tx.send(report);
        });
        (sink, rx)
    }

    #[test]
    fn ticks_flow_while_running() {
        let (sink, rx) = channel_sink();
        let _core = GameCore::start(20.0, fast_config(), sink);

        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(second.generation > first.generation);
    }

    #[test]
    fn committed_touches_reach_the_grid() {
        let (sink, rx) = channel_sink();
        let core = GameCore::start(20.0, fast_config(), sink);

        // A blinker oscillates forever at population 3.
        core.stamp([(1, 0), (1, 1), (1, 2)]);

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut population = 0;
        while Instant::now() < deadline {
            let report = rx.recv_timeout(Duration::from_secs(1)).unwrap();
            population = report.alive.len();
            if population == 3 {
                break;
            }
        }
        assert_eq!(population, 3);
    }

    #[test]
    fn stopping_ends_the_loop() {
        let (sink, rx) = channel_sink();
        let mut core = GameCore::start(20.0, fast_config(), sink);

        // Let it tick at least once, then stop and join.
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
        core.stop();

        // Anything already in flight drains out; after that the channel
        // stays silent because the thread is gone.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn paused_loop_consumes_no_input() {
        let (sink, rx) = channel_sink();
        let core = GameCore::start_in(State::Paused, 20.0, fast_config(), sink);

        core.pointer_moved(30.0, 30.0);
        core.pointer_released();
        thread::sleep(Duration::from_millis(50));

        // No tick fired and the committed batch is still waiting.
        assert!(rx.try_recv().is_err());
        assert_eq!(core.touch.drain_ready().len(), 1);
    }

    #[test]
    fn resume_after_pause_picks_up_pending_input() {
        let (sink, rx) = channel_sink();
        let core = GameCore::start_in(State::Paused, 20.0, fast_config(), sink);

        // A block is a still life; once merged it stays at population 4.
        core.stamp([(0, 0), (0, 1), (1, 0), (1, 1)]);
        core.set_state(State::Running);

        let report = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(report.alive.len(), 4);
    }

    #[test]
    fn panicking_sink_does_not_kill_the_loop() {
        let (tx, rx) = mpsc::channel();
        let mut calls = 0u32;
        let sink: TickSink = Box::new(move |report: TickReport| {
            calls += 1;
            if calls == 1 {
                panic!("sink failure on first tick");
            }
            let _ = tx.send(report.generation);
        });

        let _core = GameCore::start(20.0, fast_config(), sink);

        // The first tick panics inside the sink; later ticks still arrive.
        let generation = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(generation >= 2);
    }
}
