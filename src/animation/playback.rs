use crate::foundation::error::{FlightpathError, FlightpathResult};
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Upper bound of the animation time axis (percent).
pub const TIME_MAX: f64 = 100.0;

/// Playback rate multiplier, from the fixed speed menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaybackSpeed {
    /// 0.25x
    Quarter,
    /// 0.5x
    Half,
    /// 1x
    #[default]
    Normal,
    /// 2x
    Double,
}

impl PlaybackSpeed {
    /// Every selectable speed, slowest first.
    pub const ALL: [Self; 4] = [Self::Quarter, Self::Half, Self::Normal, Self::Double];

    /// Multiplier value.
    pub fn factor(self) -> f64 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::Normal => 1.0,
            Self::Double => 2.0,
        }
    }
}

impl TryFrom<f64> for PlaybackSpeed {
    type Error = FlightpathError;

    fn try_from(v: f64) -> FlightpathResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.factor() == v)
            .ok_or_else(|| {
                FlightpathError::validation(format!(
                    "playback speed must be one of 0.25, 0.5, 1, 2; got {v}"
                ))
            })
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// Tick cadence for playback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOpts {
    /// Interval between ticks.
    pub tick: Duration,
    /// Time advanced per tick at 1x.
    pub step_per_speed: f64,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(16),
            step_per_speed: 0.5,
        }
    }
}

/// Deterministic playback state: current time, play flag and speed.
///
/// Time is kept in `[0, TIME_MAX]`. Reaching `TIME_MAX` while playing stops playback.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    time: f64,
    playing: bool,
    speed: PlaybackSpeed,
    step_per_speed: f64,
}

impl Playback {
    /// Paused at time `0`.
    pub fn new(speed: PlaybackSpeed, opts: &PlaybackOpts) -> Self {
        Self {
            time: 0.0,
            playing: false,
            speed,
            step_per_speed: opts.step_per_speed,
        }
    }

    /// Current time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current speed.
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Change speed without touching time or play state.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    /// Start playing.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop playing; time is kept.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flip the play flag and return the new value. Nothing else changes.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Jump to `time`, clamped to `[0, TIME_MAX]`.
    pub fn seek(&mut self, time: f64) {
        self.time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, TIME_MAX)
        };
    }

    /// Step by `delta` (timeline wheel), clamped.
    pub fn nudge(&mut self, delta: f64) {
        self.seek(self.time + delta);
    }

    /// Jump to the start.
    pub fn rewind(&mut self) {
        self.seek(0.0);
    }

    /// Jump to the end.
    pub fn jump_to_end(&mut self) {
        self.seek(TIME_MAX);
    }

    /// Advance one tick. Returns `false` (and does nothing) while paused.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.time = (self.time + self.speed.factor() * self.step_per_speed).min(TIME_MAX);
        if self.time >= TIME_MAX {
            self.playing = false;
        }
        true
    }

    /// Run up to `ticks` ticks, stopping early on auto-stop. Returns ticks applied.
    pub fn advance(&mut self, ticks: usize) -> usize {
        (0..ticks).take_while(|_| self.tick()).count()
    }
}

/// Returned from a [`Ticker`] callback to keep going or finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    /// Schedule the next tick.
    Continue,
    /// End the ticker thread after this tick.
    Stop,
}

/// Fixed-rate scheduled task running on its own thread.
///
/// The handle owns the only way to stop the task. [`Ticker::cancel`] (and `Drop`) signal the thread
/// and join it, so once it returns no callback is running and none will run again.
pub struct Ticker {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker calling `on_tick` every `interval`, first after one interval.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> FlightpathResult<Self>
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name("flightpath-ticker".to_owned())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            if on_tick() == TickControl::Stop {
                                break;
                            }
                            deadline += interval;
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|e| anyhow::Error::new(e).context("spawn ticker thread"))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// `true` once the thread has exited (cancelled or stopped by its callback).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Stop the task and wait for it to exit.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.join();
    }

    /// Wait for the task to end on its own (its callback returning [`TickControl::Stop`]).
    pub fn wait(&mut self) {
        self.join();
        self.stop_tx = None;
    }

    fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        // A callback that drops its own ticker must not join itself.
        if handle.thread().id() == std::thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            tracing::warn!("ticker callback panicked");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Real-time playback: drives a shared [`Playback`] from a single [`Ticker`].
///
/// Starting cancels any previous ticker first; the ticker ends itself on auto-stop.
#[derive(Debug)]
pub struct PlaybackDriver {
    state: Arc<Mutex<Playback>>,
    opts: PlaybackOpts,
    ticker: Option<Ticker>,
}

impl PlaybackDriver {
    /// Wrap `playback` with the given tick cadence.
    pub fn new(playback: Playback, opts: PlaybackOpts) -> Self {
        Self {
            state: Arc::new(Mutex::new(playback)),
            opts,
            ticker: None,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Playback {
        lock(&self.state).clone()
    }

    /// Mutate the state in place (seek, speed changes).
    pub fn with_state<R>(&self, f: impl FnOnce(&mut Playback) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// `true` while a ticker is alive.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start playing; `on_frame` sees the time after every tick.
    pub fn start<F>(&mut self, mut on_frame: F) -> FlightpathResult<()>
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.cancel_ticker();
        lock(&self.state).play();

        let state = Arc::clone(&self.state);
        let ticker = Ticker::spawn(self.opts.tick, move || {
            let (time, playing) = {
                let mut p = lock(&state);
                p.tick();
                (p.time(), p.is_playing())
            };
            on_frame(time);
            if playing {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        })?;
        self.ticker = Some(ticker);
        tracing::debug!(speed = %self.snapshot().speed(), "playback started");
        Ok(())
    }

    /// Pause and cancel the ticker.
    pub fn stop(&mut self) {
        self.cancel_ticker();
        lock(&self.state).pause();
        tracing::debug!(time = self.snapshot().time(), "playback stopped");
    }

    /// Play/pause toggle. Returns `true` if now playing.
    pub fn toggle<F>(&mut self, on_frame: F) -> FlightpathResult<bool>
    where
        F: FnMut(f64) + Send + 'static,
    {
        if self.is_running() {
            self.stop();
            return Ok(false);
        }
        self.start(on_frame)?;
        Ok(true)
    }

    /// Block until playback stops by itself.
    pub fn wait(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.wait();
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

fn lock(state: &Mutex<Playback>) -> MutexGuard<'_, Playback> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
