use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::{debug, warn};

use crate::{
    keys::{Command, KeyRouter},
    session::{Event, Session},
};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Key(KeyEvent),
    Resize,
    /// Time elapsed since the previous tick
    Tick(Duration),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait HostEventSource: Send + 'static {
    /// Block until the next event arrives.
    fn recv(&self) -> Result<HostEvent, RecvError>;

    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<HostEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(HostEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(HostEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "terminal input stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEventSource for CrosstermEventSource {
    fn recv(&self) -> Result<HostEvent, RecvError> {
        self.rx.recv()
    }

    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<HostEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<HostEvent>) -> Self {
        Self { rx }
    }
}

impl HostEventSource for TestEventSource {
    fn recv(&self) -> Result<HostEvent, RecvError> {
        self.rx.recv()
    }

    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that serializes host input and clock ticks into one stream
pub struct Runner<E: HostEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Option<Instant>,
}

impl<E: HostEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: None,
        }
    }

    /// Returns the next event, or `None` once the event source is gone.
    ///
    /// With `ticking` off this blocks on input alone and the clock is
    /// dropped, so time spent idle is never reported. With `ticking` on it
    /// waits at most until the next tick deadline and reports a `Tick`
    /// carrying the real time elapsed since the previous one.
    pub fn step(&mut self, ticking: bool) -> Option<HostEvent> {
        if !ticking {
            self.last_tick = None;
            return self.event_source.recv().ok();
        }

        let last = *self.last_tick.get_or_insert_with(Instant::now);
        let deadline = last + self.ticker.interval();
        let wait = deadline.saturating_duration_since(Instant::now());

        if !wait.is_zero() {
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return Some(ev),
                Err(RecvTimeoutError::Disconnected) => return None,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        let now = Instant::now();
        self.last_tick = Some(now);
        Some(HostEvent::Tick(now.duration_since(last)))
    }

    /// Settles time that has passed since the last tick without waiting for
    /// the next deadline. Returns `None` while the clock is not running.
    fn flush_tick(&mut self) -> Option<Duration> {
        let last = self.last_tick?;
        let now = Instant::now();
        self.last_tick = Some(now);
        Some(now.duration_since(last))
    }

    /// Applies one host event to `session`. Returns true when a new frame is due.
    ///
    /// Stop and reset first charge the running countdown with the time since
    /// the last tick, and a fresh countdown starts its own tick baseline, so
    /// elapsed time is never dropped or charged to the wrong countdown.
    pub fn dispatch(
        &mut self,
        session: &mut Session<'_>,
        router: &KeyRouter,
        host_event: HostEvent,
    ) -> bool {
        match host_event {
            HostEvent::Key(key) => {
                let Some(command) = router.route(&key) else {
                    return false;
                };

                let mut redraw = false;
                if matches!(command, Command::ToggleRun | Command::Reset) && session.wants_ticks() {
                    if let Some(elapsed) = self.flush_tick() {
                        redraw = session.handle(Event::Tick(elapsed));
                    }
                }

                let changed = session.handle(Event::Command(command));
                if changed && matches!(command, Command::Confirm | Command::Reset) {
                    self.last_tick = None;
                }
                redraw || changed
            }
            HostEvent::Tick(elapsed) => session.handle(Event::Tick(elapsed)),
            HostEvent::Resize => true,
        }
    }

    /// Runs `session` until it quits: one event at a time, each applied in
    /// full before the next is read. `on_frame` is called for the first
    /// frame and after every event that changed what is visible. The move
    /// into `Quitting` draws nothing since the terminal is torn down next.
    pub fn drive<F, FrameErr>(
        &mut self,
        session: &mut Session<'_>,
        router: &KeyRouter,
        mut on_frame: F,
    ) -> Result<(), FrameErr>
    where
        F: FnMut(&Session<'_>) -> Result<(), FrameErr>,
    {
        on_frame(session)?;

        while !session.is_quitting() {
            let Some(host_event) = self.step(session.wants_ticks()) else {
                debug!("event source closed");
                session.handle(Event::Command(Command::Quit));
                break;
            };

            if self.dispatch(session, router, host_event) && !session.is_quitting() {
                on_frame(session)?;
            }
        }

        Ok(())
    }
}
