use std::time::Duration;

use tracing::{debug, info};

use crate::{
    countdown::Countdown,
    error::PresetError,
    keys::Command,
    selection::{Preset, Selection},
    view::{self, Controls, Frame},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Selecting,
    Running,
    Finished,
    Quitting,
}

/// Everything the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Tick(Duration),
    Expired,
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

/// Top-level state machine: owns the phase, the menu and the active countdown
#[derive(Debug, Clone)]
pub struct Session<'a> {
    phase: Phase,
    selection: Selection<'a>,
    active: Option<(&'a Preset, Countdown)>,
}

impl<'a> Session<'a> {
    pub fn new(presets: &'a [Preset]) -> Result<Self, PresetError> {
        Ok(Self {
            phase: Phase::Selecting,
            selection: Selection::new(presets)?,
            active: None,
        })
    }

    /// Applies one event. Returns true when the visible state changed and a
    /// new frame should be drawn.
    pub fn handle(&mut self, event: Event) -> bool {
        match (self.phase, event) {
            (Phase::Quitting, _) => false,

            (_, Event::Command(Command::Quit)) => {
                self.enter(Phase::Quitting);
                true
            }

            (Phase::Selecting, Event::Command(Command::Up)) => {
                self.selection.move_prev();
                true
            }
            (Phase::Selecting, Event::Command(Command::Down)) => {
                self.selection.move_next();
                true
            }
            (Phase::Selecting, Event::Command(Command::Confirm)) => {
                let preset = self.selection.current();
                info!(preset = preset.label, length = ?preset.length, "countdown started");
                self.active = Some((preset, Countdown::start(preset.length)));
                self.enter(Phase::Running);
                true
            }

            (Phase::Running, Event::Tick(elapsed)) => {
                let Some((_, countdown)) = self.active.as_mut() else {
                    return false;
                };
                if !countdown.is_running() {
                    return false;
                }
                if countdown.tick(elapsed).is_some() {
                    self.handle(Event::Expired);
                }
                true
            }
            (Phase::Running, Event::Expired) => {
                if !self.countdown().is_some_and(Countdown::is_expired) {
                    return false;
                }
                info!("countdown expired");
                self.enter(Phase::Finished);
                true
            }
            (Phase::Running, Event::Command(Command::ToggleRun)) => {
                match self.active.as_mut() {
                    Some((_, countdown)) => {
                        countdown.toggle();
                        debug!(running = countdown.is_running(), "countdown toggled");
                        true
                    }
                    None => false,
                }
            }
            (Phase::Running, Event::Command(Command::Reset)) => {
                match self.active.as_mut() {
                    Some((_, countdown)) => {
                        *countdown = countdown.restarted();
                        debug!("countdown reset");
                        true
                    }
                    None => false,
                }
            }

            _ => false,
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_quitting(&self) -> bool {
        self.phase == Phase::Quitting
    }

    /// The clock only needs to run while a countdown is actively counting.
    pub fn wants_ticks(&self) -> bool {
        self.phase == Phase::Running && self.countdown().is_some_and(Countdown::is_running)
    }

    pub fn selection(&self) -> &Selection<'a> {
        &self.selection
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.active.as_ref().map(|(_, countdown)| countdown)
    }

    /// The preset confirmed by the user, once a countdown has been started
    pub fn chosen(&self) -> Option<&'a Preset> {
        self.active.as_ref().map(|(preset, _)| *preset)
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(
            self.phase,
            self.countdown().is_some_and(Countdown::is_running),
        )
    }

    pub fn render(&self) -> Frame {
        view::render(
            self.phase,
            &self.selection,
            self.active.as_ref().map(|(preset, countdown)| (*preset, countdown)),
            self.controls(),
        )
    }
}
