//! Text rendering of the session.
//!
//! [`render`] is a pure function of its inputs: the same state always yields
//! a byte-identical [`Frame`], so frames can be compared directly in tests.

use std::fmt;

use itertools::Itertools;

use crate::{
    countdown::{format_remaining, Countdown},
    selection::{Preset, Selection},
    session::Phase,
};

pub const TITLE: &str = "🍅 Pomodoro 🍅";
pub const SELECT_HEADING: &str = "Select Timer ⏰ :";
pub const SELECT_HINT: &str = "↑/↓ move • enter confirm";
pub const COMPLETE_MESSAGE: &str = "All done!";
pub const STOPPED_MARKER: &str = "(stopped)";

pub const CURSOR_MARK: &str = "->>";
const UNSELECTED_MARK: &str = "( )";

/// Which timer controls the help line advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
    pub quit: bool,
}

impl Controls {
    pub fn for_running(running: bool) -> Self {
        Self {
            start: !running,
            stop: running,
            reset: true,
            quit: true,
        }
    }

    /// Controls that actually do something in `phase`. Only a live countdown
    /// accepts start/stop and reset; quit works everywhere but `Quitting`.
    pub fn for_phase(phase: Phase, running: bool) -> Self {
        match phase {
            Phase::Running => Self::for_running(running),
            Phase::Selecting | Phase::Finished => Self {
                start: false,
                stop: false,
                reset: false,
                quit: true,
            },
            Phase::Quitting => Self {
                start: false,
                stop: false,
                reset: false,
                quit: false,
            },
        }
    }

    fn help_line(&self) -> String {
        [
            (self.start, "s start"),
            (self.stop, "s stop"),
            (self.reset, "r reset"),
            (self.quit, "q quit"),
        ]
        .into_iter()
        .filter_map(|(enabled, text)| enabled.then_some(text))
        .join(" • ")
    }
}

/// One rendered snapshot of the interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(String);

impl Frame {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn render(
    phase: Phase,
    selection: &Selection<'_>,
    active: Option<(&Preset, &Countdown)>,
    controls: Controls,
) -> Frame {
    let mut lines: Vec<String> = vec![TITLE.to_string(), String::new()];

    match (phase, active) {
        (Phase::Running | Phase::Finished, Some((preset, cd))) => {
            lines.push(preset.label.to_string());
            lines.push(String::new());
            if cd.is_expired() {
                lines.push(COMPLETE_MESSAGE.to_string());
            } else if cd.is_running() {
                lines.push(format_remaining(cd.remaining()));
            } else {
                lines.push(format!("{} {}", format_remaining(cd.remaining()), STOPPED_MARKER));
            }
        }
        _ => {
            lines.push(SELECT_HEADING.to_string());
            lines.push(String::new());
            for (idx, preset) in selection.presets().iter().enumerate() {
                let mark = if idx == selection.cursor() {
                    CURSOR_MARK
                } else {
                    UNSELECTED_MARK
                };
                lines.push(format!("{} {}", mark, preset.label));
            }
            lines.push(String::new());
            lines.push(SELECT_HINT.to_string());
        }
    }

    lines.push(String::new());
    lines.push(controls.help_line());

    Frame(lines.join("\n"))
}
