use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Layout-independent commands understood by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Quit,
    Confirm,
    Up,
    Down,
    ToggleRun,
    Reset,
}

/// One raw key (plus required modifiers) bound to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub command: Command,
}

impl Binding {
    pub const fn new(code: KeyCode, command: Command) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            command,
        }
    }

    pub const fn with_modifiers(code: KeyCode, modifiers: KeyModifiers, command: Command) -> Self {
        Self {
            code,
            modifiers,
            command,
        }
    }
}

pub const DEFAULT_BINDINGS: &[Binding] = &[
    Binding::new(KeyCode::Char('q'), Command::Quit),
    Binding::new(KeyCode::Esc, Command::Quit),
    Binding::with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL, Command::Quit),
    Binding::new(KeyCode::Enter, Command::Confirm),
    Binding::new(KeyCode::Up, Command::Up),
    Binding::new(KeyCode::Char('k'), Command::Up),
    Binding::new(KeyCode::Down, Command::Down),
    Binding::new(KeyCode::Char('j'), Command::Down),
    Binding::new(KeyCode::Char('s'), Command::ToggleRun),
    Binding::new(KeyCode::Char('r'), Command::Reset),
];

/// Stateless lookup from key events to commands
#[derive(Debug, Clone, Copy)]
pub struct KeyRouter {
    bindings: &'static [Binding],
}

impl KeyRouter {
    pub fn new(bindings: &'static [Binding]) -> Self {
        Self { bindings }
    }

    /// Unbound keys and non-press events map to `None`.
    pub fn route(&self, key: &KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // shift is implied by the character itself, so it never blocks a match
        let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);

        self.bindings
            .iter()
            .find(|b| b.code == key.code && b.modifiers == modifiers)
            .map(|b| b.command)
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new(DEFAULT_BINDINGS)
    }
}
