use std::time::Duration;

use crate::error::PresetError;

/// A named countdown length offered in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub length: Duration,
}

impl Preset {
    pub const fn new(label: &'static str, length: Duration) -> Self {
        Self { label, length }
    }
}

pub const DEFAULT_PRESETS: [Preset; 3] = [
    Preset::new("30 Min ⌛", Duration::from_secs(1800)),
    Preset::new("45 Min ⌛", Duration::from_secs(2700)),
    Preset::new("1 Hr ⌛", Duration::from_secs(3600)),
];

/// Menu cursor over a borrowed, fixed list of presets.
///
/// The cursor wraps at both ends and is always a valid index.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    presets: &'a [Preset],
    cursor: usize,
}

impl<'a> Selection<'a> {
    pub fn new(presets: &'a [Preset]) -> Result<Self, PresetError> {
        if presets.is_empty() {
            return Err(PresetError::Empty);
        }
        if let Some(p) = presets.iter().find(|p| p.length.is_zero()) {
            return Err(PresetError::ZeroLength(p.label.to_string()));
        }

        Ok(Self { presets, cursor: 0 })
    }

    pub fn move_next(&mut self) {
        self.cursor = (self.cursor + 1) % self.presets.len();
    }

    pub fn move_prev(&mut self) {
        self.cursor = match self.cursor {
            0 => self.presets.len() - 1,
            n => n - 1,
        };
    }

    pub fn current(&self) -> &'a Preset {
        &self.presets[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn presets(&self) -> &'a [Preset] {
        self.presets
    }
}
