#![forbid(unsafe_code)]

//! Cursor configuration.
//!
//! Everything here is plain data with `serde` derives so hosts can load it
//! from their settings files. Missing fields take their defaults.

use std::fmt;

use navkit_core::Direction;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_MAX_HISTORY;

/// Names of the host input actions the driver reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub up: String,
    pub right: String,
    pub down: String,
    pub left: String,
    pub confirm: String,
    pub cancel: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: "w".into(),
            right: "d".into(),
            down: "s".into(),
            left: "a".into(),
            confirm: "space".into(),
            cancel: "backspace".into(),
        }
    }
}

impl Keymap {
    /// Action bound to a direction.
    #[must_use]
    pub fn direction(&self, dir: Direction) -> &str {
        match dir {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }

    /// `(slot, action)` pairs in a fixed order.
    #[must_use]
    pub fn bindings(&self) -> [(&'static str, &str); 6] {
        [
            ("up", self.up.as_str()),
            ("right", self.right.as_str()),
            ("down", self.down.as_str()),
            ("left", self.left.as_str()),
            ("confirm", self.confirm.as_str()),
            ("cancel", self.cancel.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub keymap: Keymap,
    /// Seconds for the indicator to catch up with the focused element.
    /// `0` snaps.
    pub smoothing_time: f32,
    pub pointer_enabled: bool,
    /// History frames kept for back-navigation.
    pub max_history: usize,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            smoothing_time: 0.1,
            pointer_enabled: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl CursorConfig {
    #[must_use]
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    #[must_use]
    pub fn with_smoothing_time(mut self, seconds: f32) -> Self {
        self.smoothing_time = seconds;
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, enabled: bool) -> Self {
        self.pointer_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_max_history(mut self, depth: usize) -> Self {
        self.max_history = depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.smoothing_time.is_finite() || self.smoothing_time < 0.0 {
            return Err(ConfigError::InvalidSmoothingTime(self.smoothing_time));
        }
        if self.max_history == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        let mut seen: FxHashMap<&str, &'static str> = FxHashMap::default();
        for (slot, action) in self.keymap.bindings() {
            if action.is_empty() {
                return Err(ConfigError::EmptyBinding(slot));
            }
            if let Some(first) = seen.insert(action, slot) {
                return Err(ConfigError::DuplicateBinding {
                    action: action.to_string(),
                    first,
                    second: slot,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Negative, NaN, or infinite smoothing time.
    InvalidSmoothingTime(f32),
    ZeroHistory,
    EmptyBinding(&'static str),
    /// One action name bound to two slots.
    DuplicateBinding {
        action: String,
        first: &'static str,
        second: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSmoothingTime(t) => {
                write!(f, "smoothing_time must be a finite value >= 0 (got {t})")
            }
            Self::ZeroHistory => write!(f, "max_history must be at least 1"),
            Self::EmptyBinding(slot) => write!(f, "keymap slot '{slot}' has no action"),
            Self::DuplicateBinding {
                action,
                first,
                second,
            } => write!(
                f,
                "action '{action}' is bound to both '{first}' and '{second}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
