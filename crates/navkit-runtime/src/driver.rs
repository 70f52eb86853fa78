#![forbid(unsafe_code)]

//! Per-frame input driver.
//!
//! The host fills a [`TickInput`] with the action names pressed this frame
//! and an optional pointer snapshot, then calls [`CursorDriver::tick`]. One
//! tick runs, in order:
//!
//! 1. the first pressed direction (Up, Right, Down, Left) moves the cursor;
//! 2. the indicator is smoothed toward the focused element's focus point;
//! 3. confirm, then cancel;
//! 4. pointer clicks (primary confirms, secondary cancels), then, if the
//!    pointer moved since the last tick, hover selection in the current
//!    group.

use navkit_core::{Direction, SmoothedPosition, Vec2};
use navkit_graph::{GroupId, NavScene};
use rustc_hash::FxHashSet;
use tracing::{debug, error, trace};

use crate::config::CursorConfig;
use crate::cursor::{Cursor, CursorEvent};
use crate::history::NavHistory;

/// Pointer snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// World-space position.
    pub position: Vec2,
    /// Primary button went down this frame.
    pub primary_pressed: bool,
    /// Secondary button went down this frame.
    pub secondary_pressed: bool,
}

impl PointerState {
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_primary(mut self) -> Self {
        self.primary_pressed = true;
        self
    }

    #[must_use]
    pub fn with_secondary(mut self) -> Self {
        self.secondary_pressed = true;
        self
    }
}

/// Input gathered by the host for one frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    actions: FxHashSet<String>,
    pub pointer: Option<PointerState>,
}

impl TickInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: mark `action` as pressed.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.press(action);
        self
    }

    /// Builder: attach a pointer snapshot.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerState) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn press(&mut self, action: impl Into<String>) {
        self.actions.insert(action.into());
    }

    #[must_use]
    pub fn is_pressed(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Reset for the next frame.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.pointer = None;
    }
}

/// Owns a [`Cursor`] and feeds it host input every frame.
#[derive(Debug)]
pub struct CursorDriver {
    cursor: Cursor,
    config: CursorConfig,
    indicator: SmoothedPosition,
    last_pointer: Option<Vec2>,
}

impl CursorDriver {
    /// Wrap an existing cursor. The indicator starts on its focus point.
    #[must_use]
    pub fn new(scene: &NavScene, cursor: Cursor, config: CursorConfig) -> Self {
        let start = cursor
            .current_element()
            .and_then(|e| scene.focus_point(e))
            .unwrap_or(Vec2::ZERO);
        Self {
            cursor,
            config,
            indicator: SmoothedPosition::new(start),
            last_pointer: None,
        }
    }

    /// Start a cursor on `first_group`. An invalid config is logged and
    /// replaced by [`CursorConfig::default`]. Start-up errors are logged and
    /// leave the driver holding an idle cursor.
    pub fn start(scene: &mut NavScene, first_group: Option<GroupId>, config: CursorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                error!(%err, "cursor config is invalid, using defaults");
                CursorConfig::default()
            }
        };
        let history = NavHistory::new(config.max_history);
        let cursor = match Cursor::start_with_history(scene, first_group, history) {
            Ok(cursor) => cursor,
            Err(err) => {
                error!(%err, "cursor failed to start, staying idle");
                Cursor::idle()
            }
        };
        Self::new(scene, cursor, config)
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    #[must_use]
    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// Current indicator position.
    #[must_use]
    pub fn indicator(&self) -> Vec2 {
        self.indicator.position
    }

    pub fn drain_events(&mut self) -> Vec<CursorEvent> {
        self.cursor.drain_events()
    }

    /// Advance one frame.
    pub fn tick(&mut self, scene: &mut NavScene, input: &TickInput, dt: f32) {
        if !self.cursor.is_active() {
            return;
        }
        let keymap = &self.config.keymap;

        if let Some(dir) = Direction::ALL
            .into_iter()
            .find(|dir| input.is_pressed(keymap.direction(*dir)))
        {
            trace!(dir = dir.as_str(), "direction pressed");
            self.cursor.move_direction(scene, dir);
        }

        self.smooth_indicator(scene, dt);

        if input.is_pressed(&self.config.keymap.confirm) {
            self.cursor.confirm(scene);
        }
        if input.is_pressed(&self.config.keymap.cancel) {
            self.cursor.cancel(scene);
        }

        if self.config.pointer_enabled
            && let Some(pointer) = input.pointer
        {
            self.handle_pointer(scene, pointer);
        }
    }

    fn smooth_indicator(&mut self, scene: &NavScene, dt: f32) {
        let Some(target) = self
            .cursor
            .current_element()
            .and_then(|e| scene.focus_point(e))
        else {
            return;
        };
        if self.config.smoothing_time <= 0.0 {
            self.indicator.snap(target);
        } else {
            self.indicator
                .update(target, self.config.smoothing_time, dt);
        }
    }

    fn handle_pointer(&mut self, scene: &mut NavScene, pointer: PointerState) {
        if pointer.primary_pressed {
            self.cursor.confirm(scene);
        }
        if pointer.secondary_pressed {
            self.cursor.cancel(scene);
        }

        let moved = self.last_pointer != Some(pointer.position);
        self.last_pointer = Some(pointer.position);
        if !moved {
            return;
        }
        let Some(group) = self.cursor.current_group() else {
            return;
        };
        if let Some(hit) = scene.hit_test(group, pointer.position)
            && self.cursor.select_option(scene, Some(hit))
        {
            debug!(element = %hit, "pointer hover selected");
        }
    }
}
