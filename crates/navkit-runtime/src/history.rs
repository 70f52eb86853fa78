#![forbid(unsafe_code)]

//! Back-navigation history for the cursor.
//!
//! Each recorded group entry pushes the `(group, element)` the cursor was on
//! before the switch. Returning pops exactly one frame.
//!
//! # Invariants
//!
//! 1. `len() <= max_depth()` after every push; the oldest frame is evicted.
//! 2. Frames are popped newest first.
//!
//! ```text
//! enter B from A/a1      enter C from B/b2      return
//! [A/a1]                 [A/a1, B/b2]           [A/a1]      -> B/b2
//! ```

use std::collections::VecDeque;

use navkit_graph::{ElementId, GroupId};

/// Default maximum number of frames kept.
pub const DEFAULT_MAX_HISTORY: usize = 64;

/// One remembered cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFrame {
    pub group: GroupId,
    pub element: ElementId,
}

impl HistoryFrame {
    #[must_use]
    pub const fn new(group: GroupId, element: ElementId) -> Self {
        Self { group, element }
    }
}

/// Bounded stack of [`HistoryFrame`]s.
#[derive(Debug, Clone)]
pub struct NavHistory {
    frames: VecDeque<HistoryFrame>,
    max_depth: usize,
}

impl Default for NavHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl NavHistory {
    /// A history holding at most `max_depth` frames (at least one).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a frame, evicting the oldest when full. Returns the evicted
    /// frame, if any.
    pub fn push(&mut self, frame: HistoryFrame) -> Option<HistoryFrame> {
        self.frames.push_back(frame);
        if self.frames.len() > self.max_depth {
            return self.frames.pop_front();
        }
        None
    }

    pub fn pop(&mut self) -> Option<HistoryFrame> {
        self.frames.pop_back()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&HistoryFrame> {
        self.frames.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Frames, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryFrame> + '_ {
        self.frames.iter().rev()
    }
}
