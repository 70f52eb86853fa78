#![forbid(unsafe_code)]

//! Inspection helpers for editors and debug overlays.

use navkit_core::{Direction, Vec2};
use serde::{Deserialize, Serialize};

use crate::arena::{ElementId, GroupId};
use crate::scene::NavScene;

/// Whether a group can be (re)built from an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Ready,
    UnderPopulated,
    /// Explicit strategy; links are authored by hand.
    Manual,
}

impl GroupStatus {
    /// Gates the "build navigation" action.
    #[must_use]
    pub const fn can_build(self) -> bool {
        matches!(self, Self::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub group: GroupId,
    pub name: String,
    pub element_count: usize,
    pub status: GroupStatus,
}

impl GroupReport {
    /// One-line explanation for the inspector panel.
    #[must_use]
    pub fn message(&self) -> String {
        match self.status {
            GroupStatus::Ready => format!(
                "{} elements, ready to build navigation.",
                self.element_count
            ),
            GroupStatus::UnderPopulated => {
                "This group contains less than 2 elements. Add elements to build navigation."
                    .to_string()
            }
            GroupStatus::Manual => {
                "Navigation is set by hand; there is nothing to build.".to_string()
            }
        }
    }
}

/// Overlay switches. Passed explicitly; nothing is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugView {
    pub show_navigation: bool,
}

/// One adjacency arrow, focus point to focus point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugEdge {
    pub from: ElementId,
    pub to: ElementId,
    pub dir: Direction,
    pub start: Vec2,
    pub end: Vec2,
}

impl NavScene {
    #[must_use]
    pub fn inspect_group(&self, group: GroupId) -> Option<GroupReport> {
        let g = self.group(group)?;
        let element_count = g.len();
        let status = if g.strategy().is_manual() {
            GroupStatus::Manual
        } else if element_count < 2 {
            GroupStatus::UnderPopulated
        } else {
            GroupStatus::Ready
        };
        Some(GroupReport {
            group,
            name: g.name().to_string(),
            element_count,
            status,
        })
    }

    /// Adjacency segments of `group` for an overlay renderer. Empty unless
    /// `view.show_navigation` is set.
    #[must_use]
    pub fn debug_edges(&self, group: GroupId, view: &DebugView) -> Vec<DebugEdge> {
        if !view.show_navigation {
            return Vec::new();
        }
        let Some(g) = self.group(group) else {
            return Vec::new();
        };
        let mut edges = Vec::new();
        for &from in g.elements() {
            let Some(start) = self.focus_point(from) else {
                continue;
            };
            for dir in Direction::ALL {
                if let Some(to) = self.neighbor(from, dir)
                    && let Some(end) = self.focus_point(to)
                {
                    edges.push(DebugEdge {
                        from,
                        to,
                        dir,
                        start,
                        end,
                    });
                }
            }
        }
        edges
    }
}
