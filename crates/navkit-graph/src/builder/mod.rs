#![forbid(unsafe_code)]

//! Navigation graph builders.
//!
//! A builder turns element geometry into directional links. Builders are
//! pure with respect to the scene: they read a [`BuildInput`] snapshot and
//! return a list of [`Link`]s, and [`NavScene::build_with`] applies the links
//! only once the builder has succeeded. A rejected or failed build therefore
//! never leaves a group half-linked.
//!
//! | Strategy | Cost | Use |
//! |----------|------|-----|
//! | [`NavStrategy::Axis`] | O(n log n) | rows / columns, safe at runtime |
//! | [`NavStrategy::InsertionOrder`] | O(n) | host already ordered the group |
//! | [`NavStrategy::Scored`] | O(n²) | free-form layouts (default) |
//! | [`NavStrategy::Ray`] | O(n²) + probe churn | offline / pre-baked graphs |
//! | [`NavStrategy::Explicit`] | none | hand-authored adjacency |
//!
//! [`NavScene::build_with`]: crate::NavScene::build_with

pub mod axis;
pub mod ray;
pub mod scored;

use navkit_core::{Axis, Direction, RectTransform};
use serde::{Deserialize, Serialize};

use crate::arena::{ElementId, GroupId};
use crate::error::BuildError;

pub use axis::{AxisBuilder, link_chain};
pub use ray::{RAY_ORIGIN_MARGIN, RayBuilder, RayParams};
pub use scored::{ScoreWeights, ScoredBuilder, ScoredParams, score};

/// One member of the group being built, with its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildNode {
    pub id: ElementId,
    pub transform: RectTransform,
}

/// Geometry snapshot of one group, in group insertion order.
#[derive(Debug, Clone, Copy)]
pub struct BuildInput<'a> {
    pub group: GroupId,
    pub nodes: &'a [BuildNode],
}

/// Directed adjacency: navigating `dir` from `from` leads to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub from: ElementId,
    pub dir: Direction,
    pub to: ElementId,
}

impl Link {
    #[must_use]
    pub const fn new(from: ElementId, dir: Direction, to: ElementId) -> Self {
        Self { from, dir, to }
    }
}

/// Result of a successful build request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Adjacency rebuilt with this many links.
    Built { links: usize },
    /// Fewer than two elements; adjacency cleared, nothing linked.
    UnderPopulated { count: usize },
    /// Explicit strategy; adjacency left untouched.
    Manual,
}

/// A strategy that derives links from geometry.
pub trait NavigationBuilder {
    /// Reject unusable parameters before any work is done.
    fn validate(&self) -> Result<(), BuildError> {
        Ok(())
    }

    /// Compute links for the group. Must not depend on previous adjacency.
    fn build(&mut self, input: &BuildInput<'_>) -> Result<Vec<Link>, BuildError>;
}

/// Builder selection plus its parameters, as configured on a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavStrategy {
    /// Sort by position along `axis` and link neighbors.
    Axis { axis: Axis },
    /// Link neighbors in group insertion order.
    InsertionOrder { axis: Axis },
    /// Closest-in-direction search.
    Scored(ScoredParams),
    /// Probe ray casts.
    Ray(RayParams),
    /// Hand-authored; builds are suppressed.
    Explicit,
}

impl Default for NavStrategy {
    fn default() -> Self {
        Self::Scored(ScoredParams::default())
    }
}

impl NavStrategy {
    /// Stable name for logs and tooling.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Axis { .. } => "axis",
            Self::InsertionOrder { .. } => "insertion_order",
            Self::Scored(_) => "scored",
            Self::Ray(_) => "ray",
            Self::Explicit => "explicit",
        }
    }

    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self, Self::Explicit)
    }

    /// Check parameters without building.
    pub fn validate(&self) -> Result<(), BuildError> {
        match self {
            Self::Scored(params) => params.validate(),
            Self::Ray(params) => params.validate(),
            Self::Axis { .. } | Self::InsertionOrder { .. } | Self::Explicit => Ok(()),
        }
    }

    /// Order used to pick a fallback entry element: `Some(axis)` sorts by
    /// that axis, `None` keeps insertion order.
    #[must_use]
    pub const fn fallback_order(&self) -> Option<Axis> {
        match self {
            Self::Axis { axis } => Some(*axis),
            Self::InsertionOrder { .. } => None,
            Self::Scored(_) | Self::Ray(_) | Self::Explicit => Some(Axis::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_scored() {
        assert_eq!(NavStrategy::default().kind(), "scored");
    }

    #[test]
    fn strategy_json_shapes() {
        let axis: NavStrategy = serde_json::from_str(r#"{"kind":"axis","axis":"x"}"#).unwrap();
        assert_eq!(axis, NavStrategy::Axis { axis: Axis::X });

        let explicit: NavStrategy = serde_json::from_str(r#"{"kind":"explicit"}"#).unwrap();
        assert!(explicit.is_manual());

        let scored: NavStrategy =
            serde_json::from_str(r#"{"kind":"scored","min_score":0.01}"#).unwrap();
        match scored {
            NavStrategy::Scored(p) => {
                assert_eq!(p.min_score, 0.01);
                assert!(p.weights.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn strategy_round_trips() {
        let strategy = NavStrategy::Scored(ScoredParams::default().with_weights(2.0, 1.0));
        let json = serde_json::to_string(&strategy).unwrap();
        let back: NavStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, strategy);
    }

    #[test]
    fn validate_rejects_bad_weights() {
        let strategy = NavStrategy::Scored(ScoredParams::default().with_weights(0.0, 1.0));
        assert!(matches!(
            strategy.validate(),
            Err(BuildError::InvalidWeights { .. })
        ));
        assert!(NavStrategy::Explicit.validate().is_ok());
    }

    #[test]
    fn fallback_order_per_strategy() {
        assert_eq!(
            NavStrategy::Axis { axis: Axis::X }.fallback_order(),
            Some(Axis::X)
        );
        assert_eq!(
            NavStrategy::InsertionOrder { axis: Axis::X }.fallback_order(),
            None
        );
        assert_eq!(NavStrategy::default().fallback_order(), Some(Axis::Y));
    }
}
