#![forbid(unsafe_code)]

//! Closest-in-direction builder.
//!
//! For each element and direction, candidates are measured from the point on
//! the element's edge facing that direction to the candidate's center. With
//! `V` that vector and `D` the unit direction:
//!
//! ```text
//! plain:     score = (V·D) / |V|²
//! weighted:  score = ((V·D) / |V|)^angle / |V|^distance
//! ```
//!
//! Candidates behind the edge (`V·D <= 0`) are never linked. The highest
//! score wins; ties keep the first candidate in group order.

use navkit_core::{Direction, PerDirection, Vec2};
use serde::{Deserialize, Serialize};

use super::{BuildInput, Link, NavigationBuilder};
use crate::arena::ElementId;
use crate::error::BuildError;

/// Exponents for the weighted score. Both must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub distance: f32,
    pub angle: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance: 1.0,
            angle: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoredParams {
    /// Maximum edge-to-center distance per direction; `<= 0` is unbounded.
    pub max_distance: PerDirection<f32>,
    /// Candidates scoring below this are ignored; `<= 0` disables the cut.
    pub min_score: f32,
    /// `None` uses the plain score.
    pub weights: Option<ScoreWeights>,
}

impl Default for ScoredParams {
    fn default() -> Self {
        Self {
            max_distance: PerDirection::uniform(0.0),
            min_score: 0.0,
            weights: None,
        }
    }
}

impl ScoredParams {
    #[must_use]
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = PerDirection::uniform(distance);
        self
    }

    #[must_use]
    pub fn with_max_distance_per(mut self, distance: PerDirection<f32>) -> Self {
        self.max_distance = distance;
        self
    }

    #[must_use]
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, distance: f32, angle: f32) -> Self {
        self.weights = Some(ScoreWeights { distance, angle });
        self
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if let Some(w) = self.weights
            && !(w.distance > 0.0 && w.angle > 0.0 && w.distance.is_finite() && w.angle.is_finite())
        {
            return Err(BuildError::InvalidWeights {
                distance: w.distance,
                angle: w.angle,
            });
        }
        if self.min_score.is_nan() {
            return Err(BuildError::InvalidParams("min_score is NaN"));
        }
        if self.max_distance.iter().any(|(_, d)| d.is_nan()) {
            return Err(BuildError::InvalidParams("max_distance is NaN"));
        }
        Ok(())
    }
}

/// Score of a candidate at offset `v` in unit direction `dir`, or `None` when
/// the candidate is not in front.
#[must_use]
pub fn score(v: Vec2, dir: Vec2, weights: Option<ScoreWeights>) -> Option<f32> {
    let dot = v.dot(dir);
    if dot <= 0.0 {
        return None;
    }
    let len_sq = v.length_squared();
    let s = match weights {
        None => dot / len_sq,
        Some(w) => {
            let len = len_sq.sqrt();
            (dot / len).powf(w.angle) / len.powf(w.distance)
        }
    };
    // Non-finite geometry is never a candidate.
    s.is_finite().then_some(s)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoredBuilder {
    params: ScoredParams,
}

impl ScoredBuilder {
    #[must_use]
    pub const fn new(params: ScoredParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub const fn params(&self) -> &ScoredParams {
        &self.params
    }

    fn best_candidate(
        &self,
        input: &BuildInput<'_>,
        centers: &[Vec2],
        from: usize,
        dir: Direction,
    ) -> Option<ElementId> {
        let unit = dir.vector();
        let origin = input.nodes[from].transform.edge_point_world(unit);
        let max_distance = self.params.max_distance[dir];
        let mut best: Option<(f32, ElementId)> = None;

        for (i, node) in input.nodes.iter().enumerate() {
            if i == from || node.id == input.nodes[from].id {
                continue;
            }
            let v = centers[i] - origin;
            let Some(s) = score(v, unit, self.params.weights) else {
                continue;
            };
            if max_distance > 0.0 && v.length() > max_distance {
                continue;
            }
            if self.params.min_score > 0.0 && s < self.params.min_score {
                continue;
            }
            if best.is_none_or(|(b, _)| s > b) {
                best = Some((s, node.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

impl NavigationBuilder for ScoredBuilder {
    fn validate(&self) -> Result<(), BuildError> {
        self.params.validate()
    }

    fn build(&mut self, input: &BuildInput<'_>) -> Result<Vec<Link>, BuildError> {
        self.params.validate()?;
        let centers: Vec<Vec2> = input
            .nodes
            .iter()
            .map(|node| node.transform.world_center())
            .collect();

        let mut links = Vec::new();
        for (i, node) in input.nodes.iter().enumerate() {
            for dir in Direction::ALL {
                if let Some(to) = self.best_candidate(input, &centers, i, dir) {
                    links.push(Link::new(node.id, dir, to));
                }
            }
        }
        Ok(links)
    }
}
