#![forbid(unsafe_code)]

//! Ray-probe builder.
//!
//! Every member gets a temporary box collider on an isolated probe layer.
//! From each element a ray is cast per direction, starting just outside its
//! box so it cannot hit itself; the first member hit becomes the neighbor.
//! Colliders follow the element's scaled size and rotation.

use navkit_core::{Direction, PerDirection, RectTransform, Vec2};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildInput, Link, NavigationBuilder};
use crate::arena::ElementId;
use crate::error::BuildError;
use crate::probe::{CollisionWorld, LayerMask, ProbeSession, ProbeShape};

/// Gap between an element's box and its ray origin.
pub const RAY_ORIGIN_MARGIN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayParams {
    /// Ray length per direction; `<= 0` disables that direction.
    pub max_distance: PerDirection<f32>,
    /// Layer the probes are moved to while building.
    pub probe_layer: LayerMask,
}

impl Default for RayParams {
    fn default() -> Self {
        Self {
            max_distance: PerDirection::uniform(f32::MAX),
            probe_layer: LayerMask::NAV_PROBE,
        }
    }
}

impl RayParams {
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
    pub fn with_probe_layer(mut self, layer: LayerMask) -> Self {
        self.probe_layer = layer;
        self
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.probe_layer.is_empty() {
            return Err(BuildError::InvalidParams("probe_layer is empty"));
        }
        if self.max_distance.iter().any(|(_, d)| d.is_nan()) {
            return Err(BuildError::InvalidParams("max_distance is NaN"));
        }
        Ok(())
    }
}

/// Start point of the ray cast from `transform` toward `dir`.
#[must_use]
pub fn ray_origin(transform: &RectTransform, dir: Direction) -> Vec2 {
    let v = dir.vector();
    transform.edge_point_world(v) + v * RAY_ORIGIN_MARGIN
}

/// Builds links by casting against a borrowed [`CollisionWorld`].
pub struct RayBuilder<'w, W: CollisionWorld + ?Sized> {
    params: RayParams,
    world: &'w mut W,
}

impl<'w, W: CollisionWorld + ?Sized> RayBuilder<'w, W> {
    pub fn new(params: RayParams, world: &'w mut W) -> Self {
        Self { params, world }
    }

    #[must_use]
    pub const fn params(&self) -> &RayParams {
        &self.params
    }
}

impl<W: CollisionWorld + ?Sized> NavigationBuilder for RayBuilder<'_, W> {
    fn validate(&self) -> Result<(), BuildError> {
        self.params.validate()
    }

    fn build(&mut self, input: &BuildInput<'_>) -> Result<Vec<Link>, BuildError> {
        self.params.validate()?;
        let members: FxHashSet<ElementId> = input.nodes.iter().map(|n| n.id).collect();

        let mut session = ProbeSession::begin(&mut *self.world, self.params.probe_layer);
        for node in input.nodes {
            session.attach(node.id, ProbeShape::from_transform(&node.transform))?;
        }
        debug!(group = %input.group, probes = session.probe_count(), "probes attached");

        let mut links = Vec::new();
        for node in input.nodes {
            for dir in Direction::ALL {
                let max_distance = self.params.max_distance[dir];
                if max_distance <= 0.0 {
                    continue;
                }
                let origin = ray_origin(&node.transform, dir);
                let Some(hit) = session.raycast(origin, dir.vector(), max_distance)? else {
                    continue;
                };
                if hit.element != node.id && members.contains(&hit.element) {
                    links.push(Link::new(node.id, dir, hit.element));
                }
            }
        }
        Ok(links)
    }
}
