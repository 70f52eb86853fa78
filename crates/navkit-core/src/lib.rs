#![forbid(unsafe_code)]

//! Core: geometry, directions, ordering, and smoothing for navkit.
//!
//! # Role in navkit
//! `navkit-core` is the leaf layer. It owns the pure math every other crate
//! builds on and carries no state of its own.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Vec2`], [`RectTransform`], and [`point_on_rect_edge`].
//! - **Direction**: the four cardinal [`Direction`]s, their unit vectors, and
//!   [`PerDirection`] tables (the shape of every adjacency table).
//! - **Ordering**: [`sort_by_axis_then_other`], the stable axis sort used by
//!   the axis builder and the entry-element fallback.
//! - **Animation**: [`smooth_damp`] critically damped smoothing for the cursor
//!   indicator.
//!
//! # Coordinate system
//! World space is y-up: [`Direction::Up`] maps to `(0, 1)`.

pub mod animation;
pub mod direction;
pub mod geometry;
pub mod ordering;

pub use animation::{SmoothedPosition, smooth_damp, smooth_damp_scalar};
pub use direction::{Axis, Direction, PerDirection};
pub use geometry::{RectTransform, Vec2, point_on_rect_edge};
pub use ordering::sort_by_axis_then_other;
