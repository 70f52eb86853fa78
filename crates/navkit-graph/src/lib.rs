#![forbid(unsafe_code)]

//! Scene, navigation graph builders, and collision probes for navkit.
//!
//! # Role in navkit
//! `navkit-graph` owns everything the cursor navigates over: elements, the
//! groups they belong to, their directional adjacency, and the builders that
//! derive that adjacency from host-supplied geometry.
//!
//! # Primary responsibilities
//! - **Scene**: [`NavScene`] stores elements and groups in generational arenas
//!   and keeps the host's [`Layout`] snapshot.
//! - **Builders**: [`NavStrategy`] selects one of the axis, insertion-order,
//!   scored, ray, or explicit strategies; custom [`NavigationBuilder`]s plug in
//!   through [`NavScene::build_with`].
//! - **Probes**: [`CollisionWorld`] abstracts the host physics used by the ray
//!   builder; [`ProbeSession`] scopes probe setup and teardown.
//! - **Tooling**: [`NavScene::inspect_group`] and [`NavScene::debug_edges`].
//!
//! # Quick start
//! ```
//! use navkit_core::{Axis, Direction, RectTransform, Vec2};
//! use navkit_graph::{BuildOutcome, ElementDesc, NavScene, NavStrategy};
//!
//! let mut scene = NavScene::new();
//! let row = scene.add_group("row", NavStrategy::Axis { axis: Axis::X });
//! let a = scene.add_element(row, ElementDesc::new("a")).unwrap();
//! let b = scene.add_element(row, ElementDesc::new("b")).unwrap();
//! scene.set_transform(a, RectTransform::new(Vec2::new(0.0, 0.0), Vec2::ONE)).unwrap();
//! scene.set_transform(b, RectTransform::new(Vec2::new(10.0, 0.0), Vec2::ONE)).unwrap();
//!
//! assert_eq!(scene.build_navigation(row).unwrap(), BuildOutcome::Built { links: 2 });
//! assert_eq!(scene.neighbor(a, Direction::Right), Some(b));
//! ```

mod arena;
pub mod builder;
pub mod element;
pub mod error;
pub mod group;
pub mod kinds;
pub mod layout;
pub mod probe;
pub mod scene;
pub mod tooling;

pub use arena::{ElementId, GroupId};
pub use builder::{
    AxisBuilder, BuildInput, BuildNode, BuildOutcome, Link, NavStrategy, NavigationBuilder,
    RayBuilder, RayParams, ScoreWeights, ScoredBuilder, ScoredParams,
};
pub use element::{
    Adjacency, Element, ElementBehavior, ElementCtx, ElementDesc, ElementResponse, EntryMode,
};
pub use error::{BuildError, ProbeError, SceneError};
pub use group::Group;
pub use kinds::{EventTrigger, GroupLink, Plain};
pub use layout::Layout;
pub use probe::{
    CollisionWorld, LayerMask, ProbeHandle, ProbeSession, ProbeShape, ProbeWorld, RayHit,
};
pub use scene::NavScene;
pub use tooling::{DebugEdge, DebugView, GroupReport, GroupStatus};
