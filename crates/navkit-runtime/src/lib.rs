#![forbid(unsafe_code)]

//! Runtime: the focus cursor and the per-frame driver for navkit.
//!
//! # Role in navkit
//! `navkit-runtime` moves focus around a [`navkit_graph::NavScene`]. It does
//! not build graphs; it walks them.
//!
//! # Primary responsibilities
//! - **Cursor**: the [`Cursor`] state machine (select, move, confirm, cancel,
//!   enter group, return) with an event queue for the host.
//! - **History**: [`NavHistory`], a bounded stack of previous group positions.
//! - **Driver**: [`CursorDriver::tick`] maps host actions and pointer input to
//!   cursor operations and smooths the on-screen indicator.
//! - **Config**: [`CursorConfig`] and [`Keymap`], loadable with `serde`.
//!
//! # Quick start
//! ```
//! use navkit_core::{Axis, RectTransform, Vec2};
//! use navkit_graph::{ElementDesc, NavScene, NavStrategy};
//! use navkit_runtime::{CursorConfig, CursorDriver, TickInput};
//!
//! let mut scene = NavScene::new();
//! let row = scene.add_group("row", NavStrategy::Axis { axis: Axis::X });
//! let a = scene.add_element(row, ElementDesc::new("a")).unwrap();
//! let b = scene.add_element(row, ElementDesc::new("b")).unwrap();
//! scene.set_transform(a, RectTransform::new(Vec2::new(0.0, 0.0), Vec2::ONE)).unwrap();
//! scene.set_transform(b, RectTransform::new(Vec2::new(10.0, 0.0), Vec2::ONE)).unwrap();
//! scene.build_navigation(row).unwrap();
//!
//! let mut driver = CursorDriver::start(&mut scene, Some(row), CursorConfig::default());
//! driver.tick(&mut scene, &TickInput::new().with_action("d"), 1.0 / 60.0);
//! assert_eq!(driver.cursor().current_element(), Some(b));
//! ```

pub mod config;
pub mod cursor;
pub mod driver;
pub mod history;

pub use config::{ConfigError, CursorConfig, Keymap};
pub use cursor::{Cursor, CursorError, CursorEvent, CursorState};
pub use driver::{CursorDriver, PointerState, TickInput};
pub use history::{DEFAULT_MAX_HISTORY, HistoryFrame, NavHistory};
