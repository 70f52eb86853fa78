#![forbid(unsafe_code)]

//! Cardinal navigation directions and four-slot direction tables.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Navigation direction. Declaration order is the slot order of a
/// [`PerDirection`] table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Slot index (Up=0, Right=1, Down=2, Left=3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Unit vector in y-up world space.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

/// Sorting / linking axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    #[default]
    Y,
}

impl Axis {
    /// The complementary axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// Direction of increasing coordinate (Right for X, Up for Y).
    #[must_use]
    pub const fn forward(self) -> Direction {
        match self {
            Self::X => Direction::Right,
            Self::Y => Direction::Up,
        }
    }

    /// Direction of decreasing coordinate (Left for X, Down for Y).
    #[must_use]
    pub const fn backward(self) -> Direction {
        self.forward().opposite()
    }
}

/// One value per [`Direction`].
///
/// Adjacency tables are `PerDirection<Option<Id>>`; builder parameters such as
/// per-direction search distances are `PerDirection<f32>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PerDirection<T> {
    pub up: T,
    pub right: T,
    pub down: T,
    pub left: T,
}

impl<T: Clone> PerDirection<T> {
    /// Same value for all four directions.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            up: value.clone(),
            right: value.clone(),
            down: value.clone(),
            left: value,
        }
    }
}

impl<T> PerDirection<T> {
    #[must_use]
    pub const fn new(up: T, right: T, down: T, left: T) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Iterate `(direction, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> + '_ {
        Direction::ALL.into_iter().map(move |dir| (dir, &self[dir]))
    }

    /// Map every slot.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(Direction, T) -> U) -> PerDirection<U> {
        PerDirection {
            up: f(Direction::Up, self.up),
            right: f(Direction::Right, self.right),
            down: f(Direction::Down, self.down),
            left: f(Direction::Left, self.left),
        }
    }
}

impl<T> PerDirection<Option<T>> {
    /// Number of filled slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        [&self.up, &self.right, &self.down, &self.left]
            .into_iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.up = None;
        self.right = None;
        self.down = None;
        self.left = None;
    }
}

impl<T> Index<Direction> for PerDirection<T> {
    type Output = T;

    fn index(&self, dir: Direction) -> &T {
        match dir {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }
}

impl<T> IndexMut<Direction> for PerDirection<T> {
    fn index_mut(&mut self, dir: Direction) -> &mut T {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }
}
