#![forbid(unsafe_code)]

//! Generational arenas and the ids that index them.
//!
//! Every id carries the slot index plus the slot generation at insertion
//! time. Removing a value bumps the slot generation, so any id still held
//! elsewhere (an adjacency slot, a history frame) stops resolving instead of
//! silently aliasing whatever reuses the slot.
//!
//! # Invariants
//!
//! 1. `get(id)` returns `Some` only if the slot is occupied and its
//!    generation equals `id.generation`.
//! 2. A slot's generation increases by one on every removal.
//! 3. Freed slots are reused LIFO; `iter` yields occupied slots in index
//!    order.

use std::fmt;
use std::marker::PhantomData;

/// Id types stored in an [`Arena`].
pub(crate) trait ArenaId: Copy {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> u32;
    fn generation(self) -> u32;
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl $name {
            /// Slot index (stable while the value lives).
            #[must_use]
            pub const fn index(self) -> u32 {
                self.index
            }

            /// Slot generation at insertion time.
            #[must_use]
            pub const fn generation(self) -> u32 {
                self.generation
            }
        }

        impl ArenaId for $name {
            fn from_parts(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }
            fn index(self) -> u32 {
                self.index
            }
            fn generation(self) -> u32 {
                self.generation
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}v{}"), self.index, self.generation)
            }
        }
    };
}

arena_id!(
    /// Handle to an element in a [`NavScene`](crate::NavScene).
    ElementId,
    "e"
);

arena_id!(
    /// Handle to a group in a [`NavScene`](crate::NavScene).
    GroupId,
    "g"
);

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena keyed by a generational id.
#[derive(Debug, Clone)]
pub(crate) struct Arena<I, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _id: PhantomData<I>,
}

impl<I, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _id: PhantomData,
        }
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    pub(crate) fn insert(&mut self, value: T) -> I {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return I::from_parts(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        I::from_parts(index, 0)
    }

    pub(crate) fn remove(&mut self, id: I) -> Option<T> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() || slot.value.is_none() {
            return None;
        }
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.len -= 1;
        value
    }

    pub(crate) fn get(&self, id: I) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: I) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub(crate) fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (I::from_parts(i as u32, slot.generation), v))
        })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|v| (I::from_parts(i as u32, generation), v))
        })
    }
}
