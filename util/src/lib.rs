#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;

/// The visible part of a level, anchored at the map origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Window {
    pub width: u32,
    pub height: u32,
}

impl Window {
    pub const SCREEN: Window = Window {
        width: 20,
        height: 14,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::SCREEN
    }
}

/// Remaps adjusted tile values to output codes. Values with no entry pass
/// through unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TileMapping {
    entries: BTreeMap<i64, i64>,
}

impl TileMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: i64, to: i64) -> Option<i64> {
        self.entries.insert(from, to)
    }

    pub fn translate(&self, value: i64) -> i64 {
        self.entries.get(&value).copied().unwrap_or(value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(i64, i64)> for TileMapping {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
