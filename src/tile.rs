//! A single cell of the minefield.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One tile of a [`Board`](crate::Board).
///
/// A tile only knows its coordinates and its own flags. Anything that
/// depends on the surrounding tiles (the adjacent mine count) is asked of
/// the board that owns it, see [`Tile::nb_mine_around`].
///
/// Equality and hashing are positional: two tiles are equal iff they sit at
/// the same `(x, y)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    x: usize,
    y: usize,
    is_mine: bool,
    is_revealed: bool,
    is_marked: bool,
}

impl Tile {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            is_mine: false,
            is_revealed: false,
            is_marked: false,
        }
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    #[inline]
    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.is_marked
    }

    /// Number of mines among the up-to-8 neighbors, as seen by `board`.
    ///
    /// Not cached. Evaluates to 0 before the mines are placed.
    pub fn nb_mine_around<O>(&self, board: &crate::Board<O>) -> u8 {
        board.nb_mine_around(self)
    }

    /// Turn this tile into a mine. Placement calls this at most once per tile.
    pub(crate) fn set_mine(&mut self) {
        assert!(
            !self.is_mine,
            "tile ({}, {}) is already a mine",
            self.x, self.y
        );
        self.is_mine = true;
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn toggle_mark(&mut self) {
        self.is_marked = !self.is_marked;
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

/// Flattened view of a tile for a rendering layer, adjacency count included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSnapshot {
    pub x: usize,
    pub y: usize,
    pub revealed: bool,
    pub marked: bool,
    pub mine: bool,
    pub mines_around: u8,
}
