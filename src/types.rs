//! Core data types shared by the board engine.
//!
//! All tile storage uses a flat `Vec` in row-major layout:
//! `tiles[y * width + x]` holds the tile at `(x, y)`.

use serde::{Deserialize, Serialize};

/// Flat row-major index of `(x, y)`.
#[inline(always)]
pub fn tile_index(width: usize, x: usize, y: usize) -> usize {
    y * width + x
}

/// Decode a flat row-major index back to `(x, y)`.
#[inline(always)]
pub fn tile_coords(width: usize, index: usize) -> (usize, usize) {
    (index % width, index / width)
}

/// Lifecycle of a single game.
///
/// `Fresh` until the first play places the mines, `Active` while the game
/// runs, then one of the two terminal states. There is no way back out of
/// `Won` or `Lost`; a new game needs a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Fresh,
    Active,
    Won,
    Lost,
}

impl GameState {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Pre-computed neighbor cache for all tiles.
///
/// Stores the 8-directional neighbors (clipped to grid bounds) of every tile
/// as flat indices. Neighbors are listed row above, same row, row below,
/// each left to right.
#[derive(Debug, Clone)]
pub struct NeighborCache {
    /// Flat storage of all neighbor indices.
    data: Vec<usize>,
    /// offsets[i] = start index in `data` for tile i.
    /// offsets[i+1] - offsets[i] = number of neighbors for tile i.
    offsets: Vec<usize>,
}

impl NeighborCache {
    /// Build the neighbor cache for a grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let total = width * height;
        let mut data = Vec::with_capacity(total * 8);
        let mut offsets = Vec::with_capacity(total + 1);

        for y in 0..height {
            for x in 0..width {
                offsets.push(data.len());
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
                            data.push(tile_index(width, nx as usize, ny as usize));
                        }
                    }
                }
            }
        }
        offsets.push(data.len()); // sentinel

        Self { data, offsets }
    }

    /// Get the pre-computed neighbors of the tile at flat `index`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> &[usize] {
        let start = self.offsets[index];
        let end = self.offsets[index + 1];
        &self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_row_major() {
        assert_eq!(tile_index(9, 0, 0), 0);
        assert_eq!(tile_index(9, 8, 0), 8);
        assert_eq!(tile_index(9, 0, 1), 9);
        assert_eq!(tile_coords(9, 10), (1, 1));
        assert_eq!(tile_coords(12, 12 * 15 + 11), (11, 15));
    }

    #[test]
    fn test_neighbor_cache_corners() {
        let nc = NeighborCache::new(5, 4);
        // Corner (0,0) has 3 neighbors
        assert_eq!(nc.get(tile_index(5, 0, 0)).len(), 3);
        // Corner (4,3) has 3 neighbors
        assert_eq!(nc.get(tile_index(5, 4, 3)).len(), 3);
        // Edge (0,2) has 5 neighbors
        assert_eq!(nc.get(tile_index(5, 0, 2)).len(), 5);
        // Center (2,2) has 8 neighbors
        assert_eq!(nc.get(tile_index(5, 2, 2)).len(), 8);
    }

    #[test]
    fn test_neighbor_cache_order() {
        let nc = NeighborCache::new(3, 3);
        let coords: Vec<_> = nc.get(4).iter().map(|&i| tile_coords(3, i)).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_neighbor_cache_single_row() {
        let nc = NeighborCache::new(4, 1);
        assert_eq!(nc.get(0), &[1]);
        assert_eq!(nc.get(2), &[1, 3]);
    }

    #[test]
    fn test_game_state_terminal() {
        assert!(!GameState::Fresh.is_over());
        assert!(!GameState::Active.is_over());
        assert!(GameState::Won.is_over());
        assert!(GameState::Lost.is_over());
    }
}
