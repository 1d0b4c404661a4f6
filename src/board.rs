//! The board engine: lazy mine placement, reveal with flood fill, chording,
//! marking and win/loss detection.
//!
//! Every mutator returns the tiles whose visible state changed so a view
//! can update incrementally instead of redrawing the whole grid. Illegal or
//! pointless moves (out of range, after the game ended, on a marked tile)
//! are silent no-ops returning an empty change set.

use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use std::time::Duration;

use crate::difficulty::Difficulty;
use crate::error::BoardError;
use crate::observer::GameObserver;
use crate::rng::MineRng;
use crate::tile::{Tile, TileSnapshot};
use crate::types::{tile_coords, tile_index, GameState, NeighborCache};

/// A minesweeper grid plus the state of the game played on it.
///
/// Tiles are stored row-major and never move; the board owns them and does
/// all neighbor math itself. Lifecycle events go to the observer `O`.
#[derive(Debug)]
pub struct Board<O = ()> {
    difficulty: Difficulty,
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    neighbors: NeighborCache,
    state: GameState,
    /// Safe tiles not yet revealed. Meaningful once mines are placed.
    hidden_safe: usize,
    started_at: Option<DateTime<Utc>>,
    score: Option<Duration>,
    rng: MineRng,
    observer: O,
}

impl Board {
    /// Board with a silent observer and an entropy-seeded RNG.
    ///
    /// # Panics
    ///
    /// If `difficulty` leaves no room for a mine-free 3x3 opening.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_observer(difficulty, ())
    }

    /// Board whose mine placement is reproducible from `seed`.
    pub fn from_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, (), MineRng::from_seed(seed))
    }
}

impl<O: GameObserver> Board<O> {
    pub fn with_observer(difficulty: Difficulty, observer: O) -> Self {
        Self::with_rng(difficulty, observer, MineRng::new())
    }

    pub fn with_rng(difficulty: Difficulty, observer: O, rng: MineRng) -> Self {
        if let Err(err) = difficulty.validate() {
            panic!("invalid difficulty {:?}: {}", difficulty, err);
        }

        let (width, height) = difficulty.size();
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Tile::new(x, y)))
            .collect();

        Self {
            difficulty,
            width,
            height,
            tiles,
            neighbors: NeighborCache::new(width, height),
            state: GameState::Fresh,
            hidden_safe: width * height - difficulty.nb_mines(),
            started_at: None,
            score: None,
            rng,
            observer,
        }
    }

    /// Board with a known mine layout, already started.
    ///
    /// Used to replay a game or set up a position. Fires `game_started` just
    /// like the lazy placement of the first play.
    pub fn from_layout(
        difficulty: Difficulty,
        observer: O,
        mines: &[(usize, usize)],
    ) -> Result<Self, BoardError> {
        difficulty.validate()?;
        if mines.len() != difficulty.nb_mines() {
            return Err(BoardError::MineCountMismatch {
                expected: difficulty.nb_mines(),
                actual: mines.len(),
            });
        }

        let mut board = Self::with_rng(difficulty, observer, MineRng::from_seed(0));
        for &(x, y) in mines {
            let index = board.index(x, y).ok_or(BoardError::MineOutOfBounds {
                x,
                y,
                width: board.width,
                height: board.height,
            })?;
            if board.tiles[index].is_mine() {
                return Err(BoardError::DuplicateMine { x, y });
            }
            board.tiles[index].set_mine();
        }
        board.start();
        Ok(board)
    }

    // ─── Mine placement ─────────────────────────────────────────────────────

    /// Place the mines uniformly among every tile except `played` and its
    /// neighbors, then start the game.
    fn init_mines(&mut self, played: usize) {
        let mut protected = vec![false; self.tiles.len()];
        protected[played] = true;
        for &n in self.neighbors.get(played) {
            protected[n] = true;
        }

        let candidates: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| !protected[i])
            .collect();

        for index in self.rng.choose_mines(candidates, self.difficulty.nb_mines()) {
            self.tiles[index].set_mine();
        }

        let (x, y) = tile_coords(self.width, played);
        debug!(
            target: "board",
            "placed {} mines on {}x{}, protecting ({}, {})",
            self.difficulty.nb_mines(),
            self.width,
            self.height,
            x,
            y
        );
        self.start();
    }

    fn start(&mut self) {
        self.state = GameState::Active;
        self.hidden_safe = self.tiles.len() - self.difficulty.nb_mines();
        self.started_at = Some(Utc::now());
        self.observer.game_started(self.difficulty);
    }

    // ─── Play ───────────────────────────────────────────────────────────────

    /// Reveal the tile at `(x, y)`, or chord it if it is already revealed.
    ///
    /// The first play of a game places the mines first, keeping the played
    /// tile and its neighbors clear. Returns the tiles revealed by this call,
    /// cascades included, in the order they were revealed.
    pub fn play(&mut self, x: usize, y: usize) -> Vec<Tile> {
        match self.index(x, y) {
            Some(index) => self.play_index(index),
            None => Vec::new(),
        }
    }

    pub fn play_tile(&mut self, tile: Tile) -> Vec<Tile> {
        self.play(tile.x(), tile.y())
    }

    fn play_index(&mut self, index: usize) -> Vec<Tile> {
        if self.state == GameState::Fresh {
            self.init_mines(index);
        }

        let tile = self.tiles[index];
        if tile.is_marked() || self.state.is_over() {
            return Vec::new();
        }

        // Tiles still to open, popped last-in first-out so the reveal order
        // matches a depth-first recursion over the neighbor lists.
        let mut stack: Vec<usize> = if tile.is_revealed() {
            let nb_marked = self
                .neighbors
                .get(index)
                .iter()
                .filter(|&&n| self.tiles[n].is_marked())
                .count();
            if nb_marked != self.mines_around(index) as usize {
                return Vec::new();
            }
            self.neighbors.get(index).iter().rev().copied().collect()
        } else {
            vec![index]
        };

        let mut changed = Vec::new();
        while let Some(i) = stack.pop() {
            let current = &mut self.tiles[i];
            if current.is_revealed() || current.is_marked() {
                continue;
            }
            current.reveal();
            let is_mine = current.is_mine();
            changed.push(i);

            if !is_mine {
                self.hidden_safe -= 1;
            }

            if self.is_game_won() {
                self.finish_won();
                break;
            }
            if is_mine {
                self.finish_lost(i);
                break;
            }
            if self.mines_around(i) == 0 {
                trace!(target: "board", "cascade from {:?}", tile_coords(self.width, i));
                stack.extend(
                    self.neighbors
                        .get(i)
                        .iter()
                        .rev()
                        .copied()
                        .filter(|&n| !self.tiles[n].is_revealed()),
                );
            }
        }

        changed.into_iter().map(|i| self.tiles[i]).collect()
    }

    fn finish_won(&mut self) {
        self.state = GameState::Won;
        let elapsed = self
            .started_at
            .map(|start| (Utc::now() - start).to_std().unwrap_or_default())
            .unwrap_or_default();
        self.score = Some(elapsed);
        info!(target: "board", "{} game won in {:?}", self.difficulty, elapsed);
        self.observer.game_won(self.difficulty, elapsed);
    }

    fn finish_lost(&mut self, mine: usize) {
        self.state = GameState::Lost;
        self.started_at = None;
        info!(
            target: "board",
            "{} game lost on mine at {:?}",
            self.difficulty,
            tile_coords(self.width, mine)
        );
        self.observer.game_lost(self.difficulty);
    }

    // ─── Mark ───────────────────────────────────────────────────────────────

    /// Toggle the mark on an unrevealed tile.
    ///
    /// On a revealed tile whose unrevealed neighbors are exactly as many as
    /// its mine count, marks every one of them that is not marked yet.
    /// Does nothing before the first play or after the game ended.
    pub fn mark(&mut self, x: usize, y: usize) -> Vec<Tile> {
        match self.index(x, y) {
            Some(index) => self.mark_index(index),
            None => Vec::new(),
        }
    }

    pub fn mark_tile(&mut self, tile: Tile) -> Vec<Tile> {
        self.mark(tile.x(), tile.y())
    }

    fn mark_index(&mut self, index: usize) -> Vec<Tile> {
        if self.state != GameState::Active {
            return Vec::new();
        }

        if !self.tiles[index].is_revealed() {
            self.tiles[index].toggle_mark();
            return vec![self.tiles[index]];
        }

        let hidden: Vec<usize> = self
            .neighbors
            .get(index)
            .iter()
            .copied()
            .filter(|&n| !self.tiles[n].is_revealed())
            .collect();
        if hidden.len() != self.mines_around(index) as usize {
            return Vec::new();
        }

        let mut changed = Vec::new();
        for n in hidden {
            if !self.tiles[n].is_marked() {
                self.tiles[n].toggle_mark();
                changed.push(self.tiles[n]);
            }
        }
        changed
    }
}

impl<O> Board<O> {
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nb_mines(&self) -> usize {
        self.difficulty.nb_mines()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mines_initialized(&self) -> bool {
        self.state != GameState::Fresh
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// True once every tile that is not a mine has been revealed.
    pub fn is_game_won(&self) -> bool {
        self.mines_initialized() && self.hidden_safe == 0
    }

    /// When the mines were placed. Cleared when the game is lost.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time from mine placement to the winning reveal.
    pub fn score(&self) -> Option<Duration> {
        self.score
    }

    #[inline]
    pub fn is_in_board(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.is_in_board(x, y).then(|| tile_index(self.width, x, y))
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The up-to-8 tiles around `tile`. Empty for a tile outside the board.
    pub fn neighbors(&self, tile: &Tile) -> impl Iterator<Item = &Tile> + '_ {
        self.index(tile.x(), tile.y())
            .map(|i| self.neighbors.get(i))
            .unwrap_or(&[])
            .iter()
            .map(move |&n| &self.tiles[n])
    }

    pub fn nb_mine_around(&self, tile: &Tile) -> u8 {
        self.neighbors(tile).filter(|t| t.is_mine()).count() as u8
    }

    fn mines_around(&self, index: usize) -> u8 {
        self.neighbors
            .get(index)
            .iter()
            .filter(|&&n| self.tiles[n].is_mine())
            .count() as u8
    }

    pub fn snapshot(&self, tile: &Tile) -> TileSnapshot {
        TileSnapshot {
            x: tile.x(),
            y: tile.y(),
            revealed: tile.is_revealed(),
            marked: tile.is_marked(),
            mine: tile.is_mine(),
            mines_around: self.nb_mine_around(tile),
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}
