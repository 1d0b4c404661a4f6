//! Error types for board configuration and mine layouts.
//!
//! Gameplay never fails: out-of-range coordinates and illegal moves are
//! no-ops. Errors only describe a bad configuration handed to the engine.

/// Invalid board configuration or mine layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{mines} mines do not fit a {width}x{height} board (need mines + 9 < width * height)")]
    TooManyMines {
        width: usize,
        height: usize,
        mines: usize,
    },

    #[error("mine at ({x}, {y}) is outside the {width}x{height} board")]
    MineOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("duplicate mine at ({x}, {y})")]
    DuplicateMine { x: usize, y: usize },

    #[error("layout has {actual} mines, difficulty expects {expected}")]
    MineCountMismatch { expected: usize, actual: usize },
}

/// Unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: '{0}'")]
pub struct ParseDifficultyError(pub String);
