//! Minesweeper board engine.
//!
//! A [`Board`] owns a fixed grid of [`Tile`]s and runs one game on it:
//! mines are placed lazily on the first play (never under or around the
//! played tile), revealing a zero opens its whole region, playing a
//! satisfied number chords its remaining neighbors, and the game ends the
//! moment the last safe tile or any mine is revealed.
//!
//! Lifecycle events go to an injected [`GameObserver`]; the engine does no
//! I/O of its own. On wasm32 the board is also exported to JavaScript.

pub mod board;
pub mod difficulty;
pub mod error;
pub mod observer;
pub mod rng;
pub mod stats;
pub mod tile;
pub mod types;

pub use board::Board;
pub use difficulty::Difficulty;
pub use error::{BoardError, ParseDifficultyError};
pub use observer::{GameEvent, GameObserver};
pub use rng::MineRng;
pub use stats::{leaderboard_score, DifficultyStats, GameCounter};
pub use tile::{Tile, TileSnapshot};
pub use types::GameState;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use std::time::Duration;
    use wasm_bindgen::prelude::*;

    use crate::{Board, Difficulty, GameObserver, GameState, Tile, TileSnapshot};

    /// Forwards lifecycle events to optional JS callbacks.
    #[derive(Default)]
    struct JsObserver {
        on_started: Option<js_sys::Function>,
        on_won: Option<js_sys::Function>,
        on_lost: Option<js_sys::Function>,
    }

    fn notify(callback: &Option<js_sys::Function>, args: &[JsValue]) {
        let Some(f) = callback else { return };
        let array: js_sys::Array = args.iter().collect();
        if let Err(err) = f.apply(&JsValue::NULL, &array) {
            log::warn!(target: "wasm", "observer callback threw: {:?}", err);
        }
    }

    impl GameObserver for JsObserver {
        fn game_started(&mut self, difficulty: Difficulty) {
            notify(&self.on_started, &[difficulty.to_string().into()]);
        }

        fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
            notify(
                &self.on_won,
                &[difficulty.to_string().into(), elapsed.as_secs_f64().into()],
            );
        }

        fn game_lost(&mut self, difficulty: Difficulty) {
            notify(&self.on_lost, &[difficulty.to_string().into()]);
        }
    }

    /// A board driven from JavaScript.
    ///
    /// `play` and `mark` return an array of `{ x, y, revealed, marked, mine,
    /// minesAround }` objects for the tiles that changed.
    #[wasm_bindgen(js_name = "Board")]
    pub struct WasmBoard {
        inner: Board<JsObserver>,
    }

    impl WasmBoard {
        fn build(difficulty: Difficulty) -> Result<WasmBoard, JsError> {
            difficulty.validate()?;
            Ok(WasmBoard {
                inner: Board::with_observer(difficulty, JsObserver::default()),
            })
        }

        fn changes(&self, tiles: &[Tile]) -> Result<JsValue, JsError> {
            let snapshots: Vec<TileSnapshot> =
                tiles.iter().map(|t| self.inner.snapshot(t)).collect();
            Ok(serde_wasm_bindgen::to_value(&snapshots)?)
        }
    }

    #[wasm_bindgen(js_class = "Board")]
    impl WasmBoard {
        /// New board for a preset name (`"Easy"`, `"Medium"`, `"Hard"`, `"Insane"`).
        #[wasm_bindgen(constructor)]
        pub fn new(difficulty: &str) -> Result<WasmBoard, JsError> {
            Self::build(difficulty.parse()?)
        }

        pub fn custom(width: usize, height: usize, mines: usize) -> Result<WasmBoard, JsError> {
            Self::build(Difficulty::Custom {
                width,
                height,
                mines,
            })
        }

        pub fn play(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
            let changed = match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) => self.inner.play(x, y),
                _ => Vec::new(),
            };
            self.changes(&changed)
        }

        pub fn mark(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
            let changed = match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) => self.inner.mark(x, y),
                _ => Vec::new(),
            };
            self.changes(&changed)
        }

        /// Full board, row-major.
        pub fn tiles(&self) -> Result<JsValue, JsError> {
            self.changes(self.inner.tiles())
        }

        pub fn state(&self) -> String {
            match self.inner.state() {
                GameState::Fresh => "fresh",
                GameState::Active => "active",
                GameState::Won => "won",
                GameState::Lost => "lost",
            }
            .to_string()
        }

        #[wasm_bindgen(getter)]
        pub fn width(&self) -> usize {
            self.inner.width()
        }

        #[wasm_bindgen(getter)]
        pub fn height(&self) -> usize {
            self.inner.height()
        }

        #[wasm_bindgen(getter, js_name = "nbMines")]
        pub fn nb_mines(&self) -> usize {
            self.inner.nb_mines()
        }

        #[wasm_bindgen(js_name = "isGameWon")]
        pub fn is_game_won(&self) -> bool {
            self.inner.is_game_won()
        }

        /// Elapsed seconds of a won game, or `undefined`.
        pub fn score(&self) -> Option<f64> {
            self.inner.score().map(|d| d.as_secs_f64())
        }

        #[wasm_bindgen(js_name = "onGameStarted")]
        pub fn on_game_started(&mut self, callback: js_sys::Function) {
            self.inner.observer_mut().on_started = Some(callback);
        }

        #[wasm_bindgen(js_name = "onGameWon")]
        pub fn on_game_won(&mut self, callback: js_sys::Function) {
            self.inner.observer_mut().on_won = Some(callback);
        }

        #[wasm_bindgen(js_name = "onGameLost")]
        pub fn on_game_lost(&mut self, callback: js_sys::Function) {
            self.inner.observer_mut().on_lost = Some(callback);
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM board ready".to_string()
    }
}
