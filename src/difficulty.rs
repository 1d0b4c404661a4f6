use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, ParseDifficultyError};
use crate::rng::MineRng;

/// Board size and mine count of a game.
///
/// The presets are fixed; `Custom` lets an embedder pick its own
/// dimensions. Every difficulty must leave room for a mine-free first
/// click and its 8 neighbors, see [`Difficulty::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Insane,
    Custom {
        width: usize,
        height: usize,
        mines: usize,
    },
}

impl Difficulty {
    /// All presets, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Insane,
    ];

    /// `(width, height)` of the board.
    pub fn size(&self) -> (usize, usize) {
        match *self {
            Difficulty::Easy => (9, 9),
            Difficulty::Medium => (8, 12),
            Difficulty::Hard => (10, 14),
            Difficulty::Insane => (12, 16),
            Difficulty::Custom { width, height, .. } => (width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.size().0
    }

    pub fn height(&self) -> usize {
        self.size().1
    }

    pub fn nb_mines(&self) -> usize {
        match *self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 35,
            Difficulty::Insane => 50,
            Difficulty::Custom { mines, .. } => mines,
        }
    }

    /// Check that the mines fit with a 3x3 safe zone left over.
    ///
    /// Sizes or mine counts too large to compute with are rejected too.
    pub fn validate(&self) -> Result<(), BoardError> {
        let (width, height) = self.size();
        let mines = self.nb_mines();
        match (mines.checked_add(9), width.checked_mul(height)) {
            (Some(needed), Some(area)) if needed < area => Ok(()),
            _ => Err(BoardError::TooManyMines {
                width,
                height,
                mines,
            }),
        }
    }

    /// Pick one of the presets uniformly.
    pub fn random(rng: &mut MineRng) -> Difficulty {
        Self::ALL[rng.gen_range(Self::ALL.len())]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("Easy"),
            Difficulty::Medium => f.write_str("Medium"),
            Difficulty::Hard => f.write_str("Hard"),
            Difficulty::Insane => f.write_str("Insane"),
            Difficulty::Custom {
                width,
                height,
                mines,
            } => write!(f, "Custom {}x{} ({} mines)", width, height, mines),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Parse a preset name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for d in Difficulty::ALL {
            assert!(d.validate().is_ok(), "{} should be valid", d);
        }
    }

    #[test]
    fn test_easy_dimensions() {
        assert_eq!(Difficulty::Easy.size(), (9, 9));
        assert_eq!(Difficulty::Easy.nb_mines(), 10);
        assert_eq!(Difficulty::Insane.width(), 12);
        assert_eq!(Difficulty::Insane.height(), 16);
    }

    #[test]
    fn test_custom_too_many_mines() {
        // 4x4 = 16 cells, 16 - 9 = 7, so 7 mines is one too many
        let d = Difficulty::Custom {
            width: 4,
            height: 4,
            mines: 7,
        };
        assert_eq!(
            d.validate(),
            Err(BoardError::TooManyMines {
                width: 4,
                height: 4,
                mines: 7
            })
        );

        let ok = Difficulty::Custom {
            width: 4,
            height: 4,
            mines: 6,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_overflowing_custom_is_rejected() {
        let huge_area = Difficulty::Custom {
            width: usize::MAX,
            height: 2,
            mines: 0,
        };
        assert!(matches!(
            huge_area.validate(),
            Err(BoardError::TooManyMines { .. })
        ));

        let huge_mines = Difficulty::Custom {
            width: 10,
            height: 10,
            mines: usize::MAX,
        };
        assert_eq!(
            huge_mines.validate(),
            Err(BoardError::TooManyMines {
                width: 10,
                height: 10,
                mines: usize::MAX
            })
        );
    }

    #[test]
    fn test_default_is_easy() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("insane".parse::<Difficulty>(), Ok(Difficulty::Insane));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "Expert".parse::<Difficulty>(),
            Err(ParseDifficultyError("Expert".to_string()))
        );
    }

    #[test]
    fn test_display_custom() {
        let d = Difficulty::Custom {
            width: 30,
            height: 16,
            mines: 99,
        };
        assert_eq!(d.to_string(), "Custom 30x16 (99 mines)");
    }

    #[test]
    fn test_random_is_a_preset() {
        let mut rng = MineRng::from_seed(9);
        for _ in 0..50 {
            assert!(Difficulty::ALL.contains(&Difficulty::random(&mut rng)));
        }
    }

    #[test]
    fn test_deserialize_from_config() {
        let d: Difficulty =
            serde_json::from_str(r#"{"Custom":{"width":16,"height":16,"mines":40}}"#).unwrap();
        assert_eq!(d.size(), (16, 16));
        assert_eq!(d.nb_mines(), 40);

        let easy: Difficulty = serde_json::from_str(r#""Easy""#).unwrap();
        assert_eq!(easy, Difficulty::Easy);
    }
}
