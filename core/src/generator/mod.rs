use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much protection the first revealed cell gets when mines are laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    /// No protection, the first cell may be a mine.
    ///
    /// Only used when asked for explicitly: [`Board::random`] never picks it and the crowded-board
    /// fallback stops at [`StartTile::SimpleSafe`].
    Random,
    /// The first cell is never a mine.
    SimpleSafe,
    /// Neither the first cell nor any of its neighbors is a mine, so the first reveal cascades.
    #[default]
    AlwaysZero,
}
