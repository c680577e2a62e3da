use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// Snapshot of one cell as reported to callers.
///
/// `has_mine` is only disclosed once the cell is revealed or the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInfo {
    pub state: CellState,
    pub adjacent_mines: u8,
    pub has_mine: Option<bool>,
}

/// Census of every cell by mine content and state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTally {
    pub revealed_safe: CellCount,
    pub hidden_safe: CellCount,
    pub flagged_safe: CellCount,
    pub revealed_mines: CellCount,
    pub hidden_mines: CellCount,
    pub flagged_mines: CellCount,
}

impl CellTally {
    pub fn record(&mut self, state: CellState, has_mine: bool) {
        let slot = match (has_mine, state) {
            (false, CellState::Revealed) => &mut self.revealed_safe,
            (false, CellState::Hidden) => &mut self.hidden_safe,
            (false, CellState::Flagged) => &mut self.flagged_safe,
            (true, CellState::Revealed) => &mut self.revealed_mines,
            (true, CellState::Hidden) => &mut self.hidden_mines,
            (true, CellState::Flagged) => &mut self.flagged_mines,
        };
        *slot += 1;
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.revealed_safe + self.hidden_safe + self.flagged_safe
    }

    pub const fn mines(&self) -> CellCount {
        self.revealed_mines + self.hidden_mines + self.flagged_mines
    }

    pub const fn total_cells(&self) -> CellCount {
        self.safe_cells() + self.mines()
    }
}
