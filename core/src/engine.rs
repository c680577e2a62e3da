use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Whether the mines of a board have been laid out yet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MinePhase<'a> {
    /// Random board waiting for its first reveal.
    Pending { seed: u64, start_tile: StartTile },
    Placed(&'a MineLayout),
}

/// Seed and first-click protection used to lay out the mines of a random board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct MinePlacement {
    seed: u64,
    start_tile: StartTile,
}

/// Result of a successful [`Board::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    pub cell: CellState,
    pub adjacent_mines: u8,
    pub state: GameState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    placement: MinePlacement,
    /// `None` until the first reveal of a random board.
    layout: Option<MineLayout>,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Board with a fixed mine layout.
    pub fn new(mine_layout: MineLayout) -> Self {
        let config = mine_layout.game_config();
        log::debug!(
            "New board {:?} with {} mines from layout",
            config.size,
            config.mines
        );
        Self::with_mines(config, MinePlacement::default(), Some(mine_layout))
    }

    pub fn from_pattern(text: &str) -> Result<Self> {
        Ok(Self::new(text.parse()?))
    }

    /// Random board whose mines are laid out on the first reveal, keeping that cell and its
    /// neighbors clear when there is room.
    pub fn random(config: GameConfig) -> Self {
        Self::random_seeded(config, rand::random(), StartTile::default())
    }

    /// Like [`Board::random`] with a fixed seed and first-click protection.
    ///
    /// [`StartTile::Random`] opts out of protection, so the first reveal may hit a mine.
    pub fn random_seeded(config: GameConfig, seed: u64, start_tile: StartTile) -> Self {
        let config = GameConfig::new(config.size, config.mines);
        log::debug!(
            "New board {:?} with {} mines pending first reveal",
            config.size,
            config.mines
        );
        Self::with_mines(config, MinePlacement { seed, start_tile }, None)
    }

    fn with_mines(
        config: GameConfig,
        placement: MinePlacement,
        layout: Option<MineLayout>,
    ) -> Self {
        Self {
            config,
            placement,
            layout,
            cells: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
            triggered_mine: None,
        }
    }

    /// Discards all progress and returns to a fresh random board of the same size and mine
    /// count, with mines laid out again on the next reveal.
    pub fn reset(&mut self) {
        *self = Self::random_seeded(self.config, rand::random(), self.placement.start_tile);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flagged_count
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus flags. Goes negative when more cells are flagged than there are mines.
    pub fn remaining_mines(&self) -> i64 {
        i64::from(self.total_mines()) - i64::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_placed(&self) -> bool {
        self.layout.is_some()
    }

    pub fn phase(&self) -> MinePhase<'_> {
        match &self.layout {
            Some(layout) => MinePhase::Placed(layout),
            None => MinePhase::Pending {
                seed: self.placement.seed,
                start_tile: self.placement.start_tile,
            },
        }
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn cell_info(&self, coords: Coord2) -> Result<CellInfo> {
        let state = self.cell_at(coords)?;
        let (adjacent_mines, has_mine) = match self.mine_layout() {
            Some(layout) => (
                layout.adjacent_mine_count(coords),
                layout.contains_mine(coords),
            ),
            None => (0, false),
        };
        let disclosed = state == CellState::Revealed || self.is_finished();

        Ok(CellInfo {
            state,
            adjacent_mines,
            has_mine: disclosed.then_some(has_mine),
        })
    }

    /// Counts cells by mine content and state.
    pub fn tally(&self) -> CellTally {
        let mut tally = CellTally::default();
        for ((row, col), &state) in self.cells.indexed_iter() {
            let has_mine = self
                .mine_layout()
                .is_some_and(|layout| layout[(row as Coord, col as Coord)]);
            tally.record(state, has_mine);
        }
        tally
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        match self.cells[coords.to_nd_index()] {
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Ok(true)
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Ok(false)
            }
            Revealed => Err(GameError::InvalidCellState),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;
        if self.cells[coords.to_nd_index()] != CellState::Hidden {
            return Err(GameError::InvalidCellState);
        }

        let layout = Self::place_mines(&mut self.layout, self.config, self.placement, coords);
        let safe = Self::open_cell(layout, &mut self.cells, &mut self.revealed_count, coords);
        let adjacent_mines = layout.adjacent_mine_count(coords);

        if !safe {
            self.lose(coords);
        }
        self.evaluate_win();

        Ok(RevealOutcome {
            cell: self.cells[coords.to_nd_index()],
            adjacent_mines,
            state: self.state,
        })
    }

    /// Reveals every hidden neighbor of a revealed cell whose flagged neighbors match its number.
    ///
    /// Returns `Ok(false)` without touching the board when the flag count does not match.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;
        if self.cells[coords.to_nd_index()] != CellState::Revealed {
            return Err(GameError::InvalidCellState);
        }

        // a revealed cell implies the mines are placed
        let Some(layout) = &self.layout else {
            return Err(GameError::InvalidCellState);
        };
        if self.count_flagged_neighbors(coords) != layout.adjacent_mine_count(coords) {
            return Ok(false);
        }

        let mut hit_mine = None;
        for neighbor in layout.iter_neighbors(coords) {
            if self.cells[neighbor.to_nd_index()] != CellState::Hidden {
                continue;
            }
            if !Self::open_cell(layout, &mut self.cells, &mut self.revealed_count, neighbor) {
                hit_mine = Some(neighbor);
                break;
            }
        }

        if let Some(mine) = hit_mine {
            self.lose(mine);
        }
        self.evaluate_win();

        Ok(true)
    }

    /// Lays out pending mines around the first revealed cell.
    fn place_mines(
        layout: &mut Option<MineLayout>,
        config: GameConfig,
        placement: MinePlacement,
        start: Coord2,
    ) -> &MineLayout {
        layout.get_or_insert_with(|| {
            RandomMinefieldGenerator::new(placement.seed, start, placement.start_tile)
                .generate(config)
        })
    }

    /// Reveals a hidden cell, flooding outwards from zero-count cells.
    ///
    /// Returns `false` when the cell was a mine.
    fn open_cell(
        layout: &MineLayout,
        cells: &mut Array2<CellState>,
        revealed_count: &mut CellCount,
        coords: Coord2,
    ) -> bool {
        cells[coords.to_nd_index()] = CellState::Revealed;
        *revealed_count += 1;

        if layout.contains_mine(coords) {
            return false;
        }

        let adjacent_mines = layout.adjacent_mine_count(coords);
        log::trace!("Revealed cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            Self::cascade(layout, cells, revealed_count, coords);
        }
        true
    }

    /// Breadth-first flood fill from a revealed zero-count cell.
    ///
    /// Only hidden cells are opened, so the one-way `Hidden -> Revealed` transition doubles as
    /// the visited set. Flagged cells stop the flood.
    fn cascade(
        layout: &MineLayout,
        cells: &mut Array2<CellState>,
        revealed_count: &mut CellCount,
        origin: Coord2,
    ) {
        let mut to_visit = VecDeque::from([origin]);
        let mut opened = 0;

        while let Some(visit_coords) = to_visit.pop_front() {
            for neighbor in layout.iter_neighbors(visit_coords) {
                if cells[neighbor.to_nd_index()] != CellState::Hidden {
                    continue;
                }

                debug_assert!(!layout.contains_mine(neighbor));
                cells[neighbor.to_nd_index()] = CellState::Revealed;
                *revealed_count += 1;
                opened += 1;

                if layout.adjacent_mine_count(neighbor) == 0 {
                    to_visit.push_back(neighbor);
                }
            }
        }

        log::trace!("Flood-fill from {:?} opened {} cells", origin, opened);
    }

    fn lose(&mut self, mine: Coord2) {
        log::debug!("Mine hit at {:?}, game lost", mine);
        self.triggered_mine = Some(mine);
        self.end_game(GameState::Lost);
    }

    /// Moves to `Won` once every safe cell is revealed.
    fn evaluate_win(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        let Some(safe_cells) = self.mine_layout().map(MineLayout::safe_cell_count) else {
            return;
        };
        debug_assert_eq!(
            self.revealed_count == safe_cells,
            self.all_safe_cells_revealed()
        );

        if self.revealed_count == safe_cells {
            log::debug!("All {} safe cells revealed, game won", safe_cells);
            self.end_game(GameState::Won);
        }
    }

    fn all_safe_cells_revealed(&self) -> bool {
        let Some(layout) = self.mine_layout() else {
            return false;
        };
        self.cells.indexed_iter().all(|((row, col), &state)| {
            layout[(row as Coord, col as Coord)] || state == CellState::Revealed
        })
    }

    /// Finishes the game and discloses the whole board.
    ///
    /// Disclosure does not touch the counters, which keep describing the moves that were played.
    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        self.cells.fill(CellState::Revealed);
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()] == CellState::Flagged)
            .count() as u8
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
