use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally try to make the starting tile zero or at least safe, but other than that is
/// purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }

    /// Cells kept free of mines for the given strategy.
    fn protected_cells(&self, size: Coord2, start_tile: StartTile) -> Vec<Coord2> {
        match start_tile {
            StartTile::Random => Vec::new(),
            StartTile::SimpleSafe => vec![self.start],
            StartTile::AlwaysZero => core::iter::once(self.start)
                .chain(NeighborIter::new(self.start, size))
                .collect(),
        }
    }

    /// Falls back from `AlwaysZero` to `SimpleSafe` when the mines do not fit around the start.
    ///
    /// `SimpleSafe` always fits: full boards never get here.
    fn effective_start_tile(&self, config: GameConfig) -> StartTile {
        use StartTile::*;

        let fits = |tile| {
            let protected = self.protected_cells(config.size, tile).len() as CellCount;
            config.mines + protected <= config.total_cells()
        };

        match self.start_tile {
            Random => Random,
            SimpleSafe => SimpleSafe,
            AlwaysZero if !fits(AlwaysZero) => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let start_tile = self.effective_start_tile(config);
        let protected = self.protected_cells(config.size, start_tile);

        let (rows, cols) = config.size;
        let candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|coords| !protected.contains(coords))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        for index in rand::seq::index::sample(&mut rng, candidates.len(), config.mines as usize) {
            mines[candidates[index].to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "Placed {} mines on {:?} board, start {:?} kept {:?}",
            layout.mine_count(),
            config.size,
            self.start,
            start_tile
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: GameConfig, seed: u64, start: Coord2, start_tile: StartTile) -> MineLayout {
        RandomMinefieldGenerator::new(seed, start, start_tile).generate(config)
    }

    #[test]
    fn places_requested_mine_count() {
        for seed in 0..20 {
            let layout = generate(Difficulty::Expert.config(), seed, (5, 7), StartTile::AlwaysZero);

            assert_eq!(layout.mine_count(), 99);
            assert_eq!(layout.mine_coords().count(), 99);
        }
    }

    #[test]
    fn always_zero_keeps_start_and_neighbors_clear() {
        for seed in 0..50 {
            let layout = generate(GameConfig::new((9, 9), 40), seed, (4, 4), StartTile::AlwaysZero);

            assert!(!layout.contains_mine((4, 4)));
            assert_eq!(layout.adjacent_mine_count((4, 4)), 0);
        }
    }

    #[test]
    fn simple_safe_keeps_only_start_clear() {
        for seed in 0..50 {
            let layout = generate(GameConfig::new((3, 3), 8), seed, (0, 0), StartTile::SimpleSafe);

            assert!(!layout.contains_mine((0, 0)));
            assert_eq!(layout.mine_count(), 8);
        }
    }

    #[test]
    fn crowded_board_falls_back_to_simple_safe() {
        // 3x3 with the start in the corner protects 4 cells, leaving room for only 5 mines
        let layout = generate(GameConfig::new((3, 3), 6), 7, (0, 0), StartTile::AlwaysZero);

        assert_eq!(layout.mine_count(), 6);
        assert!(!layout.contains_mine((0, 0)));
    }

    #[test]
    fn start_cell_stays_clear_with_one_free_cell_left() {
        let config = GameConfig::new((3, 4), 11);

        for start in NeighborIter::new((1, 1), (3, 4)).chain([(1, 1)]) {
            for start_tile in [StartTile::SimpleSafe, StartTile::AlwaysZero] {
                let layout = generate(config, 5, start, start_tile);

                assert_eq!(layout.mine_count(), 11);
                assert!(!layout.contains_mine(start), "{start:?} {start_tile:?}");
            }
        }
    }

    #[test]
    fn random_start_tile_is_never_upgraded() {
        let config = GameConfig::new((3, 3), 8);
        let generator = RandomMinefieldGenerator::new(0, (1, 1), StartTile::Random);

        assert_eq!(generator.effective_start_tile(config), StartTile::Random);
        assert!(generator.protected_cells(config.size, StartTile::Random).is_empty());
    }

    #[test]
    fn corner_start_uses_fewer_protected_cells() {
        // 4 protected cells in the corner leave exactly 5 slots for 5 mines
        let layout = generate(GameConfig::new((3, 3), 5), 3, (0, 0), StartTile::AlwaysZero);

        assert_eq!(layout.adjacent_mine_count((0, 0)), 0);
        assert_eq!(layout.mine_count(), 5);
    }

    #[test]
    fn full_board_is_all_mines() {
        let layout = generate(GameConfig::new((2, 2), 4), 0, (0, 0), StartTile::AlwaysZero);

        assert_eq!(layout.mine_count(), 4);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Intermediate.config();

        assert_eq!(
            generate(config, 42, (8, 8), StartTile::AlwaysZero),
            generate(config, 42, (8, 8), StartTile::AlwaysZero)
        );
    }
}
