//! Text format for explicit boards.
//!
//! One line per row, `*` for a mine and any other visible character for a safe cell:
//!
//! ```text
//! *..
//! .*.
//! ..*
//! ```
//!
//! Surrounding whitespace on each line and blank lines are ignored. Rows must all be the same
//! length and may not contain whitespace.

use core::fmt;
use core::str::FromStr;

use ndarray::Array2;

use crate::*;

pub const MINE_MARKER: char = '*';
pub const SAFE_MARKER: char = '.';

pub fn parse_pattern(text: &str) -> core::result::Result<MineLayout, PatternError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(first) = rows.first() else {
        return Err(PatternError::Empty);
    };
    let width = first.chars().count();

    let mut mines = Vec::with_capacity(rows.len() * width);
    for (row, line) in rows.iter().enumerate() {
        let mut found = 0;
        for (col, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                return Err(PatternError::EmbeddedWhitespace { row, col });
            }
            mines.push(ch == MINE_MARKER);
            found += 1;
        }
        if found != width {
            return Err(PatternError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }
    }

    if Coord::try_from(rows.len()).is_err() || Coord::try_from(width).is_err() {
        return Err(PatternError::TooLarge);
    }

    let mine_mask =
        Array2::from_shape_vec((rows.len(), width), mines).map_err(|_| PatternError::TooLarge)?;
    Ok(MineLayout::from_mine_mask(mine_mask))
}

impl MineLayout {
    /// Renders the layout in the pattern format, with `.` for safe cells and no trailing newline.
    pub fn to_pattern(&self) -> String {
        self.to_string()
    }
}

impl FromStr for MineLayout {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(parse_pattern(s)?)
    }
}

impl fmt::Display for MineLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        for row in 0..rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..cols {
                let marker = if self[(row, col)] {
                    MINE_MARKER
                } else {
                    SAFE_MARKER
                };
                write!(f, "{marker}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_pattern_places_exact_mines() {
        let layout = parse_pattern("*..\n.*.\n..*").unwrap();

        assert_eq!(layout.size(), (3, 3));
        assert_eq!(layout.mine_count(), 3);
        assert_eq!(
            layout.mine_coords().collect::<Vec<_>>(),
            vec![(0, 0), (1, 1), (2, 2)]
        );
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 1);
    }

    #[test]
    fn center_mine_gives_every_neighbor_one() {
        let layout = parse_pattern("...\n.*.\n...").unwrap();

        for coords in NeighborIter::new((1, 1), (3, 3)) {
            assert_eq!(layout.adjacent_mine_count(coords), 1);
        }
        assert_eq!(layout.adjacent_mine_count((1, 1)), 0);
    }

    #[test]
    fn any_non_mine_character_is_safe() {
        let layout = parse_pattern("ab*\nc#.").unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert!(layout[(0, 2)]);
    }

    #[test]
    fn surrounding_whitespace_and_blank_lines_are_ignored() {
        let layout = parse_pattern("\n   *.\r\n\n   .*  \n\n").unwrap();

        assert_eq!(layout.size(), (2, 2));
        assert_eq!(layout.to_pattern(), "*.\n.*");
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(parse_pattern(""), Err(PatternError::Empty));
        assert_eq!(parse_pattern(" \n\t\n"), Err(PatternError::Empty));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            parse_pattern("...\n..\n..."),
            Err(PatternError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn embedded_whitespace_is_rejected() {
        assert_eq!(
            parse_pattern("*..\n. *"),
            Err(PatternError::EmbeddedWhitespace { row: 1, col: 1 })
        );
    }

    #[test]
    fn from_str_wraps_pattern_errors() {
        assert_eq!(
            "".parse::<MineLayout>(),
            Err(GameError::MalformedPattern(PatternError::Empty))
        );
    }

    #[test]
    fn rendering_round_trips() {
        let text = "*...*\n.....\n..*..";
        let layout: MineLayout = text.parse().unwrap();

        assert_eq!(layout.to_pattern(), text);
        assert_eq!(layout.to_pattern().parse::<MineLayout>().unwrap(), layout);
    }
}
