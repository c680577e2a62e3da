//! Minesweeper board engine.
//!
//! A [`Board`] is set up either from an explicit text pattern or randomly, with mines laid out
//! on the first reveal so that move is always safe. Moves are [`Board::reveal`],
//! [`Board::toggle_flag`] and [`Board::chord_reveal`]; each either applies completely or fails
//! with a [`GameError`] and leaves the board untouched.
//!
//! ```
//! use sweeper_core::{Board, GameState};
//!
//! let mut board = Board::from_pattern("*..\n...\n...").unwrap();
//! board.toggle_flag((0, 0)).unwrap();
//! let outcome = board.reveal((2, 2)).unwrap();
//!
//! assert_eq!(outcome.state, GameState::Won);
//! assert_eq!(board.remaining_mines(), 0);
//! ```

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use pattern::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod layout;
mod pattern;
mod types;
