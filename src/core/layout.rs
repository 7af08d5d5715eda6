//! Board layout parsing.
//!
//! A layout is a rectangular grid written row-major, one row per line,
//! rows joined by `\n`:
//!
//! - `.` enabled, empty tile
//! - `#` disabled tile
//! - `0`-`9` enabled tile occupied by the player with that index
//!
//! Every row must have the same length and player indices must be
//! contiguous from 0.
//!
//! ```
//! use tileshot::core::{layout, Coord};
//!
//! let parsed = layout::parse("..0\n#1.").unwrap();
//! assert_eq!((parsed.width, parsed.height), (3, 2));
//! assert_eq!(parsed.players, vec![Coord::new(2, 0), Coord::new(1, 1)]);
//! assert_eq!(parsed.tiles, vec![true, false, true, true, true, true]);
//! ```

use super::coord::Coord;
use super::error::{LayoutProblem, Result};
use super::player::MAX_PLAYERS;

/// A parsed layout, before it becomes a [`GameState`](super::GameState).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLayout {
    pub width: usize,
    pub height: usize,
    /// Enabled flags, column-major: index `column * height + row`.
    pub tiles: Vec<bool>,
    /// Player start positions in player order.
    pub players: Vec<Coord>,
}

/// Parse a layout string.
pub fn parse(layout: &str) -> Result<ParsedLayout> {
    let rows: Vec<&str> = layout.split('\n').collect();
    let width = rows[0].chars().count();
    let height = rows.len();
    if width == 0 {
        return Err(LayoutProblem::Empty.into());
    }

    let mut tiles = vec![false; width * height];
    let mut slots: [Option<Coord>; MAX_PLAYERS] = [None; MAX_PLAYERS];

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutProblem::RaggedRow {
                line: row + 1,
                expected: width,
                found,
            }
            .into());
        }

        for (column, character) in line.chars().enumerate() {
            let enabled = match character {
                '.' => true,
                '#' => false,
                '0'..='9' => {
                    let player = character as u8 - b'0';
                    let slot = &mut slots[player as usize];
                    if slot.is_some() {
                        return Err(LayoutProblem::DuplicatePlayer {
                            player,
                            line: row + 1,
                            column: column + 1,
                        }
                        .into());
                    }
                    *slot = Some(Coord::new(column as i32, row as i32));
                    true
                }
                other => {
                    return Err(LayoutProblem::UnknownCharacter {
                        character: other,
                        line: row + 1,
                        column: column + 1,
                    }
                    .into());
                }
            };
            tiles[column * height + row] = enabled;
        }
    }

    let player_count = slots.iter().rposition(Option::is_some).map_or(0, |last| last + 1);
    if player_count == 0 {
        return Err(LayoutProblem::NoPlayers.into());
    }
    let mut players = Vec::with_capacity(player_count);
    for (index, slot) in slots[..player_count].iter().enumerate() {
        match slot {
            Some(coord) => players.push(*coord),
            None => return Err(LayoutProblem::MissingPlayer(index as u8).into()),
        }
    }

    Ok(ParsedLayout {
        width,
        height,
        tiles,
        players,
    })
}
