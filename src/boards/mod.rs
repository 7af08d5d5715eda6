//! Built-in board layouts.
//!
//! All layouts use the layout notation of [`GameState::parse`](crate::core::GameState::parse).

/// Single player on a five-tile strip. Nobody can win; the game only ends
/// in a stalemate once the player is boxed in.
pub const DEMO: &str = "..0..";

/// Small two-player board.
pub const DUEL: &str = "\
0...
....
....
...1";

/// Two-player board with holes.
pub const CLASSIC: &str = "\
0.......
.##..#..
........
...##...
...##...
........
..#..##.
.......1";

/// Three players around a central pillar.
pub const TRIO: &str = "\
0.....1
.......
...#...
..###..
...#...
.......
...2...";

/// Every built-in board with its name.
pub const ALL: [(&str, &str); 4] = [
    ("demo", DEMO),
    ("duel", DUEL),
    ("classic", CLASSIC),
    ("trio", TRIO),
];

/// Look up a built-in board by name, ignoring case.
///
/// ```
/// use tileshot::boards;
///
/// assert_eq!(boards::by_name("Duel"), Some(boards::DUEL));
/// assert_eq!(boards::by_name("hexagon"), None);
/// ```
#[must_use]
pub fn by_name(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(board, _)| board.eq_ignore_ascii_case(name))
        .map(|(_, layout)| *layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    #[test]
    fn test_all_boards_parse() {
        for (name, layout) in ALL {
            let state = GameState::parse(layout).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(!state.is_game_over(), "{} starts finished", name);
            assert!(!state.is_stalemate(), "{} starts stalemated", name);
        }
    }

    #[test]
    fn test_player_counts() {
        assert_eq!(GameState::parse(DEMO).unwrap().player_count(), 1);
        assert_eq!(GameState::parse(DUEL).unwrap().player_count(), 2);
        assert_eq!(GameState::parse(CLASSIC).unwrap().player_count(), 2);
        assert_eq!(GameState::parse(TRIO).unwrap().player_count(), 3);
    }

    #[test]
    fn test_round_trip_display() {
        for (_, layout) in ALL {
            assert_eq!(GameState::parse(layout).unwrap().to_string(), layout);
        }
    }
}
