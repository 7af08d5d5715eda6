//! Game state rules tests.
//!
//! Scenario tests on small hand-written boards, then property tests over
//! randomly generated layouts.

use proptest::prelude::*;
use tileshot::core::{Coord, Error, GameResult, GameRng, GameState, LayoutProblem, Phase, PlayerId};

fn sorted(moves: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut moves: Vec<_> = moves.into_iter().collect();
    moves.sort();
    moves
}

fn c(column: i32, row: i32) -> Coord {
    Coord::new(column, row)
}

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_rejects_unknown_character() {
    let err = GameState::parse("0.x\n..1").unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedLayout(LayoutProblem::UnknownCharacter { character: 'x', .. })
    ));
}

#[test]
fn test_parse_rejects_ragged_rows() {
    let err = GameState::parse("0..\n.1").unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedLayout(LayoutProblem::RaggedRow { .. })
    ));
}

#[test]
fn test_parse_rejects_gap_in_players() {
    let err = GameState::parse("0.2").unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedLayout(LayoutProblem::MissingPlayer(1))
    ));
}

#[test]
fn test_parse_starts_with_first_player_moving() {
    let state = GameState::parse("#0\n1.").unwrap();

    assert_eq!(state.player_count(), 2);
    assert_eq!(state.current_player(), P0);
    assert_eq!(state.phase(), Phase::Move);
    assert_eq!(state.player_position(P0), c(1, 0));
    assert_eq!(state.player_position(P1), c(0, 1));
    assert!(!state.is_enabled(c(0, 0)));
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_demo_board_moves() {
    // Both horizontal rays run to the grid edge.
    let state = GameState::parse("..0..").unwrap();
    assert_eq!(
        sorted(state.valid_moves(P0)),
        vec![c(0, 0), c(1, 0), c(3, 0), c(4, 0)]
    );
}

#[test]
fn test_rays_stop_at_holes_and_players() {
    let state = GameState::parse(
        "\
.....
.#...
..0.1
.....
.....",
    )
    .unwrap();

    let moves = state.valid_moves(P0);
    // West ray.
    assert!(moves.contains(&c(1, 2)) && moves.contains(&c(0, 2)));
    // North-west ray blocked at once by the hole.
    assert!(!moves.contains(&c(1, 1)) && !moves.contains(&c(0, 0)));
    // East ray stops before the opponent.
    assert!(moves.contains(&c(3, 2)));
    assert!(!moves.contains(&c(4, 2)));
    // Knight jumps are never moves.
    assert!(!moves.contains(&c(3, 0)));
    assert_eq!(moves.len(), 13);
}

#[test]
fn test_apply_move_then_shoot() {
    let state = GameState::parse("0..\n...\n..1").unwrap();

    let moved = state.apply(c(1, 0)).unwrap();
    assert_eq!(moved.player_position(P0), c(1, 0));
    assert_eq!(moved.phase(), Phase::Shoot);
    assert_eq!(moved.current_player(), P0);

    let shot = moved.apply(c(0, 0)).unwrap();
    assert!(!shot.is_enabled(c(0, 0)));
    assert_eq!(shot.phase(), Phase::Move);
    assert_eq!(shot.current_player(), P1);

    // Earlier states are untouched.
    assert_eq!(state.to_string(), "0..\n...\n..1");
    assert_eq!(moved.to_string(), ".0.\n...\n..1");
    assert_eq!(shot.to_string(), "#0.\n...\n..1");
}

#[test]
fn test_apply_rejects_illegal_targets() {
    let state = GameState::parse("0.1").unwrap();

    for target in [c(2, 0), c(0, 0), c(7, 0), c(-1, 0), c(1, 1)] {
        assert!(!state.is_valid_move(target));
        assert!(matches!(
            state.apply(target),
            Err(Error::IllegalMove { phase: Phase::Move, .. })
        ));
    }
}

#[test]
fn test_three_players_rotate() {
    let mut state = GameState::parse("0...\n....\n1..2").unwrap();
    let expected = [P0, P1, PlayerId::new(2), P0];

    for &player in &expected[..3] {
        assert_eq!(state.current_player(), player);
        let mover = state.current_player();
        let target = sorted(state.valid_moves(mover))[0];
        state = state.apply(target).unwrap();
        let shot = sorted(state.valid_moves(mover))[0];
        state = state.apply(shot).unwrap();
    }
    assert_eq!(state.current_player(), expected[3]);
}

// =============================================================================
// Connectivity and the end of the game
// =============================================================================

#[test]
fn test_isolation_by_shot_wins() {
    let state = GameState::parse(".01.").unwrap();
    assert!(!state.is_game_over());

    let state = state.apply(c(0, 0)).unwrap().apply(c(1, 0)).unwrap();

    assert!(state.is_game_over());
    assert!(!state.is_stalemate());
    assert_eq!(state.reachable_tiles(P0).len(), 1);
    assert_eq!(state.reachable_tiles(P1).len(), 2);
    assert_eq!(state.is_draw(), Ok(false));
    assert_eq!(state.winning_player(), Ok(P1));
    assert_eq!(state.result(), Some(GameResult::Winner(P1)));
}

#[test]
fn test_isolation_by_shot_draws() {
    let state = GameState::parse("..01.").unwrap();
    let state = state.apply(c(1, 0)).unwrap().apply(c(2, 0)).unwrap();

    assert!(state.is_game_over());
    assert_eq!(state.is_draw(), Ok(true));
    assert!(matches!(state.winning_player(), Err(Error::IllegalState(_))));
    assert_eq!(state.result(), Some(GameResult::Draw(vec![P0, P1])));
}

#[test]
fn test_boxed_in_player_is_stalemated() {
    let state = GameState::parse("01").unwrap();

    assert!(state.valid_moves(P0).is_empty());
    assert!(!state.is_game_over());
    assert!(state.is_stalemate());
}

#[test]
fn test_connected_board_has_no_unreachable_tiles() {
    let state = GameState::parse("0.1").unwrap();

    assert!(state.unreachable_enabled_tiles().is_empty());
    assert!(!state.is_stalemate());
    assert!(!state.is_game_over());
}

#[test]
fn test_unreachable_tiles_and_territories() {
    let state = GameState::parse(
        "\
0.#.
..#.
###.
1#..",
    )
    .unwrap();

    assert!(state.is_game_over());
    let territories = state.territories();
    assert_eq!(territories[P0].len(), 4);
    assert_eq!(territories[P1].len(), 1);
    assert_eq!(
        sorted(state.unreachable_enabled_tiles()),
        vec![c(2, 3), c(3, 0), c(3, 1), c(3, 2), c(3, 3)]
    );
    assert_eq!(state.winning_player(), Ok(P0));
}

#[test]
fn test_diagonal_gap_keeps_players_connected() {
    let state = GameState::parse("0#\n#1").unwrap();

    assert!(state.reachable_tiles(P0).contains(&c(1, 1)));
    assert!(!state.is_game_over());
}

#[test]
fn test_end_checks_require_finished_game() {
    let state = GameState::parse("0..1").unwrap();

    assert!(matches!(state.is_draw(), Err(Error::IllegalState(_))));
    assert!(matches!(state.winning_player(), Err(Error::IllegalState(_))));
    assert_eq!(state.result(), None);
}

#[test]
fn test_single_player_never_over() {
    let state = GameState::parse("0#.").unwrap();

    assert!(!state.is_game_over());
    assert_eq!(sorted(state.unreachable_enabled_tiles()), vec![c(2, 0)]);
    assert!(state.is_stalemate());
}

// =============================================================================
// Properties
// =============================================================================

/// Random layouts: up to 6x6, roughly a quarter of the tiles disabled, one
/// to three players placed on distinct cells.
fn layout() -> impl Strategy<Value = String> {
    (1usize..=6, 1usize..=6, 1usize..=3)
        .prop_flat_map(|(width, height, players)| {
            let cells = width * height;
            let players = players.min(cells);
            (
                Just(width),
                proptest::collection::vec(proptest::bool::weighted(0.75), cells),
                proptest::sample::subsequence((0..cells).collect::<Vec<_>>(), players),
            )
        })
        .prop_map(|(width, enabled, seats)| {
            let mut grid: Vec<char> = enabled
                .iter()
                .map(|&on| if on { '.' } else { '#' })
                .collect();
            for (player, &cell) in seats.iter().enumerate() {
                grid[cell] = char::from(b'0' + player as u8);
            }
            grid.chunks(width)
                .map(|row| row.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        })
}

fn check_positions(state: &GameState) {
    let positions: Vec<Coord> = state.positions().values().copied().collect();
    for (i, position) in positions.iter().enumerate() {
        assert!(state.is_enabled(*position));
        assert!(!positions[i + 1..].contains(position));
    }
}

proptest! {
    #[test]
    fn prop_layouts_parse_and_render(text in layout()) {
        let state = GameState::parse(&text).unwrap();
        prop_assert_eq!(state.to_string(), text);
        check_positions(&state);
    }

    #[test]
    fn prop_regions_are_closed(text in layout()) {
        let state = GameState::parse(&text).unwrap();

        for player in state.positions().player_ids() {
            let region = state.reachable_tiles(player);
            prop_assert!(region.contains(&state.player_position(player)));
            for tile in &region {
                prop_assert_eq!(&state.region_from(*tile), &region);
            }
        }
    }

    #[test]
    fn prop_end_conditions_exclusive(text in layout()) {
        let state = GameState::parse(&text).unwrap();
        prop_assert!(!(state.is_game_over() && state.is_stalemate()));
        if state.player_count() == 1 {
            prop_assert!(!state.is_game_over());
        }
        prop_assert_eq!(state.result().is_some(), state.is_game_over());
    }

    #[test]
    fn prop_random_play_keeps_invariants(text in layout(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut state = GameState::parse(&text).unwrap();

        for _ in 0..30 {
            if state.is_game_over() || state.is_stalemate() {
                break;
            }
            let before = state.to_string();
            let mover = state.current_player();
            let phase = state.phase();

            let options = sorted(state.valid_moves(mover));
            prop_assert!(!options.is_empty());
            let target = options[rng.gen_range_usize(0..options.len())];
            let next = state.apply(target).unwrap();

            prop_assert_eq!(state.to_string(), before);
            check_positions(&next);
            match phase {
                Phase::Move => {
                    prop_assert_eq!(next.phase(), Phase::Shoot);
                    prop_assert_eq!(next.current_player(), mover);
                    prop_assert_eq!(next.player_position(mover), target);
                }
                Phase::Shoot => {
                    prop_assert_eq!(next.phase(), Phase::Move);
                    prop_assert_eq!(next.current_player(), mover.next(state.player_count()));
                    prop_assert!(!next.is_enabled(target));
                }
            }
            state = next;
        }
    }

    #[test]
    fn prop_duplicate_is_independent(text in layout()) {
        let state = GameState::parse(&text).unwrap();
        let copy = state.duplicate();
        prop_assert_eq!(&copy, &state);

        if let Some(&target) = sorted(state.valid_moves(state.current_player())).first() {
            let derived = copy.apply(target).unwrap();
            prop_assert_ne!(&derived, &state);
            prop_assert_eq!(&copy, &state);
        }
    }
}
