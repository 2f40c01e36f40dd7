//! Enumerates legal player actions and applies them.
//!
//! `apply_move` trusts its input - the split lets the solver inspect a push
//! result (deadlock checks) before committing it to the frontier. Applying a
//! move that `legal_moves` would not have produced is a caller bug and
//! panics rather than silently corrupting the box set.

use crate::data::DIRECTIONS;
use crate::map::GoalMap;
use crate::moves::Move;
use crate::state::State;

/// All legal actions for the player in `state`, in fixed direction order
/// (up, right, down, left) so every search method is deterministic.
pub fn legal_moves(map: &GoalMap, state: &State) -> Vec<Move> {
    let mut moves = Vec::with_capacity(4);

    for &dir in &DIRECTIONS {
        let target = state.player_pos + dir;
        if map.is_wall(target) {
            continue;
        }
        if state.has_box(target) {
            let beyond = target + dir;
            if !map.is_wall(beyond) && !state.has_box(beyond) {
                moves.push(Move::new(dir, true));
            }
        } else {
            moves.push(Move::new(dir, false));
        }
    }

    moves
}

/// Applies a move produced by `legal_moves`, returning the successor
/// configuration. The box count is invariant: a push relocates a box, it
/// never adds or removes one.
pub fn apply_move(map: &GoalMap, state: &State, mov: Move) -> State {
    let target = state.player_pos + mov.dir;
    assert!(
        !map.is_wall(target),
        "invalid move requested: {:?} walks into a wall",
        mov
    );

    if mov.is_push {
        assert!(
            state.has_box(target),
            "invalid move requested: {:?} pushes thin air",
            mov
        );
        let beyond = target + mov.dir;
        assert!(
            !map.is_wall(beyond) && !state.has_box(beyond),
            "invalid move requested: {:?} pushes into an occupied cell",
            mov
        );

        let mut boxes = state.boxes.clone();
        let i = boxes.binary_search(&target).unwrap();
        boxes[i] = beyond;
        State::new(target, boxes)
    } else {
        assert!(
            !state.has_box(target),
            "invalid move requested: {:?} steps onto a box",
            mov
        );
        State::new(target, state.boxes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dir, Pos};
    use crate::level::Level;

    fn parse(text: &str) -> Level {
        text.parse().unwrap()
    }

    #[test]
    fn walls_block_steps() {
        let level = parse(
            r"
###
#@#
###
",
        );
        assert_eq!(legal_moves(&level.map, &level.state), vec![]);
    }

    #[test]
    fn push_needs_free_cell_beyond() {
        let level = parse(
            r"
#######
#@$$ .#
#######
",
        );
        // pushing right would stack two boxes
        assert_eq!(legal_moves(&level.map, &level.state), vec![]);
    }

    #[test]
    fn steps_and_pushes_mix() {
        let level = parse(
            r"
#####
# . #
#@$ #
#   #
#####
",
        );
        let moves = legal_moves(&level.map, &level.state);
        assert_eq!(
            moves,
            vec![
                Move::new(Dir::Up, false),
                Move::new(Dir::Right, true),
                Move::new(Dir::Down, false),
            ]
        );
    }

    #[test]
    fn push_relocates_the_box() {
        let level = parse(
            r"
#####
#@$.#
#####
",
        );
        let next = apply_move(&level.map, &level.state, Move::new(Dir::Right, true));
        assert_eq!(next.player_pos, Pos::new(1, 2));
        assert_eq!(next.boxes, vec![Pos::new(1, 3)]);
    }

    #[test]
    fn box_count_invariant_over_a_walk() {
        let level = parse(
            r"
#######
#@$  .#
#  $  #
# .   #
#######
",
        );
        let mut state = level.state.clone();
        for _ in 0..20 {
            let moves = legal_moves(&level.map, &state);
            assert!(!moves.is_empty());
            state = apply_move(&level.map, &state, moves[0]);
            assert_eq!(state.boxes.len(), level.state.boxes.len());
        }
    }

    #[test]
    fn pushes_are_not_reversible() {
        let level = parse(
            r"
######
# @$.#
######
",
        );
        let pushed = apply_move(&level.map, &level.state, Move::new(Dir::Right, true));
        // stepping back does not pull the box along
        let back = apply_move(&level.map, &pushed, Move::new(Dir::Left, false));
        assert_eq!(back.player_pos, level.state.player_pos);
        assert_ne!(back, level.state);
        assert_eq!(back.boxes, pushed.boxes);
    }

    #[test]
    #[should_panic(expected = "invalid move requested")]
    fn applying_illegal_move_panics() {
        let level = parse(
            r"
#####
#@$.#
#####
",
        );
        // up is a wall
        apply_move(&level.map, &level.state, Move::new(Dir::Up, false));
    }
}
