//! Greedy distance estimate used to order the best-first frontier.
//!
//! Boxes claim their nearest unclaimed goal in turn, by Manhattan distance
//! and ignoring walls, then half the player's distance to the nearest box is
//! added on top. Greedy claiming can overestimate against the optimal
//! assignment, so the estimate is not admissible - the search trades
//! optimality for speed on purpose.

use crate::map::GoalMap;
use crate::state::State;

pub fn estimate(map: &GoalMap, state: &State) -> u16 {
    let mut claimed = vec![false; map.goals.len()];
    let mut box_cost = 0;

    for &box_pos in &state.boxes {
        let nearest = map
            .goals
            .iter()
            .enumerate()
            .filter(|&(i, _)| !claimed[i])
            .map(|(i, &goal)| (box_pos.dist(goal), i))
            .min();
        if let Some((dist, i)) = nearest {
            claimed[i] = true;
            box_cost += dist;
        }
    }

    let player_cost = state
        .boxes
        .iter()
        .map(|&b| state.player_pos.dist(b))
        .min()
        .unwrap_or(0);

    box_cost + player_cost / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn one_push_away() {
        let level: Level = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();
        // box is 1 from the goal, player is 1 from the box
        assert_eq!(estimate(&level.map, &level.state), 1);
    }

    #[test]
    fn solved_state_estimates_zero() {
        let level: Level = r"
#####
#@* #
#####
"
        .parse()
        .unwrap();
        assert_eq!(estimate(&level.map, &level.state), 0);
    }

    #[test]
    fn nearest_goal_wins() {
        let level: Level = r"
##########
#.  $@  .#
##########
"
        .parse()
        .unwrap();
        // box picks the closer left goal (3), player is adjacent (1 / 2 = 0)
        assert_eq!(estimate(&level.map, &level.state), 3);
    }

    #[test]
    fn each_goal_is_claimed_once() {
        let level: Level = r"
#######
#$.$ @#
#    .#
#######
"
        .parse()
        .unwrap();
        // the first box claims the shared goal (1), the second is pushed to
        // the far one (3), the player is 2 from its nearest box (+1)
        assert_eq!(estimate(&level.map, &level.state), 5);
    }
}
