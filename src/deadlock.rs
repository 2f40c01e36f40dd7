//! Layered deadlock detection.
//!
//! The layers, cheapest first:
//! 1. box count vs goal count
//! 2. simple deadlock - the box rests on a cell from which no sequence of
//!    pushes can ever reach a goal (precomputed per map by pull BFS)
//! 3. freeze deadlock - boxes immobilized by walls and each other
//! 4. line deadlock - a run of boxes pressed against a wall in a goalless line
//! 5. bipartite infeasibility - no assignment of boxes to distinct goals
//!
//! Checks 2-4 are conservative: a positive answer means the configuration is
//! provably unsolvable, a negative answer means nothing.

use std::collections::VecDeque;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Maximum matching is O(boxes * edges); above this box count the bipartite
/// layer costs more than it prunes.
const MATCHING_BOX_LIMIT: usize = 6;

/// Static per-map data for all deadlock checks. Build once per solve,
/// query per candidate configuration.
pub struct DeadlockDetector {
    /// Per goal: number of pulls needed to drag a box from each cell to that
    /// goal, ignoring other boxes. `None` means unreachable.
    goal_dists: Vec<Vec2d<Option<u16>>>,
    /// Union of the per-goal maps: cells from which some goal is reachable.
    pull_reachable: Vec2d<bool>,
    goals_in_row: Vec<u16>,
    goals_in_col: Vec<u16>,
}

impl DeadlockDetector {
    pub fn new(map: &GoalMap) -> Self {
        let goal_dists: Vec<_> = map.goals.iter().map(|&goal| pull_dists(map, goal)).collect();

        let mut pull_reachable = map.grid.scratchpad(false);
        for pos in map.grid.positions() {
            if goal_dists.iter().any(|dists| dists[pos].is_some()) {
                pull_reachable[pos] = true;
            }
        }

        let mut goals_in_row = vec![0; usize::from(map.grid.rows())];
        let mut goals_in_col = vec![0; usize::from(map.grid.cols())];
        for &goal in &map.goals {
            goals_in_row[usize::from(goal.r)] += 1;
            goals_in_col[usize::from(goal.c)] += 1;
        }

        DeadlockDetector {
            goal_dists,
            pull_reachable,
            goals_in_row,
            goals_in_col,
        }
    }

    /// True when the configuration is provably unsolvable. `last_pushed`
    /// short-circuits the common case where a single push just happened.
    pub fn is_deadlock(&self, map: &GoalMap, state: &State, last_pushed: Option<Pos>) -> bool {
        if state.boxes.len() > map.goals.len() {
            return true;
        }
        if let Some(box_pos) = last_pushed {
            if self.is_simple_deadlock(box_pos) {
                return true;
            }
        }
        if state.boxes.iter().any(|&b| self.is_simple_deadlock(b)) {
            return true;
        }
        if self.is_freeze_deadlock(map, state) {
            return true;
        }
        if self.is_line_deadlock(map, state) {
            return true;
        }
        if state.boxes.len() <= MATCHING_BOX_LIMIT && self.is_matching_deadlock(state) {
            return true;
        }
        false
    }

    /// A box here can never be pushed onto any goal, no matter where other
    /// boxes or the player are. Subsumes the classic corner check and the
    /// wall-line-without-goals check.
    pub fn is_simple_deadlock(&self, box_pos: Pos) -> bool {
        !self.pull_reachable.get(box_pos).copied().unwrap_or(false)
    }

    /// Marks frozen boxes by fixed-point iteration, indexed like
    /// `state.boxes`. A box is frozen when each axis has a side blocked by a
    /// wall or an already-frozen box; the frozen set only ever grows, so the
    /// loop terminates after at most `boxes.len()` passes.
    pub fn frozen_boxes(&self, map: &GoalMap, state: &State) -> Vec<bool> {
        let boxes = &state.boxes;
        let mut frozen = vec![false; boxes.len()];

        let blocked = |frozen: &[bool], pos: Pos| -> bool {
            map.is_wall(pos)
                || boxes
                    .binary_search(&pos)
                    .map_or(false, |i| frozen[i])
        };

        loop {
            let mut changed = false;
            for i in 0..boxes.len() {
                if frozen[i] {
                    continue;
                }
                let b = boxes[i];
                let vertical = blocked(&frozen, b + Dir::Up) || blocked(&frozen, b + Dir::Down);
                let horizontal = blocked(&frozen, b + Dir::Left) || blocked(&frozen, b + Dir::Right);
                if vertical && horizontal {
                    frozen[i] = true;
                    changed = true;
                }
            }
            if !changed {
                return frozen;
            }
        }
    }

    /// Deadlocked when any frozen box rests off-goal. Boxes frozen on goals
    /// are fine themselves but still block their neighbors.
    pub fn is_freeze_deadlock(&self, map: &GoalMap, state: &State) -> bool {
        let frozen = self.frozen_boxes(map, state);
        frozen
            .iter()
            .zip(&state.boxes)
            .any(|(&fz, &b)| fz && !map.is_goal(b))
    }

    /// A contiguous run of 2+ non-goal boxes hugging one wall, in a row or
    /// column without a single goal. None of them can ever leave the line.
    pub fn is_line_deadlock(&self, map: &GoalMap, state: &State) -> bool {
        // boxes are sorted by (row, col), so row runs are consecutive entries
        if self.scan_runs(map, state.boxes.iter().copied(), true) {
            return true;
        }
        let mut by_col: Vec<Pos> = state.boxes.clone();
        by_col.sort_by_key(|p| (p.c, p.r));
        self.scan_runs(map, by_col.into_iter(), false)
    }

    fn scan_runs(&self, map: &GoalMap, boxes: impl Iterator<Item = Pos>, rows: bool) -> bool {
        let mut run: Vec<Pos> = Vec::new();
        for b in boxes.chain(std::iter::once(Pos::new(255, 255))) {
            let continues = match run.last() {
                Some(&prev) if rows => b.r == prev.r && u16::from(b.c) == u16::from(prev.c) + 1,
                Some(&prev) => b.c == prev.c && u16::from(b.r) == u16::from(prev.r) + 1,
                None => false,
            };
            if !continues {
                if self.run_is_dead(map, &run, rows) {
                    return true;
                }
                run.clear();
            }
            run.push(b);
        }
        false
    }

    fn run_is_dead(&self, map: &GoalMap, run: &[Pos], rows: bool) -> bool {
        if run.len() < 2 || run.iter().any(|&b| map.is_goal(b)) {
            return false;
        }
        let goals_in_line = if rows {
            self.goals_in_row[usize::from(run[0].r)]
        } else {
            self.goals_in_col[usize::from(run[0].c)]
        };
        if goals_in_line > 0 {
            return false;
        }
        let (side_a, side_b) = if rows {
            (Dir::Up, Dir::Down)
        } else {
            (Dir::Left, Dir::Right)
        };
        run.iter().all(|&b| map.is_wall(b + side_a)) || run.iter().all(|&b| map.is_wall(b + side_b))
    }

    /// Kuhn's augmenting-path matching between boxes and goals, edges given
    /// by wall-only pull reachability. If some box cannot claim its own goal
    /// the configuration is dead regardless of move order.
    pub fn is_matching_deadlock(&self, state: &State) -> bool {
        let n = state.boxes.len();
        let m = self.goal_dists.len();
        if n > m {
            return true;
        }

        let reachable: Vec<Vec<usize>> = state
            .boxes
            .iter()
            .map(|&b| {
                (0..m)
                    .filter(|&g| self.goal_dists[g].get(b).map_or(false, |d| d.is_some()))
                    .collect()
            })
            .collect();

        let mut goal_owner: Vec<Option<usize>> = vec![None; m];
        let mut matched = 0;
        for b in 0..n {
            let mut seen = vec![false; m];
            if augment(b, &reachable, &mut goal_owner, &mut seen) {
                matched += 1;
            }
        }
        matched < n
    }
}

fn augment(
    b: usize,
    reachable: &[Vec<usize>],
    goal_owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &g in &reachable[b] {
        if seen[g] {
            continue;
        }
        seen[g] = true;
        let free = match goal_owner[g] {
            None => true,
            Some(owner) => augment(owner, reachable, goal_owner, seen),
        };
        if free {
            goal_owner[g] = Some(b);
            return true;
        }
    }
    false
}

/// BFS of pulls outward from a goal: a box on `pos` can move to `pos + dir`
/// when neither that cell nor the player cell behind it (`pos + 2*dir`) is a
/// wall. Walking the graph backwards from the goal yields, for every cell,
/// the minimum number of pushes to bring a box home - or proof that it never
/// can.
fn pull_dists(map: &GoalMap, goal: Pos) -> Vec2d<Option<u16>> {
    let mut dists = map.grid.scratchpad(None);
    dists[goal] = Some(0);

    let mut to_visit = VecDeque::new();
    to_visit.push_back((goal, 0));

    while let Some((pos, dist)) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            let box_to = pos + dir;
            let player_to = box_to + dir;
            if map.is_wall(box_to) || map.is_wall(player_to) || dists[box_to].is_some() {
                continue;
            }
            dists[box_to] = Some(dist + 1);
            to_visit.push_back((box_to, dist + 1));
        }
    }

    dists
}
