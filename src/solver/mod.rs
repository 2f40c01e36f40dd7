//! Forward search over player moves with layered deadlock pruning.
//!
//! All methods share one loop and differ only in frontier ordering: bfs
//! explores by depth and returns a move-minimal solution, dfs dives and
//! returns the first solution it stumbles on, astar orders by depth plus a
//! greedy estimate and usually visits far fewer states than either.

mod frontier;
mod stats;

pub use self::stats::Stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::time::Instant;

use fnv::FnvHashMap;
use log::debug;
use typed_arena::Arena;

use crate::config::{Method, Options};
use crate::data::{MapCell, Pos};
use crate::deadlock::DeadlockDetector;
use crate::heuristic;
use crate::level::Level;
use crate::map::GoalMap;
use crate::movegen::{apply_move, legal_moves};
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::Solve;

use self::frontier::{Frontier, SearchNode};

/// The level is malformed in a way parsing can't see - rejected before any
/// search happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IncompleteBorder,
    UnreachableBoxes,
    UnreachableGoals,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on goal but can't be reached"
            ),
            SolverErr::UnreachableGoals => write!(
                f,
                "Unreachable goals - some goals don't have a box but can't be reached"
            ),
        }
    }
}

impl Error for SolverErr {}

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A solution was found - `moves` is `Some`.
    Solved,
    /// The whole reachable state space was exhausted without a solution.
    /// With a depth limit this means no solution within the limit.
    Exhausted,
    /// The node budget ran out before the search could finish.
    BudgetExceeded,
}

pub struct SolveResult {
    pub outcome: Outcome,
    pub moves: Option<Moves>,
    pub stats: Stats,
    method: Method,
}

impl SolveResult {
    fn new(outcome: Outcome, moves: Option<Moves>, stats: Stats, method: Method) -> Self {
        SolveResult {
            outcome,
            moves,
            stats,
            method,
        }
    }
}

impl Debug for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "{}: no solution ({:?})", self.method, self.outcome)?,
            Some(ref moves) => writeln!(f, "{}: {} moves", self.method, moves.move_cnt())?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, options: Options) -> Result<SolveResult, SolverErr> {
        solve(self, method, options)
    }
}

pub fn solve(level: &Level, method: Method, options: Options) -> Result<SolveResult, SolverErr> {
    debug!("Processing level...");
    let level = process_level(level)?;
    debug!("Building deadlock tables...");
    let detector = DeadlockDetector::new(&level.map);
    Ok(search(&level, &detector, method, options))
}

/// Low level sanity checks so the search can skip bounds checking: the
/// player's component must be closed by walls, boxes and goals outside it
/// are only tolerated when already satisfied, and everything the player
/// can't reach becomes a wall.
fn process_level(level: &Level) -> Result<Level, SolverErr> {
    let mut to_visit = vec![level.state.player_pos];
    let mut visited = level.map.grid.scratchpad(false);

    while let Some(cur) = to_visit.pop() {
        visited[cur] = true;

        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r + 1, c), (r - 1, c), (r, c + 1), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            // the only place that needs signed bounds checks - past this
            // point the level is guaranteed to be surrounded by walls
            if nr < 0
                || nc < 0
                || nr >= i32::from(level.map.grid.rows())
                || nc >= i32::from(level.map.grid.cols())
            {
                return Err(SolverErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && level.map.grid[new_pos] != MapCell::Wall {
                to_visit.push(new_pos);
            }
        }
    }

    let mut reachable_boxes = Vec::new();
    for &pos in &level.state.boxes {
        if visited[pos] {
            reachable_boxes.push(pos);
        } else if !level.map.goals.contains(&pos) {
            return Err(SolverErr::UnreachableBoxes);
        }
    }

    let mut reachable_goals = Vec::new();
    for &pos in &level.map.goals {
        if visited[pos] {
            reachable_goals.push(pos);
        } else if !level.state.boxes.contains(&pos) {
            return Err(SolverErr::UnreachableGoals);
        }
    }

    // wall off unreachable cells so the deadlock tables never see them
    let mut processed_grid = level.map.grid.clone();
    for pos in processed_grid.positions() {
        if !visited[pos] {
            processed_grid[pos] = MapCell::Wall;
        }
    }

    Ok(Level::new(
        GoalMap::new(processed_grid, reachable_goals),
        State::new(level.state.player_pos, reachable_boxes),
    ))
}

fn search(
    level: &Level,
    detector: &DeadlockDetector,
    method: Method,
    options: Options,
) -> SolveResult {
    debug!("Search called");
    let map = &level.map;
    let started = Instant::now();

    let mut stats = Stats::new();
    let arena: Arena<State> = Arena::new();
    let mut prevs: FnvHashMap<&State, &State> = FnvHashMap::default();
    let mut frontier = Frontier::new(method);

    // arena slot + frontier node + prevs entry
    let node_bytes = (mem::size_of::<State>()
        + level.state.boxes.len() * mem::size_of::<Pos>()
        + mem::size_of::<SearchNode<'_>>()
        + 2 * mem::size_of::<&State>()) as u64;

    let start_state: &State = arena.alloc(level.state.clone());
    let h = estimate(map, start_state, method);
    stats.add_created(0);

    if detector.is_deadlock(map, start_state, None) {
        debug!("Initial configuration is deadlocked");
    } else {
        frontier.push(SearchNode::new(start_state, None, 0, h));
    }

    let mut outcome = Outcome::Exhausted;
    let mut moves = None;

    while let Some(cur) = frontier.pop() {
        if let Some(budget) = options.node_budget {
            if stats.total_created() > budget {
                debug!("Node budget exceeded at depth {}", cur.dist);
                outcome = Outcome::BudgetExceeded;
                break;
            }
        }

        if prevs.contains_key(cur.state) {
            stats.add_reached_duplicate(cur.dist);
            continue;
        }
        if stats.add_unique_visited(cur.dist) {
            debug!("Visited new depth: {}", cur.dist);
        }

        // insert at visit time, not at creation time, so with bfs the
        // shortest path to a state is the one that gets recorded
        prevs.insert(cur.state, cur.prev.unwrap_or(cur.state));

        if map.is_goal_reached(cur.state) {
            debug!("Solved, backtracking path");
            outcome = Outcome::Solved;
            moves = Some(reconstruct_moves(&prevs, cur.state));
            break;
        }

        if let Some(max_depth) = options.max_depth {
            // the node still counts as visited, it just has no children
            if cur.dist >= max_depth {
                continue;
            }
        }

        for mov in legal_moves(map, cur.state) {
            let next = apply_move(map, cur.state, mov);
            if mov.is_push {
                let box_to = cur.state.player_pos + mov.dir + mov.dir;
                if detector.is_deadlock(map, &next, Some(box_to)) {
                    continue;
                }
            }
            let h = estimate(map, &next, method);
            let next_state: &State = arena.alloc(next);
            let node = SearchNode::new(next_state, Some(cur.state), cur.dist + 1, h);
            stats.add_created(node.dist);
            frontier.push(node);
        }
    }

    stats.elapsed = started.elapsed();
    stats.approx_mem_bytes = stats.total_created() * node_bytes;
    SolveResult::new(outcome, moves, stats, method)
}

fn estimate(map: &GoalMap, state: &State, method: Method) -> u16 {
    match method {
        Method::AStar => heuristic::estimate(map, state),
        Method::Bfs | Method::Dfs => 0,
    }
}

/// Walks the `prevs` chain back to the start (which maps to itself) and
/// derives the move sequence from consecutive player positions.
fn reconstruct_moves(prevs: &FnvHashMap<&State, &State>, final_state: &State) -> Moves {
    let mut path = vec![final_state];
    let mut cur = final_state;
    loop {
        let prev = prevs[cur];
        if prev == cur {
            break;
        }
        path.push(prev);
        cur = prev;
    }

    let mut moves = Moves::default();
    for i in (1..path.len()).rev() {
        let (from, to) = (path[i], path[i - 1]);
        let dir = from.player_pos.dir_to(to.player_pos);
        let is_push = from.boxes != to.boxes;
        moves.add(Move::new(dir, is_push));
    }
    moves
}
