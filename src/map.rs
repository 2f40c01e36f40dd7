use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a level: walls and goals. Never changes during a solve.
#[derive(Clone)]
pub struct GoalMap {
    pub grid: Vec2d<MapCell>,
    pub goals: Vec<Pos>,
}

impl GoalMap {
    pub fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        GoalMap { grid, goals }
    }

    /// Positions outside the grid count as walls so callers never need
    /// separate bounds checks.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(false, |&cell| cell == MapCell::Goal)
    }

    /// Solved when every goal holds a box (extra boxes may rest anywhere).
    pub fn is_goal_reached(&self, state: &State) -> bool {
        self.goals.iter().all(|&goal| state.has_box(goal))
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter { map: self, state }
    }

    fn write(&self, state: Option<&State>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing padding so output matches the input text
            let mut last = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                let occupied = state.map_or(false, |s| {
                    s.player_pos == pos || s.has_box(pos)
                });
                if self.grid[pos] != MapCell::Empty || occupied {
                    last = c;
                }
            }

            for c in 0..=last {
                let pos = Pos::new(r, c);
                let cell = self.grid[pos];
                let symbol = match state {
                    Some(s) if s.has_box(pos) => {
                        if cell == MapCell::Goal {
                            '*'
                        } else {
                            '$'
                        }
                    }
                    Some(s) if s.player_pos == pos => {
                        if cell == MapCell::Goal {
                            '+'
                        } else {
                            '@'
                        }
                    }
                    _ => match cell {
                        MapCell::Wall => '#',
                        MapCell::Empty => ' ',
                        MapCell::Goal => '.',
                    },
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write(None, f)
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Renders a map with a state overlaid in XSB notation.
pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: &'a State,
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.map.write(Some(self.state), f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
