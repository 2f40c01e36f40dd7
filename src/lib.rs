// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod deadlock;
pub mod level;
pub mod map;
pub mod movegen;
pub mod moves;
pub mod parser;
pub mod solver;
pub mod state;
pub mod vec2d;

mod fs;
mod heuristic;

use std::error::Error;

use crate::config::{Method, Options};
use crate::level::Level;
use crate::solver::{SolveResult, SolverErr};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, method: Method, options: Options) -> Result<SolveResult, SolverErr>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Outcome;

    #[test]
    fn test_levels() {
        // BFS must hit the optimal move count exactly, the other methods
        // only have to find some solution (or correctly find none)
        let cases = [
            ("01-simplest.txt", Some(1)),
            ("02-one-way.txt", Some(2)),
            ("03-long-way.txt", Some(5)),
            ("04-two-boxes.txt", Some(7)),
            ("corner-dead.txt", None),
            ("no-solution-matching.txt", None),
        ];

        for &(name, optimal) in &cases {
            let path = format!("levels/custom/{}", name);
            let level = path.load_level().unwrap();
            for &method in &[Method::Bfs, Method::Dfs, Method::AStar] {
                let result = level.solve(method, Options::default()).unwrap();
                match optimal {
                    Some(moves) => {
                        assert_eq!(result.outcome, Outcome::Solved, "{} {}", method, path);
                        let found = result.moves.unwrap().move_cnt();
                        assert!(found >= moves, "{} {}: {} moves", method, path, found);
                        if method == Method::Bfs {
                            assert_eq!(found, moves, "{} {}", method, path);
                        }
                    }
                    None => {
                        assert_eq!(result.outcome, Outcome::Exhausted, "{} {}", method, path);
                        assert!(result.moves.is_none());
                    }
                }
            }
        }
    }
}
