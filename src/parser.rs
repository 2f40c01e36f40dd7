use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Positions are stored as u8 pairs.
const MAX_SIZE: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Unrecognized symbol and where it was found.
    InvalidSymbol { symbol: char, r: usize, c: usize },
    MultiplePlayers,
    NoPlayer,
    TooLarge,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::InvalidSymbol { symbol, r, c } => {
                write!(f, "Unrecognized symbol '{}' at [{}, {}]", symbol, r, c)
            }
            ParseError::MultiplePlayers => write!(f, "More than one player"),
            ParseError::NoPlayer => write!(f, "No player"),
            ParseError::TooLarge => write!(f, "Level larger than {} rows/columns", MAX_SIZE),
        }
    }
}

impl Error for ParseError {}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described
/// [here](http://www.sokobano.de/wiki/index.php?title=Level_format):
/// `#` wall, ` `/`-`/`_` floor, `.` goal, `$` box, `*` box on goal,
/// `@` player, `+` player on goal.
pub fn parse(level: &str) -> Result<Level, ParseError> {
    // trim so levels can be written as raw strings in tests
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParseError::TooLarge);
        }
        let mut row = Vec::new();
        for (c, symbol) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParseError::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let cell = match symbol {
                '#' => MapCell::Wall,
                ' ' | '-' | '_' => MapCell::Empty,
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '@' => {
                    if player_pos.is_some() {
                        return Err(ParseError::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                '+' => {
                    if player_pos.is_some() {
                        return Err(ParseError::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                _ => return Err(ParseError::InvalidSymbol { symbol, r, c }),
            };
            row.push(cell);
        }
        grid.push(row);
    }

    let player_pos = player_pos.ok_or(ParseError::NoPlayer)?;
    let grid = Vec2d::new(&grid);
    Ok(Level::new(
        GoalMap::new(grid, goals),
        State::new(player_pos, boxes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_eq!("".parse::<Level>().unwrap_err(), ParseError::NoPlayer);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
####
#  #
####
";
        assert_eq!(level.parse::<Level>().unwrap_err(), ParseError::NoPlayer);
    }

    #[test]
    fn fail_multiple_players() {
        let level = r"
#####
#@ @#
#####
";
        assert_eq!(
            level.parse::<Level>().unwrap_err(),
            ParseError::MultiplePlayers
        );
    }

    #[test]
    fn fail_invalid_symbol_names_position() {
        let level = r"
#####
#@X.#
#####
";
        let err = level.parse::<Level>().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSymbol {
                symbol: 'X',
                r: 1,
                c: 2,
            }
        );
        assert_eq!(err.to_string(), "Unrecognized symbol 'X' at [1, 2]");
    }

    #[test]
    fn simplest() {
        let level: Level = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();
        assert_eq!(level.state.player_pos, Pos::new(1, 1));
        assert_eq!(level.state.boxes, vec![Pos::new(1, 2)]);
        assert_eq!(level.map.goals, vec![Pos::new(1, 3)]);
    }

    #[test]
    fn overlapping_symbols() {
        let level: Level = r"
#####
#+*$#
#.###
"
        .parse()
        .unwrap();
        // player on goal, box on goal, plain box
        assert_eq!(level.state.player_pos, Pos::new(1, 1));
        assert_eq!(level.state.boxes, vec![Pos::new(1, 2), Pos::new(1, 3)]);
        assert_eq!(level.map.goals.len(), 3);
    }

    #[test]
    fn ragged_rows_roundtrip() {
        let text = "\
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        let level: Level = text.parse().unwrap();
        assert_eq!(level.to_string(), text);
    }
}
