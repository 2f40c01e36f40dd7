use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// Cells of the static grid. Boxes and the player live in `State`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Wall,
    Goal,
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match *self {
            MapCell::Empty => ' ',
            MapCell::Wall => '#',
            MapCell::Goal => '.',
        };
        write!(f, "{}", c)
    }
}

/// Grid position as (row, column). Levels are limited to 255x255 so u8 is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Self {
        Pos { r, c }
    }

    /// Manhattan distance.
    pub fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [
            self + Dir::Up,
            self + Dir::Right,
            self + Dir::Down,
            self + Dir::Left,
        ]
    }

    /// Direction towards an adjacent position. Panics if `other` is not adjacent.
    pub fn dir_to(self, other: Pos) -> Dir {
        for &dir in &DIRECTIONS {
            if self + dir == other {
                return dir;
            }
        }
        panic!("{:?} -> {:?} is not a single move", self, other);
    }
}

/// The four push/step directions. Each maps to a fixed delta and a symbol
/// (lowercase step, uppercase push in solutions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    pub fn delta(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Dir::Up => 'u',
            Dir::Right => 'r',
            Dir::Down => 'd',
            Dir::Left => 'l',
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// Positions at the grid edge wrap out of the 0..=255 range when offset;
// Vec2d::get and GoalMap::is_wall treat such positions as walls.
impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            r: (i16::from(self.r) + dr) as u8,
            c: (i16::from(self.c) + dc) as u8,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 3);
        assert_eq!(a.dist(b), 5);
        assert_eq!(b.dist(a), 5);
        assert_eq!(a.dist(a), 0);
    }

    #[test]
    fn direction_roundtrip() {
        let pos = Pos::new(5, 5);
        for &dir in &DIRECTIONS {
            assert_eq!(pos + dir - dir, pos);
            assert_eq!(pos.dir_to(pos + dir), dir);
        }
    }

    #[test]
    fn direction_symbols() {
        let symbols: String = DIRECTIONS.iter().map(|d| d.symbol()).collect();
        assert_eq!(symbols, "urdl");
    }
}
