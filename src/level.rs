use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::state::State;

/// A parsed level: the immutable map plus the initial configuration.
#[derive(Clone)]
pub struct Level {
    pub map: GoalMap,
    pub state: State,
}

impl Level {
    pub fn new(map: GoalMap, state: State) -> Self {
        Level { map, state }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.map.format_with_state(&self.state))
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_level() {
        let text = "\
*###*
#@$.#
*###*
";
        let level: Level = text.parse().unwrap();
        assert_eq!(level.to_string(), text);
        assert_eq!(format!("{:?}", level), text);
    }
}
