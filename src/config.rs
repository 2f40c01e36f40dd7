use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Search strategy. All three share the same expansion and deadlock
/// machinery and differ only in frontier ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Breadth-first, finds a move-minimal solution.
    Bfs,
    /// Depth-first, finds some solution quickly, usually a long one.
    Dfs,
    /// Best-first on depth plus greedy estimate, ties broken FIFO.
    AStar,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::Dfs => write!(f, "dfs"),
            Method::AStar => write!(f, "astar"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Method::Bfs),
            "dfs" => Ok(Method::Dfs),
            "astar" => Ok(Method::AStar),
            _ => Err(format!("unknown method: {}", s)),
        }
    }
}

/// Resource limits for a single solve. The defaults mean unlimited.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Nodes deeper than this are recorded but not expanded.
    pub max_depth: Option<u16>,
    /// Abort with `Outcome::BudgetExceeded` after creating this many nodes.
    pub node_budget: Option<u64>,
}
