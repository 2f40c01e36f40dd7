use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use separator::Separatable;

/// Node accounting by search depth plus wall clock and memory figures for
/// the whole run.
///
/// Created counts every node allocated, unique visited counts first pops,
/// reached duplicates counts pops of states visited earlier via another
/// path. Created but never popped states show up in none of the latter two.
pub struct Stats {
    pub created_states: Vec<u64>,
    pub visited_states: Vec<u64>,
    pub duplicate_states: Vec<u64>,
    /// Wall clock time of the search, excluding parsing and preprocessing.
    pub elapsed: Duration,
    /// Estimated heap usage of the arena, frontier and visited map.
    pub approx_mem_bytes: u64,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            created_states: vec![],
            visited_states: vec![],
            duplicate_states: vec![],
            elapsed: Duration::from_secs(0),
            approx_mem_bytes: 0,
        }
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn add_created(&mut self, depth: u16) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub fn add_unique_visited(&mut self, depth: u16) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub fn add_reached_duplicate(&mut self, depth: u16) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    /// Returns true when a new depth was reached for the first time.
    fn add(counts: &mut Vec<u64>, depth: u16) -> bool {
        let mut new_depth = false;

        // while instead of push because depths can be reached out of order
        while usize::from(depth) >= counts.len() {
            counts.push(0);
            new_depth = true;
        }
        counts[usize::from(depth)] += 1;
        new_depth
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "States created total: {}",
            self.total_created().separated_string()
        )?;
        writeln!(
            f,
            "Unique states visited total: {}",
            self.total_unique_visited().separated_string()
        )?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_over_depths() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(stats.add_created(2));
        assert!(!stats.add_created(1));
        assert!(!stats.add_created(2));
        assert_eq!(stats.created_states, vec![1, 1, 2]);
        assert_eq!(stats.total_created(), 4);
        assert_eq!(stats.total_unique_visited(), 0);
    }

    #[test]
    fn totals_format_with_separators() {
        let mut stats = Stats::new();
        for _ in 0..1500 {
            stats.add_created(0);
        }
        assert!(stats.to_string().contains("States created total: 1,500"));
    }
}
