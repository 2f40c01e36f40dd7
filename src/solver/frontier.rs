use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::config::Method;
use crate::state::State;

/// One enqueued configuration. `state` and `prev` point into the search
/// arena so nodes stay two words plus counters and are cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct SearchNode<'a> {
    pub state: &'a State,
    pub prev: Option<&'a State>,
    pub dist: u16,
    pub h: u16,
}

impl<'a> SearchNode<'a> {
    pub fn new(state: &'a State, prev: Option<&'a State>, dist: u16, h: u16) -> Self {
        SearchNode {
            state,
            prev,
            dist,
            h,
        }
    }

    fn f(&self) -> u32 {
        u32::from(self.dist) + u32::from(self.h)
    }
}

/// Open list ordered per search method: FIFO for bfs, LIFO for dfs and a
/// min-heap on `dist + h` for astar. The heap breaks ties by insertion
/// order so runs are reproducible and equal scores behave like bfs.
pub enum Frontier<'a> {
    Fifo(VecDeque<SearchNode<'a>>),
    Lifo(Vec<SearchNode<'a>>),
    Best {
        heap: BinaryHeap<Reverse<BestNode<'a>>>,
        seq: u64,
    },
}

impl<'a> Frontier<'a> {
    pub fn new(method: Method) -> Self {
        match method {
            Method::Bfs => Frontier::Fifo(VecDeque::new()),
            Method::Dfs => Frontier::Lifo(Vec::new()),
            Method::AStar => Frontier::Best {
                heap: BinaryHeap::new(),
                seq: 0,
            },
        }
    }

    pub fn push(&mut self, node: SearchNode<'a>) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(node),
            Frontier::Lifo(stack) => stack.push(node),
            Frontier::Best { heap, seq } => {
                heap.push(Reverse(BestNode {
                    f: node.f(),
                    seq: *seq,
                    node,
                }));
                *seq += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Option<SearchNode<'a>> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Best { heap, .. } => heap.pop().map(|Reverse(best)| best.node),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BestNode<'a> {
    f: u32,
    seq: u64,
    node: SearchNode<'a>,
}

impl PartialOrd for BestNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BestNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.f, self.seq).cmp(&(other.f, other.seq))
    }
}

impl PartialEq for BestNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for BestNode<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;

    fn state(r: u8) -> State {
        State::new(Pos::new(r, 0), vec![])
    }

    #[test]
    fn fifo_pops_in_insertion_order() {
        let (a, b, c) = (state(1), state(2), state(3));
        let mut frontier = Frontier::new(Method::Bfs);
        frontier.push(SearchNode::new(&a, None, 0, 0));
        frontier.push(SearchNode::new(&b, None, 1, 0));
        frontier.push(SearchNode::new(&c, None, 1, 0));
        assert_eq!(frontier.pop().unwrap().state, &a);
        assert_eq!(frontier.pop().unwrap().state, &b);
        assert_eq!(frontier.pop().unwrap().state, &c);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn lifo_pops_newest_first() {
        let (a, b) = (state(1), state(2));
        let mut frontier = Frontier::new(Method::Dfs);
        frontier.push(SearchNode::new(&a, None, 0, 0));
        frontier.push(SearchNode::new(&b, None, 1, 0));
        assert_eq!(frontier.pop().unwrap().state, &b);
        assert_eq!(frontier.pop().unwrap().state, &a);
    }

    #[test]
    fn best_orders_by_estimate_with_fifo_ties() {
        let (a, b, c, d) = (state(1), state(2), state(3), state(4));
        let mut frontier = Frontier::new(Method::AStar);
        frontier.push(SearchNode::new(&a, None, 2, 3)); // f = 5
        frontier.push(SearchNode::new(&b, None, 1, 1)); // f = 2
        frontier.push(SearchNode::new(&c, None, 0, 2)); // f = 2, after b
        frontier.push(SearchNode::new(&d, None, 0, 0)); // f = 0
        assert_eq!(frontier.pop().unwrap().state, &d);
        assert_eq!(frontier.pop().unwrap().state, &b);
        assert_eq!(frontier.pop().unwrap().state, &c);
        assert_eq!(frontier.pop().unwrap().state, &a);
    }
}
