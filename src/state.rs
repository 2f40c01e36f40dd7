use crate::data::Pos;

/// One configuration of the puzzle: where the player is and where the boxes are.
/// Boxes are kept sorted so configurations that differ only in box order
/// compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { player_pos, boxes }
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_order_is_canonical() {
        let a = State::new(Pos::new(1, 1), vec![Pos::new(2, 3), Pos::new(2, 1)]);
        let b = State::new(Pos::new(1, 1), vec![Pos::new(2, 1), Pos::new(2, 3)]);
        assert_eq!(a, b);
        assert!(a.has_box(Pos::new(2, 3)));
        assert!(!a.has_box(Pos::new(1, 1)));
    }
}
