use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The snake always occupies at least one cell (its head).  Positions are
/// relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake, starting with the cell
    /// directly behind the head and ending with the tail
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake moved on its most recent step (or
    /// is initially facing)
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a one-cell snake with its head at `head`, facing `direction`
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
        }
    }

    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the position of the last cell of the snake.  For a snake of
    /// length one, this is the head.
    pub(super) fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over the snake's cells from head to tail
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Move the head to `pos`, which was reached by moving in `direction`.
    /// The old head becomes part of the body; the tail is left in place.
    pub(super) fn push_head(&mut self, pos: Position, direction: Direction) {
        self.body.push_front(self.head);
        self.head = pos;
        self.direction = direction;
    }

    /// Remove the last cell of the body.  Does nothing to a one-cell snake.
    pub(super) fn pop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}
