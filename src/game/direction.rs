use crate::consts::GRID_SIZE;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that would leave the grid.
    pub(super) fn advance(self, pos: Position) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = increment_in_bounds(y)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = increment_in_bounds(x)?,
        }
        Some(Position { x, y })
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn increment_in_bounds(v: u16) -> Option<u16> {
    v.checked_add(1).filter(|&v2| v2 < GRID_SIZE)
}
