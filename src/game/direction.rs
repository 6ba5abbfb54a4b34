#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit vector for one step in this direction, with y growing downwards
    pub(super) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Offset covering one cell of size `cell_size` in this direction
    pub(super) fn offset(self, cell_size: u16) -> (i32, i32) {
        let (dx, dy) = self.delta();
        let size = i32::from(cell_size);
        (dx * size, dy * size)
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
