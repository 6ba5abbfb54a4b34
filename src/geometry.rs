//! Board geometry: positions and the grid of cells they snap to
use rand::Rng;
use std::ops::Add;

/// A point on the board, in board units.  Positions produced by a [`Grid`]
/// are always exact multiples of its cell size; positions outside the board
/// are representable so that a snake can be seen to have left it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

impl Add<(i32, i32)> for Position {
    type Output = Position;

    fn add(self, (dx, dy): (i32, i32)) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// The playing field: a `width` × `height` area divided into square cells
/// with edges of `cell_size`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl Grid {
    /// Create a new grid.  Callers are responsible for ensuring that
    /// `cell_size` is nonzero and no larger than either dimension; see
    /// [`crate::config::BoardConfig::grid()`].
    pub(crate) fn new(width: u16, height: u16, cell_size: u16) -> Grid {
        Grid {
            width,
            height,
            cell_size,
        }
    }

    pub(crate) fn cell_size(self) -> u16 {
        self.cell_size
    }

    /// Number of cells in each row
    pub(crate) fn columns(self) -> u16 {
        self.width.checked_div(self.cell_size).unwrap_or_default()
    }

    /// Number of cells in each column
    pub(crate) fn rows(self) -> u16 {
        self.height.checked_div(self.cell_size).unwrap_or_default()
    }

    /// Is `pos` inside the board?
    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..i32::from(self.width)).contains(&pos.x) && (0..i32::from(self.height)).contains(&pos.y)
    }

    /// The cell nearest the middle of the board, rounding up & to the left
    pub(crate) fn center(self) -> Position {
        let snap = |len: u16| {
            let half = len / 2;
            i32::from(half - half.checked_rem(self.cell_size).unwrap_or_default())
        };
        Position::new(snap(self.width), snap(self.height))
    }

    /// The position of the cell in column `col` and row `row`
    pub(crate) fn cell(self, col: u16, row: u16) -> Position {
        let size = u32::from(self.cell_size);
        Position::new(
            i32::try_from(u32::from(col) * size).unwrap_or(i32::MAX),
            i32::try_from(u32::from(row) * size).unwrap_or(i32::MAX),
        )
    }

    /// Iterate over every cell on the board, row by row
    pub(crate) fn cells(self) -> impl Iterator<Item = Position> {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.cell(col, row)))
    }

    /// Pick a cell on the board uniformly at random
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Position {
        let col = rng.random_range(0..self.columns().max(1));
        let row = rng.random_range(0..self.rows().max(1));
        self.cell(col, row)
    }

    /// Return the (column, row) of the cell at `pos`, or `None` if `pos` is
    /// off the board
    pub(crate) fn to_cell(self, pos: Position) -> Option<(u16, u16)> {
        if !self.contains(pos) || self.cell_size == 0 {
            return None;
        }
        let size = i32::from(self.cell_size);
        let col = u16::try_from(pos.x / size).ok()?;
        let row = u16::try_from(pos.y / size).ok()?;
        (col < self.columns() && row < self.rows()).then_some((col, row))
    }
}
