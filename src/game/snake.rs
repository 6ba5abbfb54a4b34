use super::direction::Direction;
use crate::color::Rgb;
use crate::consts;
use crate::geometry::{Grid, Position};
use std::collections::VecDeque;

/// Snake state
///
/// All positions are in board units relative to the top-left corner of the
/// board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of all of the segments in the snake's body, head first
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,

    /// The direction the snake will turn to on its next move, if any
    pub(super) pending_direction: Option<Direction>,

    /// The color the snake is currently drawn in
    pub(super) color: Rgb,

    /// Length of one step
    cell_size: u16,
}

impl Snake {
    /// Create a new snake with its head at `start`, facing east, with the
    /// rest of its [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH]
    /// segments trailing off to the west
    pub(super) fn new(start: Position, cell_size: u16) -> Snake {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction: Direction::East,
            pending_direction: None,
            color: consts::SNAKE_COLOR,
            cell_size,
        };
        snake.reset(start);
        snake
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    /// Return the positions of the segments in the snake's body, head first
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    pub(super) fn color(&self) -> Rgb {
        self.color
    }

    pub(super) fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Queue `direction` as the direction to take on the next move.  Requests
    /// to turn straight back on the current direction are ignored.
    pub(super) fn set_pending_direction(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.pending_direction = Some(direction);
        }
    }

    /// Move the snake forwards one cell, first turning in the pending
    /// direction if there is one.  The snake's length does not change.
    pub(super) fn advance(&mut self) {
        if let Some(d) = self.pending_direction.take() {
            self.direction = d;
        }
        let head = self.head() + self.direction.offset(self.cell_size);
        self.body.push_front(head);
        let _ = self.body.pop_back();
    }

    /// Lengthen the snake by one segment by doubling up its tail.  The extra
    /// segment separates out on the following move.
    pub(super) fn grow(&mut self) {
        if let Some(&tail) = self.body.back() {
            self.body.push_back(tail);
        }
    }

    /// Has the snake's head left the board?
    pub(super) fn collides_with_border(&self, grid: Grid) -> bool {
        !grid.contains(self.head())
    }

    /// Is the snake's head on top of some other part of its body?
    pub(super) fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Put the snake back in its starting layout with its head at `start`
    pub(super) fn reset(&mut self, start: Position) {
        let (dx, dy) = Direction::West.offset(self.cell_size);
        self.body = std::iter::successors(Some(start), |&p| Some(p + (dx, dy)))
            .take(consts::INITIAL_SNAKE_LENGTH)
            .collect();
        self.direction = Direction::East;
        self.pending_direction = None;
        self.color = consts::SNAKE_COLOR;
    }
}
