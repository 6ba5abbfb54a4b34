use crate::color::Rgb;
use crate::consts;
use crate::geometry::{Grid, Position};
use enum_map::Enum;
use rand::{seq::IteratorRandom, Rng};

/// The varieties of apple on the board.  There is always exactly one apple
/// of each kind.
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum AppleKind {
    Gold,
    Aqua,
    Red,
}

impl AppleKind {
    pub(super) fn color(self) -> Rgb {
        match self {
            AppleKind::Gold => consts::GOLD_APPLE_COLOR,
            AppleKind::Aqua => consts::AQUA_APPLE_COLOR,
            AppleKind::Red => consts::RED_APPLE_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Apple {
    pub(super) kind: AppleKind,
    pub(super) position: Position,
}

impl Apple {
    /// Create an apple of the given kind at a random cell not occupied by
    /// `snake`.  The board must have at least one cell free of the snake;
    /// [`crate::config::BoardConfig::grid()`] rejects boards too small for a
    /// new game.
    pub(super) fn new<R, I>(kind: AppleKind, snake: I, grid: Grid, rng: &mut R) -> Apple
    where
        R: Rng,
        I: IntoIterator<Item = Position> + Clone,
    {
        let mut apple = Apple {
            kind,
            position: Position::default(),
        };
        let placed = apple.generate_new_position(snake, grid, rng);
        debug_assert!(placed, "no free cell for a new {kind:?} apple");
        apple
    }

    pub(super) fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Pick a cell on the board uniformly at random, regardless of what's in
    /// it
    pub(super) fn generate_position<R: Rng>(grid: Grid, rng: &mut R) -> Position {
        grid.random_cell(rng)
    }

    /// Move the apple to a random cell not occupied by `snake`.
    ///
    /// Up to [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS]
    /// candidates are drawn uniformly from the whole board; if all of them
    /// land on the snake, a cell is instead chosen uniformly from the free
    /// cells.  Returns `false` (leaving the apple where it was) if there are
    /// no free cells.
    pub(super) fn generate_new_position<R, I>(
        &mut self,
        snake: I,
        grid: Grid,
        rng: &mut R,
    ) -> bool
    where
        R: Rng,
        I: IntoIterator<Item = Position> + Clone,
    {
        let occupied = |pos: Position| snake.clone().into_iter().any(|p| p == pos);
        for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
            let candidate = Apple::generate_position(grid, rng);
            if !occupied(candidate) {
                self.position = candidate;
                return true;
            }
        }
        log::debug!(
            "No free cell found for {:?} apple after {} attempts; enumerating free cells",
            self.kind,
            consts::MAX_PLACEMENT_ATTEMPTS
        );
        match grid.cells().filter(|&p| !occupied(p)).choose(rng) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}
