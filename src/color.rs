//! Snake color cycling & background tinting
use crate::consts;
use ratatui::style::Color;

/// A 24-bit RGB color
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Linearly interpolate each component from `self` towards `other` by
    /// `t`, truncating towards zero.  `t` is clamped to `[0, 1]`.
    pub(crate) fn interpolate(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }

    /// Add `amount` to each component, saturating at 255
    pub(crate) fn lighten(self, amount: u8) -> Rgb {
        Rgb {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Color {
        Color::Rgb(value.r, value.g, value.b)
    }
}

// With `t` in [0, 1] the result always lies between `a` and `b`, so the
// final cast can neither truncate nor lose a sign.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).trunc() as u8
}

/// Steps the snake's color through a fixed cycle of colors, one step per
/// apple eaten
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ColorCycle {
    colors: [Rgb; 3],
    index: usize,
    transition: f64,
}

impl ColorCycle {
    pub(crate) fn new() -> ColorCycle {
        ColorCycle {
            colors: consts::SNAKE_COLOR_CYCLE,
            index: 0,
            transition: 0.0,
        }
    }

    /// Advance the cycle in response to an apple being eaten and return the
    /// snake's new color.
    ///
    /// The returned color is computed from the transition progress as it
    /// stood *before* this call; the progress is incremented afterwards.  Once
    /// the progress reaches 1, the next call moves on to the next pair of
    /// colors, starting from zero progress.
    pub(crate) fn advance(&mut self) -> Rgb {
        if self.transition >= 1.0 {
            self.transition = 0.0;
            self.index = (self.index + 1) % self.colors.len();
        }
        let color = self.current().interpolate(self.next(), self.transition);
        self.transition += consts::COLOR_TRANSITION_STEP;
        color
    }

    pub(crate) fn reset(&mut self) {
        self.index = 0;
        self.transition = 0.0;
    }

    fn current(&self) -> Rgb {
        self.colors[self.index]
    }

    fn next(&self) -> Rgb {
        self.colors[(self.index + 1) % self.colors.len()]
    }
}

/// The background color of the board, tinted after the most recently eaten
/// apple
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Backdrop(Rgb);

impl Backdrop {
    pub(crate) fn new() -> Backdrop {
        Backdrop(consts::BACKGROUND_COLOR)
    }

    pub(crate) fn color(self) -> Rgb {
        self.0
    }

    pub(crate) fn change(&mut self, apple_color: Rgb) {
        self.0 = apple_color.lighten(consts::BACKGROUND_LIGHTEN);
    }

    pub(crate) fn reset(&mut self) {
        self.0 = consts::BACKGROUND_COLOR;
    }
}
