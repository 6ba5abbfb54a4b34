mod apple;
mod direction;
mod snake;
use self::apple::{Apple, AppleKind};
use self::direction::Direction;
use self::snake::Snake;
use crate::app::Screen;
use crate::color::{Backdrop, ColorCycle, Rgb};
use crate::command::Command;
use crate::consts;
use crate::geometry::{Grid, Position};
use crate::highscore::HighScore;
use crate::util::get_display_area;
use crossterm::event::{poll, read, Event};
use enum_map::EnumMap;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    state: GameState,
    score: u32,
    high_score: HighScore,
    snake: Snake,
    apples: EnumMap<AppleKind, Apple>,
    colors: ColorCycle,
    backdrop: Backdrop,
    /// When the current round entered [`GameState::Playing`]
    playing_since: Option<Instant>,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: Grid, high_score: HighScore) -> Self {
        Game::new_with_rng(grid, high_score, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(grid: Grid, high_score: HighScore, mut rng: R) -> Game<R> {
        let snake = Snake::new(grid.center(), grid.cell_size());
        let apples = EnumMap::from_fn(|kind| {
            Apple::new(kind, snake.body().iter().copied(), grid, &mut rng)
        });
        Game {
            rng,
            grid,
            state: GameState::Menu,
            score: 0,
            high_score,
            snake,
            apples,
            colors: ColorCycle::new(),
            backdrop: Backdrop::new(),
            playing_since: None,
            next_tick: None,
        }
    }

    /// Wait for either the next input event or the next tick, whichever comes
    /// first, and handle it.  Ticks happen at a fixed rate regardless of
    /// state.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + consts::TICK_PERIOD);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.tick(Instant::now());
            self.next_tick = None;
            Ok(None)
        } else {
            Ok(self.handle_event(&read()?, Instant::now()))
        }
    }

    fn handle_event(&mut self, event: &Event, now: Instant) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?);
        self.handle_command(cmd, now)
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) -> Option<Screen> {
        if cmd == Command::Quit {
            return Some(Screen::Quit);
        }
        match self.state {
            GameState::Menu => self.start_playing(now),
            GameState::Playing => match cmd {
                Command::Up => self.snake.set_pending_direction(Direction::North),
                Command::Down => self.snake.set_pending_direction(Direction::South),
                Command::Left => self.snake.set_pending_direction(Direction::West),
                Command::Right => self.snake.set_pending_direction(Direction::East),
                _ => (),
            },
            GameState::GameOver(_) => {
                if cmd == Command::Restart {
                    self.restart(now);
                }
            }
        }
        None
    }

    /// Advance the simulation by one step.  Nothing happens outside of play or
    /// during the grace period at the start of a round.
    fn tick(&mut self, now: Instant) {
        if self.state != GameState::Playing || self.in_grace_period(now) {
            return;
        }
        if !self.eat_apples() {
            log::info!("No room left for apples; round over with score {}", self.score);
            self.end_round(EndReason::Exhausted);
            return;
        }
        self.snake.advance();
        if self.snake.collides_with_border(self.grid) || self.snake.collides_with_self() {
            log::debug!(
                "Snake crashed at {:?}; round over with score {}",
                self.snake.head(),
                self.score
            );
            self.end_round(EndReason::Collision);
        }
    }

    /// Eat any apples under the snake's head.  Returns `false` if an eaten
    /// apple could not be put back on the board.
    fn eat_apples(&mut self) -> bool {
        let head = self.snake.head();
        let mut placed = true;
        for apple in self.apples.values_mut() {
            if apple.position != head {
                continue;
            }
            self.snake.grow();
            self.score += 1;
            log::debug!(
                "Ate {:?} apple; score {}, length {}",
                apple.kind,
                self.score,
                self.snake.len()
            );
            match self.high_score.update(self.score) {
                Ok(true) => log::info!("New high score: {}", self.score),
                Ok(false) => (),
                Err(e) => log::error!("{:#}", anyhow::Error::new(e)),
            }
            placed &= apple.generate_new_position(
                self.snake.body().iter().copied(),
                self.grid,
                &mut self.rng,
            );
            self.snake.set_color(self.colors.advance());
            self.backdrop.change(apple.color());
        }
        placed
    }

    /// Put everything back the way it was at the start of the game and begin
    /// a new round.  The high score is kept.
    fn restart(&mut self, now: Instant) {
        self.snake.reset(self.grid.center());
        for apple in self.apples.values_mut() {
            let placed = apple.generate_new_position(
                self.snake.body().iter().copied(),
                self.grid,
                &mut self.rng,
            );
            debug_assert!(placed, "no free cell for {:?} apple on restart", apple.kind);
        }
        self.score = 0;
        self.colors.reset();
        self.backdrop.reset();
        self.start_playing(now);
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn start_playing(&mut self, now: Instant) {
        log::debug!("Starting round");
        self.state = GameState::Playing;
        self.playing_since = Some(now);
    }

    fn end_round(&mut self, reason: EndReason) {
        self.state = GameState::GameOver(reason);
        self.playing_since = None;
    }

    fn in_grace_period(&self, now: Instant) -> bool {
        self.playing_since
            .is_some_and(|since| now.saturating_duration_since(since) <= consts::GRACE_PERIOD)
    }

    /// The size of the area needed to display the game
    fn display_size(&self) -> Size {
        let board = board_size(self.grid);
        Size {
            width: board.width.max(MIN_DISPLAY_WIDTH),
            height: board.height.saturating_add(2),
        }
    }
}

/// The narrowest the display may be, so that all messages fit
const MIN_DISPLAY_WIDTH: u16 = 40;

/// Size of the bordered board for `grid`
fn board_size(grid: Grid) -> Size {
    Size {
        width: grid
            .columns()
            .saturating_mul(consts::CELL_WIDTH)
            .saturating_add(2),
        height: grid.rows().saturating_add(2),
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = Style::new().bg(self.backdrop.color().into());
        let display = get_display_area(area, self.display_size());
        buf.set_style(display, background);
        let board = board_size(self.grid);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board.height),
            Constraint::Length(1),
        ])
        .areas(display);

        let [score_left, score_right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(score_area);
        Line::styled(format!(" Score: {}", self.score), consts::TEXT_STYLE)
            .render(score_left, buf);
        Line::styled(
            format!("Highscore: {} ", self.high_score.get()),
            consts::TEXT_STYLE,
        )
        .right_aligned()
        .render(score_right, buf);

        let [block_area] = Layout::horizontal([board.width])
            .flex(Flex::Center)
            .areas(board_area);
        let block = Block::bordered().border_style(Style::new().fg(consts::GRID_COLOR.into()));
        let level_area = block.inner(block_area);
        block.render(block_area, buf);
        let mut level = Canvas {
            area: level_area,
            grid: self.grid,
            background: self.backdrop.color(),
            buf,
        };
        for pos in self.grid.cells() {
            level.draw_cell(pos, consts::EMPTY_CELL_SYMBOL, consts::GRID_COLOR);
        }
        if self.state != GameState::Menu {
            for &pos in self.snake.body() {
                level.draw_cell(pos, consts::SOLID_CELL_SYMBOL, self.snake.color());
            }
            for apple in self.apples.values() {
                level.draw_cell(apple.position, consts::SOLID_CELL_SYMBOL, apple.color());
            }
        }

        match self.state {
            GameState::Menu => {
                Line::styled("Press any key to start", consts::TEXT_STYLE)
                    .centered()
                    .render(msg_area, buf);
            }
            GameState::Playing => (),
            GameState::GameOver(reason) => {
                let headline = match reason {
                    EndReason::Collision => "Game Over!",
                    EndReason::Exhausted => "Board full!",
                };
                Line::from_iter([
                    Span::styled(headline, consts::TEXT_STYLE),
                    Span::styled(" Press ", consts::TEXT_STYLE),
                    Span::styled("R", consts::KEY_STYLE),
                    Span::styled(" to restart", consts::TEXT_STYLE),
                ])
                .centered()
                .render(msg_area, buf);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    background: Rgb,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` in `color` over the cell containing `pos`.  Positions
    /// off the board are skipped.
    fn draw_cell(&mut self, pos: Position, symbol: &str, color: Rgb) {
        let Some((col, row)) = self.grid.to_cell(pos) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if x < self.area.right() && y < self.area.bottom() {
            let style = Style::new().fg(color.into()).bg(self.background.into());
            self.buf.set_string(x, y, symbol, style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    /// Waiting for the player to press a key
    Menu,
    Playing,
    GameOver(EndReason),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum EndReason {
    /// The snake ran into the edge of the board or into itself
    Collision,
    /// The snake has filled the board and there are no more cells to place
    /// apples in
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Just past the grace period
    const AFTER_GRACE: Duration = Duration::from_millis(600);

    struct Fixture {
        game: Game<ChaCha12Rng>,
        start: Instant,
        tmpdir: TempDir,
    }

    impl Fixture {
        fn new(grid: Grid) -> Fixture {
            let tmpdir = tempdir().unwrap();
            let high_score = HighScore::load(tmpdir.path().join("highscore.txt")).unwrap();
            let game = Game::new_with_rng(grid, high_score, ChaCha12Rng::seed_from_u64(RNG_SEED));
            Fixture {
                game,
                start: Instant::now(),
                tmpdir,
            }
        }

        /// Start a game and skip past the grace period; returns the time of
        /// the first real tick
        fn playing(grid: Grid) -> (Fixture, Instant) {
            let mut fx = Fixture::new(grid);
            assert!(fx.game.handle_command(Command::Other, fx.start).is_none());
            let now = fx.start + AFTER_GRACE;
            (fx, now)
        }

        fn high_score_file(&self) -> std::path::PathBuf {
            self.tmpdir.path().join("highscore.txt")
        }

        /// Move every apple out of the way, to cells the tests don't use
        fn park_apples(&mut self, pos: Position) {
            for apple in self.game.apples.values_mut() {
                apple.position = pos;
            }
        }
    }

    fn positions<const N: usize>(coords: [(i32, i32); N]) -> VecDeque<Position> {
        coords.into_iter().map(|(x, y)| Position::new(x, y)).collect()
    }

    fn read_file(path: &Path) -> String {
        fs_err::read_to_string(path).unwrap()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn new_game() {
        let fx = Fixture::new(Grid::new(520, 520, 20));
        let game = &fx.game;
        assert_eq!(game.state, GameState::Menu);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score.get(), 0);
        assert_eq!(
            game.snake.body,
            positions([(260, 260), (240, 260), (220, 260), (200, 260)])
        );
        for apple in game.apples.values() {
            assert!(game.grid.contains(apple.position));
            assert!(!game.snake.body().contains(&apple.position));
        }
        assert_eq!(game.apples[AppleKind::Gold].kind, AppleKind::Gold);
        assert_eq!(game.apples[AppleKind::Red].kind, AppleKind::Red);
        assert_eq!(game.backdrop.color(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn any_key_starts() {
        let mut fx = Fixture::new(Grid::new(520, 520, 20));
        assert!(fx.game.handle_command(Command::Up, fx.start).is_none());
        assert_eq!(fx.game.state, GameState::Playing);
        // The key that starts the game isn't treated as a turn.
        assert_eq!(fx.game.snake.pending_direction, None);
    }

    #[test]
    fn menu_does_not_tick() {
        let mut fx = Fixture::new(Grid::new(520, 520, 20));
        let before = fx.game.snake.clone();
        fx.game.tick(fx.start + AFTER_GRACE);
        assert_eq!(fx.game.snake, before);
        assert_eq!(fx.game.state, GameState::Menu);
    }

    #[test]
    fn quit_from_anywhere() {
        let mut fx = Fixture::new(Grid::new(520, 520, 20));
        assert!(matches!(
            fx.game.handle_command(Command::Quit, fx.start),
            Some(Screen::Quit)
        ));
        fx.game.state = GameState::Playing;
        assert!(matches!(
            fx.game.handle_command(Command::Quit, fx.start),
            Some(Screen::Quit)
        ));
        fx.game.state = GameState::GameOver(EndReason::Collision);
        assert!(matches!(
            fx.game.handle_command(Command::Quit, fx.start),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn ctrl_c_event_quits() {
        let mut fx = Fixture::new(Grid::new(520, 520, 20));
        let ev = Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        ));
        assert!(matches!(
            fx.game.handle_event(&ev, fx.start),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn grace_period() {
        let (mut fx, _) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        assert!(fx
            .game
            .handle_command(Command::Down, fx.start + Duration::from_millis(100))
            .is_none());
        fx.game.tick(fx.start + Duration::from_millis(400));
        fx.game.tick(fx.start + Duration::from_millis(500));
        assert_eq!(fx.game.snake.head(), Position::new(260, 260));
        // The turn is buffered until the snake starts moving.
        assert_eq!(fx.game.snake.pending_direction, Some(Direction::South));
        fx.game.tick(fx.start + Duration::from_millis(501));
        assert_eq!(fx.game.snake.head(), Position::new(260, 280));
        assert_eq!(fx.game.snake.direction, Direction::South);
    }

    #[test]
    fn move_one_tick() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.snake.body = positions([(100, 100), (80, 100), (60, 100), (40, 100)]);
        fx.game.tick(now);
        assert_eq!(
            fx.game.snake.body,
            positions([(120, 100), (100, 100), (80, 100), (60, 100)])
        );
        assert_eq!(fx.game.score, 0);
        assert_eq!(fx.game.state, GameState::Playing);
    }

    #[test]
    fn reversal_is_ignored() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        assert!(fx.game.handle_command(Command::Left, now).is_none());
        fx.game.tick(now);
        assert_eq!(fx.game.snake.direction, Direction::East);
        assert_eq!(fx.game.snake.head(), Position::new(280, 260));
        assert_eq!(fx.game.state, GameState::Playing);
    }

    #[test]
    fn eat_apple() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.apples[AppleKind::Aqua].position = Position::new(260, 260);
        fx.game.tick(now);
        assert_eq!(fx.game.score, 1);
        assert_eq!(fx.game.high_score.get(), 1);
        assert_eq!(read_file(&fx.high_score_file()), "1");
        assert_eq!(
            fx.game.snake.body,
            positions([(280, 260), (260, 260), (240, 260), (220, 260), (200, 260)])
        );
        // The apple was moved before the snake did, so it only has to avoid
        // where the snake was at that point.
        let aqua = fx.game.apples[AppleKind::Aqua].position;
        assert!(fx.game.grid.contains(aqua));
        assert!(!positions([(260, 260), (240, 260), (220, 260), (200, 260)]).contains(&aqua));
        assert_eq!(fx.game.backdrop.color(), Rgb::new(225, 255, 255));
        // First step of the color cycle is the starting color itself.
        assert_eq!(fx.game.snake.color(), Rgb::new(0, 120, 0));
        assert_eq!(fx.game.state, GameState::Playing);
    }

    #[test]
    fn two_apples_at_once() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.apples[AppleKind::Gold].position = Position::new(260, 260);
        fx.game.apples[AppleKind::Aqua].position = Position::new(260, 260);
        fx.game.tick(now);
        assert_eq!(fx.game.score, 2);
        assert_eq!(fx.game.high_score.get(), 2);
        assert_eq!(read_file(&fx.high_score_file()), "2");
        assert_eq!(fx.game.snake.len(), 6);
        assert_eq!(fx.game.snake.head(), Position::new(280, 260));
        let before = positions([(260, 260), (240, 260), (220, 260), (200, 260)]);
        for kind in [AppleKind::Gold, AppleKind::Aqua] {
            assert!(!before.contains(&fx.game.apples[kind].position));
        }
        // Two steps of the color cycle: the starting color, then a quarter
        // of the way to the next one
        assert_eq!(fx.game.snake.color(), Rgb::new(0, 90, 30));
        // Aqua is eaten after Gold, so its tint wins.
        assert_eq!(fx.game.backdrop.color(), Rgb::new(225, 255, 255));
        assert_eq!(fx.game.state, GameState::Playing);
    }

    #[test]
    fn smallest_board() {
        let grid = crate::config::BoardConfig {
            width: 120,
            height: 20,
            cell_size: 20,
        }
        .grid()
        .unwrap();
        let (mut fx, now) = Fixture::playing(grid);
        for _ in 0..2 {
            assert_eq!(
                fx.game.snake.body,
                positions([(60, 0), (40, 0), (20, 0), (0, 0)])
            );
            for apple in fx.game.apples.values() {
                assert!(grid.contains(apple.position));
                assert!(!fx.game.snake.body().contains(&apple.position));
            }
            fx.game.end_round(EndReason::Collision);
            assert!(fx.game.handle_command(Command::Restart, now).is_none());
        }
    }

    #[test]
    fn length_grows_by_one_per_apple() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        let mut tick = now;
        for (i, x) in [260, 300, 340].into_iter().enumerate() {
            // Wait for the head to reach the apple
            while fx.game.snake.head() != Position::new(x, 260) {
                fx.game.tick(tick);
                tick += consts::TICK_PERIOD;
            }
            fx.game.apples[AppleKind::Red].position = Position::new(x, 260);
            let before = fx.game.snake.len();
            fx.game.tick(tick);
            tick += consts::TICK_PERIOD;
            fx.game.apples[AppleKind::Red].position = Position::new(0, 0);
            assert_eq!(fx.game.snake.len(), before + 1);
            assert_eq!(fx.game.score, u32::try_from(i + 1).unwrap());
        }
        assert_eq!(fx.game.snake.len(), 7);
        assert_eq!(fx.game.snake.color(), Rgb::new(0, 60, 60));
        assert_eq!(fx.game.backdrop.color(), Rgb::new(255, 225, 225));
        assert_eq!(read_file(&fx.high_score_file()), "3");
    }

    #[test]
    fn border_collision() {
        let (mut fx, now) = Fixture::playing(Grid::new(200, 100, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.snake.body = positions([(180, 40), (160, 40), (140, 40), (120, 40)]);
        fx.game.tick(now);
        assert_eq!(fx.game.snake.head(), Position::new(200, 40));
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Collision));
        // Nothing moves once the game is over.
        fx.game.tick(now + consts::TICK_PERIOD);
        assert_eq!(fx.game.snake.head(), Position::new(200, 40));
    }

    #[test]
    fn top_border_collision() {
        let (mut fx, now) = Fixture::playing(Grid::new(200, 100, 20));
        fx.park_apples(Position::new(180, 80));
        fx.game.snake.body = positions([(60, 0), (40, 0), (20, 0), (0, 0)]);
        assert!(fx.game.handle_command(Command::Up, now).is_none());
        fx.game.tick(now);
        assert_eq!(fx.game.snake.head(), Position::new(60, -20));
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Collision));
    }

    #[test]
    fn self_collision() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.snake.body = positions([
            (100, 100),
            (120, 100),
            (120, 120),
            (100, 120),
            (80, 120),
            (80, 100),
        ]);
        fx.game.snake.direction = Direction::West;
        assert!(fx.game.handle_command(Command::Down, now).is_none());
        fx.game.tick(now);
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Collision));
    }

    #[test]
    fn board_exhausted() {
        let (mut fx, now) = Fixture::playing(Grid::new(80, 20, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.snake.body = positions([(60, 0), (40, 0), (20, 0), (0, 0)]);
        fx.game.apples[AppleKind::Gold].position = Position::new(60, 0);
        fx.game.tick(now);
        assert_eq!(fx.game.score, 1);
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Exhausted));
    }

    #[test]
    fn game_over_only_restarts() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.game.state = GameState::GameOver(EndReason::Collision);
        let before = fx.game.snake.clone();
        for cmd in [Command::Up, Command::Left, Command::Other] {
            assert!(fx.game.handle_command(cmd, now).is_none());
        }
        assert_eq!(fx.game.snake, before);
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Collision));
    }

    #[test]
    fn restart() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fx.park_apples(Position::new(0, 0));
        fx.game.apples[AppleKind::Gold].position = Position::new(260, 260);
        fx.game.tick(now);
        fx.park_apples(Position::new(500, 500));
        fx.game.snake.set_pending_direction(Direction::North);
        fx.game.snake.body = positions([(100, 0), (100, 20), (100, 40), (100, 60), (100, 80)]);
        fx.game.tick(now + consts::TICK_PERIOD);
        assert_eq!(fx.game.state, GameState::GameOver(EndReason::Collision));
        assert_eq!(fx.game.score, 1);

        // `Restart` is only meaningful once the game is over.
        let later = now + Duration::from_secs(10);
        assert!(fx.game.handle_command(Command::Restart, later).is_none());
        assert_eq!(fx.game.state, GameState::Playing);
        assert_eq!(fx.game.score, 0);
        assert_eq!(fx.game.high_score.get(), 1);
        assert_eq!(fx.game.snake, Snake::new(Position::new(260, 260), 20));
        assert_eq!(fx.game.backdrop.color(), Rgb::new(255, 255, 255));
        assert_eq!(fx.game.colors, ColorCycle::new());
        for apple in fx.game.apples.values() {
            assert!(!fx.game.snake.body().contains(&apple.position));
        }

        // The grace period starts over with the new round.
        fx.game.tick(later + Duration::from_millis(200));
        assert_eq!(fx.game.snake.head(), Position::new(260, 260));
        assert!(fx.game.handle_command(Command::Restart, later).is_none());
        assert_eq!(fx.game.snake.pending_direction, None);
    }

    #[test]
    fn high_score_survives_restart() {
        let (mut fx, now) = Fixture::playing(Grid::new(520, 520, 20));
        fs_err::write(fx.high_score_file(), "2").unwrap();
        fx.game.high_score = HighScore::load(fx.high_score_file()).unwrap();
        fx.park_apples(Position::new(0, 0));
        fx.game.apples[AppleKind::Gold].position = Position::new(260, 260);
        fx.game.tick(now);
        assert_eq!(fx.game.score, 1);
        assert_eq!(fx.game.high_score.get(), 2);
        assert_eq!(read_file(&fx.high_score_file()), "2");
        fx.game.end_round(EndReason::Collision);
        assert!(fx.game.handle_command(Command::Restart, now).is_none());
        assert_eq!(fx.game.high_score.get(), 2);
    }

    mod render {
        use super::*;

        /// A 10×5 board; the display is 40×9 with the board's border spanning
        /// columns 9 through 30 and rows 1 through 7
        fn small_grid() -> Grid {
            Grid::new(200, 100, 20)
        }

        fn render(game: &Game<ChaCha12Rng>) -> Buffer {
            let area = Rect::new(0, 0, 40, 9);
            let mut buffer = Buffer::empty(area);
            game.render(area, &mut buffer);
            buffer
        }

        #[test]
        fn menu() {
            let fx = Fixture::new(small_grid());
            let buffer = render(&fx.game);
            assert_eq!(
                row_text(&buffer, 0),
                " Score: 0                  Highscore: 0 "
            );
            assert_eq!(
                row_text(&buffer, 1),
                "         ┌────────────────────┐         "
            );
            for y in 2..7 {
                assert_eq!(
                    row_text(&buffer, y),
                    "         │· · · · · · · · · · │         "
                );
            }
            assert_eq!(
                row_text(&buffer, 7),
                "         └────────────────────┘         "
            );
            assert_eq!(
                row_text(&buffer, 8),
                "         Press any key to start         "
            );
            assert_eq!(buffer[(0, 0)].bg, Color::Rgb(255, 255, 255));
            assert_eq!(buffer[(10, 2)].fg, Color::Rgb(173, 216, 230));
        }

        #[test]
        fn playing() {
            let (mut fx, _) = Fixture::playing(small_grid());
            fx.park_apples(Position::new(180, 80));
            fx.game.apples[AppleKind::Gold].position = Position::new(0, 0);
            fx.game.score = 12;
            let buffer = render(&fx.game);
            assert_eq!(
                row_text(&buffer, 0),
                " Score: 12                 Highscore: 0 "
            );
            assert_eq!(
                row_text(&buffer, 2),
                "         │██· · · · · · · · · │         "
            );
            assert_eq!(
                row_text(&buffer, 4),
                "         │· · ████████· · · · │         "
            );
            assert_eq!(
                row_text(&buffer, 6),
                "         │· · · · · · · · · ██│         "
            );
            assert_eq!(row_text(&buffer, 8).trim(), "");
            assert_eq!(buffer[(10, 2)].fg, Color::Rgb(255, 215, 0));
            assert_eq!(buffer[(28, 6)].fg, Color::Rgb(255, 0, 0));
            assert_eq!(buffer[(20, 4)].fg, Color::Rgb(0, 120, 0));
            assert_eq!(buffer[(20, 4)].bg, Color::Rgb(255, 255, 255));
        }

        #[test]
        fn game_over() {
            let (mut fx, now) = Fixture::playing(small_grid());
            fx.park_apples(Position::new(0, 0));
            fx.game.apples[AppleKind::Aqua].position = Position::new(100, 40);
            fx.game.tick(now);
            fx.game.end_round(EndReason::Collision);
            let buffer = render(&fx.game);
            assert_eq!(
                row_text(&buffer, 0),
                " Score: 1                  Highscore: 1 "
            );
            assert_eq!(
                row_text(&buffer, 8),
                "     Game Over! Press R to restart      "
            );
            assert_eq!(buffer[(0, 8)].bg, Color::Rgb(225, 255, 255));
            assert_eq!(buffer[(22, 8)].fg, Color::Black);
        }

        #[test]
        fn board_full() {
            let mut fx = Fixture::new(small_grid());
            fx.game.end_round(EndReason::Exhausted);
            let buffer = render(&fx.game);
            assert_eq!(
                row_text(&buffer, 8),
                "     Board full! Press R to restart     "
            );
        }
    }
}
