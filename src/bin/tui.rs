use cursive::direction::Direction;
use cursive::event::{self, Event, EventResult};
use cursive::theme::{Color, Effect, PaletteColor};
use cursive::view::{CannotFocus, View};
use cursive::{Cursive, CursiveExt, Printer, Vec2};
use minesweeper::{
    logging, Args, Canvas, Config, Game, Glyph, Key, Position, RandomPairs, TerminalSize,
};
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    let args = Args::parse_or_exit();
    logging::init(&args);

    let config =
        Config::resolve(&args, TerminalSize::detect()).unwrap_or_else(|err| Args::exit_with(&err));
    let mut pairs = args.seed.map_or_else(RandomPairs::reseeded, RandomPairs::from_seed);
    log::info!("board seed {}", pairs.seed());

    // Nothing has touched the terminal yet, so errors print cleanly
    let game = Game::generate(&config, &mut pairs).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        thread::sleep(Duration::from_secs(2));
        process::exit(1);
    });

    let mut siv = Cursive::new();
    plain_theme(&mut siv);
    siv.add_fullscreen_layer(BoardView::new(game));

    // Start the event loop; the terminal is restored when it returns
    siv.run();
}

/// Use the terminal's own colours, without shadows.
fn plain_theme(siv: &mut Cursive) {
    let mut theme = siv.current_theme().clone();
    theme.shadow = false;
    for color in [
        PaletteColor::Background,
        PaletteColor::View,
        PaletteColor::Primary,
    ] {
        theme.palette[color] = Color::TerminalDefault;
    }
    siv.set_theme(theme);
}

/// The board, drawn from a canvas the game paints on.
struct BoardView {
    game: Game,
    canvas: Canvas,
}

impl BoardView {
    fn new(game: Game) -> BoardView {
        let mut canvas = Canvas::new();
        game.start(&mut canvas);
        BoardView { game, canvas }
    }

    /// Translate a terminal event into a key.
    fn key(event: &Event) -> Option<Key> {
        let key = match *event {
            Event::Char(c) => Key::from(c),
            Event::CtrlChar('c') => Key::Interrupt,
            Event::CtrlChar(c) => Key::Ctrl(c),
            Event::Key(event::Key::Up) => Key::Up,
            Event::Key(event::Key::Down) => Key::Down,
            Event::Key(event::Key::Left) => Key::Left,
            Event::Key(event::Key::Right) => Key::Right,
            Event::Key(event::Key::End) => Key::End,
            _ => return None,
        };
        Some(key)
    }
}

impl View for BoardView {
    fn draw(&self, printer: &Printer) {
        let (width, height) = self.canvas.size();
        let (width, height) = (width as usize, height as usize);
        let rule = format!("+{}+", "-".repeat(2 * width + 1));

        printer.print((0, 0), &rule);
        for y in 1..=height {
            printer.print((0, y), "|");
            for x in 1..=width {
                let pos = Position(x as u8, y as u8);
                let glyph = self.canvas.glyph(pos).unwrap_or(Glyph::Cover).to_string();
                if self.canvas.highlighted() == Some(pos) {
                    printer.with_effect(Effect::Reverse, |printer| {
                        printer.print((2 * x, y), &glyph);
                    });
                } else {
                    printer.print((2 * x, y), &glyph);
                }
            }
            printer.print((2 * width + 2, y), "|");
        }
        printer.print((0, height + 1), &rule);

        let mut status = self.canvas.status_line();
        if self.game.status().over() {
            status.push_str("  Press any key to exit.");
        }
        printer.print((0, height + 2), &status);
    }

    fn required_size(&mut self, _constraint: Vec2) -> Vec2 {
        let (width, height) = self.canvas.size();
        Vec2::new(2 * width as usize + 3, height as usize + 3)
    }

    fn take_focus(&mut self, _source: Direction) -> Result<EventResult, CannotFocus> {
        Ok(EventResult::Consumed(None))
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        let Some(key) = BoardView::key(&event) else {
            return EventResult::Ignored;
        };

        // Any key acknowledges the final board
        if key == Key::Interrupt || self.game.status().over() {
            return EventResult::with_cb(|s| s.quit());
        }

        self.game.feed(key, &mut self.canvas);
        if self.canvas.take_redraw() {
            return EventResult::with_cb(|s| s.clear());
        }
        EventResult::Consumed(None)
    }
}
