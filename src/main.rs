use minesweeper::*;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
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

    let mut game = Game::generate(&config, &mut pairs).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        thread::sleep(Duration::from_secs(2));
        process::exit(1);
    });

    println!("Welcome to Minesweeper!");
    println!();
    println!("USAGE: type keys, then press enter");
    println!("\th j k l     \tMove left, down, up, right");
    println!("\tq p z /     \tJump to a corner");
    println!("\tH L 0 $ M   \tJump to the top, bottom, left, right or middle");
    println!("\ts *         \tStep on the cell");
    println!("\tf +         \tFlag the cell");
    println!("\t?           \tWhere am I?");
    println!("\tQ           \tQuit");
    println!();

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock());
    if game.run(&mut prompt).is_none() {
        // Interrupted
        return;
    }

    // Leave a chance to look at the board
    println!("{}", prompt.canvas);
    print!("Press enter to exit. ");
    let _ = io::stdout().flush();
    let _ = prompt.input.read_line(&mut String::new());
}

/// A line-at-a-time terminal: the board is printed before every prompt, and each character
/// typed counts as one key.
struct Prompt<R> {
    canvas: Canvas,
    input: R,
    pending: VecDeque<Key>,
}

impl<R: BufRead> Prompt<R> {
    fn new(input: R) -> Prompt<R> {
        Prompt {
            canvas: Canvas::new(),
            input,
            pending: VecDeque::new(),
        }
    }
}

impl<R> Screen for Prompt<R> {
    fn draw_cell(&mut self, pos: Position, glyph: Glyph, highlighted: bool) {
        self.canvas.draw_cell(pos, glyph, highlighted);
    }

    fn draw_border(&mut self, width: u8, height: u8) {
        self.canvas.draw_border(width, height);
    }

    fn set_status(&mut self, remaining: i32, total: u16) {
        self.canvas.set_status(remaining, total);
    }

    fn announce(&mut self, message: &str) {
        self.canvas.announce(message);
    }

    fn full_redraw(&mut self) {
        println!("{}", self.canvas);
    }
}

impl<R: BufRead> Keyboard for Prompt<R> {
    fn read_key(&mut self) -> Key {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return key;
            }

            // Print board and prompt
            println!("{}", self.canvas);
            print!(">> ");
            if io::stdout().flush().is_err() {
                return Key::Interrupt;
            }

            // Get user input
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Key::Interrupt,
                Ok(_) => (),
            }
            let line = line.trim_end_matches(['\r', '\n']);
            self.pending.extend(line.chars().map(Key::from));
        }
    }
}
