//! Line-oriented text protocol for front ends.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and a response starting with `=` (success) or `?`
//! (failure) followed by the id and a message, terminated by a blank line.
//! A renderer drives the game through it and animates the moves it reports.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identity
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `boardsize <size>` - Switch board size and start a new game
//! - `new [size]`, `clear_board` - Start a new game
//! - `pick <cell>` - Click a cell: select a piece, or move the selected piece
//! - `play <from> <to>` - Play a move directly
//! - `genmove` - Play a random legal move for the side to move
//! - `undo` - Take back the last move
//! - `replay` - List the game's moves, one `from to` pair per line
//! - `showboard`, `status`, `turn`, `score`, `moves`, `last_move` - Inspect the game
//!
//! Cells are flat indices (`row * size + col`) or algebraic (`b3`).
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(Default::default());
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::config::GameConfig;
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::game::{self, GameStatus};
use crate::playout::random_move;
use crate::position::{Position, parse_cell};
use crate::session::{PickOutcome, Session};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "last_move",
    "list_commands",
    "moves",
    "name",
    "new",
    "pick",
    "play",
    "protocol_version",
    "quit",
    "replay",
    "score",
    "showboard",
    "status",
    "turn",
    "undo",
    "version",
];

/// Protocol front end over a [`Session`].
pub struct ProtocolEngine {
    session: Session,
    rng: fastrand::Rng,
}

impl ProtocolEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Engine whose `genmove` choices come from `rng`.
    pub fn with_rng(config: GameConfig, rng: fastrand::Rng) -> Self {
        Self {
            session: Session::new(config),
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!("command: {command} {args:?}");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn cell(&self, arg: &str) -> Result<Position, String> {
        parse_cell(arg, self.session.config().size()).ok_or_else(|| format!("invalid cell {arg}"))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(&arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                self.new_game(Some(arg))
            }

            "new" => self.new_game(args.first().copied()),

            "clear_board" => self.new_game(None),

            "pick" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let position = match self.cell(arg) {
                    Ok(position) => position,
                    Err(message) => return (false, message),
                };
                match self.session.pick_position(position) {
                    PickOutcome::Selected(pos) => (true, format!("selected {pos}")),
                    PickOutcome::Moved(mv) => (true, format!("moved {mv}")),
                    PickOutcome::Rejected(err) => (false, err.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let (origin, destination) = match (self.cell(args[0]), self.cell(args[1])) {
                    (Ok(origin), Ok(destination)) => (origin, destination),
                    (Err(message), _) | (_, Err(message)) => return (false, message),
                };
                match self.session.play(origin, destination) {
                    Ok(state) => match game::last_move(&state) {
                        Some(mv) => (true, mv.to_string()),
                        None => (true, String::new()),
                    },
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let state = self.session.snapshot();
                if game::game_status(&state).is_terminal() {
                    return (false, "the game is over".to_string());
                }
                let Some(mv) = random_move(&state, &mut self.rng) else {
                    return (false, "no legal move".to_string());
                };
                match self.session.play(mv.init_pos, mv.final_pos) {
                    Ok(_) => (true, mv.to_string()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "undo" => {
                let state = self.session.undo();
                (true, format!("{} moves", state.move_history().len()))
            }

            "replay" => {
                let state = self.session.snapshot();
                let lines: Vec<String> = game::replay(&state)
                    .map(|(from, to)| format!("{from} {to}"))
                    .collect();
                (true, lines.join("\n"))
            }

            "showboard" => (true, format!("\n{}", self.session.snapshot())),

            "status" => {
                let message = match self.session.status() {
                    GameStatus::Ongoing => "ongoing".to_string(),
                    GameStatus::Victory(side) => format!("{side} wins"),
                };
                (true, message)
            }

            "turn" => (true, self.session.snapshot().turn().to_string()),

            "score" => {
                let score = self.session.snapshot().score();
                (
                    true,
                    format!("black {} white {}", score.blacks_score, score.whites_score),
                )
            }

            "moves" => {
                let state = self.session.snapshot();
                let moves: Vec<String> = state
                    .valid_moves()
                    .values()
                    .flatten()
                    .map(|mv| mv.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "last_move" => {
                let state = self.session.snapshot();
                let message = game::last_move(&state)
                    .map(|mv| mv.to_string())
                    .unwrap_or_default();
                (true, message)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn new_game(&mut self, size: Option<&str>) -> (bool, String) {
        let config = match size {
            None => None,
            Some(arg) => match arg.parse::<usize>() {
                Ok(size) => match GameConfig::new(size) {
                    Ok(config) => Some(config),
                    Err(err) => return (false, err.to_string()),
                },
                Err(_) => return (false, "invalid size".to_string()),
            },
        };
        let state = self.session.reset(config);
        info!("new {0}x{0} game", state.size());
        (true, String::new())
    }
}
