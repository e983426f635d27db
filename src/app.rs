use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;
use tracing::info;

#[derive(Clone, Debug)]
pub(crate) struct App<R = ThreadRng> {
    game: Game<R>,
    quitting: bool,
}

impl App<ThreadRng> {
    pub(crate) fn new() -> App<ThreadRng> {
        App::with_game(Game::new())
    }
}

impl<R: Rng> App<R> {
    pub(crate) fn with_game(game: Game<R>) -> App<R> {
        App {
            game,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        info!("starting up");
        while !self.quitting {
            terminal.draw(|frame| self.game.draw(frame))?;
            self.process_input()?;
        }
        info!("quitting");
        Ok(())
    }

    /// Handle input events until the next display refresh is due, then
    /// advance the game by one refresh
    fn process_input(&mut self) -> io::Result<()> {
        let mut wait = consts::FRAME_PERIOD;
        loop {
            let start = Instant::now();
            if !poll(wait)? {
                break;
            }
            self.handle_event(read()?);
            if self.quitting {
                return Ok(());
            }
            wait = wait.saturating_sub(start.elapsed());
        }
        self.game.frame(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        if cmd == Command::Quit {
            self.quitting = true;
        } else {
            self.game.handle_command(cmd);
        }
    }
}
