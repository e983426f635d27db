use super::direction::Direction;
use super::food::{Effect, Food};
use super::particles::{self, Particle};
use super::snake::Snake;
use super::theme::Theme;
use crate::consts;
use std::time::{Duration, Instant};
use tracing::debug;

/// Everything about a game in progress.  Mutated only by
/// [`Game`][super::Game]; drawn by its `Widget` implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(super) snake: Snake,

    /// `None` only once the snake has filled the grid
    pub(super) food: Option<Food>,

    /// The direction the snake will move in on the next step
    pub(super) pending_direction: Direction,

    pub(super) score: u32,

    /// Highest score reached since the program started
    pub(super) high_score: u32,

    /// Time between steps of the snake
    pub(super) tick_interval: Duration,

    pub(super) phase: Phase,

    pub(super) theme: Theme,

    /// When a temporary theme should revert to [`Theme::Classic`]
    pub(super) theme_expires_at: Option<Instant>,

    pub(super) particles: Vec<Particle>,

    /// Number of display refreshes since the state was created; drives
    /// animations
    pub(super) frame: u64,
}

impl GameState {
    /// Create a state for a new game that has not yet been started.  The
    /// caller is responsible for placing the food.
    pub(super) fn new(high_score: u32) -> GameState {
        GameState {
            snake: Snake::new(consts::START_POSITION, Direction::default()),
            food: None,
            pending_direction: Direction::default(),
            score: 0,
            high_score,
            tick_interval: consts::INITIAL_TICK_INTERVAL,
            phase: Phase::Ready,
            theme: Theme::default(),
            theme_expires_at: None,
            particles: Vec::new(),
            frame: 0,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    #[cfg(test)]
    pub(crate) fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// Add `points` to the score, raising the high score if it's been beaten
    pub(super) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub(super) fn apply_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::None => (),
            Effect::SpeedUp => {
                self.tick_interval = self
                    .tick_interval
                    .saturating_sub(consts::SPEED_UP_STEP)
                    .max(consts::MIN_TICK_INTERVAL);
                debug!(interval = ?self.tick_interval, "snake sped up");
            }
            Effect::SlowDown => {
                self.tick_interval = self
                    .tick_interval
                    .saturating_add(consts::SLOW_DOWN_STEP)
                    .min(consts::INITIAL_TICK_INTERVAL);
                debug!(interval = ?self.tick_interval, "snake slowed down");
            }
            Effect::Rainbow => {
                self.theme = Theme::Rainbow;
                self.theme_expires_at = Some(now + consts::RAINBOW_DURATION);
                debug!("rainbow theme activated");
            }
        }
    }

    /// Revert to the classic theme if the temporary theme has run its course
    pub(super) fn expire_theme(&mut self, now: Instant) {
        if self.theme_expires_at.is_some_and(|when| now >= when) {
            self.theme = Theme::Classic;
            self.theme_expires_at = None;
            debug!("theme reverted");
        }
    }

    pub(super) fn age_particles(&mut self) {
        particles::age_all(&mut self.particles);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Waiting for the player to start the first game
    Ready,
    Running,
    Paused,
    Over(Ending),
}

/// How a game came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into a wall or itself
    Collision,

    /// The snake has filled the grid and there are no more cells to place
    /// food in.
    BoardFilled,
}
