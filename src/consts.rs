//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between display refreshes.  Particles and animations advance once
/// per refresh; the snake moves only when a full tick interval has elapsed.
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Time between movements of the snake at the start of a game.  This is also
/// the slowest the snake can be made to go.
pub(crate) const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// The fastest the snake can be made to go
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(60);

/// Amount by which eating a speed-up food shortens the tick interval
pub(crate) const SPEED_UP_STEP: Duration = Duration::from_millis(10);

/// Amount by which eating a slow-down food lengthens the tick interval
pub(crate) const SLOW_DOWN_STEP: Duration = Duration::from_millis(20);

/// How long the rainbow theme lasts after eating a super food
pub(crate) const RAINBOW_DURATION: Duration = Duration::from_secs(5);

/// Width & height of the (square) playing field, in cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Number of terminal columns used to draw a single cell.  Terminal
/// characters are roughly twice as tall as they are wide, so this keeps the
/// cells square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Where the snake's head starts out
pub(crate) const START_POSITION: Position = Position {
    x: GRID_SIZE / 2,
    y: GRID_SIZE / 2,
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of random cells to try when placing food before falling back to
/// choosing among the free cells directly
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Number of refreshes a particle lives for, before jitter
pub(crate) const PARTICLE_LIFETIME: u16 = 24;

/// Maximum number of extra refreshes randomly added to a particle's lifetime
pub(crate) const PARTICLE_LIFETIME_JITTER: u16 = 12;

/// Particles with at most this many refreshes left are drawn faded
pub(crate) const PARTICLE_FADE_LIFE: u16 = 6;

/// Number of refreshes between flips of the food's pulsing animation
pub(crate) const PULSE_PERIOD: u64 = 15;

/// Glyphs for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "◐◑";

/// Glyphs for the parts of the snake's body between the head and the tail
pub(crate) const SNAKE_BODY_SYMBOL: &str = "◖◗";

/// Glyphs for the last cell of the snake
pub(crate) const SNAKE_TAIL_SYMBOL: &str = "▪▪";

/// Glyphs for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
