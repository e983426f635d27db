//! Decorative particles thrown off when the snake eats.  Particles have no
//! effect on gameplay.
use crate::consts;
use rand::Rng;
use ratatui::{layout::Position, style::Color};

/// Number of fixed-point units per grid cell along each axis
pub(crate) const SUBCELL: i32 = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Particle {
    /// Horizontal position, in units of 1/[`SUBCELL`] of a cell
    pub(super) x: i32,

    /// Vertical position, in units of 1/[`SUBCELL`] of a cell
    pub(super) y: i32,

    /// Horizontal movement per refresh
    pub(super) dx: i32,

    /// Vertical movement per refresh
    pub(super) dy: i32,

    pub(super) color: Color,

    /// 1 (smallest) through 3 (largest)
    pub(super) size: u8,

    /// Number of refreshes left before the particle disappears
    pub(super) life: u16,
}

impl Particle {
    const MAX_HORIZONTAL_SPEED: i32 = 5;
    const MAX_VERTICAL_SPEED: i32 = 3;
    const MAX_SIZE: u8 = 3;

    /// Create a particle in the center of the cell at `origin`, flying off in
    /// a random direction
    fn random<R: Rng + ?Sized>(rng: &mut R, origin: Position, color: Color) -> Particle {
        let dx = rng.random_range(-Self::MAX_HORIZONTAL_SPEED..=Self::MAX_HORIZONTAL_SPEED);
        let mut dy = rng.random_range(-Self::MAX_VERTICAL_SPEED..=Self::MAX_VERTICAL_SPEED);
        if dx == 0 && dy == 0 {
            dy = -1;
        }
        Particle {
            x: i32::from(origin.x) * SUBCELL + SUBCELL / 2,
            y: i32::from(origin.y) * SUBCELL + SUBCELL / 2,
            dx,
            dy,
            color,
            size: rng.random_range(1..=Self::MAX_SIZE),
            life: consts::PARTICLE_LIFETIME
                + rng.random_range(0..=consts::PARTICLE_LIFETIME_JITTER),
        }
    }

    /// Advance the particle by one refresh.  Returns `false` once the
    /// particle has expired.
    pub(super) fn age(&mut self) -> bool {
        self.x += self.dx;
        self.y += self.dy;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Return the terminal column & row (relative to the top-left corner of
    /// the grid) at which to draw the particle, or `None` if it has drifted
    /// off the grid
    pub(super) fn screen_position(&self) -> Option<Position> {
        let column_width = SUBCELL / i32::from(consts::CELL_WIDTH);
        let x = u16::try_from(self.x.div_euclid(column_width)).ok()?;
        let y = u16::try_from(self.y.div_euclid(SUBCELL)).ok()?;
        (x < consts::GRID_SIZE * consts::CELL_WIDTH && y < consts::GRID_SIZE)
            .then_some(Position { x, y })
    }

    pub(super) fn symbol(&self) -> char {
        if self.fading() {
            return '·';
        }
        match self.size {
            0 | 1 => '·',
            2 => '•',
            _ => '✦',
        }
    }

    pub(super) fn fading(&self) -> bool {
        self.life <= consts::PARTICLE_FADE_LIFE
    }
}

/// Create `count` particles bursting out of the cell at `origin`
pub(super) fn burst<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Position,
    color: Color,
    count: usize,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::random(rng, origin, color))
        .collect()
}

/// Age every particle by one refresh and discard the expired ones
pub(super) fn age_all(particles: &mut Vec<Particle>) {
    particles.retain_mut(Particle::age);
}
