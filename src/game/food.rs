use super::snake::Snake;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    seq::IteratorRandom,
    Rng,
};
use ratatui::{
    layout::{Position, Positions, Rect},
    style::Color,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Position,
    pub(crate) kind: FoodKind,
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum FoodKind {
    Normal,
    Bonus,
    Super,
    Slow,
}

impl FoodKind {
    pub(crate) fn spec(self) -> FoodSpec {
        match self {
            FoodKind::Normal => FoodSpec {
                score: 10,
                color: Color::Rgb(255, 85, 85),
                symbol: '●',
                effect: Effect::None,
                weight: 65,
                particles: 8,
            },
            FoodKind::Bonus => FoodSpec {
                score: 25,
                color: Color::Rgb(255, 215, 0),
                symbol: '◆',
                effect: Effect::SpeedUp,
                weight: 10,
                particles: 14,
            },
            FoodKind::Super => FoodSpec {
                score: 50,
                color: Color::Rgb(255, 64, 255),
                symbol: '★',
                effect: Effect::Rainbow,
                weight: 10,
                particles: 20,
            },
            FoodKind::Slow => FoodSpec {
                score: 5,
                color: Color::Rgb(0, 191, 255),
                symbol: '◎',
                effect: Effect::SlowDown,
                weight: 15,
                particles: 14,
            },
        }
    }

    /// Pick a kind of food at random according to the kinds' weights
    pub(super) fn random<R: Rng + ?Sized>(rng: &mut R) -> FoodKind {
        let dist = WeightedIndex::new(FoodKind::iter().map(|kind| kind.spec().weight))
            .expect("food weights should be positive");
        FoodKind::from_usize(dist.sample(rng))
    }
}

/// Everything that distinguishes one kind of food from another
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpec {
    /// Points awarded for eating the food
    pub(crate) score: u32,

    /// Color of the food and of the particles it gives off when eaten
    pub(crate) color: Color,

    /// Glyph drawn in the left column of the food's cell
    pub(crate) symbol: char,

    pub(crate) effect: Effect,

    /// Relative likelihood of this kind being picked when placing new food
    pub(crate) weight: u32,

    /// Number of particles given off when eaten
    pub(crate) particles: usize,
}

/// Gameplay modifier applied when a food is eaten
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Effect {
    None,
    SpeedUp,
    SlowDown,
    Rainbow,
}

/// Place a new food of a random kind in a random cell not occupied by the
/// snake.  Returns `None` if the snake fills the entire grid.
pub(super) fn place_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Option<Food> {
    let position = random_free_cell(rng, snake)?;
    Some(Food {
        position,
        kind: FoodKind::random(rng),
    })
}

fn random_free_cell<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Option<Position> {
    for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
        let pos = Position::new(
            rng.random_range(0..consts::GRID_SIZE),
            rng.random_range(0..consts::GRID_SIZE),
        );
        if !snake.contains(pos) {
            return Some(pos);
        }
    }
    // The grid is crowded; only look at what's left.
    grid_positions()
        .filter(|&pos| !snake.contains(pos))
        .choose(rng)
}

pub(super) fn grid_positions() -> Positions {
    Rect::new(0, 0, consts::GRID_SIZE, consts::GRID_SIZE).positions()
}
