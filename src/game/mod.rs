mod direction;
mod food;
mod particles;
mod render;
mod snake;
mod state;
mod theme;
mod ticker;
pub(crate) use self::state::GameState;
use self::direction::Direction;
use self::food::{place_food, Food, FoodKind};
use self::state::{Ending, Phase};
use self::ticker::TickDriver;
use crate::command::Command;
use rand::Rng;
use ratatui::Frame;
use std::time::Instant;
use tracing::{debug, info, trace};

/// The game controller: owns the game state and is the only thing that
/// changes it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    state: GameState,
    ticker: TickDriver,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new() -> Self {
        Game::new_with_rng(rand::rng())
    }
}

impl<R: Rng> Game<R> {
    /// Create a game in the "ready" phase, waiting for the player to start
    pub(crate) fn new_with_rng(mut rng: R) -> Game<R> {
        let mut state = GameState::new(0);
        state.food = place_food(&mut rng, &state.snake);
        Game {
            rng,
            state,
            ticker: TickDriver::new(),
        }
    }

    /// Respond to a command from the player
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Up => self.turn(Direction::Up),
            Command::Down => self.turn(Direction::Down),
            Command::Left => self.turn(Direction::Left),
            Command::Right => self.turn(Direction::Right),
            Command::StartPause => match self.state.phase {
                Phase::Ready | Phase::Over(_) => self.reset_and_start(),
                Phase::Running => {
                    self.state.phase = Phase::Paused;
                    debug!("game paused");
                }
                Phase::Paused => {
                    self.state.phase = Phase::Running;
                    self.ticker.reset();
                    debug!("game resumed");
                }
            },
            Command::Quit => (),
        }
    }

    /// Advance the game by one display refresh.  The snake takes a step if
    /// the game is running and a full tick interval has passed since its
    /// last step; particles age on every refresh regardless.
    pub(crate) fn frame(&mut self, now: Instant) {
        self.state.frame = self.state.frame.wrapping_add(1);
        self.state.expire_theme(now);
        if self.state.is_running() && self.ticker.poll(now, self.state.tick_interval) {
            let outcome = self.step(now);
            trace!(?outcome, head = ?self.state.snake.head(), "snake stepped");
        } else {
            self.state.age_particles();
        }
    }

    fn turn(&mut self, direction: Direction) {
        if self.state.is_paused() || direction == self.state.snake.direction().reverse() {
            return;
        }
        self.state.pending_direction = direction;
    }

    fn reset_and_start(&mut self) {
        let mut state = GameState::new(self.state.high_score);
        state.food = place_food(&mut self.rng, &state.snake);
        state.phase = Phase::Running;
        self.state = state;
        self.ticker.reset();
        info!(high_score = self.state.high_score, "new game started");
    }

    /// Move the snake one cell and deal with the consequences
    fn step(&mut self, now: Instant) -> StepOutcome {
        let outcome = self.move_snake(now);
        self.state.age_particles();
        outcome
    }

    fn move_snake(&mut self, now: Instant) -> StepOutcome {
        let direction = self.state.pending_direction;
        let Some(head) = direction
            .advance(self.state.snake.head())
            .filter(|&pos| !self.state.snake.contains(pos))
        else {
            self.state.phase = Phase::Over(Ending::Collision);
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                "snake crashed; game over"
            );
            return StepOutcome::Collided;
        };
        self.state.snake.push_head(head, direction);
        match self.state.food {
            Some(food) if food.position == head => self.eat(food, now),
            _ => {
                self.state.snake.pop_tail();
                StepOutcome::Moved
            }
        }
    }

    fn eat(&mut self, food: Food, now: Instant) -> StepOutcome {
        let spec = food.kind.spec();
        let old_high_score = self.state.high_score;
        self.state.award(spec.score);
        debug!(kind = ?food.kind, score = self.state.score, "food eaten");
        if self.state.high_score > old_high_score {
            info!(high_score = self.state.high_score, "new high score");
        }
        self.state.apply_effect(spec.effect, now);
        self.state.particles.extend(particles::burst(
            &mut self.rng,
            food.position,
            spec.color,
            spec.particles,
        ));
        self.state.food = place_food(&mut self.rng, &self.state.snake);
        if self.state.food.is_none() {
            self.state.phase = Phase::Over(Ending::BoardFilled);
            info!(score = self.state.score, "snake filled the board");
            return StepOutcome::BoardFilled;
        }
        StepOutcome::Ate(food.kind)
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(&self.state, frame.area());
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }
}

/// What happened on a step of the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StepOutcome {
    Moved,
    Ate(FoodKind),
    Collided,
    BoardFilled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::game::particles::Particle;
    use crate::game::snake::Snake;
    use crate::game::theme::Theme;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::{layout::Position, style::Color};
    use std::collections::{HashSet, VecDeque};
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn running_game() -> Game<ChaCha12Rng> {
        let mut game = new_game();
        game.handle_command(Command::StartPause);
        assert!(game.state.is_running());
        game
    }

    fn snake(cells: &[(u16, u16)], direction: Direction) -> Snake {
        let mut cells = cells.iter().map(|&(x, y)| Position::new(x, y));
        let head = cells.next().expect("snake should have a head");
        Snake {
            head,
            body: cells.collect::<VecDeque<_>>(),
            direction,
        }
    }

    fn food_at(x: u16, y: u16, kind: FoodKind) -> Option<Food> {
        Some(Food {
            position: Position::new(x, y),
            kind,
        })
    }

    fn spark(life: u16) -> Particle {
        Particle {
            x: 100,
            y: 100,
            dx: 1,
            dy: 0,
            color: Color::White,
            size: 1,
            life,
        }
    }

    #[test]
    fn starts_ready() {
        let game = new_game();
        assert_eq!(game.state.phase, Phase::Ready);
        let food = game.state.food.expect("food should be placed");
        assert!(!game.state.snake.contains(food.position));
    }

    #[test]
    fn ready_game_does_not_move() {
        let mut game = new_game();
        let start = Instant::now();
        for i in 0..100 {
            game.frame(start + Duration::from_millis(i * 100));
        }
        assert_eq!(game.state.snake.head(), consts::START_POSITION);
        assert_eq!(game.state.phase, Phase::Ready);
    }

    #[test]
    fn eat_normal_food() {
        let mut game = running_game();
        game.state.snake = snake(&[(12, 12)], Direction::Right);
        game.state.pending_direction = Direction::Right;
        game.state.food = food_at(13, 12, FoodKind::Normal);
        let outcome = game.step(Instant::now());
        assert_eq!(outcome, StepOutcome::Ate(FoodKind::Normal));
        assert_eq!(
            game.state.snake.segments().collect::<Vec<_>>(),
            [Position::new(13, 12), Position::new(12, 12)]
        );
        assert_eq!(game.state.score, 10);
        assert_eq!(game.state.high_score, 10);
        let new_food = game.state.food.expect("food should be placed");
        assert!(!game.state.snake.contains(new_food.position));
        assert_eq!(game.state.tick_interval, consts::INITIAL_TICK_INTERVAL);
        assert_eq!(game.state.theme, Theme::Classic);
        assert_eq!(
            game.state.particles.len(),
            FoodKind::Normal.spec().particles
        );
    }

    #[test]
    fn crash_into_left_wall() {
        let mut game = running_game();
        game.state.snake = snake(&[(0, 5), (1, 5), (2, 5)], Direction::Left);
        game.state.pending_direction = Direction::Left;
        game.state.score = 40;
        let before = game.state.snake.clone();
        let food_before = game.state.food;
        let outcome = game.step(Instant::now());
        assert_eq!(outcome, StepOutcome::Collided);
        assert!(game.state.is_over());
        assert!(!game.state.is_running());
        assert_eq!(game.state.phase, Phase::Over(Ending::Collision));
        assert_eq!(game.state.score, 40);
        assert_eq!(game.state.snake, before);
        assert_eq!(game.state.food, food_before);
    }

    #[test]
    fn crash_into_self() {
        let mut game = running_game();
        game.state.snake = snake(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6), (4, 5)],
            Direction::Left,
        );
        game.state.pending_direction = Direction::Down;
        let before = game.state.snake.clone();
        assert_eq!(game.step(Instant::now()), StepOutcome::Collided);
        assert_eq!(game.state.snake, before);
    }

    #[test]
    fn moving_into_tail_is_a_crash() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Left);
        game.state.pending_direction = Direction::Down;
        assert_eq!(game.step(Instant::now()), StepOutcome::Collided);
    }

    #[test]
    fn crashed_game_stays_put() {
        let mut game = running_game();
        game.state.snake = snake(&[(0, 5)], Direction::Left);
        game.state.pending_direction = Direction::Left;
        let start = Instant::now();
        game.frame(start);
        game.frame(start + Duration::from_millis(200));
        assert!(game.state.is_over());
        let before = game.state.snake.clone();
        for i in 2..50 {
            game.frame(start + Duration::from_millis(i * 200));
        }
        assert_eq!(game.state.snake, before);
    }

    #[test]
    fn crashed_game_still_ages_particles() {
        let mut game = running_game();
        game.state.snake = snake(&[(0, 5)], Direction::Left);
        game.state.pending_direction = Direction::Left;
        let start = Instant::now();
        game.frame(start);
        game.frame(start + Duration::from_millis(200));
        assert_eq!(game.state.phase, Phase::Over(Ending::Collision));
        game.state.particles = vec![spark(2), spark(1), spark(7)];
        let before = game.state.snake.clone();
        game.frame(start + Duration::from_millis(400));
        assert_eq!(
            game.state.particles,
            [
                Particle { x: 101, life: 1, ..spark(2) },
                Particle { x: 101, life: 6, ..spark(7) },
            ]
        );
        game.frame(start + Duration::from_millis(600));
        assert_eq!(game.state.particles, [Particle { x: 102, life: 5, ..spark(7) }]);
        assert_eq!(game.state.snake, before);
        assert!(game.state.is_over());
    }

    #[test]
    fn ready_game_still_ages_particles() {
        let mut game = new_game();
        game.state.particles = vec![spark(1), spark(3)];
        let before = game.state.snake.clone();
        let start = Instant::now();
        game.frame(start);
        assert_eq!(game.state.particles, [Particle { x: 101, life: 2, ..spark(3) }]);
        game.frame(start + Duration::from_secs(1));
        assert_eq!(game.state.particles, [Particle { x: 102, life: 1, ..spark(3) }]);
        assert_eq!(game.state.snake, before);
        assert_eq!(game.state.phase, Phase::Ready);
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        game.state.pending_direction = Direction::Up;
        game.state.food = food_at(0, 0, FoodKind::Normal);
        assert_eq!(game.step(Instant::now()), StepOutcome::Moved);
        assert_eq!(
            game.state.snake.segments().collect::<Vec<_>>(),
            [Position::new(5, 4), Position::new(5, 5), Position::new(4, 5)]
        );
        assert_eq!(game.state.snake.direction(), Direction::Up);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn eat_bonus_food_speeds_up() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5)], Direction::Right);
        game.state.food = food_at(6, 5, FoodKind::Bonus);
        assert_eq!(game.step(Instant::now()), StepOutcome::Ate(FoodKind::Bonus));
        assert_eq!(game.state.score, 25);
        assert_eq!(
            game.state.tick_interval,
            consts::INITIAL_TICK_INTERVAL - consts::SPEED_UP_STEP
        );
        assert_eq!(game.state.particles.len(), FoodKind::Bonus.spec().particles);
    }

    #[test]
    fn eat_slow_food_at_initial_speed() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5)], Direction::Right);
        game.state.food = food_at(6, 5, FoodKind::Slow);
        assert_eq!(game.step(Instant::now()), StepOutcome::Ate(FoodKind::Slow));
        assert_eq!(game.state.score, 5);
        assert_eq!(game.state.tick_interval, consts::INITIAL_TICK_INTERVAL);
    }

    #[test]
    fn eat_super_food_then_theme_expires() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5)], Direction::Right);
        game.state.food = food_at(6, 5, FoodKind::Super);
        let start = Instant::now();
        assert_eq!(game.step(start), StepOutcome::Ate(FoodKind::Super));
        assert_eq!(game.state.score, 50);
        assert_eq!(game.state.theme, Theme::Rainbow);
        game.handle_command(Command::StartPause);
        assert!(game.state.is_paused());
        game.frame(start + consts::RAINBOW_DURATION);
        assert_eq!(game.state.theme, Theme::Classic);
    }

    #[test]
    fn reset_clears_rainbow() {
        let mut game = running_game();
        game.state.snake = snake(&[(0, 5)], Direction::Right);
        game.state.pending_direction = Direction::Right;
        game.state.food = food_at(1, 5, FoodKind::Super);
        let start = Instant::now();
        assert_eq!(game.step(start), StepOutcome::Ate(FoodKind::Super));
        game.state.pending_direction = Direction::Up;
        game.state.snake = snake(&[(1, 0), (1, 1)], Direction::Up);
        assert_eq!(game.step(start), StepOutcome::Collided);
        game.handle_command(Command::StartPause);
        assert!(game.state.is_running());
        assert_eq!(game.state.theme, Theme::Classic);
        assert_eq!(game.state.theme_expires_at, None);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.high_score, 50);
        assert!(game.state.particles.is_empty());
        assert_eq!(game.state.snake.len(), 1);
        assert_eq!(game.state.tick_interval, consts::INITIAL_TICK_INTERVAL);
    }

    #[test]
    fn fill_the_board() {
        let mut game = running_game();
        let mut cells = food::grid_positions()
            .filter(|&pos| pos != Position::new(0, 0))
            .collect::<VecDeque<_>>();
        // Start from a head next to the last free cell
        let head = Position::new(1, 0);
        cells.retain(|&pos| pos != head);
        game.state.snake = Snake {
            head,
            body: cells,
            direction: Direction::Left,
        };
        game.state.pending_direction = Direction::Left;
        game.state.food = food_at(0, 0, FoodKind::Normal);
        assert_eq!(game.step(Instant::now()), StepOutcome::BoardFilled);
        assert_eq!(game.state.phase, Phase::Over(Ending::BoardFilled));
        assert_eq!(game.state.food, None);
        assert_eq!(game.state.snake.len(), 400);
        assert_eq!(game.state.score, 10);
    }

    #[test]
    fn reversal_is_ignored() {
        for (current, reverse) in [
            (Direction::Up, Command::Down),
            (Direction::Down, Command::Up),
            (Direction::Left, Command::Right),
            (Direction::Right, Command::Left),
        ] {
            let mut game = running_game();
            game.state.snake = snake(&[(5, 5)], current);
            game.state.pending_direction = current;
            game.handle_command(reverse);
            assert_eq!(game.state.pending_direction, current);
        }
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        let mut game = running_game();
        game.state.snake = snake(&[(5, 5), (4, 5)], Direction::Right);
        game.state.pending_direction = Direction::Right;
        game.handle_command(Command::Up);
        assert_eq!(game.state.pending_direction, Direction::Up);
        game.handle_command(Command::Left);
        assert_eq!(game.state.pending_direction, Direction::Up);
        assert_eq!(game.step(Instant::now()), StepOutcome::Moved);
        game.handle_command(Command::Left);
        assert_eq!(game.state.pending_direction, Direction::Left);
    }

    #[test]
    fn turn_ignored_while_paused() {
        let mut game = running_game();
        game.handle_command(Command::StartPause);
        assert!(game.state.is_paused());
        game.handle_command(Command::Up);
        assert_eq!(game.state.pending_direction, Direction::Right);
        game.handle_command(Command::StartPause);
        assert!(game.state.is_running());
        game.handle_command(Command::Up);
        assert_eq!(game.state.pending_direction, Direction::Up);
    }

    #[test]
    fn paused_game_still_ages_particles() {
        let mut game = running_game();
        let start = Instant::now();
        game.frame(start);
        game.handle_command(Command::StartPause);
        game.state.particles = vec![spark(1), spark(10)];
        let before = game.state.snake.clone();
        game.frame(start + Duration::from_secs(1));
        assert_eq!(game.state.snake, before);
        assert_eq!(game.state.particles, [Particle { x: 101, life: 9, ..spark(10) }]);
    }

    #[test]
    fn frame_moves_snake_once_per_interval() {
        let mut game = running_game();
        game.state.food = food_at(0, 0, FoodKind::Normal);
        let start = Instant::now();
        let head = game.state.snake.head();
        game.frame(start);
        assert_eq!(game.state.snake.head(), head);
        game.frame(start + consts::INITIAL_TICK_INTERVAL);
        assert_eq!(game.state.snake.head(), head);
        let t1 = start + consts::INITIAL_TICK_INTERVAL + Duration::from_millis(1);
        game.frame(t1);
        assert_eq!(game.state.snake.head(), Position::new(head.x + 1, head.y));
        game.frame(t1 + Duration::from_millis(16));
        assert_eq!(game.state.snake.head(), Position::new(head.x + 1, head.y));
        game.frame(t1 + consts::INITIAL_TICK_INTERVAL + Duration::from_millis(1));
        assert_eq!(game.state.snake.head(), Position::new(head.x + 2, head.y));
    }

    #[test]
    fn frame_ages_particles_once() {
        let mut game = running_game();
        game.state.food = food_at(0, 0, FoodKind::Normal);
        game.state.particles = vec![spark(10)];
        let start = Instant::now();
        game.frame(start);
        assert_eq!(game.state.particles[0].life, 9);
        game.frame(start + Duration::from_secs(1));
        assert_eq!(game.state.particles[0].life, 8);
    }

    #[test]
    fn resume_waits_full_interval() {
        let mut game = running_game();
        game.state.food = food_at(0, 0, FoodKind::Normal);
        let start = Instant::now();
        let head = game.state.snake.head();
        game.frame(start);
        game.handle_command(Command::StartPause);
        game.handle_command(Command::StartPause);
        game.frame(start + Duration::from_secs(10));
        assert_eq!(game.state.snake.head(), head);
    }

    #[test]
    fn pause_toggles() {
        let mut game = new_game();
        game.handle_command(Command::StartPause);
        assert_eq!(game.state.phase, Phase::Running);
        game.handle_command(Command::StartPause);
        assert_eq!(game.state.phase, Phase::Paused);
        game.handle_command(Command::StartPause);
        assert_eq!(game.state.phase, Phase::Running);
    }

    #[test]
    fn quit_command_is_not_a_game_command() {
        let mut game = running_game();
        let before = game.clone();
        game.handle_command(Command::Quit);
        assert_eq!(game, before);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Copy, Debug)]
        enum Input {
            Command(Command),
            Step,
        }

        fn input() -> impl Strategy<Value = Input> {
            prop_oneof![
                1 => Just(Input::Command(Command::Up)),
                1 => Just(Input::Command(Command::Down)),
                1 => Just(Input::Command(Command::Left)),
                1 => Just(Input::Command(Command::Right)),
                1 => Just(Input::Command(Command::StartPause)),
                4 => Just(Input::Step),
            ]
        }

        fn check_invariants(state: &GameState) {
            let cells = state.snake.segments().collect::<Vec<_>>();
            let distinct = cells.iter().copied().collect::<HashSet<_>>();
            assert_eq!(distinct.len(), cells.len(), "snake overlaps itself");
            for pos in cells {
                assert!(pos.x < consts::GRID_SIZE && pos.y < consts::GRID_SIZE);
            }
            if let Some(food) = state.food {
                assert!(!state.snake.contains(food.position));
            }
            assert!(state.tick_interval >= consts::MIN_TICK_INTERVAL);
            assert!(state.tick_interval <= consts::INITIAL_TICK_INTERVAL);
        }

        proptest! {
            #[test]
            fn invariants_hold(seed in any::<u64>(), inputs in prop::collection::vec(input(), 0..400)) {
                let mut game = Game::new_with_rng(ChaCha12Rng::seed_from_u64(seed));
                let now = Instant::now();
                check_invariants(&game.state);
                for inp in inputs {
                    match inp {
                        Input::Command(cmd) => {
                            let before = game.state.pending_direction;
                            let current = game.state.snake.direction();
                            game.handle_command(cmd);
                            if game.state.pending_direction != before {
                                prop_assert_ne!(game.state.pending_direction, current.reverse());
                            }
                        }
                        Input::Step if game.state.is_running() => {
                            let before = game.state.clone();
                            match game.step(now) {
                                StepOutcome::Moved => {
                                    prop_assert_eq!(game.state.snake.len(), before.snake.len());
                                    prop_assert_eq!(game.state.score, before.score);
                                }
                                StepOutcome::Ate(kind) => {
                                    prop_assert_eq!(game.state.snake.len(), before.snake.len() + 1);
                                    prop_assert_eq!(game.state.score, before.score + kind.spec().score);
                                    prop_assert!(game.state.high_score >= game.state.score);
                                }
                                StepOutcome::Collided => {
                                    prop_assert_eq!(&game.state.snake, &before.snake);
                                    prop_assert_eq!(game.state.score, before.score);
                                    prop_assert!(game.state.is_over());
                                }
                                StepOutcome::BoardFilled => {
                                    let eaten = before.food.map(|food| food.kind);
                                    prop_assert!(eaten.is_some());
                                    let points = eaten.map_or(0, |kind| kind.spec().score);
                                    prop_assert_eq!(game.state.snake.len(), before.snake.len() + 1);
                                    prop_assert_eq!(game.state.score, before.score + points);
                                    prop_assert_eq!(game.state.phase, Phase::Over(Ending::BoardFilled));
                                }
                            }
                            prop_assert_ne!(
                                game.state.snake.direction(),
                                before.snake.direction().reverse()
                            );
                        }
                        Input::Step => {
                            let before = game.state.clone();
                            let mut aged = before.particles.clone();
                            particles::age_all(&mut aged);
                            game.frame(now);
                            prop_assert_eq!(&game.state.snake, &before.snake);
                            prop_assert_eq!(&game.state.particles, &aged);
                        }
                    }
                    check_invariants(&game.state);
                }
            }
        }
    }
}
