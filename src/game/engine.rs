use super::{
    action::{Action, Direction},
    config::{GameConfig, FRUIT_PER_LEVEL},
    state::{CollisionType, GameState, Position, Snake},
};
use rand::Rng;

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate a fruit this tick
    pub ate_fruit: bool,
    /// Whether this tick's fruit completed a level
    pub leveled_up: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game tick
///
/// Reaching the terminal state is reported here as a value; it is the
/// expected way for a session to end, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the session has reached its terminal state
    pub terminated: bool,
    /// Additional information about the tick
    pub info: StepInfo,
}

/// The game engine that runs the per-tick simulation
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session state
    ///
    /// The snake spawns in the lower-left quarter of the grid heading
    /// Right; the fruit lands on a free cell.
    pub fn reset(&mut self) -> GameState {
        let head = Position::new(
            (self.config.grid_width / 4) as i32,
            (2 * self.config.grid_height / 3) as i32,
        );
        let snake = Snake::new(head, Direction::Right, self.config.initial_snake_length);
        let fruit = self.spawn_fruit(&snake);

        GameState::new(snake, fruit, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_fruit: false,
                    leveled_up: false,
                    collision_type: None,
                },
            };
        }

        // Update heading; a reversal request is silently ignored
        if let Action::Move(requested) = action {
            if !state.snake.direction.is_opposite(requested) {
                state.snake.direction = requested;
            }
        }

        // Growth lands on the eating tick itself, so the fruit is checked
        // against the upcoming head cell before the snake advances.
        let next_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_fruit = next_head == state.fruit;
        if ate_fruit {
            state.snake.request_growth();
        }

        state.snake.advance();

        // Fruit scoring runs ahead of the terminal checks; a fruit reached
        // on the snake's final tick still counts.
        let mut leveled_up = false;
        if ate_fruit {
            state.score += 1;
            state.level_up_counter += 1;
            if state.level_up_counter >= FRUIT_PER_LEVEL {
                state.level += 1;
                state.level_up_counter = 0;
                leveled_up = true;
            }
            state.fruit = self.spawn_fruit(&state.snake);
        }

        let collision_type = self.check_collision(state);
        if collision_type.is_some() {
            state.is_alive = false;
        }

        StepResult {
            terminated: collision_type.is_some(),
            info: StepInfo {
                ate_fruit,
                leveled_up,
                collision_type,
            },
        }
    }

    /// Check whether the head position ends the session
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn a fruit at a random cell not occupied by the snake
    fn spawn_fruit(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
