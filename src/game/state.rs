use super::action::Direction;

/// A position on the game grid
///
/// The origin is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// How a body segment should be drawn
///
/// Derived purely from body geometry; has no effect on game rules. The
/// renderer maps each variant to a glyph: one per head/tail facing,
/// straight piece and corner piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentShape {
    /// Head, facing the given direction
    Head(Direction),
    /// Tail, pointing the given direction (away from the body)
    Tail(Direction),
    BodyVertical,
    BodyHorizontal,
    /// Corner connecting the cells above and to the left
    CornerUpLeft,
    /// Corner connecting the cells above and to the right
    CornerUpRight,
    /// Corner connecting the cells below and to the left
    CornerDownLeft,
    /// Corner connecting the cells below and to the right
    CornerDownRight,
}

/// The snake: an ordered sequence of cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
    /// One-shot flag: the next advance keeps the tail instead of dropping it
    pending_growth: bool,
}

impl Snake {
    /// Create a new snake with the given head position and heading
    ///
    /// The remaining segments are laid out behind the head, opposite the
    /// heading.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];
        let (dx, dy) = direction.delta();

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pending_growth: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        *self.body.last().unwrap()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if a position collides with the snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if a position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Ask for one extra segment on the next advance
    ///
    /// Idempotent between advances: at most one segment is added per tick
    /// no matter how often this is called.
    pub fn request_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Advance one cell along the current heading
    ///
    /// A pending growth request keeps the tail (net length +1) and clears
    /// the flag; otherwise the tail slides forward (net length unchanged).
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Drawing shape of the segment at `index`
    pub fn shape_at(&self, index: usize) -> SegmentShape {
        if self.body.len() < 2 {
            return SegmentShape::Head(self.direction);
        }

        if index == 0 {
            // The head faces away from its neck
            let neck = self.body[1];
            let head = self.body[0];
            return SegmentShape::Head(Self::facing(neck.x - head.x, neck.y - head.y));
        }

        if index == self.body.len() - 1 {
            let tail = self.body[index];
            let before = self.body[index - 1];
            return SegmentShape::Tail(Self::facing(before.x - tail.x, before.y - tail.y));
        }

        let here = self.body[index];
        let prev = self.body[index + 1].moved_by(-here.x, -here.y);
        let next = self.body[index - 1].moved_by(-here.x, -here.y);

        if prev.x == next.x {
            SegmentShape::BodyVertical
        } else if prev.y == next.y {
            SegmentShape::BodyHorizontal
        } else if (prev.x == -1 && next.y == -1) || (prev.y == -1 && next.x == -1) {
            SegmentShape::CornerUpLeft
        } else if (prev.x == -1 && next.y == 1) || (prev.y == 1 && next.x == -1) {
            SegmentShape::CornerDownLeft
        } else if (prev.x == 1 && next.y == -1) || (prev.y == -1 && next.x == 1) {
            SegmentShape::CornerUpRight
        } else {
            SegmentShape::CornerDownRight
        }
    }

    /// Direction a segment points when its single neighbor sits at (dx, dy)
    fn facing(dx: i32, dy: i32) -> Direction {
        match (dx, dy) {
            (1, 0) => Direction::Left,
            (-1, 0) => Direction::Right,
            (0, 1) => Direction::Up,
            _ => Direction::Down,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete state of one game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub fruit: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    /// Current level, starting at 1
    pub level: u32,
    /// Fruit eaten since the last level-up
    pub level_up_counter: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, fruit: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            fruit,
            grid_width,
            grid_height,
            score: 0,
            level: 1,
            level_up_counter: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 10));
        assert_eq!(snake.body[1], Position::new(4, 10));
        assert_eq!(snake.body[2], Position::new(3, 10));
    }

    #[test]
    fn test_advance_slides_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_advance_with_pending_growth() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.request_growth();
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));

        // Flag is one-shot
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_request_growth_is_idempotent() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.request_growth();
        snake.request_growth();
        snake.request_growth();
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty

        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_head_and_tail_shapes() {
        // Straight snake: head faces the heading, tail points the other way
        let snake = Snake::new(Position::new(5, 5), Direction::Left, 3);
        assert_eq!(snake.shape_at(0), SegmentShape::Head(Direction::Left));
        assert_eq!(snake.shape_at(2), SegmentShape::Tail(Direction::Right));

        let snake = Snake::new(Position::new(5, 5), Direction::Up, 3);
        assert_eq!(snake.shape_at(0), SegmentShape::Head(Direction::Up));
        assert_eq!(snake.shape_at(2), SegmentShape::Tail(Direction::Down));
    }

    #[test]
    fn test_straight_body_shapes() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.shape_at(1), SegmentShape::BodyHorizontal);

        let snake = Snake::new(Position::new(5, 5), Direction::Down, 3);
        assert_eq!(snake.shape_at(1), SegmentShape::BodyVertical);
    }

    #[test]
    fn test_corner_body_shapes() {
        // Head above, tail to the left: the middle piece joins up and left
        let snake = Snake {
            body: vec![
                Position::new(5, 4),
                Position::new(5, 5),
                Position::new(4, 5),
            ],
            direction: Direction::Up,
            pending_growth: false,
        };
        assert_eq!(snake.shape_at(1), SegmentShape::CornerUpLeft);

        // Head below, tail to the right
        let snake = Snake {
            body: vec![
                Position::new(5, 6),
                Position::new(5, 5),
                Position::new(6, 5),
            ],
            direction: Direction::Down,
            pending_growth: false,
        };
        assert_eq!(snake.shape_at(1), SegmentShape::CornerDownRight);

        // Head to the right, tail above
        let snake = Snake {
            body: vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(5, 4),
            ],
            direction: Direction::Right,
            pending_growth: false,
        };
        assert_eq!(snake.shape_at(1), SegmentShape::CornerUpRight);

        // Head to the left, tail below
        let snake = Snake {
            body: vec![
                Position::new(4, 5),
                Position::new(5, 5),
                Position::new(5, 6),
            ],
            direction: Direction::Left,
            pending_growth: false,
        };
        assert_eq!(snake.shape_at(1), SegmentShape::CornerDownLeft);
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            20,
            15,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 14)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 15)));
    }

    #[test]
    fn test_new_state_counters() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            20,
            15,
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.level_up_counter, 0);
        assert!(state.is_alive);
    }
}
