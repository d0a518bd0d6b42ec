//! Random placement of the fruit, the gate and freshly spawned snakes.
//!
//! Fruit and gate placement use rejection sampling with no retry limit. On a
//! board that the snake fills completely `place_fruit` never returns; the
//! board is far larger than any snake a player reaches, so this is accepted.

use rand::Rng;

use super::action::Direction;
use super::config::{GameConfig, GATE_COLUMNS, GATE_ROWS};
use super::grid::{Board, Position, Rgb, Segment};
use super::snake::Snake;

/// Offsets, in cells, of the five gate blocks from the anchor:
///
/// ```text
/// ###
/// # #
/// ```
const GATE_PATTERN: [(i32, i32); 5] = [(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)];

/// Offset, in cells, of the open cell inside the bracket
const ENTRANCE: (i32, i32) = (1, 1);

/// The bracket the snake must enter to reach the next level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    cells: [Position; 5],
    entrance: Position,
    color: Rgb,
}

impl Gate {
    pub fn new(anchor: Position, cell_size: i32, color: Rgb) -> Self {
        let at = |(dx, dy): (i32, i32)| anchor.moved_by(dx * cell_size, dy * cell_size);
        Self {
            cells: GATE_PATTERN.map(at),
            entrance: at(ENTRANCE),
            color,
        }
    }

    /// Top-left block of the bracket
    pub fn anchor(&self) -> Position {
        self.cells[0]
    }

    pub fn cells(&self) -> &[Position; 5] {
        &self.cells
    }

    /// The open cell inside the bracket
    pub fn entrance(&self) -> Position {
        self.entrance
    }

    /// True if `pos` is one of the solid blocks
    pub fn blocks(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.cells.iter().map(|&pos| Segment::new(pos, self.color))
    }

    /// Blocks plus the entrance
    fn footprint(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied().chain(std::iter::once(self.entrance))
    }
}

/// Pick a fruit cell that is not on the snake.
///
/// The outermost top row and left column are never used.
pub fn place_fruit<R: Rng + ?Sized>(rng: &mut R, board: &Board, snake: &Snake) -> Position {
    loop {
        let column = rng.gen_range(1..board.columns());
        let row = rng.gen_range(1..board.rows());
        let pos = Position::from_cell(column, row, board.cell_size);

        if !snake.occupies(pos) {
            return pos;
        }
    }
}

/// Pick a gate whose bracket and entrance fit on the board and avoid the snake.
///
/// The anchor leaves room for the row below the bracket so the entrance can
/// be approached from underneath.
pub fn place_gate<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    snake: &Snake,
    color: Rgb,
) -> Gate {
    loop {
        let column = rng.gen_range(0..=board.columns() - GATE_COLUMNS);
        let row = rng.gen_range(0..=board.rows() - GATE_ROWS);
        let anchor = Position::from_cell(column, row, board.cell_size);
        let gate = Gate::new(anchor, board.cell_size, color);

        if !gate.footprint().any(|pos| snake.occupies(pos)) {
            return gate;
        }
    }
}

/// Spawn a snake of `length` at a random row, along with the direction it
/// should start moving in.
///
/// A snake that fits in one row lies straight with its body to the left of
/// the head and heads right. A longer one starts at the right edge and folds
/// back and forth onto the rows below, then heads up into the free rows above.
/// Every cell is distinct as long as `length` fits on the board.
pub fn spawn_snake<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    length: usize,
) -> (Snake, Direction) {
    let board = config.board();
    let columns = board.columns();
    let rows = board.rows();

    let (head_column, direction) = if length <= columns as usize {
        let lowest = (length as i32 + 1).min(columns - 1);
        (rng.gen_range(lowest..columns), Direction::Right)
    } else {
        (columns - 1, Direction::Up)
    };
    let row = rng.gen_range(1..rows);

    let positions = (0..length as i32).map(|i| {
        let fold = i / columns;
        let offset = i % columns;
        let column = if fold % 2 == 0 {
            head_column - offset
        } else {
            offset
        };
        Position::from_cell(column, (row + fold).rem_euclid(rows), board.cell_size)
    });

    let snake = Snake::from_positions(positions, board.cell_size, config.snake_color);
    (snake, direction)
}
