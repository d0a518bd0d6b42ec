use serde::{Deserialize, Serialize};

use super::action::Direction;

/// An RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const GATE_PURPLE: Rgb = Rgb(144, 99, 255);
}

/// A position on the board, in pixels.
///
/// Positions produced by the game are always multiples of the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the top-left pixel of a grid cell
    pub fn from_cell(column: i32, row: i32, cell_size: i32) -> Self {
        Self::new(column * cell_size, row * cell_size)
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// A single occupied cell with its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub color: Rgb,
}

impl Segment {
    pub fn new(position: Position, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// A rectangle the renderer has to repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub position: Position,
    pub color: Rgb,
    /// Width and height in pixels
    pub size: (i32, i32),
}

/// Pixel dimensions of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Check if a position is within the board
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Where a position that left the board re-enters it, or `None` if it is
    /// still on the board.
    ///
    /// Edges are tested left, right, top, bottom and only the first match is
    /// applied, so a position outside on both axes is corrected on x only.
    pub fn wrap(&self, pos: Position) -> Option<Position> {
        if pos.x < 0 {
            Some(Position::new(self.width - self.cell_size, pos.y))
        } else if pos.x >= self.width {
            Some(Position::new(0, pos.y))
        } else if pos.y < 0 {
            Some(Position::new(pos.x, self.height - self.cell_size))
        } else if pos.y >= self.height {
            Some(Position::new(pos.x, 0))
        } else {
            None
        }
    }

    /// `pos` after wraparound
    pub fn wrapped(&self, pos: Position) -> Position {
        self.wrap(pos).unwrap_or(pos)
    }

    /// Tile covering exactly one cell
    pub fn tile(&self, position: Position, color: Rgb) -> Tile {
        Tile {
            position,
            color,
            size: (self.cell_size, self.cell_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(1000, 700, 20)
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Position::from_cell(3, 4, 20), Position::new(60, 80));
        assert_eq!(board().columns(), 50);
        assert_eq!(board().rows(), 35);
    }

    #[test]
    fn test_moved_in_direction() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_in_direction(Direction::Up, 20), Position::new(100, 80));
        assert_eq!(pos.moved_in_direction(Direction::Down, 20), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Left, 20), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Right, 20), Position::new(120, 100));
    }

    #[test]
    fn test_wrap_each_edge() {
        let board = board();
        assert_eq!(board.wrap(Position::new(-20, 40)), Some(Position::new(980, 40)));
        assert_eq!(board.wrap(Position::new(-1, 40)), Some(Position::new(980, 40)));
        assert_eq!(board.wrap(Position::new(1000, 40)), Some(Position::new(0, 40)));
        assert_eq!(board.wrap(Position::new(40, -20)), Some(Position::new(40, 680)));
        assert_eq!(board.wrap(Position::new(40, 700)), Some(Position::new(40, 0)));
        assert_eq!(board.wrap(Position::new(40, 40)), None);
    }

    #[test]
    fn test_wrap_first_match_wins() {
        let board = board();
        // Out on both axes: only x is corrected
        assert_eq!(board.wrap(Position::new(-20, -20)), Some(Position::new(980, -20)));
        assert_eq!(board.wrap(Position::new(1000, 700)), Some(Position::new(0, 700)));
    }

    #[test]
    fn test_bounds_checking() {
        let board = board();
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(980, 680)));
        assert!(!board.contains(Position::new(-20, 0)));
        assert!(!board.contains(Position::new(1000, 0)));
        assert!(!board.contains(Position::new(0, 700)));
    }
}
