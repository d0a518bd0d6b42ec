use std::collections::VecDeque;

use super::action::Direction;
use super::grid::{Position, Rgb, Segment};

/// The snake in the game
///
/// Segment positions live in a ring buffer with the head at the front, so a
/// move is one push and one pop instead of shifting every segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    color: Rgb,
    cell_size: i32,
    alive: bool,
}

#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Create a straight snake with the head at `head` and the body trailing
    /// to the left.
    pub fn new(head: Position, length: usize, cell_size: i32, color: Rgb) -> Self {
        let body = (0..length as i32)
            .map(|i| head.moved_by(-i * cell_size, 0))
            .collect();

        Self {
            body,
            color,
            cell_size,
            alive: true,
        }
    }

    /// Create a snake from explicit positions, head first.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is empty.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Position>,
        cell_size: i32,
        color: Rgb,
    ) -> Self {
        let body: VecDeque<Position> = positions.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");

        Self {
            body,
            color,
            cell_size,
            alive: true,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Segment positions, head first
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.positions().map(|pos| Segment::new(pos, self.color))
    }

    /// The segment at `index`, counting from the head
    pub fn segment(&self, index: usize) -> Option<Segment> {
        self.body
            .get(index)
            .map(|&pos| Segment::new(pos, self.color))
    }

    /// Check if any segment, head included, is at `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Advance one cell in `direction`.
    ///
    /// Every segment takes the place its predecessor held and the head moves
    /// one cell on. Returns the position the old tail vacated.
    pub fn move_in(&mut self, direction: Direction) -> Position {
        debug_assert!(self.alive, "a dead snake does not move");
        let new_head = self.head().moved_in_direction(direction, self.cell_size);
        self.body.push_front(new_head);
        self.body.pop_back().unwrap_or(new_head)
    }

    /// Prepend a new head, keeping the tail.
    pub fn grow(&mut self, new_head: Position) {
        debug_assert!(self.alive, "a dead snake does not grow");
        self.body.push_front(new_head);
    }

    /// Relocate the head only. The body catches up on the following moves.
    pub fn teleport(&mut self, new_head: Position) {
        self.body[0] = new_head;
    }

    /// True if the head sits on any other segment
    pub fn is_self_collided(&self) -> bool {
        self.collides_with_body(self.head())
    }

    pub fn die(&mut self) {
        self.alive = false;
    }
}
