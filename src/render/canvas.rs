use crate::game::{Board, Rgb, Tile};

/// One color per board cell, updated from the tiles each step reports
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    columns: usize,
    rows: usize,
    cell_size: i32,
    background: Rgb,
    cells: Vec<Rgb>,
}

impl Canvas {
    pub fn new(board: Board, background: Rgb) -> Self {
        let columns = board.columns().max(0) as usize;
        let rows = board.rows().max(0) as usize;
        Self {
            columns,
            rows,
            cell_size: board.cell_size,
            background,
            cells: vec![background; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }

    /// Fill every cell the tile covers. Parts off the board are dropped.
    pub fn paint(&mut self, tile: &Tile) {
        let first_column = tile.position.x.div_euclid(self.cell_size);
        let first_row = tile.position.y.div_euclid(self.cell_size);
        let span_x = (tile.size.0 / self.cell_size).max(1);
        let span_y = (tile.size.1 / self.cell_size).max(1);

        for row in first_row..first_row + span_y {
            for column in first_column..first_column + span_x {
                if let Some(index) = self.index(column, row) {
                    self.cells[index] = tile.color;
                }
            }
        }
    }

    /// Apply a step's changes in order
    pub fn apply(&mut self, tiles: &[Tile]) {
        for tile in tiles {
            self.paint(tile);
        }
    }

    /// Clear, then paint a full snapshot
    pub fn repaint(&mut self, tiles: &[Tile]) {
        self.clear();
        self.apply(tiles);
    }

    pub fn color_at(&self, column: usize, row: usize) -> Rgb {
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column]
        } else {
            self.background
        }
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn canvas() -> Canvas {
        Canvas::new(Board::new(100, 60, 20), Rgb::BLACK)
    }

    fn tile(x: i32, y: i32, color: Rgb) -> Tile {
        Board::new(100, 60, 20).tile(Position::new(x, y), color)
    }

    #[test]
    fn test_new_canvas_is_background() {
        let canvas = canvas();
        assert_eq!(canvas.columns(), 5);
        assert_eq!(canvas.rows(), 3);
        assert_eq!(canvas.color_at(4, 2), Rgb::BLACK);
    }

    #[test]
    fn test_apply_in_order() {
        let mut canvas = canvas();
        canvas.apply(&[tile(40, 20, Rgb::RED), tile(40, 20, Rgb::BLACK), tile(60, 20, Rgb::RED)]);
        assert_eq!(canvas.color_at(2, 1), Rgb::BLACK);
        assert_eq!(canvas.color_at(3, 1), Rgb::RED);
    }

    #[test]
    fn test_off_board_tiles_are_ignored() {
        let mut canvas = canvas();
        canvas.apply(&[tile(-20, 0, Rgb::RED), tile(100, 0, Rgb::RED), tile(0, 60, Rgb::RED)]);
        assert!((0..5).all(|c| (0..3).all(|r| canvas.color_at(c, r) == Rgb::BLACK)));
    }

    #[test]
    fn test_large_tile_covers_several_cells() {
        let mut canvas = canvas();
        canvas.paint(&Tile {
            position: Position::new(20, 0),
            color: Rgb::GREEN,
            size: (40, 40),
        });
        assert_eq!(canvas.color_at(1, 0), Rgb::GREEN);
        assert_eq!(canvas.color_at(2, 1), Rgb::GREEN);
        assert_eq!(canvas.color_at(3, 0), Rgb::BLACK);
    }

    #[test]
    fn test_repaint_clears_first() {
        let mut canvas = canvas();
        canvas.paint(&tile(0, 0, Rgb::RED));
        canvas.repaint(&[tile(20, 0, Rgb::GREEN)]);
        assert_eq!(canvas.color_at(0, 0), Rgb::BLACK);
        assert_eq!(canvas.color_at(1, 0), Rgb::GREEN);
    }
}
