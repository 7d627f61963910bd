//! The board: a fixed `width × height` array of cells.
//!
//! The grid owns data only. Rules live in `matching`, `cascade`, `moves`
//! and `events`; they change the grid exclusively through the primitives
//! here (`set_token`, `set_lifecycle`, `set_colors`, and `swap_tokens` /
//! `reset_colors` built on them).
//!
//! Cells are stored in an `im::Vector`, so cloning a grid for a
//! hypothetical swap is O(1) and only the touched cells are copied.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellState, Color};
use crate::core::{Point, Token, TokenSource};
use crate::error::GridError;

/// Row-major board of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vector<Cell>,
}

impl Grid {
    /// Fill a new board with tokens drawn from `source`, row by row.
    ///
    /// The board is not resolved; it may contain runs.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero. [`BoardConfig::validate`]
    /// rejects such sizes, so a [`Game`] never reaches this.
    ///
    /// [`BoardConfig::validate`]: crate::core::BoardConfig::validate
    /// [`Game`]: crate::game::Game
    pub fn random(width: usize, height: usize, source: &mut dyn TokenSource) -> Self {
        assert!(width > 0 && height > 0, "Grid must be at least 1x1");

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x as i32, y as i32)))
            .map(|p| Cell::new(p, source.next_token()))
            .collect();

        Self { width, height, cells }
    }

    /// Build a board from row-major tokens.
    pub fn from_tokens(width: usize, height: usize, tokens: Vec<Token>) -> Result<Self, GridError> {
        let expected = width * height;
        if expected == 0 || tokens.len() != expected {
            return Err(GridError::Shape {
                expected,
                actual: tokens.len(),
            });
        }

        let cells = tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| Cell::new(Point::new((i % width) as i32, (i / width) as i32), token))
            .collect();

        Ok(Self { width, height, cells })
    }

    /// Build a board from glyph rows, top row first.
    ///
    /// Letters `A`..`F` are gems and `.` is a hole. Whitespace is ignored,
    /// so `"A B C"` and `"ABC"` are the same row.
    ///
    /// ```
    /// use gem_match::grid::Grid;
    ///
    /// let grid = Grid::from_rows(&["ABA", "BAB"]).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert_eq!(grid.get(1, 1).unwrap().glyph(), 'A');
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        let actual: usize = parsed.iter().map(Vec::len).sum();
        if width == 0 || parsed.iter().any(|row| row.len() != width) {
            return Err(GridError::Shape {
                expected: width * height,
                actual,
            });
        }

        let mut cells = Vector::new();
        for (y, row) in parsed.iter().enumerate() {
            for (x, &glyph) in row.iter().enumerate() {
                let position = Point::new(x as i32, y as i32);
                let cell = if glyph == '.' {
                    Cell::hole(position)
                } else {
                    let token = Token::from_glyph(glyph).ok_or(GridError::InvalidGlyph(glyph))?;
                    Cell::new(position, token)
                };
                cells.push_back(cell);
            }
        }

        Ok(Self { width, height, cells })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether `point` is on the board.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    fn index(&self, point: Point) -> Result<usize, GridError> {
        if self.contains(point) {
            Ok(point.y as usize * self.width + point.x as usize)
        } else {
            Err(GridError::out_of_bounds(point, self.width, self.height))
        }
    }

    /// Get the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        self.cell(Point::new(x, y))
    }

    /// Get the cell at `point`.
    pub fn cell(&self, point: Point) -> Result<&Cell, GridError> {
        let index = self.index(point)?;
        self.cells
            .get(index)
            .ok_or_else(|| GridError::out_of_bounds(point, self.width, self.height))
    }

    fn cell_mut(&mut self, point: Point) -> Result<&mut Cell, GridError> {
        let index = self.index(point)?;
        let (width, height) = (self.width, self.height);
        self.cells
            .get_mut(index)
            .ok_or_else(|| GridError::out_of_bounds(point, width, height))
    }

    /// The matchable token at `point`, or `None` for holes and off-board points.
    #[must_use]
    pub fn token_at(&self, point: Point) -> Option<Token> {
        self.cell(point).ok().and_then(Cell::matchable)
    }

    // === Mutation primitives ===

    /// Replace the token at `point`.
    pub fn set_token(&mut self, point: Point, token: Option<Token>) -> Result<(), GridError> {
        self.cell_mut(point)?.token = token;
        Ok(())
    }

    /// Replace the lifecycle state at `point`.
    pub fn set_lifecycle(&mut self, point: Point, state: CellState) -> Result<(), GridError> {
        self.cell_mut(point)?.state = state;
        Ok(())
    }

    /// Replace the presentation colors at `point`.
    pub fn set_colors(&mut self, point: Point, fg: Color, bg: Color) -> Result<(), GridError> {
        let cell = self.cell_mut(point)?;
        cell.fg = fg;
        cell.bg = bg;
        Ok(())
    }

    /// Exchange the tokens of two cells. Lifecycle and colors stay put.
    pub fn swap_tokens(&mut self, a: Point, b: Point) -> Result<(), GridError> {
        let token_a = self.cell(a)?.token;
        let token_b = self.cell(b)?.token;
        self.set_token(a, token_b)?;
        self.set_token(b, token_a)
    }

    /// Restore every cell's colors to its token's defaults.
    pub fn reset_colors(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.fg = cell.token.map_or(Color::Default, Token::color);
            cell.bg = Color::Default;
        }
    }

    // === Queries ===

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All positions in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(|c| c.position)
    }

    /// Positions of cells waiting for refill.
    #[must_use]
    pub fn killed_points(&self) -> Vec<Point> {
        self.cells
            .iter()
            .filter(|c| c.is_killed())
            .map(|c| c.position)
            .collect()
    }

    /// Positions of freshly refilled cells.
    #[must_use]
    pub fn born_points(&self) -> Vec<Point> {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Born)
            .map(|c| c.position)
            .collect()
    }

    /// Check whether every cell holds a token and none is killed.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| c.matchable().is_some())
    }

    /// Glyph rows, top row first.
    #[must_use]
    pub fn glyph_rows(&self) -> Vec<String> {
        let glyphs: Vec<char> = self.cells.iter().map(Cell::glyph).collect();
        glyphs
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.glyph_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
