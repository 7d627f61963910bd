//! Gravity fill.
//!
//! Killed cells are holes. In each column the surviving cells fall to the
//! bottom keeping their order and lifecycle, and the vacated top rows get
//! fresh tokens marked `Born`. This is the settled result of repeatedly
//! pulling the token above each hole down into it, with a new token
//! appearing whenever a hole reaches the top row.
//!
//! Columns are filled left to right. Within a column the lowest vacated
//! row draws first, matching the order holes reach the top.

use crate::core::{Point, Token, TokenSource};
use crate::error::GridError;
use crate::grid::{CellState, Color, Grid};

/// Refill every hole on the board. Returns the newly born points.
pub fn gravity_fill(grid: &mut Grid, source: &mut dyn TokenSource) -> Result<Vec<Point>, GridError> {
    let mut born = Vec::new();

    for x in 0..grid.width() as i32 {
        let height = grid.height() as i32;

        // Survivors from the bottom up
        let mut survivors: Vec<(Option<Token>, CellState)> = Vec::with_capacity(height as usize);
        for y in (0..height).rev() {
            let cell = grid.get(x, y)?;
            if !cell.is_killed() {
                survivors.push((cell.token, cell.state));
            }
        }

        let holes = height - survivors.len() as i32;
        if holes == 0 {
            continue;
        }

        for (offset, (token, state)) in survivors.into_iter().enumerate() {
            let point = Point::new(x, height - 1 - offset as i32);
            place(grid, point, token, state)?;
        }

        for y in (0..holes).rev() {
            let point = Point::new(x, y);
            place(grid, point, Some(source.next_token()), CellState::Born)?;
            born.push(point);
        }
    }

    Ok(born)
}

fn place(grid: &mut Grid, point: Point, token: Option<Token>, state: CellState) -> Result<(), GridError> {
    grid.set_token(point, token)?;
    grid.set_lifecycle(point, state)?;
    grid.set_colors(point, token.map_or(Color::Default, Token::color), Color::Default)
}
