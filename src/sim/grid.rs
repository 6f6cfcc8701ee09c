//! Brick grid: dense row-major storage doubling as a spatial index
//!
//! The ball only ever probes the cell it is in plus the four axis
//! neighbours, so collision work per tick is constant regardless of how many
//! bricks the level has.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{GeometryError, Rectangle};
use crate::settings::{ConfigError, GameConfig};

/// Fallback color for rows without an entry in the palette
pub const DEFAULT_ROW_COLOR: u32 = 0xD25444;

/// Color of a brick row (0xRRGGBB)
pub fn row_color(row: i32) -> u32 {
    match row {
        4 => 0xD25444,
        5 => 0xD07137,
        6 => 0xBA7B2C,
        7 => 0xA49A26,
        8 => 0x439348,
        9 => 0x3F4FCE,
        _ => DEFAULT_ROW_COLOR,
    }
}

/// Points for destroying a brick in a row
pub fn row_score(row: u32) -> u32 {
    match row {
        4 | 5 => 7,
        6 | 7 => 4,
        8 | 9 => 1,
        _ => 0,
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    rect: Rectangle,
    pub column: u32,
    pub row: u32,
    /// Display only (0xRRGGBB)
    pub color: u32,
    pub score: u32,
    /// Hitting one of these jumps straight to the top speed tier
    pub is_top_row: bool,
    pub active: bool,
}

impl Brick {
    #[inline]
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }
}

/// Dense `rows × columns` grid, `index = row × columns + column`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BrickGridFields")]
pub struct BrickGrid {
    columns: u32,
    rows: u32,
    cell_size: Vec2,
    first_active_row: u32,
    cells: Vec<Option<Brick>>,
}

/// Unchecked wire form; the slot count must match the dimensions
#[derive(Deserialize)]
struct BrickGridFields {
    columns: u32,
    rows: u32,
    cell_size: Vec2,
    first_active_row: u32,
    cells: Vec<Option<Brick>>,
}

impl TryFrom<BrickGridFields> for BrickGrid {
    type Error = ConfigError;

    fn try_from(fields: BrickGridFields) -> Result<Self, Self::Error> {
        let expected = (fields.columns as usize).checked_mul(fields.rows as usize);
        if expected != Some(fields.cells.len()) {
            return Err(ConfigError::Invalid("brick grid size does not match its cells"));
        }
        if !(fields.cell_size.x > 0.0 && fields.cell_size.y > 0.0) {
            return Err(ConfigError::Invalid("brick cells must have positive size"));
        }
        Ok(Self {
            columns: fields.columns,
            rows: fields.rows,
            cell_size: fields.cell_size,
            first_active_row: fields.first_active_row,
            cells: fields.cells,
        })
    }
}

impl BrickGrid {
    /// Lay out a full grid; rows before `first_active_row` start inactive
    pub fn build(config: &GameConfig) -> Result<Self, GeometryError> {
        let mut cells = Vec::with_capacity((config.rows * config.columns) as usize);

        for row in 0..config.rows {
            for column in 0..config.columns {
                let rect = Rectangle::new(
                    column as f32 * config.brick_width,
                    row as f32 * config.brick_height,
                    config.brick_width,
                    config.brick_height,
                )?;
                cells.push(Some(Brick {
                    rect,
                    column,
                    row,
                    color: row_color(row as i32),
                    score: row_score(row),
                    is_top_row: config.top_rows.contains(&row),
                    active: row >= config.first_active_row,
                }));
            }
        }

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            cell_size: Vec2::new(config.brick_width, config.brick_height),
            first_active_row: config.first_active_row,
            cells,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell containing a point; may lie outside the grid
    pub fn cell_at(&self, pos: Vec2) -> (i32, i32) {
        let cell = (pos / self.cell_size).floor();
        (cell.x as i32, cell.y as i32)
    }

    /// Slot index for a cell, `None` when out of range
    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column as u32 >= self.columns || row as u32 >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    /// Brick stored at a cell, `None` for empty or out-of-range cells
    pub fn brick_at(&self, column: i32, row: i32) -> Option<&Brick> {
        self.index(column, row)
            .and_then(|i| self.cells.get(i))
            .and_then(Option::as_ref)
    }

    pub fn brick_at_mut(&mut self, column: i32, row: i32) -> Option<&mut Brick> {
        self.index(column, row)
            .and_then(|i| self.cells.get_mut(i))
            .and_then(Option::as_mut)
    }

    /// Indices of active bricks around `pos`, in probe order:
    /// above, below, left, right, then the cell itself
    pub fn candidates(&self, pos: Vec2) -> Vec<usize> {
        let (column, row) = self.cell_at(pos);
        let probes = [
            (column, row - 1),
            (column, row + 1),
            (column - 1, row),
            (column + 1, row),
            (column, row),
        ];

        probes
            .iter()
            .filter_map(|&(c, r)| self.index(c, r))
            .filter(|&i| self.cells.get(i).and_then(Option::as_ref).is_some_and(|b| b.active))
            .collect()
    }

    pub(crate) fn brick_mut(&mut self, index: usize) -> Option<&mut Brick> {
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().flatten()
    }

    pub fn bricks_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut().flatten()
    }

    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_bricks().count()
    }

    /// Restore the starting layout in bulk
    pub fn reset(&mut self) {
        let first_active_row = self.first_active_row;
        for brick in self.bricks_mut() {
            brick.active = brick.row >= first_active_row;
        }
    }
}
