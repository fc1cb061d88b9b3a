use super::Margins;
use crate::pagesize::PageSpec;

/// Columns in the month grid, one per weekday
pub const GRID_COLUMNS: i32 = 7;

/// Rows in the month grid; enough for any month starting on any weekday
pub const GRID_ROWS: i32 = 6;

/// Geometry of the 7×6 month grid, derived from the page size and margins.
///
/// Coordinates are top-down (distance from the top edge of the page); callers flip
/// them when drawing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

/// A cell of the month grid
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// 0 = Sunday .. 6 = Saturday
    pub column: u32,
    pub row: u32,
}

impl GridCell {
    /// Locate the cell of `day` (1-based) in a month whose first day falls on
    /// `first_weekday` (0 = Sunday)
    pub fn for_day(day: u32, first_weekday: u32) -> GridCell {
        let offset = first_weekday + day - 1;
        GridCell {
            column: offset % GRID_COLUMNS as u32,
            row: offset / GRID_COLUMNS as u32,
        }
    }
}

impl GridGeometry {
    pub fn new(page: &PageSpec, margins: &Margins) -> GridGeometry {
        GridGeometry {
            origin_x: margins.left,
            origin_y: margins.top,
            cell_width: margins.inner_width(page).div_euclid(GRID_COLUMNS),
            cell_height: margins.inner_height(page).div_euclid(GRID_ROWS),
        }
    }

    /// Top-left corner of a cell
    pub fn cell_origin(&self, cell: GridCell) -> (i32, i32) {
        (
            self.origin_x + cell.column as i32 * self.cell_width,
            self.origin_y + cell.row as i32 * self.cell_height,
        )
    }

    /// Horizontal centre of a column, used for the weekday header
    pub fn column_centre(&self, column: u32) -> i32 {
        self.origin_x + column as i32 * self.cell_width + self.cell_width / 2
    }

    pub fn right(&self) -> i32 {
        self.origin_x + GRID_COLUMNS * self.cell_width
    }

    pub fn bottom(&self) -> i32 {
        self.origin_y + GRID_ROWS * self.cell_height
    }

    /// Vertical rule x positions, left edge through right edge
    pub fn column_rules(&self) -> impl Iterator<Item = i32> + '_ {
        (0..=GRID_COLUMNS).map(move |i| self.origin_x + i * self.cell_width)
    }

    /// Horizontal rule y positions, top edge through bottom edge
    pub fn row_rules(&self) -> impl Iterator<Item = i32> + '_ {
        (0..=GRID_ROWS).map(move |i| self.origin_y + i * self.cell_height)
    }
}
