//! Terminal geometry used to size previews.

use console::Term;

/// Character-cell layout of the terminal showing previews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub columns: u16,
    pub rows: u16,
    /// Pixel width of one character cell
    pub cell_width: u32,
    /// Pixel height of one character cell
    pub cell_height: u32,
    /// Rows kept free for the review header and member list
    pub reserved_rows: u16,
}

impl Default for TerminalGeometry {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
            cell_width: 8,
            cell_height: 16,
            reserved_rows: 9,
        }
    }
}

impl TerminalGeometry {
    /// Read the size of stdout's terminal, falling back to 80x24.
    pub fn detect(cell_width: u32, cell_height: u32) -> Self {
        let fallback = Self::default();
        let (rows, columns) = Term::stdout()
            .size_checked()
            .unwrap_or((fallback.rows, fallback.columns));

        Self {
            columns,
            rows,
            cell_width,
            cell_height,
            ..fallback
        }
    }

    /// Maximum preview size in pixels, never below 1x1
    pub fn pixel_bounds(&self) -> (u32, u32) {
        let width = u32::from(self.columns) * self.cell_width;
        let height = u32::from(self.rows.saturating_sub(self.reserved_rows)) * self.cell_height;
        (width.max(1), height.max(1))
    }
}
