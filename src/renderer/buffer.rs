//! Surface: the cell grid overlay states draw onto.
//!
//! The host owns one `Surface` per frame and passes it to `pipeline::tick`;
//! every visible overlay state draws into it in stage order. Flat row-major
//! storage (`index = y * width + x`) keeps iteration cache-friendly for the
//! diff renderer.
//!
//! Wide characters (CJK, emoji) occupy two columns: the glyph cell followed
//! by a `'\0'` continuation cell.

use unicode_width::UnicodeWidthChar;

use crate::types::{Cell, Rect, Style};

/// A 2D grid of terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create a surface filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Surface width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Surface height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Full surface bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Raw cells slice, row-major (for the renderer).
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the whole surface to blank cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the surface. Content is cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = width as usize * height as usize;
        self.cells.clear();
        self.cells.resize(size, Cell::default());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Put a single character, respecting an optional clip rect.
    ///
    /// Returns true if the cell was written.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style, clip: Option<&Rect>) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }
        let idx = self.index(x, y);
        self.cells[idx] = Cell { ch, style };
        true
    }

    /// Draw a string, clipped to the surface and the optional clip rect.
    ///
    /// Zero-width characters are skipped; wide characters write a
    /// continuation cell. Returns the number of columns advanced.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style, clip: Option<&Rect>) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let ch_width = ch.width().unwrap_or(0);
            if ch_width == 0 {
                continue;
            }

            if self.put_char(col, y, ch, style, clip) && ch_width == 2 && col + 1 < self.width {
                self.put_char(col + 1, y, '\0', style, clip);
            }

            col += ch_width as u16;
        }

        col.saturating_sub(x)
    }

    /// Fill a rectangle with a blank cell in the given style.
    pub fn fill_rect(&mut self, rect: Rect, style: Style) {
        let Some(rect) = rect.intersect(&self.bounds()) else {
            return;
        };
        for row in rect.y..rect.bottom() {
            let start = self.index(rect.x, row);
            let end = self.index(rect.right(), row);
            for cell in &mut self.cells[start..end] {
                *cell = Cell { ch: ' ', style };
            }
        }
    }

    /// Draw a single-line box frame around `rect`.
    ///
    /// Rects thinner than 2x2 are ignored.
    pub fn draw_frame(&mut self, rect: Rect, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let x2 = rect.right() - 1;
        let y2 = rect.bottom() - 1;

        self.put_char(rect.x, rect.y, '┌', style, None);
        self.put_char(x2, rect.y, '┐', style, None);
        self.put_char(rect.x, y2, '└', style, None);
        self.put_char(x2, y2, '┘', style, None);

        for col in (rect.x + 1)..x2 {
            self.put_char(col, rect.y, '─', style, None);
            self.put_char(col, y2, '─', style, None);
        }
        for row in (rect.y + 1)..y2 {
            self.put_char(rect.x, row, '│', style, None);
            self.put_char(x2, row, '│', style, None);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Color};

    #[test]
    fn test_surface_creation() {
        let surface = Surface::new(80, 24);
        assert_eq!(surface.width(), 80);
        assert_eq!(surface.height(), 24);
        assert_eq!(surface.cells().len(), 80 * 24);
    }

    #[test]
    fn test_put_char_and_bounds() {
        let mut surface = Surface::new(10, 10);
        let style = Style::new().fg(Color::RED).attrs(Attr::BOLD);

        assert!(surface.put_char(5, 5, 'X', style, None));
        let cell = surface.get(5, 5).unwrap();
        assert_eq!(cell.ch, 'X');
        assert_eq!(cell.style.fg, Color::RED);

        assert!(!surface.put_char(10, 5, 'X', style, None));
        assert!(surface.get(10, 5).is_none());
    }

    #[test]
    fn test_put_str() {
        let mut surface = Surface::new(20, 5);
        let advanced = surface.put_str(0, 0, "Hello", Style::new(), None);

        assert_eq!(advanced, 5);
        assert_eq!(surface.get(0, 0).unwrap().ch, 'H');
        assert_eq!(surface.get(4, 0).unwrap().ch, 'o');
    }

    #[test]
    fn test_put_str_wide_chars() {
        let mut surface = Surface::new(20, 5);
        let advanced = surface.put_str(0, 0, "中b", Style::new(), None);

        assert_eq!(advanced, 3);
        assert_eq!(surface.get(0, 0).unwrap().ch, '中');
        assert!(surface.get(1, 0).unwrap().is_continuation());
        assert_eq!(surface.get(2, 0).unwrap().ch, 'b');
    }

    #[test]
    fn test_put_str_clipped() {
        let mut surface = Surface::new(20, 5);
        let clip = Rect::new(0, 0, 3, 1);
        surface.put_str(0, 0, "Hello", Style::new(), Some(&clip));

        assert_eq!(surface.get(2, 0).unwrap().ch, 'l');
        assert_eq!(surface.get(3, 0).unwrap().ch, ' ');
    }

    #[test]
    fn test_fill_rect() {
        let mut surface = Surface::new(20, 20);
        let style = Style::new().bg(Color::BLUE);
        surface.fill_rect(Rect::new(5, 5, 10, 10), style);

        assert_eq!(surface.get(5, 5).unwrap().style.bg, Color::BLUE);
        assert_eq!(surface.get(14, 14).unwrap().style.bg, Color::BLUE);
        assert_eq!(surface.get(4, 5).unwrap().style.bg, Color::Default);
        assert_eq!(surface.get(15, 5).unwrap().style.bg, Color::Default);
    }

    #[test]
    fn test_fill_rect_out_of_bounds() {
        let mut surface = Surface::new(10, 10);
        // Partially out of bounds clamps, fully out of bounds is a no-op.
        surface.fill_rect(Rect::new(8, 8, 10, 10), Style::new().bg(Color::RED));
        assert_eq!(surface.get(9, 9).unwrap().style.bg, Color::RED);
        surface.fill_rect(Rect::new(50, 50, 10, 10), Style::new().bg(Color::RED));
    }

    #[test]
    fn test_draw_frame() {
        let mut surface = Surface::new(20, 20);
        surface.draw_frame(Rect::new(2, 2, 5, 4), Style::new());

        assert_eq!(surface.get(2, 2).unwrap().ch, '┌');
        assert_eq!(surface.get(6, 2).unwrap().ch, '┐');
        assert_eq!(surface.get(2, 5).unwrap().ch, '└');
        assert_eq!(surface.get(6, 5).unwrap().ch, '┘');
        assert_eq!(surface.get(4, 2).unwrap().ch, '─');
        assert_eq!(surface.get(2, 4).unwrap().ch, '│');
        // Interior untouched
        assert_eq!(surface.get(4, 4).unwrap().ch, ' ');
    }

    #[test]
    fn test_resize_clears() {
        let mut surface = Surface::new(10, 10);
        surface.put_char(5, 5, 'X', Style::new(), None);

        surface.resize(20, 20);
        assert_eq!(surface.width(), 20);
        assert_eq!(surface.get(5, 5).unwrap().ch, ' ');
    }
}
