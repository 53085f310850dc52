//! Terminal backend: flushes a `Surface` to stdout via crossterm.
//!
//! Diff rendering: the previous frame is kept and only changed cells are
//! emitted, wrapped in a single queued batch and one flush. Overlay panels
//! redraw at developer-tool cadence, so per-cell attribute resets are
//! cheaper than tracking renderer state across cells.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{
        Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::types::{Attr, Cell, Color};

use super::buffer::Surface;

/// Diff renderer over a crossterm terminal.
pub struct TerminalRenderer {
    out: Stdout,
    previous: Option<Surface>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            previous: None,
        }
    }

    /// Render a surface, emitting only cells that changed since the last
    /// frame. Returns true if anything was written.
    pub fn render(&mut self, surface: &Surface) -> io::Result<bool> {
        let mut changed_any = false;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == surface.width() && prev.height() == surface.height());

        let width = surface.width() as usize;
        for (i, cell) in surface.cells().iter().enumerate() {
            let unchanged = same_size
                && self
                    .previous
                    .as_ref()
                    .and_then(|prev| prev.cells().get(i))
                    .is_some_and(|prev_cell| prev_cell == cell);
            if unchanged {
                continue;
            }

            changed_any = true;
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            self.emit_cell(x, y, cell)?;
        }

        if changed_any {
            self.out.flush()?;
        }
        self.previous = Some(surface.clone());
        Ok(changed_any)
    }

    /// Force a full redraw of every cell.
    pub fn render_full(&mut self, surface: &Surface) -> io::Result<()> {
        let width = surface.width() as usize;
        for (i, cell) in surface.cells().iter().enumerate() {
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            self.emit_cell(x, y, cell)?;
        }
        self.out.flush()?;
        self.previous = Some(surface.clone());
        Ok(())
    }

    /// Drop the previous frame; the next render is a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if a previous frame is available to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen and hide the cursor.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Restore the main screen and show the cursor.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        self.out.flush()
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Continuation halves of wide glyphs are covered by the glyph itself.
        if cell.is_continuation() {
            return Ok(());
        }

        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_ct_color(cell.style.fg)),
            SetBackgroundColor(to_ct_color(cell.style.bg)),
        )?;

        let attrs = cell.style.attrs;
        if attrs.contains(Attr::BOLD) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.contains(Attr::DIM) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if attrs.contains(Attr::ITALIC) {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if attrs.contains(Attr::UNDERLINE) {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if attrs.contains(Attr::INVERSE) {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        if attrs.contains(Attr::STRIKETHROUGH) {
            queue!(self.out, SetAttribute(Attribute::CrossedOut))?;
        }

        queue!(self.out, Print(cell.ch))
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_ct_color(color: Color) -> CtColor {
    match color {
        Color::Default => CtColor::Reset,
        Color::Ansi(index) => CtColor::AnsiValue(index),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

// =============================================================================
// Tests
// =============================================================================
