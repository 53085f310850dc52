//! Toggle strip: a row of gameplay-debug toggles.
//!
//! Each toggle has a primary mode and optionally an alternate mode, and the
//! two are mutually exclusive: engaging one disengages the other. Engaged
//! toggles draw highlighted.

use std::any::Any;
use std::time::Duration;

use crate::engine::OverlayState;
use crate::renderer::Surface;
use crate::types::{Attr, Color, Style};

// =============================================================================
// Toggle
// =============================================================================

/// One two-mode toggle on the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    name: &'static str,
    icon: char,
    description: &'static str,
    alt_name: Option<&'static str>,
    active: bool,
    alt_active: bool,
}

impl Toggle {
    pub fn new(name: &'static str, icon: char, description: &'static str) -> Self {
        Self {
            name,
            icon,
            description,
            alt_name: None,
            active: false,
            alt_active: false,
        }
    }

    /// Give this toggle an alternate mode.
    pub fn with_alt(mut self, alt_name: &'static str) -> Self {
        self.alt_name = Some(alt_name);
        self
    }

    /// Flip the primary mode. Engaging it disengages the alternate mode.
    pub fn activate(&mut self) {
        self.active = !self.active;
        if self.active {
            self.alt_active = false;
        }
    }

    /// Flip the alternate mode. Engaging it disengages the primary mode.
    /// No-op for toggles without an alternate mode.
    pub fn activate_alt(&mut self) {
        if self.alt_name.is_none() {
            return;
        }
        self.alt_active = !self.alt_active;
        if self.alt_active {
            self.active = false;
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn alt_name(&self) -> Option<&'static str> {
        self.alt_name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_alt_active(&self) -> bool {
        self.alt_active
    }

    /// Either mode engaged.
    pub fn is_engaged(&self) -> bool {
        self.active || self.alt_active
    }
}

// =============================================================================
// ToggleStrip
// =============================================================================

/// The toggle strip panel.
///
/// Starts open and empty; hosts look it up after `load` and push their
/// toggles into it.
#[derive(Debug)]
pub struct ToggleStrip {
    toggles: Vec<Toggle>,
    origin: (u16, u16),
    open: bool,
    pulse: f32,
}

impl Default for ToggleStrip {
    fn default() -> Self {
        Self {
            toggles: Vec::new(),
            origin: (1, 1),
            open: true,
            pulse: 0.0,
        }
    }
}

impl ToggleStrip {
    pub fn push(&mut self, toggle: Toggle) {
        self.toggles.push(toggle);
    }

    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    /// Flip the primary mode of the toggle at `index`.
    /// Returns false if there is no such toggle.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.toggles.get_mut(index) {
            Some(toggle) => {
                toggle.activate();
                true
            }
            None => false,
        }
    }

    /// Flip the alternate mode of the toggle at `index`.
    pub fn toggle_alt(&mut self, index: usize) -> bool {
        match self.toggles.get_mut(index) {
            Some(toggle) => {
                toggle.activate_alt();
                true
            }
            None => false,
        }
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    /// Highlight phase in [0, 1), advanced while visible.
    pub fn pulse(&self) -> f32 {
        self.pulse
    }
}

impl OverlayState for ToggleStrip {
    fn name(&self) -> &'static str {
        "toggle strip"
    }

    fn visible(&self) -> bool {
        self.open
    }

    fn update(&mut self, dt: Duration) {
        self.pulse = (self.pulse + dt.as_secs_f32()).fract();
    }

    fn draw(&mut self, surface: &mut Surface) {
        let (x0, y) = self.origin;
        for (i, toggle) in self.toggles.iter().enumerate() {
            let x = x0 + (i as u16) * 4;

            let style = if toggle.is_alt_active() {
                Style::new().fg(Color::MAGENTA).attrs(Attr::INVERSE | Attr::BOLD)
            } else if toggle.is_active() {
                Style::new().fg(Color::YELLOW).attrs(Attr::INVERSE | Attr::BOLD)
            } else {
                Style::new().fg(Color::GRAY)
            };

            surface.put_char(x, y, '[', style, None);
            surface.put_char(x + 1, y, toggle.icon(), style, None);
            surface.put_char(x + 2, y, ']', style, None);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
