//! Browser: a filterable browsing list.
//!
//! Entries carry a name and a source tag. Filters are named predicates;
//! an active filter hides every entry its predicate matches. The stock
//! per-source filter keeps only entries from one source.

use std::any::Any;
use std::time::Duration;

use crate::engine::OverlayState;
use crate::pipeline::StageDescriptor;
use crate::renderer::Surface;
use crate::types::{Attr, Color, Rect, Style};

// =============================================================================
// Entries and Filters
// =============================================================================

/// One browsable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub source: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// A named predicate; entries it matches are hidden while it is active.
pub struct Filter {
    name: String,
    description: String,
    active: bool,
    hides: Box<dyn Fn(&Entry) -> bool>,
}

impl Filter {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        hides: impl Fn(&Entry) -> bool + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            active: false,
            hides: Box::new(hides),
        }
    }

    /// A filter that keeps only entries from `source`, hiding the rest.
    pub fn by_source(source: impl Into<String>) -> Self {
        let source = source.into();
        let predicate_source = source.clone();
        Self::new(
            source.clone(),
            format!("only show entries from {source}"),
            move |entry| entry.source != predicate_source,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Whether this filter hides `entry` (predicate only; activity is the
    /// browser's concern).
    pub fn hides(&self, entry: &Entry) -> bool {
        (self.hides)(entry)
    }
}

// =============================================================================
// Browser Panel
// =============================================================================

/// The filterable list panel. Closed by default; hosts open it on demand.
pub struct Browser {
    title: String,
    entries: Vec<Entry>,
    filters: Vec<Filter>,
    open: bool,
    area: Rect,
    anchor: Option<String>,
    scroll: usize,
}

impl Default for Browser {
    fn default() -> Self {
        Self {
            title: "browser".to_string(),
            entries: Vec::new(),
            filters: Vec::new(),
            open: false,
            area: Rect::new(2, 2, 32, 14),
            anchor: None,
            scroll: 0,
        }
    }
}

impl Browser {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn push_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Flip the filter at `index`. Returns false if there is no such filter.
    pub fn toggle_filter(&mut self, index: usize) -> bool {
        match self.filters.get_mut(index) {
            Some(filter) => {
                filter.toggle();
                true
            }
            None => false,
        }
    }

    /// Entries that survive every active filter, in insertion order.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| {
                !self
                    .filters
                    .iter()
                    .any(|filter| filter.is_active() && filter.hides(entry))
            })
            .collect()
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Insert this panel's stage immediately before the host stage with
    /// this exact name (appended if absent).
    pub fn set_anchor(&mut self, stage_name: impl Into<String>) {
        self.anchor = Some(stage_name.into());
    }

    pub fn scroll_to(&mut self, row: usize) {
        self.scroll = row;
    }
}

impl OverlayState for Browser {
    fn name(&self) -> &'static str {
        "browser"
    }

    fn visible(&self) -> bool {
        self.open
    }

    fn insertion_index(&self, stages: &[StageDescriptor]) -> usize {
        match &self.anchor {
            Some(anchor) => stages
                .iter()
                .position(|stage| stage.name() == anchor)
                .unwrap_or(stages.len()),
            None => stages.len(),
        }
    }

    fn update(&mut self, _dt: Duration) {
        // Keep the scroll window inside the filtered list.
        let visible = self.visible_entries().len();
        let rows = self.area.height.saturating_sub(2) as usize;
        self.scroll = self.scroll.min(visible.saturating_sub(rows));
    }

    fn draw(&mut self, surface: &mut Surface) {
        let frame_style = Style::new().fg(Color::CYAN);
        surface.fill_rect(self.area, Style::new());
        surface.draw_frame(self.area, frame_style);
        surface.put_str(
            self.area.x + 2,
            self.area.y,
            &self.title,
            frame_style.attrs(Attr::BOLD),
            None,
        );

        let interior = Rect::new(
            self.area.x + 1,
            self.area.y + 1,
            self.area.width.saturating_sub(2),
            self.area.height.saturating_sub(2),
        );
        let entries = self.visible_entries();
        for (row, entry) in entries.iter().skip(self.scroll).enumerate() {
            let y = interior.y + row as u16;
            if y >= interior.bottom() {
                break;
            }
            surface.put_str(interior.x, y, &entry.name, Style::new(), Some(&interior));
        }

        let active = self.filters.iter().filter(|f| f.is_active()).count();
        if active > 0 {
            let label = format!(" {active} filter(s) ");
            surface.put_str(
                self.area.x + 2,
                self.area.bottom().saturating_sub(1),
                &label,
                Style::new().fg(Color::YELLOW),
                None,
            );
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
