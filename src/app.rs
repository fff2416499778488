use crate::data::{DatasetOrigin, LoadEvent, RegionShape};
use crate::i18n::Localizer;
use crate::map::{build_options, ChoroplethOptions, MapRenderer, SeriesEntry, Viewport};
use crate::model::{Dataset, EnrichedRecord};
use crate::ui;
use log::{error, info};
use ratatui::layout::Rect;

/// Rows in each ranking list
pub const LIST_LEN: usize = 10;

const SPINNER: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Overview,
    /// Survival report for the region with this short name
    Detail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Top,
    Bottom,
    Map,
}

/// Application state
pub struct App {
    pub dataset: Option<Dataset>,
    pub origin: Option<DatasetOrigin>,
    /// Set when the boundary load failed; the map then never leaves the loading state
    pub boundary_error: Option<String>,
    pub map_renderer: MapRenderer,
    pub options: ChoroplethOptions,
    pub localizer: Localizer,
    pub view: View,
    pub focus: Focus,
    pub top_cursor: usize,
    pub bottom_cursor: usize,
    pub viewport: Viewport,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for the hover card
    pub mouse_pos: Option<(u16, u16)>,
    /// Frame counter for the loading spinner
    pub frame: u64,
    universe: Vec<String>,
    map_area: Rect,
    fit_pending: bool,
    dragged: bool,
}

impl App {
    pub fn new(localizer: Localizer, width: u16, height: u16) -> Self {
        let map_area = ui::panels(Rect::new(0, 0, width, height)).map_inner();
        Self {
            dataset: None,
            origin: None,
            boundary_error: None,
            map_renderer: MapRenderer::new(),
            options: ChoroplethOptions::default(),
            localizer,
            view: View::Overview,
            focus: Focus::Top,
            top_cursor: 0,
            bottom_cursor: 0,
            viewport: Viewport::china(map_area.width as usize * 2, map_area.height as usize * 4),
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            frame: 0,
            universe: Vec::new(),
            map_area,
            fit_pending: false,
            dragged: false,
        }
    }

    /// Apply a completed startup load
    pub fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Regions(load) => {
                info!("{} regions ready ({:?})", load.records.len(), load.origin);
                if let Some(dataset) = self.dataset.as_mut() {
                    dataset.replace(&load.records);
                } else {
                    self.dataset = Some(Dataset::new(&load.records));
                }
                self.origin = Some(load.origin);
                self.top_cursor = 0;
                self.bottom_cursor = 0;
            }
            LoadEvent::Boundaries(Ok(set)) => {
                info!("{} boundary features ready", set.len());
                self.map_renderer.set_boundaries(&set);
                self.universe = set.names();
                self.fit_pending = true;
                self.fit_view();
            }
            LoadEvent::Boundaries(Err(e)) => {
                error!("boundary dataset unavailable, map stays in loading state: {e}");
                self.boundary_error = Some(e.to_string());
            }
        }
        self.rebuild_options();
    }

    fn rebuild_options(&mut self) {
        if let (Some(dataset), true) = (&self.dataset, self.map_renderer.has_data()) {
            self.options = build_options(dataset.records(), &self.universe);
        }
    }

    /// The map renders only once both datasets are in
    pub fn is_map_ready(&self) -> bool {
        self.dataset.is_some() && self.map_renderer.has_data()
    }

    fn fit_view(&mut self) {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return;
        }
        let shapes = self.map_renderer.shapes();
        if let Some(bounds) = shapes.iter().filter_map(|s| s.bounds).reduce(|a, b| a.union(b)) {
            self.viewport.fit(&bounds);
            self.fit_pending = false;
        }
    }

    /// Update layout when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.map_area = ui::panels(Rect::new(0, 0, width, height)).map_inner();
        self.viewport.width = self.map_area.width as usize * 2;
        self.viewport.height = self.map_area.height as usize * 4;
        if self.fit_pending {
            self.fit_view();
        }
    }

    /// Back to the fitted national view
    pub fn reset_view(&mut self) {
        if self.map_renderer.has_data() {
            self.fit_view();
        } else {
            self.viewport = Viewport::china(self.viewport.width, self.viewport.height);
        }
    }

    pub fn top_list(&self) -> &[EnrichedRecord] {
        self.dataset
            .as_ref()
            .map(|d| d.ranked().top_n(LIST_LEN))
            .unwrap_or(&[])
    }

    /// Worst first
    pub fn bottom_list(&self) -> Vec<&EnrichedRecord> {
        self.dataset
            .as_ref()
            .map(|d| d.ranked().bottom_n(LIST_LEN))
            .unwrap_or_default()
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Top => Focus::Bottom,
            Focus::Bottom => Focus::Map,
            Focus::Map => Focus::Top,
        };
    }

    /// Move the focused list's cursor, clamped to the list
    pub fn move_cursor(&mut self, delta: i32) {
        let len = match self.focus {
            Focus::Top => self.top_list().len(),
            Focus::Bottom => self.bottom_list().len(),
            Focus::Map => return,
        };
        let cursor = match self.focus {
            Focus::Top => &mut self.top_cursor,
            _ => &mut self.bottom_cursor,
        };
        *cursor = (*cursor as i64 + delta as i64).clamp(0, len.saturating_sub(1) as i64) as usize;
    }

    /// Open the report for the record under the focused cursor
    pub fn open_selected(&mut self) {
        let name = match self.focus {
            Focus::Top => self.top_list().get(self.top_cursor).map(|r| r.name.clone()),
            Focus::Bottom => self.bottom_list().get(self.bottom_cursor).map(|r| r.name.clone()),
            Focus::Map => None,
        };
        if let Some(name) = name {
            self.select(&name);
        }
    }

    /// Show the survival report of a region by short name
    pub fn select(&mut self, name: &str) {
        if self.dataset.as_ref().and_then(|d| d.get(name)).is_some() {
            info!("selected {name}");
            self.view = View::Detail(name.to_string());
        }
    }

    pub fn back(&mut self) {
        self.view = View::Overview;
    }

    pub fn selected_record(&self) -> Option<&EnrichedRecord> {
        match &self.view {
            View::Detail(name) => self.dataset.as_ref()?.get(name),
            View::Overview => None,
        }
    }

    /// Boundary shape of the selected region
    pub fn selected_shape(&self) -> Option<&RegionShape> {
        let record = self.selected_record()?;
        let canonical = self
            .options
            .by_short(&record.name)
            .map(|e| e.canonical_name.as_str())
            .unwrap_or(record.name.as_str());
        self.map_renderer.shapes().iter().find(|s| s.name == canonical)
    }

    pub fn selected_canonical(&self) -> Option<&str> {
        self.selected_shape().map(|s| s.name.as_str())
    }

    /// Map canvas pixel under a terminal cell, if the cell is on the map
    pub fn map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let a = self.map_area;
        if col < a.x || row < a.y || col >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        Some(((col - a.x) as i32 * 2, (row - a.y) as i32 * 4))
    }

    /// Series entry of the region under a terminal cell
    pub fn entry_at(&self, col: u16, row: u16) -> Option<&SeriesEntry> {
        if !self.is_map_ready() {
            return None;
        }
        let (px, py) = self.map_pixel(col, row)?;
        let shape = self.map_renderer.pick_pixel(&self.viewport, px, py)?;
        self.options.by_canonical(&shape.name)
    }

    /// Series entry under the mouse
    pub fn hovered_entry(&self) -> Option<&SeriesEntry> {
        let (col, row) = self.mouse_pos?;
        self.entry_at(col, row)
    }

    /// Select the region under a clicked map cell
    pub fn click(&mut self, col: u16, row: u16) {
        if self.view != View::Overview {
            return;
        }
        if let Some(name) = self.entry_at(col, row).map(|e| e.short_name.clone()) {
            self.select(&name);
        }
    }

    pub fn toggle_language(&mut self) {
        self.localizer.toggle();
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom towards a terminal cell on the map
    pub fn zoom_at(&mut self, col: u16, row: u16, factor: f64) {
        if let Some((px, py)) = self.map_pixel(col, row) {
            self.viewport.zoom_at(px, py, factor);
        }
    }

    /// Left button down: start a possible drag
    pub fn press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Pan by the mouse movement since the last event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            if dx != 0 || dy != 0 {
                self.dragged = true;
                self.pan(dx * 2, dy * 4);
            }
        }
        self.last_mouse = Some((x, y));
    }

    /// Left button up: a press without movement is a click
    pub fn release(&mut self, col: u16, row: u16) {
        if self.last_mouse.is_some() && !self.dragged {
            self.click(col, row);
        }
        self.last_mouse = None;
        self.dragged = false;
    }

    /// Update mouse cursor position
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn spinner(&self) -> char {
        SPINNER[(self.frame / 4) as usize % SPINNER.len()]
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}
