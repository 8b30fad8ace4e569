//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    catalog::{Catalog, Id, Item},
    provider::FetchError,
    sync::{ScrollSync, Viewport},
};
use crate::ui::layout::AppLayout;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Catalog,
    ItemDetail,
}

/// Progress of the one-off catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    /// Where the catalog comes from (shown in the title).
    pub source_label: String,
    /// User-configurable keybindings and scroll settings.
    pub config: AppConfig,
    pub load: LoadState,
    /// Scroll sync engine; only present once the catalog has loaded.
    pub sync: Option<ScrollSync>,
    /// Category to pre-select on mount.
    pub category_hint: Option<Id>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Item shown in the detail overlay.
    pub open_item: Option<Id>,
    /// Last known terminal size.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frame counter (drives the loading spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(source_label: String, config: AppConfig, category_hint: Option<Id>) -> Self {
        Self {
            source_label,
            config,
            load: LoadState::default(),
            sync: None,
            category_hint,
            active_view: ActiveView::default(),
            open_item: None,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            tick: 0,
        }
    }

    /// The loaded catalog, or an empty one while loading / after a failure.
    pub fn catalog(&self) -> &Catalog {
        static EMPTY: Catalog = Catalog::EMPTY;
        self.sync.as_ref().map_or(&EMPTY, ScrollSync::catalog)
    }

    /// Screen layout for the current terminal size and subcategory bar state.
    pub fn layout(&self) -> AppLayout {
        let shows_subbar = self
            .sync
            .as_ref()
            .is_some_and(ScrollSync::shows_subcategory_bar);
        AppLayout::from_area(self.terminal_area, shows_subbar)
    }

    /// Feed the outcome of the catalog fetch in.
    pub fn finish_load(&mut self, result: Result<Catalog, FetchError>, now: Instant) {
        match result {
            Ok(catalog) => {
                let viewport = viewport_for(&AppLayout::from_area(self.terminal_area, false));
                let sync = ScrollSync::mount(
                    catalog,
                    self.config.sync_settings(),
                    viewport,
                    self.category_hint.as_ref(),
                    now,
                );
                self.sync = Some(sync);
                self.load = LoadState::Ready;
                self.sync_viewport();
            }
            Err(err) => {
                tracing::warn!("catalog fetch failed: {err}");
                self.load = LoadState::Failed(format!("Failed to load catalog: {err}"));
            }
        }
    }

    /// Push the current pane sizes into the sync engine.  Cheap when
    /// nothing changed; call before every frame.
    pub fn sync_viewport(&mut self) {
        let viewport = viewport_for(&self.layout());
        if let Some(sync) = self.sync.as_mut() {
            sync.resize(viewport);
        }
    }

    /// Advance animations / throttled observation for this frame.
    pub fn on_frame(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.sync_viewport();
        if let Some(sync) = self.sync.as_mut() {
            sync.tick(now);
        }
    }

    pub fn open_item(&mut self, id: Id) {
        tracing::debug!(item = %id, "open item");
        self.open_item = Some(id);
        self.active_view = ActiveView::ItemDetail;
    }

    pub fn close_item(&mut self) {
        self.open_item = None;
        self.active_view = ActiveView::Catalog;
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.open_item.as_ref().and_then(|id| self.catalog().item(id))
    }

    /// Tear the sync engine down before exit.
    pub fn unmount(&mut self) {
        if let Some(sync) = self.sync.as_mut() {
            sync.unmount();
        }
    }
}

/// Visible sizes of the content pane and both bars' button strips.
pub fn viewport_for(layout: &AppLayout) -> Viewport {
    let bar_inner = |r: Rect| i32::from(r.width.saturating_sub(2));
    Viewport {
        content_height: i32::from(layout.content_area.height),
        category_bar_width: bar_inner(layout.category_bar),
        subcategory_bar_width: layout.subcategory_bar.map_or(0, bar_inner),
    }
}
