//! Scroll synchronisation engine.
//!
//! Owns the selection, the anchor registry, the content pane and both nav
//! bars, and keeps them consistent in both directions:
//!
//! * **content drives nav**: scrolling the content pane schedules an
//!   observer pass (at most one per frame); a changed selection re-centres
//!   the affected nav bar buttons.
//! * **nav drives content**: activating a nav entry updates the selection
//!   at once and starts a smooth scroll of the content pane to the section.
//!
//! While a click-initiated scroll is in flight a [`ProgrammaticScroll`]
//! token is live and observer passes are suppressed, so the intermediate
//! positions of the animation never flip the highlighted buttons.
//!
//! The engine is created by [`ScrollSync::mount`] once the catalog has
//! loaded and stops reacting to events after [`ScrollSync::unmount`].

use std::time::{Duration, Instant};

use super::anchors::{AnchorRegistry, ButtonAnchor, SectionId};
use super::catalog::{Catalog, Id};
use super::nav_bar::{BarKind, NavBar};
use super::observer;
use super::pane::ScrollPane;
use super::sections::{self, BarLayout, ContentLayout};
use super::selection::SelectionState;
use super::throttle::FrameThrottle;

/// Tunables, normally taken from the user config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Rows left above a section's heading after a click-scroll.
    pub header_offset: i32,
    /// Duration of click-initiated content scrolls.
    pub scroll_duration: Duration,
    /// Duration of nav bar re-centring.
    pub bar_scroll_duration: Duration,
    /// Minimum spacing between two observer passes.
    pub frame_interval: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            header_offset: 1,
            scroll_duration: Duration::from_millis(500),
            bar_scroll_duration: Duration::from_millis(250),
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Visible sizes of the three scroll containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub content_height: i32,
    pub category_bar_width: i32,
    pub subcategory_bar_width: i32,
}

/// Marker for a click-initiated content scroll that is still running.
#[derive(Debug, Clone)]
pub struct ProgrammaticScroll {
    pub target: SectionId,
    deadline: Instant,
}

pub struct ScrollSync {
    catalog: Catalog,
    settings: SyncSettings,
    selection: SelectionState,
    anchors: AnchorRegistry,
    content_layout: ContentLayout,
    category_layout: BarLayout,
    subcategory_layout: BarLayout,
    content: ScrollPane,
    category_bar: NavBar,
    subcategory_bar: NavBar,
    throttle: FrameThrottle,
    programmatic: Option<ProgrammaticScroll>,
    /// The subcategory bar was shown or hidden by a selection change and the
    /// next viewport will reflect it.
    subbar_toggled: bool,
    mounted: bool,
}

impl ScrollSync {
    /// Lay out `catalog` and either seed the selection from `hint` or run
    /// the first observer pass.
    pub fn mount(
        catalog: Catalog,
        settings: SyncSettings,
        viewport: Viewport,
        hint: Option<&Id>,
        now: Instant,
    ) -> Self {
        let mut anchors = AnchorRegistry::new();
        let content_layout = sections::layout_content(&catalog, &mut anchors);
        let category_layout = sections::layout_category_bar(&catalog, &mut anchors);

        let mut sync = Self {
            content: ScrollPane::new(viewport.content_height, content_layout.height()),
            category_bar: NavBar::new(viewport.category_bar_width, category_layout.strip_width()),
            subcategory_bar: NavBar::new(viewport.subcategory_bar_width, 0),
            throttle: FrameThrottle::new(settings.frame_interval),
            catalog,
            settings,
            selection: SelectionState::new(),
            anchors,
            content_layout,
            category_layout,
            subcategory_layout: BarLayout::default(),
            programmatic: None,
            subbar_toggled: false,
            mounted: true,
        };

        let before = sync.selection.clone();
        let seeded = match hint {
            Some(id) if sync.selection.select_category_from_start(&sync.catalog, id) => {
                let section = SectionId::Category(id.clone());
                if let Some(anchor) = sync.anchors.content(&section) {
                    sync.content.jump_to(anchor.top - settings.header_offset);
                }
                tracing::debug!(category = %id, "seeded from initial hint");
                true
            }
            Some(id) => {
                tracing::debug!(category = %id, "initial hint matches no category");
                false
            }
            None => false,
        };

        // A seeded selection stands until the first scroll, even when the
        // pane is too short to bring the category to the top.
        if !seeded {
            sync.run_observer();
        }
        sync.after_selection_change(&before, now);
        tracing::debug!(
            categories = sync.catalog.categories().len(),
            rows = sync.content_layout.height(),
            "scroll sync mounted"
        );
        sync
    }

    /// Stop reacting to events and drop everything derived from the layout.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.programmatic = None;
        self.throttle.cancel();
        self.anchors.clear();
        self.selection = SelectionState::new();
        tracing::debug!("scroll sync unmounted");
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    pub fn content(&self) -> &ScrollPane {
        &self.content
    }

    pub fn content_layout(&self) -> &ContentLayout {
        &self.content_layout
    }

    pub fn bar(&self, kind: BarKind) -> &NavBar {
        match kind {
            BarKind::Categories => &self.category_bar,
            BarKind::Subcategories => &self.subcategory_bar,
        }
    }

    pub fn bar_layout(&self, kind: BarKind) -> &BarLayout {
        match kind {
            BarKind::Categories => &self.category_layout,
            BarKind::Subcategories => &self.subcategory_layout,
        }
    }

    pub fn programmatic_scroll(&self) -> Option<&ProgrammaticScroll> {
        self.programmatic.as_ref()
    }

    /// Whether the subcategory bar has anything to show.
    pub fn shows_subcategory_bar(&self) -> bool {
        !self.subcategory_layout.buttons.is_empty()
    }

    /// First item card starting inside the visible part of the content pane.
    pub fn focused_item(&self) -> Option<&Id> {
        self.content_layout
            .first_item_in(self.content.offset(), self.content.extent())
    }

    /// Item under viewport row `row` of the content pane.
    pub fn item_at_row(&self, row: i32) -> Option<&Id> {
        self.content_layout.item_at(self.content.offset() + row)
    }

    /// Nav entry under visible column `col` of a bar.
    pub fn button_at(&self, kind: BarKind, col: i32) -> Option<SectionId> {
        let x = col + self.bar(kind).pane.offset();
        self.anchors
            .button_at(x, kind == BarKind::Subcategories)
            .cloned()
    }

    // ── events ──────────────────────────────────────────────────

    /// Viewport sizes changed (terminal resize, subcategory bar appearing).
    ///
    /// A bar whose width changed snaps its active button back to the centre.
    /// The subcategory bar appearing or vanishing after the engine's own
    /// selection change does not schedule an observer pass.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.mounted {
            return;
        }
        let own_toggle = std::mem::take(&mut self.subbar_toggled)
            && (viewport.subcategory_bar_width > 0) == self.shows_subcategory_bar()
            && viewport.category_bar_width == self.category_bar.pane.extent();

        let content_changed = self
            .content
            .resize(viewport.content_height, self.content_layout.height());
        let category_changed = self.category_bar.pane.resize(
            viewport.category_bar_width,
            self.category_layout.strip_width(),
        );
        let subcategory_changed = self.subcategory_bar.pane.resize(
            viewport.subcategory_bar_width,
            self.subcategory_layout.strip_width(),
        );

        if category_changed {
            let button = self.active_button(BarKind::Categories);
            self.category_bar.snap_to(button);
        }
        if subcategory_changed {
            let button = self.active_button(BarKind::Subcategories);
            self.subcategory_bar.snap_to(button);
        }

        if (content_changed || category_changed || subcategory_changed) && !own_toggle {
            self.throttle.request();
        }
    }

    /// User scrolled the content pane by `delta` rows (wheel, keys).
    ///
    /// Takes over from any click-initiated animation.
    pub fn scroll_content(&mut self, delta: i32) {
        if !self.mounted {
            return;
        }
        if self.programmatic.take().is_some() {
            tracing::trace!("user scroll cancelled programmatic scroll");
        }
        self.content.scroll_by(delta);
        self.throttle.request();
    }

    /// User jumped the content pane to an absolute row (Home / End).
    pub fn jump_content(&mut self, row: i32) {
        if !self.mounted {
            return;
        }
        self.programmatic = None;
        self.content.jump_to(row);
        self.throttle.request();
    }

    /// User scrolled a nav bar sideways.  The content is unaffected.
    pub fn scroll_bar(&mut self, kind: BarKind, delta: i32) {
        if !self.mounted {
            return;
        }
        match kind {
            BarKind::Categories => self.category_bar.pane.scroll_by(delta),
            BarKind::Subcategories => self.subcategory_bar.pane.scroll_by(delta),
        };
    }

    /// Activate a category nav entry.
    pub fn activate_category(&mut self, id: &Id, now: Instant) {
        if !self.mounted {
            return;
        }
        let before = self.selection.clone();
        if !self.selection.select_category_from_start(&self.catalog, id)
            && self.selection.active_category() != Some(id)
        {
            return;
        }
        self.scroll_to_section(SectionId::Category(id.clone()), now);
        self.after_selection_change(&before, now);
    }

    /// Activate a subcategory nav entry.  The active category is left alone.
    pub fn activate_subcategory(&mut self, id: &Id, now: Instant) {
        if !self.mounted {
            return;
        }
        let before = self.selection.clone();
        self.selection.set_active_subcategory(id);
        self.scroll_to_section(SectionId::Subcategory(id.clone()), now);
        self.after_selection_change(&before, now);
    }

    /// Activate whichever nav entry `section` names.
    pub fn activate(&mut self, section: &SectionId, now: Instant) {
        match section {
            SectionId::Category(id) => self.activate_category(id, now),
            SectionId::Subcategory(id) => self.activate_subcategory(id, now),
        }
    }

    /// Keyboard stepping through the category bar.
    pub fn step_category(&mut self, step: i32, now: Instant) {
        let categories = self.catalog.categories();
        if categories.is_empty() {
            return;
        }
        let current = self
            .selection
            .active_category()
            .and_then(|id| self.catalog.category_index(id));
        let next = step_index(current, step, categories.len());
        let id = categories[next].id.clone();
        self.activate_category(&id, now);
    }

    /// Keyboard stepping through the subcategory bar.
    pub fn step_subcategory(&mut self, step: i32, now: Instant) {
        let Some(ids) = self
            .selection
            .active_category()
            .and_then(|id| self.catalog.category(id))
            .map(|c| c.subcategories.iter().map(|s| s.id.clone()).collect::<Vec<_>>())
        else {
            return;
        };
        if ids.is_empty() {
            return;
        }
        let current = self
            .selection
            .active_subcategory()
            .and_then(|sub| ids.iter().position(|id| id == sub));
        let next = step_index(current, step, ids.len());
        self.activate_subcategory(&ids[next], now);
    }

    /// Advance animations and run a pending observer pass.
    ///
    /// Call once per frame.  Returns `true` when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let mut dirty = self.content.tick(now);

        if let Some(token) = &self.programmatic {
            if !self.content.is_animating() || now >= token.deadline {
                tracing::trace!(target = ?token.target, "programmatic scroll settled");
                self.programmatic = None;
            }
            // Scroll events produced by the animation itself are dropped.
            self.throttle.cancel();
        }

        if self.programmatic.is_none() && self.throttle.poll(now) {
            let before = self.selection.clone();
            if self.run_observer() {
                self.after_selection_change(&before, now);
                dirty = true;
            }
        }

        dirty |= self.category_bar.tick(now);
        dirty |= self.subcategory_bar.tick(now);
        dirty
    }

    // ── internals ───────────────────────────────────────────────

    fn run_observer(&mut self) -> bool {
        let observation = observer::observe(
            &self.catalog,
            &self.anchors,
            self.content.offset(),
            self.content.extent(),
        );
        observer::apply(&mut self.selection, &self.catalog, &observation)
    }

    fn scroll_to_section(&mut self, section: SectionId, now: Instant) {
        let Some(anchor) = self.anchors.content(&section) else {
            tracing::debug!(?section, "no content anchor, skipping scroll");
            return;
        };
        let target = anchor.top - self.settings.header_offset;
        let delta = self
            .content
            .animate_to(target, now, self.settings.scroll_duration);
        if delta != 0 || self.content.is_animating() {
            self.programmatic = Some(ProgrammaticScroll {
                target: section,
                deadline: now + self.settings.scroll_duration + self.settings.frame_interval,
            });
        }
        self.throttle.cancel();
    }

    /// Button anchor of the active entry in bar `kind`.
    fn active_button(&self, kind: BarKind) -> Option<ButtonAnchor> {
        let section = match kind {
            BarKind::Categories => SectionId::Category(self.selection.active_category()?.clone()),
            BarKind::Subcategories => {
                SectionId::Subcategory(self.selection.active_subcategory()?.clone())
            }
        };
        self.anchors.button(&section)
    }

    /// Re-lay out the subcategory bar if the category changed, then centre
    /// the active buttons in both bars.
    fn after_selection_change(&mut self, before: &SelectionState, now: Instant) {
        let category_changed = before.active_category() != self.selection.active_category();
        if category_changed || self.subcategory_layout.buttons.is_empty() {
            self.subcategory_layout = sections::layout_subcategory_bar(
                &self.catalog,
                self.selection.active_category(),
                &mut self.anchors,
            );
            let width = self.subcategory_bar.pane.extent();
            self.subcategory_bar.pane.resize(width, self.subcategory_layout.strip_width());
            if category_changed {
                self.subcategory_bar.pane.jump_to(0);
            }
            if self.shows_subcategory_bar() != (width > 0) {
                self.subbar_toggled = true;
            }
        }

        let duration = self.settings.bar_scroll_duration;
        let button = self.active_button(BarKind::Categories);
        self.category_bar.center_on(button, now, duration);
        let button = self.active_button(BarKind::Subcategories);
        self.subcategory_bar.center_on(button, now, duration);
    }
}

impl Drop for ScrollSync {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn step_index(current: Option<usize>, step: i32, len: usize) -> usize {
    match current {
        None => 0,
        Some(i) => (i as i64 + step as i64).clamp(0, len as i64 - 1) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    /// A(A1, A2) with plenty of cards each, then B without subcategories.
    fn catalog() -> Catalog {
        let items = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| format!(r#"{{"id": "{prefix}-{i}", "title": "{prefix} {i}"}}"#))
                .collect::<Vec<_>>()
                .join(",")
        };
        let json = format!(
            r#"[
                {{"id": "A", "title": "Alpha", "items": [{}], "subcategories": [
                    {{"id": "A1", "title": "A one", "items": [{}]}},
                    {{"id": "A2", "title": "A two", "items": [{}]}}
                ]}},
                {{"id": "B", "title": "Beta", "items": [{}]}}
            ]"#,
            items("a", 10),
            items("a1", 10),
            items("a2", 10),
            items("b", 30),
        );
        Catalog::from_json(&json).unwrap()
    }

    fn viewport() -> Viewport {
        Viewport {
            content_height: 20,
            category_bar_width: 8,
            subcategory_bar_width: 8,
        }
    }

    fn mount(now: Instant) -> ScrollSync {
        ScrollSync::mount(catalog(), SyncSettings::default(), viewport(), None, now)
    }

    fn top_of(sync: &ScrollSync, section: SectionId) -> i32 {
        sync.anchors().content(&section).unwrap().top
    }

    /// Drive the engine frame by frame for `total`.
    fn run_frames(sync: &mut ScrollSync, from: Instant, total: Duration) -> Instant {
        let mut now = from;
        while now < from + total {
            now += FRAME;
            sync.tick(now);
        }
        now
    }

    #[test]
    fn first_pass_on_mount_selects_top_section() {
        let sync = mount(Instant::now());
        assert_eq!(sync.selection().active_category(), Some(&Id::from("A")));
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A1")));
        assert!(sync.shows_subcategory_bar());
    }

    #[test]
    fn scrolling_into_b_and_back() {
        let t0 = Instant::now();
        let mut sync = mount(t0);

        let b = top_of(&sync, SectionId::Category(Id::from("B")));
        sync.scroll_content(b - 2);
        sync.tick(t0 + FRAME);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
        assert_eq!(sync.selection().active_subcategory(), None);
        assert!(!sync.shows_subcategory_bar());

        sync.jump_content(0);
        sync.tick(t0 + FRAME * 3);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("A")));
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A1")));
    }

    #[test]
    fn gap_between_sections_keeps_category() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.scroll_content(top_of(&sync, SectionId::Category(Id::from("B"))));
        sync.tick(t0 + FRAME);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));

        // Deep inside B no heading is in the upper half.
        sync.scroll_content(15);
        sync.tick(t0 + FRAME * 3);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
    }

    #[test]
    fn click_scroll_lands_at_header_offset_without_flicker() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        let a2 = SectionId::Subcategory(Id::from("A2"));

        sync.activate_subcategory(&Id::from("A2"), t0);
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A2")));
        assert!(sync.programmatic_scroll().is_some());

        // The animation passes over A1; the selection must not follow it.
        let mut now = t0;
        for _ in 0..60 {
            now += FRAME;
            sync.tick(now);
            assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A2")));
        }

        assert!(sync.programmatic_scroll().is_none());
        let top = top_of(&sync, a2) - sync.content().offset();
        assert_eq!(top, sync.settings().header_offset);
    }

    #[test]
    fn subcategory_click_keeps_category() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.activate_category(&Id::from("B"), t0);
        let now = run_frames(&mut sync, t0, Duration::from_secs(1));
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));

        sync.activate_subcategory(&Id::from("A2"), now);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A2")));
    }

    #[test]
    fn category_click_selects_first_subcategory() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.activate_subcategory(&Id::from("A2"), t0);
        let now = run_frames(&mut sync, t0, Duration::from_secs(1));

        sync.activate_category(&Id::from("A"), now);
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A1")));
        assert_eq!(sync.content().destination(), 0);
    }

    #[test]
    fn user_scroll_overrides_click_animation() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.activate_category(&Id::from("B"), t0);
        sync.tick(t0 + FRAME);

        sync.jump_content(0);
        assert!(sync.programmatic_scroll().is_none());
        sync.tick(t0 + FRAME * 3);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("A")));
    }

    #[test]
    fn nav_bars_follow_selection() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.activate_category(&Id::from("B"), t0);
        run_frames(&mut sync, t0, Duration::from_secs(1));

        let bar = sync.bar(BarKind::Categories);
        let button = sync
            .anchors()
            .button(&SectionId::Category(Id::from("B")))
            .unwrap();
        let expected = bar.pane.clamp(crate::core::nav_bar::centred_offset(button, bar.pane.extent()));
        assert_eq!(bar.pane.offset(), expected);
        assert!(expected > 0);
    }

    #[test]
    fn matching_hint_jumps_to_category() {
        let sync = ScrollSync::mount(
            catalog(),
            SyncSettings::default(),
            viewport(),
            Some(&Id::from("B")),
            Instant::now(),
        );
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
        let b = top_of(&sync, SectionId::Category(Id::from("B")));
        assert_eq!(sync.content().offset(), b - 1);
    }

    #[test]
    fn hint_survives_when_pane_cannot_reach_it() {
        let tall = Viewport {
            content_height: 500,
            ..viewport()
        };
        let sync = ScrollSync::mount(
            catalog(),
            SyncSettings::default(),
            tall,
            Some(&Id::from("B")),
            Instant::now(),
        );
        assert_eq!(sync.content().offset(), 0);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
        assert_eq!(sync.selection().active_subcategory(), None);
    }

    #[test]
    fn stale_hint_falls_back_to_observer() {
        let sync = ScrollSync::mount(
            catalog(),
            SyncSettings::default(),
            viewport(),
            Some(&Id::from("nope")),
            Instant::now(),
        );
        assert_eq!(sync.selection().active_category(), Some(&Id::from("A")));
    }

    #[test]
    fn keyboard_steps_clamp_at_ends() {
        let t0 = Instant::now();
        let mut sync = mount(t0);

        sync.step_category(-1, t0);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("A")));
        sync.step_subcategory(1, t0);
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A2")));
        sync.step_subcategory(1, t0);
        assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("A2")));
        sync.step_category(5, t0);
        assert_eq!(sync.selection().active_category(), Some(&Id::from("B")));
    }

    #[test]
    fn unmounted_engine_ignores_events() {
        let t0 = Instant::now();
        let mut sync = mount(t0);
        sync.unmount();

        sync.activate_category(&Id::from("B"), t0);
        sync.scroll_content(10);
        assert!(!sync.tick(t0 + FRAME));
        assert_eq!(sync.selection().active_category(), None);
        assert_eq!(sync.content().offset(), 0);
    }
}
