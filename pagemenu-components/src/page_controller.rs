//! Horizontally paged container with a tracking menu bar.
//!
//! ## Usage
//!
//! Hand the controller its pages, then call
//! [`initialize`](PageController::initialize) once the host knows its
//! geometry. Feed scroll samples from a native scroll view through
//! [`did_scroll`](PageController::did_scroll) and
//! [`did_end_decelerating`](PageController::did_end_decelerating), or drive
//! the built-in surface with [`begin_drag`](PageController::begin_drag) and
//! friends. After every call the host re-reads
//! [`surface`](PageController::surface) for the content offset,
//! [`window`](PageController::window) for the attached pages and
//! [`menu_bar`](PageController::menu_bar) for the titles and indicator.
//!
//! A native scroll view keeps its own offset. When a sample commits a page
//! change, [`did_scroll`](PageController::did_scroll) returns the offset the
//! host must scroll to. Until the host reports an offset inside the centre
//! span again, further samples past the threshold are treated as stale and
//! never commit a second time.
//!
//! Only the visible page and its two neighbours are attached at any time.
//! Dragging past half a page moves the menu indicator continuously; the
//! visible page changes once the drag reaches the neighbouring slot or the
//! surface settles over it.
use std::time::{Duration, Instant};

use derive_setters::Setters;
use pagemenu_ui::{AnimationCompletion, Dp, Px, PxPosition, PxRect, RectAnimator, TweenAnimator};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    container::{ContainerSurface, DEFAULT_PAGE_THRESHOLD, ScrollSample},
    index::{Direction, neighbor},
    menu_bar::{MenuBar, MenuBarArgs, MenuBarDefaults, MenuBarStyle},
    page::{Page, PageId, PageRef},
    text_metrics::{MonospaceMeasurer, TextMeasurer},
    window::{Slot, Window, WindowEntry},
};

/// Arguments for [`PageController`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct PageControllerArgs {
    /// Page shown after the first load and after every page list change.
    pub initial_page: usize,
    /// Height of the menu bar above the pages.
    pub menu_bar_height: Dp,
    /// Duration of indicator revert and selection animations.
    pub animation_duration: Duration,
    /// Horizontal padding added to the title width for the indicator.
    pub indicator_padding: Dp,
    /// Indicator height as a fraction of the menu bar height.
    pub indicator_height_ratio: f32,
    /// Title layout of the menu bar.
    pub menu_bar_style: MenuBarStyle,
    /// Fraction of a width the content must travel before the neighbouring
    /// page counts as the one under the finger.
    pub page_threshold: f32,
}

impl Default for PageControllerArgs {
    fn default() -> Self {
        Self {
            initial_page: 0,
            menu_bar_height: MenuBarDefaults::HEIGHT,
            animation_duration: MenuBarDefaults::ANIMATION_DURATION,
            indicator_padding: MenuBarDefaults::INDICATOR_PADDING,
            indicator_height_ratio: MenuBarDefaults::INDICATOR_HEIGHT_RATIO,
            menu_bar_style: MenuBarStyle::default(),
            page_threshold: DEFAULT_PAGE_THRESHOLD,
        }
    }
}

impl PageControllerArgs {
    fn menu_bar_args(&self) -> MenuBarArgs {
        MenuBarArgs::default()
            .style(self.menu_bar_style)
            .indicator_padding(self.indicator_padding)
            .indicator_height_ratio(self.indicator_height_ratio)
            .animation_duration(self.animation_duration)
    }
}

/// Receives visible page changes.
///
/// Fires once per committed change, including the first load where
/// `previous` is `None`. Drag tracking and reverts never notify.
pub trait PageControllerDelegate {
    /// `page` became the visible page.
    fn visible_page_changed(&mut self, page: PageRef, previous: Option<PageRef>);
}

impl<F> PageControllerDelegate for F
where
    F: FnMut(PageRef, Option<PageRef>),
{
    fn visible_page_changed(&mut self, page: PageRef, previous: Option<PageRef>) {
        self(page, previous)
    }
}

/// Why [`PageController::try_switch_page`] left the visible page alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwitchPageError {
    /// A drag is in progress and owns the surface.
    #[error("a drag gesture is in progress")]
    Dragging,
    /// The index is outside the page list.
    #[error("page index {index} is out of range for {count} pages")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of pages.
        count: usize,
    },
    /// The controller has not loaded its first page yet.
    #[error("no page has been loaded yet")]
    NotLoaded,
}

/// Why [`PageController::initialize`] refused the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InitializeError {
    /// The bounds have no area.
    #[error("bounds {0:?} have no area")]
    EmptyBounds(PxRect),
}

/// Where the current drag gesture stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No finger is down.
    #[default]
    Idle,
    /// A finger is down but the content has not passed a neighbour threshold.
    Tracking,
    /// The content is past the threshold toward `to`, not yet committed.
    Crossing {
        /// The neighbour the drag heads to.
        to: PageRef,
    },
}

/// Paging state machine driving the container, the window and the menu bar.
pub struct PageController {
    args: PageControllerArgs,
    pages: SlotMap<PageId, Box<dyn Page>>,
    order: Vec<PageId>,
    window: Window,
    visible: Option<PageRef>,
    surface: ContainerSurface,
    menu_bar: MenuBar,
    phase: GesturePhase,
    did_finish_first_load: bool,
    awaiting_recenter: bool,
    bounds: Option<PxRect>,
    delegate: Option<Box<dyn PageControllerDelegate>>,
    last_indicator_animation: Option<AnimationCompletion>,
}

impl PageController {
    /// Creates a controller with the tick-driven animator and the monospace
    /// text measurer.
    pub fn new(args: PageControllerArgs) -> Self {
        Self::with_collaborators(
            args,
            Box::new(TweenAnimator::new()),
            Box::new(MonospaceMeasurer::default()),
        )
    }

    /// Creates a controller that animates and measures through the host.
    pub fn with_collaborators(
        args: PageControllerArgs,
        animator: Box<dyn RectAnimator>,
        measurer: Box<dyn TextMeasurer>,
    ) -> Self {
        let surface =
            ContainerSurface::new(PxRect::ZERO).with_page_threshold(args.page_threshold);
        let menu_bar = MenuBar::new(args.menu_bar_args(), animator, measurer);
        Self {
            args,
            pages: SlotMap::with_key(),
            order: Vec::new(),
            window: Window::new(),
            visible: None,
            surface,
            menu_bar,
            phase: GesturePhase::Idle,
            did_finish_first_load: false,
            awaiting_recenter: false,
            bounds: None,
            delegate: None,
            last_indicator_animation: None,
        }
    }

    /// Sets the change listener.
    pub fn with_delegate(mut self, delegate: impl PageControllerDelegate + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Sets the change listener, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: impl PageControllerDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Lays out the surface and the menu bar inside `bounds` and loads the
    /// initial window. Calling it again behaves like
    /// [`set_bounds`](Self::set_bounds).
    pub fn initialize(&mut self, bounds: PxRect) -> Result<(), InitializeError> {
        if bounds.is_empty() {
            return Err(InitializeError::EmptyBounds(bounds));
        }
        if self.bounds.is_some() {
            self.set_bounds(bounds);
            return Ok(());
        }

        debug!(?bounds, pages = self.order.len(), "initializing page controller");
        self.bounds = Some(bounds);
        self.surface.set_bounds(self.content_frame());
        self.menu_bar.set_frame(self.menu_bar_frame());
        self.load_initial_page();
        Ok(())
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.bounds.is_some()
    }

    /// Replaces the page list.
    ///
    /// Every attached page is detached, fresh identities are assigned, the
    /// menu titles are rebuilt and, once initialized, the initial page is
    /// loaded again. An empty list leaves everything unloaded.
    pub fn set_pages(&mut self, pages: Vec<Box<dyn Page>>) {
        for entry in self.window.take_all_except(None) {
            self.detach(entry);
        }
        self.pages.clear();
        self.order = pages.into_iter().map(|page| self.pages.insert(page)).collect();

        let titles = self
            .order
            .iter()
            .filter_map(|id| self.pages.get(*id))
            .map(|page| page.title().unwrap_or_default().to_owned())
            .collect();
        self.menu_bar.set_titles(titles);

        self.visible = None;
        self.did_finish_first_load = false;
        self.phase = GesturePhase::Idle;
        self.last_indicator_animation = None;
        self.surface.reset_offset();
        debug!(pages = self.order.len(), "page list replaced");

        if self.is_initialized() {
            self.load_initial_page();
        }
    }

    /// Relayouts after the host resized the controller.
    ///
    /// Attached pages get their new frames, the surface scrolls back to the
    /// centre slot and the indicator snaps under the visible page.
    pub fn set_bounds(&mut self, bounds: PxRect) {
        if bounds.is_empty() {
            warn!(?bounds, "ignoring empty bounds");
            return;
        }
        debug!(?bounds, "relayout");
        self.bounds = Some(bounds);
        self.surface.set_bounds(self.content_frame());
        self.menu_bar.set_frame(self.menu_bar_frame());
        self.phase = GesturePhase::Idle;

        for entry in self.window.take_unslotted() {
            self.detach(entry);
        }
        let placed: Vec<(PageId, Slot)> = self
            .window
            .iter()
            .filter_map(|entry| entry.slot.map(|slot| (entry.page.id, slot)))
            .collect();
        for (id, slot) in placed {
            let frame = self.surface.slot_frame(slot);
            if self.window.relocate(id, slot, frame) {
                self.layout_page(id, frame);
            }
        }

        if let Some(visible) = self.visible {
            self.menu_bar.size_indicator(visible.index);
        }
    }

    /// Arguments the controller was built with.
    pub fn args(&self) -> &PageControllerArgs {
        &self.args
    }

    /// The committed visible page; `None` until the first load.
    pub fn visible_page(&self) -> Option<PageRef> {
        self.visible
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    /// The page at `index` in the list.
    pub fn page_ref(&self, index: usize) -> Option<PageRef> {
        self.order
            .get(index)
            .map(|&id| PageRef { id, index })
    }

    /// All pages in list order.
    pub fn pages(&self) -> impl Iterator<Item = (PageRef, &dyn Page)> {
        self.order.iter().enumerate().filter_map(|(index, &id)| {
            self.pages
                .get(id)
                .map(|page| (PageRef { id, index }, page.as_ref()))
        })
    }

    /// The page with identity `id`.
    pub fn page(&self, id: PageId) -> Option<&dyn Page> {
        self.pages.get(id).map(|page| page.as_ref())
    }

    /// The attached pages.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The scroll surface hosting the slots.
    pub fn surface(&self) -> &ContainerSurface {
        &self.surface
    }

    /// The menu bar.
    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    /// Where the current drag gesture stands.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a native commit moved the offset and the host has not yet
    /// reported a sample inside the centre span.
    pub fn is_awaiting_recenter(&self) -> bool {
        self.awaiting_recenter
    }

    /// Frame of the menu bar in the controller's parent.
    pub fn menu_bar_frame(&self) -> PxRect {
        let Some(bounds) = self.bounds else {
            return PxRect::ZERO;
        };
        let height = self.args.menu_bar_height.to_px().clamp(Px::ZERO, bounds.height);
        PxRect::new(bounds.x, bounds.y, bounds.width, height)
    }

    /// Frame of the scroll surface in the controller's parent.
    pub fn content_frame(&self) -> PxRect {
        let Some(bounds) = self.bounds else {
            return PxRect::ZERO;
        };
        let bar = self.menu_bar_frame();
        PxRect::new(
            bounds.x,
            bar.bottom(),
            bounds.width,
            (bounds.height - bar.height).max(Px::ZERO),
        )
    }

    /// The most recent indicator revert or selection animation.
    pub fn last_indicator_animation(&self) -> Option<&AnimationCompletion> {
        self.last_indicator_animation.as_ref()
    }

    /// Takes the most recent indicator animation, e.g. to await it.
    pub fn take_indicator_animation(&mut self) -> Option<AnimationCompletion> {
        self.last_indicator_animation.take()
    }

    /// Advances indicator animations.
    pub fn tick(&mut self, now: Instant) {
        self.menu_bar.tick(now);
    }

    /// Mirrors a scroll sample reported by a native scroll view.
    ///
    /// Returns the offset the host must scroll its view to while a commit
    /// is waiting for the host to recentre, `None` otherwise. Samples past
    /// the threshold that arrive in that state only update the gesture
    /// flags.
    pub fn did_scroll(&mut self, sample: ScrollSample) -> Option<Px> {
        if self.awaiting_recenter {
            if self.surface.slot_for_offset(sample.offset) != Slot::Center {
                trace!(offset = sample.offset.raw(), "stale sample before host recentre");
                self.surface.apply(ScrollSample {
                    offset: self.surface.content_offset(),
                    ..sample
                });
                return self.pending_recenter();
            }
            trace!(offset = sample.offset.raw(), "host recentred");
            self.awaiting_recenter = false;
        }
        let before = self.visible;
        self.surface.apply(sample);
        self.classify(false);
        self.latch_if_committed(before)
    }

    /// The native scroll view stopped gliding at its current offset.
    ///
    /// Returns the offset the host must scroll to, as
    /// [`did_scroll`](Self::did_scroll) does.
    pub fn did_end_decelerating(&mut self) -> Option<Px> {
        let before = self.visible;
        self.surface.end_decelerating();
        self.classify(true);
        self.latch_if_committed(before)
    }

    /// A finger went down on the built-in surface.
    pub fn begin_drag(&mut self) {
        self.surface.begin_drag();
        self.classify(false);
    }

    /// The finger moved the content to `offset`.
    pub fn drag_to(&mut self, offset: Px) {
        self.surface.drag_to(offset);
        self.classify(false);
    }

    /// The finger moved the content by `delta`.
    pub fn drag_by(&mut self, delta: Px) {
        self.surface.drag_by(delta);
        self.classify(false);
    }

    /// The finger lifted. Without `decelerate` the surface settles on the
    /// slot under the offset right away.
    pub fn end_drag(&mut self, decelerate: bool) {
        self.surface.end_drag(decelerate);
        if decelerate {
            self.classify(false);
        } else {
            self.settle();
        }
    }

    /// The built-in surface stopped gliding; it settles on the slot under the
    /// offset.
    pub fn end_decelerating(&mut self) {
        self.surface.end_decelerating();
        self.settle();
    }

    /// Loads the window around `index`, making it the visible page.
    ///
    /// Does nothing when `index` is out of range or already visible.
    pub fn load_pages(&mut self, index: usize) {
        let Some(page) = self.page_ref(index) else {
            return;
        };
        if self.visible == Some(page) {
            return;
        }
        self.switch_visible(page);
        self.fill_window(page);
    }

    /// Re-centres on `index` from scratch: everything but the target is
    /// detached and the surface scrolls back to the centre slot.
    pub fn reload_pages(&mut self, index: usize) {
        let Some(target) = self.page_ref(index) else {
            debug!(index, count = self.order.len(), "reload out of range");
            return;
        };
        debug!(index, "reloading pages");
        for entry in self.window.take_all_except(Some(target.id)) {
            self.detach(entry);
        }
        self.surface.reset_offset();
        self.phase = GesturePhase::Idle;
        self.switch_visible(target);
        self.fill_window(target);
    }

    /// Jumps to `index` unless a drag is in progress or the index is out of
    /// range.
    pub fn switch_page(&mut self, index: usize) {
        if let Err(error) = self.try_switch_page(index) {
            debug!(index, %error, "page switch ignored");
        }
    }

    /// Like [`switch_page`](Self::switch_page) but reports why nothing
    /// happened.
    pub fn try_switch_page(&mut self, index: usize) -> Result<(), SwitchPageError> {
        if self.surface.is_dragging() {
            return Err(SwitchPageError::Dragging);
        }
        let count = self.order.len();
        if index >= count {
            return Err(SwitchPageError::OutOfRange { index, count });
        }
        let visible = self.visible.ok_or(SwitchPageError::NotLoaded)?;
        if visible.index != index {
            self.reload_pages(index);
        }
        Ok(())
    }

    /// Handles a tap at `point`, in the controller's parent coordinates.
    /// Returns the index of the tapped title.
    pub fn tap_menu_bar(&mut self, point: PxPosition) -> Option<usize> {
        let bar = self.menu_bar_frame();
        if !bar.contains(point) {
            return None;
        }
        let local = point.offset(-bar.x, -bar.y);
        let index = self.menu_bar.title_at(local)?;
        trace!(index, "menu bar tapped");
        self.switch_page(index);
        Some(index)
    }

    fn load_initial_page(&mut self) {
        let count = self.order.len();
        if count == 0 {
            return;
        }
        let index = if self.args.initial_page < count {
            self.args.initial_page
        } else {
            warn!(
                initial_page = self.args.initial_page,
                count, "initial page out of range, starting at the first page"
            );
            0
        };
        self.load_pages(index);
    }

    fn classify(&mut self, settled: bool) {
        let Some(from) = self.visible else {
            return;
        };
        if let Some(direction) = self.surface.direction() {
            self.bring_neighbor_toward(from, direction);
        }

        let slot = self.surface.slot_at_offset();
        let Some(to) = self.window.page_in(slot) else {
            return;
        };

        if to.id != from.id {
            if settled || self.surface.has_crossed_fully() {
                self.commit(from, to, slot);
            } else {
                self.menu_bar
                    .move_indicator(from.index, to.index, self.surface.progress());
                if self.phase != (GesturePhase::Crossing { to }) {
                    trace!(from = from.index, to = to.index, "crossing toward neighbour");
                }
                self.phase = GesturePhase::Crossing { to };
            }
            return;
        }

        let crossed = matches!(self.phase, GesturePhase::Crossing { .. });
        if settled {
            if crossed {
                self.revert(from);
            }
            self.phase = GesturePhase::Idle;
            return;
        }
        if !self.surface.is_tracking() || !self.surface.is_dragging() {
            return;
        }
        if crossed {
            self.revert(from);
        }
        self.phase = GesturePhase::Tracking;
    }

    fn latch_if_committed(&mut self, before: Option<PageRef>) -> Option<Px> {
        if self.visible != before {
            self.awaiting_recenter = true;
            debug!(
                offset = self.surface.content_offset().raw(),
                "waiting for host to recentre"
            );
        }
        self.pending_recenter()
    }

    fn pending_recenter(&self) -> Option<Px> {
        self.awaiting_recenter
            .then(|| self.surface.content_offset())
    }

    fn commit(&mut self, from: PageRef, to: PageRef, slot: Slot) {
        let direction = match slot {
            Slot::Left => Direction::Backward,
            Slot::Right => Direction::Forward,
            Slot::Center => return,
        };
        debug!(from = from.index, to = to.index, ?direction, "committing page change");

        self.menu_bar
            .move_indicator(from.index, to.index, direction.sign() as f32);
        self.surface.recenter(direction);

        let width = self.surface.width();
        self.window.shift(-width * direction.sign(), width);
        let moved: Vec<(PageId, PxRect)> = self
            .window
            .iter()
            .filter(|entry| entry.slot.is_some())
            .map(|entry| (entry.page.id, entry.frame))
            .collect();
        for (id, frame) in moved {
            self.layout_page(id, frame);
        }

        self.load_pages(to.index);
        self.phase = if self.surface.is_dragging() {
            GesturePhase::Tracking
        } else {
            GesturePhase::Idle
        };
    }

    fn revert(&mut self, page: PageRef) {
        debug!(index = page.index, "reverting indicator");
        self.last_indicator_animation = self.menu_bar.revert(page.index);
    }

    fn settle(&mut self) {
        let mut slot = self.surface.slot_at_offset();
        if self.window.page_in(slot).is_none() {
            slot = Slot::Center;
        }
        self.surface
            .set_content_offset(slot.origin(self.surface.width()));
        self.classify(true);
    }

    fn switch_visible(&mut self, page: PageRef) {
        if self.visible == Some(page) {
            return;
        }
        let previous = self.visible.replace(page);
        if self.did_finish_first_load {
            self.last_indicator_animation = self.menu_bar.select(page.index);
        } else {
            self.did_finish_first_load = true;
            self.menu_bar.size_indicator(page.index);
        }
        debug!(
            index = page.index,
            previous = previous.map(|page| page.index),
            "visible page changed"
        );
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.visible_page_changed(page, previous);
        }
    }

    fn fill_window(&mut self, page: PageRef) {
        let span = self.surface.content_rect();
        for entry in self.window.take_outside(&span, page.id) {
            self.detach(entry);
        }

        self.place(page, Slot::Center);

        let count = self.order.len();
        for direction in [Direction::Backward, Direction::Forward] {
            let slot = Slot::toward(direction);
            if self.window.entry_in(slot).is_some() {
                continue;
            }
            if let Some(neighbour) = self.page_ref(neighbor(page.index, direction, count))
                && !self.window.contains(neighbour.id)
            {
                self.attach(neighbour, slot);
            }
        }
    }

    /// Puts `page` into `slot`, moving it if attached elsewhere and detaching
    /// whatever held the slot.
    fn place(&mut self, page: PageRef, slot: Slot) {
        let current = self.window.entry(page.id).map(|entry| entry.slot);
        if current == Some(Some(slot)) {
            return;
        }
        if let Some(occupant) = self.window.page_in(slot)
            && let Some(entry) = self.window.remove(occupant.id)
        {
            self.detach(entry);
        }
        if current.is_some() {
            let frame = self.surface.slot_frame(slot);
            if self.window.relocate(page.id, slot, frame) {
                self.layout_page(page.id, frame);
            }
        } else {
            self.attach(page, slot);
        }
    }

    /// With two pages the only neighbour sits on one side. Moves it to the
    /// side the drag heads to.
    fn bring_neighbor_toward(&mut self, from: PageRef, direction: Direction) {
        let target = Slot::toward(direction);
        if self.window.entry_in(target).is_some() {
            return;
        }
        let expected = neighbor(from.index, direction, self.order.len());
        let Some(page) = self.window.page_in(Slot::toward(direction.reversed())) else {
            return;
        };
        if page.index != expected {
            return;
        }
        let frame = self.surface.slot_frame(target);
        if self.window.relocate(page.id, target, frame) {
            trace!(index = page.index, slot = ?target, "moved neighbour ahead of drag");
            self.layout_page(page.id, frame);
        }
    }

    fn attach(&mut self, page: PageRef, slot: Slot) {
        let frame = self.surface.slot_frame(slot);
        if !self.window.insert(page, slot, frame) {
            return;
        }
        trace!(index = page.index, ?slot, "attached page");
        if let Some(content) = self.pages.get_mut(page.id) {
            content.did_attach(frame);
        }
    }

    fn detach(&mut self, entry: WindowEntry) {
        trace!(index = entry.page.index, slot = ?entry.slot, "detached page");
        if let Some(content) = self.pages.get_mut(entry.page.id) {
            content.did_detach();
        }
    }

    fn layout_page(&mut self, id: PageId, frame: PxRect) {
        if let Some(content) = self.pages.get_mut(id) {
            content.layout(frame);
        }
    }
}

#[cfg(test)]
mod tests;
