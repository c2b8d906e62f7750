//! Horizontally scrolling container that hosts the three page slots.
//!
//! ## Usage
//!
//! The surface is a headless model of a paging scroll view. Hosts with a
//! native scroll view mirror its state with [`ContainerSurface::apply`];
//! hosts without one drive it through the gesture methods
//! ([`begin_drag`](ContainerSurface::begin_drag),
//! [`drag_to`](ContainerSurface::drag_to), ...). Both paths produce
//! [`ScrollSample`]s for the page controller.
//!
//! The content is exactly three widths wide. At rest the offset sits at the
//! centre slot's origin, one width in.
use pagemenu_ui::{Px, PxRect, PxSize};

use crate::{index::Direction, window::Slot};

/// Fraction of a width the offset must travel away from the centre origin
/// before the neighbouring slot counts as the current page.
pub const DEFAULT_PAGE_THRESHOLD: f32 = 0.5;

/// One scroll-position report. Consumed immediately and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollSample {
    /// Horizontal content offset.
    pub offset: Px,
    /// Whether a drag gesture is in progress.
    pub is_dragging: bool,
    /// Whether a finger is currently down on the surface.
    pub is_tracking: bool,
}

/// Headless paging scroll surface.
#[derive(Clone, Debug)]
pub struct ContainerSurface {
    bounds: PxRect,
    content_offset: Px,
    is_dragging: bool,
    is_tracking: bool,
    is_decelerating: bool,
    page_threshold: f32,
}

impl ContainerSurface {
    /// Creates a surface filling `bounds`, scrolled to the centre slot.
    pub fn new(bounds: PxRect) -> Self {
        Self {
            bounds,
            content_offset: bounds.width,
            is_dragging: false,
            is_tracking: false,
            is_decelerating: false,
            page_threshold: DEFAULT_PAGE_THRESHOLD,
        }
    }

    /// Sets the neighbour threshold as a fraction of the width.
    pub fn with_page_threshold(mut self, threshold: f32) -> Self {
        self.set_page_threshold(threshold);
        self
    }

    /// Sets the neighbour threshold as a fraction of the width.
    pub fn set_page_threshold(&mut self, threshold: f32) {
        self.page_threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_PAGE_THRESHOLD
        };
    }

    /// Replaces the surface frame and scrolls back to the centre slot.
    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
        self.reset_offset();
    }

    /// Frame of the surface in its parent.
    pub fn bounds(&self) -> PxRect {
        self.bounds
    }

    /// Width of one slot.
    pub fn width(&self) -> Px {
        self.bounds.width
    }

    /// Total scrollable size: three widths by one height.
    pub fn content_size(&self) -> PxSize {
        PxSize::new(self.bounds.width * 3, self.bounds.height)
    }

    /// The full three-slot span in content coordinates.
    pub fn content_rect(&self) -> PxRect {
        PxRect::new(Px::ZERO, Px::ZERO, self.bounds.width * 3, self.bounds.height)
    }

    /// Frame of `slot` in content coordinates.
    pub fn slot_frame(&self, slot: Slot) -> PxRect {
        PxRect::new(
            slot.origin(self.bounds.width),
            Px::ZERO,
            self.bounds.width,
            self.bounds.height,
        )
    }

    /// Content offset of the resting position.
    pub fn center_origin(&self) -> Px {
        Slot::Center.origin(self.bounds.width)
    }

    /// Current horizontal content offset.
    pub fn content_offset(&self) -> Px {
        self.content_offset
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether a finger is down.
    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    /// Whether the surface is still gliding after a drag.
    pub fn is_decelerating(&self) -> bool {
        self.is_decelerating
    }

    /// The current state as a sample.
    pub fn sample(&self) -> ScrollSample {
        ScrollSample {
            offset: self.content_offset,
            is_dragging: self.is_dragging,
            is_tracking: self.is_tracking,
        }
    }

    /// Mirrors a sample reported by a native scroll view.
    pub fn apply(&mut self, sample: ScrollSample) {
        self.content_offset = self.clamp_offset(sample.offset);
        self.is_dragging = sample.is_dragging;
        self.is_tracking = sample.is_tracking;
        if sample.is_dragging {
            self.is_decelerating = false;
        }
    }

    /// Scrolls to `offset` without touching the gesture flags.
    pub fn set_content_offset(&mut self, offset: Px) {
        self.content_offset = self.clamp_offset(offset);
    }

    /// Scrolls back to the centre slot.
    pub fn reset_offset(&mut self) {
        self.content_offset = self.center_origin();
    }

    /// A finger went down and started dragging.
    pub fn begin_drag(&mut self) -> ScrollSample {
        self.is_dragging = true;
        self.is_tracking = true;
        self.is_decelerating = false;
        self.sample()
    }

    /// The dragging finger moved the content to `offset`.
    pub fn drag_to(&mut self, offset: Px) -> ScrollSample {
        self.set_content_offset(offset);
        self.sample()
    }

    /// The dragging finger moved the content by `delta`.
    pub fn drag_by(&mut self, delta: Px) -> ScrollSample {
        self.drag_to(self.content_offset.saturating_add(delta))
    }

    /// The finger lifted. With `decelerate` the surface keeps gliding until
    /// [`end_decelerating`](Self::end_decelerating).
    pub fn end_drag(&mut self, decelerate: bool) -> ScrollSample {
        self.is_dragging = false;
        self.is_tracking = false;
        self.is_decelerating = decelerate;
        self.sample()
    }

    /// Gliding stopped.
    pub fn end_decelerating(&mut self) -> ScrollSample {
        self.is_decelerating = false;
        self.sample()
    }

    /// Signed displacement from the centre origin in widths, within `[-1, 1]`.
    pub fn displacement(&self) -> f32 {
        self.displacement_at(self.content_offset)
    }

    fn displacement_at(&self, offset: Px) -> f32 {
        let width = self.bounds.width.to_f32();
        if width <= 0.0 {
            return 0.0;
        }
        ((offset - self.center_origin()).to_f32() / width).clamp(-1.0, 1.0)
    }

    /// The slot the offset currently counts as showing.
    pub fn slot_at_offset(&self) -> Slot {
        self.slot_for_offset(self.content_offset)
    }

    /// The slot `offset` would count as showing, without scrolling there.
    pub fn slot_for_offset(&self, offset: Px) -> Slot {
        let displacement = self.displacement_at(offset);
        if displacement >= self.page_threshold && displacement > 0.0 {
            Slot::Right
        } else if displacement < -self.page_threshold {
            Slot::Left
        } else {
            Slot::Center
        }
    }

    /// Direction of the current displacement.
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_delta(self.displacement())
    }

    /// Signed progress past the threshold: `0` at the threshold and `±1` at the
    /// slot edge. Zero while the offset is inside the centre span.
    pub fn progress(&self) -> f32 {
        let displacement = self.displacement();
        let magnitude = displacement.abs();
        if magnitude < self.page_threshold || magnitude == 0.0 {
            return 0.0;
        }
        let span = 1.0 - self.page_threshold;
        let fraction = if span <= f32::EPSILON {
            1.0
        } else {
            ((magnitude - self.page_threshold) / span).clamp(0.0, 1.0)
        };
        fraction.copysign(displacement)
    }

    /// Whether the offset reached either end of the content.
    pub fn has_crossed_fully(&self) -> bool {
        self.bounds.width > Px::ZERO
            && (self.content_offset <= Px::ZERO
                || self.content_offset >= Slot::Right.origin(self.bounds.width))
    }

    /// Moves the offset one width back toward the centre after the window
    /// shifted one slot in `direction`.
    pub fn recenter(&mut self, direction: Direction) {
        let shifted = self.content_offset - self.bounds.width * direction.sign();
        self.content_offset = self.clamp_offset(shifted);
    }

    fn clamp_offset(&self, offset: Px) -> Px {
        offset.clamp(Px::ZERO, Slot::Right.origin(self.bounds.width).max(Px::ZERO))
    }
}
