//! Menu bar with a selection indicator that follows the pager.
//!
//! ## Usage
//!
//! The bar shows one title per page and a thin indicator under the selected
//! one. During a drag the page controller feeds it fractional progress through
//! [`MenuBar::move_indicator`] so the indicator slides with the finger. When
//! the drag is abandoned, [`MenuBar::revert`] animates it home.
//!
//! All geometry is in the bar's own coordinate space, origin at its top-left.
use std::time::{Duration, Instant};

use derive_setters::Setters;
use pagemenu_ui::{AnimationCompletion, Dp, Px, PxPosition, PxRect, RectAnimator};
use tracing::trace;

use crate::{index::relative, text_metrics::TextMeasurer};

/// Number of titles a carousel bar shows across its width.
const CAROUSEL_VISIBLE_ITEMS: i32 = 3;

/// How titles are laid out across the bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuBarStyle {
    /// Titles one third of the bar wide with the selected one centred. The
    /// indicator stays centred and the title strip slides underneath it.
    #[default]
    Carousel,
    /// Every title gets an equal share of the width and the indicator moves
    /// between them.
    Fixed,
}

/// Defaults shared by the menu bar and the page controller.
pub struct MenuBarDefaults;

impl MenuBarDefaults {
    /// Height of the bar.
    pub const HEIGHT: Dp = Dp(44.0);
    /// Horizontal padding added to the measured title width.
    pub const INDICATOR_PADDING: Dp = Dp(8.0);
    /// Indicator height as a fraction of the bar height.
    pub const INDICATOR_HEIGHT_RATIO: f32 = 0.1;
    /// Duration of revert and selection animations.
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);
}

/// Configuration for [`MenuBar`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct MenuBarArgs {
    /// Title layout.
    pub style: MenuBarStyle,
    /// Horizontal padding added to the measured title width.
    pub indicator_padding: Dp,
    /// Indicator height as a fraction of the bar height.
    pub indicator_height_ratio: f32,
    /// Duration of revert and selection animations.
    pub animation_duration: Duration,
}

impl Default for MenuBarArgs {
    fn default() -> Self {
        Self {
            style: MenuBarStyle::default(),
            indicator_padding: MenuBarDefaults::INDICATOR_PADDING,
            indicator_height_ratio: MenuBarDefaults::INDICATOR_HEIGHT_RATIO,
            animation_duration: MenuBarDefaults::ANIMATION_DURATION,
        }
    }
}

/// A title laid out in the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitleFrame<'a> {
    /// Page index of the title.
    pub index: usize,
    /// The title text. Empty for pages without a title.
    pub title: &'a str,
    /// Frame in bar coordinates.
    pub frame: PxRect,
}

/// Tab/menu bar state.
pub struct MenuBar {
    args: MenuBarArgs,
    frame: PxRect,
    titles: Vec<String>,
    title_widths: Vec<Px>,
    indicator: Option<PxRect>,
    anchor: Option<usize>,
    strip_shift: f32,
    animator: Box<dyn RectAnimator>,
    measurer: Box<dyn TextMeasurer>,
}

impl MenuBar {
    /// Creates an empty bar.
    pub fn new(
        args: MenuBarArgs,
        animator: Box<dyn RectAnimator>,
        measurer: Box<dyn TextMeasurer>,
    ) -> Self {
        Self {
            args,
            frame: PxRect::ZERO,
            titles: Vec::new(),
            title_widths: Vec::new(),
            indicator: None,
            anchor: None,
            strip_shift: 0.0,
            animator,
            measurer,
        }
    }

    /// The bar configuration.
    pub fn args(&self) -> &MenuBarArgs {
        &self.args
    }

    /// Frame of the bar in its parent.
    pub fn frame(&self) -> PxRect {
        self.frame
    }

    /// Resizes the bar. A placed indicator is re-snapped to its resting rect.
    pub fn set_frame(&mut self, frame: PxRect) {
        self.frame = frame;
        if let Some(anchor) = self.anchor {
            self.size_indicator(anchor);
        }
    }

    /// Replaces the titles. The indicator becomes undefined until it is next
    /// sized, moved or selected.
    pub fn set_titles(&mut self, titles: Vec<String>) {
        self.title_widths = titles
            .iter()
            .map(|title| self.measurer.measure(title).width)
            .collect();
        self.titles = titles;
        self.indicator = None;
        self.anchor = None;
        self.strip_shift = 0.0;
    }

    /// The current titles.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Model geometry of the indicator; `None` while undefined.
    pub fn indicator(&self) -> Option<PxRect> {
        self.indicator
    }

    /// The indicator as currently shown, which trails [`indicator`](Self::indicator)
    /// while an animation runs.
    pub fn presentation(&self) -> Option<PxRect> {
        self.animator.presentation().or(self.indicator)
    }

    /// Page the indicator rests on or departs from.
    pub fn selected(&self) -> Option<usize> {
        self.anchor
    }

    /// Signed fraction of an item the title strip is slid by.
    pub fn strip_shift(&self) -> f32 {
        self.strip_shift
    }

    /// Width of one title item.
    pub fn item_width(&self) -> Px {
        match self.args.style {
            MenuBarStyle::Carousel => self.frame.width / CAROUSEL_VISIBLE_ITEMS,
            MenuBarStyle::Fixed => {
                let count = i32::try_from(self.titles.len()).unwrap_or(i32::MAX).max(1);
                self.frame.width / count
            }
        }
    }

    /// Where the indicator sits when `index` is selected and nothing moves.
    pub fn resting_rect(&self, index: usize) -> Option<PxRect> {
        let text_width = *self.title_widths.get(index)?;
        let item_width = self.item_width();
        let width = (text_width + self.args.indicator_padding.to_px())
            .min(item_width)
            .max(Px::ZERO);
        let height = Px::round_from_f32(
            self.frame.height.to_f32() * self.args.indicator_height_ratio.clamp(0.0, 1.0),
        );
        let x = match self.args.style {
            MenuBarStyle::Carousel => (self.frame.width - width) / 2,
            MenuBarStyle::Fixed => {
                item_width * i32::try_from(index).unwrap_or(i32::MAX) + (item_width - width) / 2
            }
        };
        Some(PxRect::new(x, self.frame.height - height, width, height))
    }

    /// Places the indicator under `index` instantly, without animation.
    pub fn size_indicator(&mut self, index: usize) {
        let Some(rest) = self.resting_rect(index) else {
            return;
        };
        trace!(index, ?rest, "sizing menu indicator");
        self.anchor = Some(index);
        self.strip_shift = 0.0;
        self.indicator = Some(rest);
        self.animator.snap(rest);
    }

    /// Slides the indicator between `from` and `to` following a drag.
    ///
    /// `progress` is signed, positive toward the right slot; its magnitude is
    /// how far the transition has come. The change is applied immediately.
    pub fn move_indicator(&mut self, from: usize, to: usize, progress: f32) {
        let (Some(start), Some(end)) = (self.resting_rect(from), self.resting_rect(to)) else {
            return;
        };
        let progress = if progress.is_finite() {
            progress.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let rect = start.lerp(&end, progress.abs());
        self.anchor = Some(from);
        self.strip_shift = progress;
        self.indicator = Some(rect);
        self.animator.snap(rect);
    }

    /// Animates the indicator back under `to` after an abandoned drag.
    pub fn revert(&mut self, to: usize) -> Option<AnimationCompletion> {
        trace!(to, "reverting menu indicator");
        self.settle_on(to)
    }

    /// Animates the indicator to a newly selected page.
    pub fn select(&mut self, index: usize) -> Option<AnimationCompletion> {
        trace!(index, "selecting menu item");
        self.settle_on(index)
    }

    fn settle_on(&mut self, index: usize) -> Option<AnimationCompletion> {
        let rest = self.resting_rect(index)?;
        let from = self.presentation().unwrap_or(rest);
        self.anchor = Some(index);
        self.strip_shift = 0.0;
        self.indicator = Some(rest);
        Some(
            self.animator
                .animate(from, rest, self.args.animation_duration),
        )
    }

    /// Advances the indicator animation.
    pub fn tick(&mut self, now: Instant) {
        self.animator.tick(now);
    }

    /// Titles currently laid out in the bar, left to right.
    pub fn title_frames(&self) -> Vec<TitleFrame<'_>> {
        let count = self.titles.len();
        if count == 0 || self.frame.is_empty() {
            return Vec::new();
        }
        let item_width = self.item_width();
        let height = self.frame.height;

        match self.args.style {
            MenuBarStyle::Fixed => self
                .titles
                .iter()
                .enumerate()
                .map(|(index, title)| TitleFrame {
                    index,
                    title: title.as_str(),
                    frame: PxRect::new(
                        item_width * i32::try_from(index).unwrap_or(i32::MAX),
                        Px::ZERO,
                        item_width,
                        height,
                    ),
                })
                .collect(),
            MenuBarStyle::Carousel => {
                let Some(anchor) = self.anchor else {
                    return Vec::new();
                };
                let bounds = PxRect::new(Px::ZERO, Px::ZERO, self.frame.width, height);
                let centre_x = (self.frame.width - item_width) / 2;
                let reach: isize = if count == 1 { 0 } else { 2 };
                (-reach..=reach)
                    .filter_map(|step| {
                        let x = centre_x.to_f32()
                            + item_width.to_f32() * (step as f32 - self.strip_shift);
                        let frame =
                            PxRect::new(Px::round_from_f32(x), Px::ZERO, item_width, height);
                        if !frame.intersects(&bounds) {
                            return None;
                        }
                        let index = relative(anchor as isize + step, count);
                        Some(TitleFrame {
                            index,
                            title: self.titles[index].as_str(),
                            frame,
                        })
                    })
                    .collect()
            }
        }
    }

    /// The page whose title contains `point`, in bar coordinates.
    pub fn title_at(&self, point: PxPosition) -> Option<usize> {
        self.title_frames()
            .into_iter()
            .find(|title| title.frame.contains(point))
            .map(|title| title.index)
    }
}
