//! Text measurement used to size the menu indicator.
//!
//! The pager never renders text. Hosts plug their own text engine in through
//! [`TextMeasurer`]; [`MonospaceMeasurer`] is a dependency-free fallback.
use pagemenu_ui::{Dp, Px, PxSize};
use unicode_segmentation::UnicodeSegmentation;

/// Measures the rendered size of a single-line label.
pub trait TextMeasurer {
    /// Size of `text` laid out on one line.
    fn measure(&self, text: &str) -> PxSize;
}

/// Measures every grapheme cluster with the same advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Horizontal advance of one grapheme.
    pub advance: Dp,
    /// Line height.
    pub line_height: Dp,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: Dp(8.0),
            line_height: Dp(17.0),
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> PxSize {
        let graphemes = text.graphemes(true).count();
        let width = Px::saturating_from_f32(self.advance.to_pixels_f32() * graphemes as f32);
        let height = if graphemes == 0 {
            Px::ZERO
        } else {
            self.line_height.to_px()
        };
        PxSize::new(width, height)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> PxSize,
{
    fn measure(&self, text: &str) -> PxSize {
        self(text)
    }
}
