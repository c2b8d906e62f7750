//! # Density-Independent Pixels (Dp)
//!
//! Configuration values of the paging widgets (menu-bar height, indicator
//! padding, glyph advance) are expressed in [`Dp`] and converted to [`Px`]
//! when geometry is computed.
//!
//! ## Scale Factor
//!
//! The conversion is controlled by the global [`SCALE_FACTOR`]. Hosts set it
//! once with [`set_scale_factor`]. When it was never set, one dp is one pixel.
//!
//! ```
//! use pagemenu_ui::{Dp, Px};
//!
//! let bar_height = Dp(44.0);
//! let _pixels: Px = bar_height.into();
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// `OnceLock<RwLock<f64>>` keeps reads cheap while still allowing a host to
/// update the factor when the window moves to another display.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the global scale factor, initializing it on first use.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Converts this dp value to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Creates a `Dp` value from physical pixels.
    pub fn from_pixels_f32(value: f32) -> Self {
        Dp((value as f64) / scale_factor())
    }

    /// Converts this `Dp` value to a [`Px`] value.
    pub fn to_px(&self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        Dp::from_pixels_f32(px.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_round_trips_whole_pixels() {
        // The tests never install a scale factor, so one dp is one pixel.
        assert_eq!(Dp(44.0).to_px(), Px(44));
        assert_eq!(Px::from(Dp(8.0)), Px(8));
        assert_eq!(Dp::from(Px(12)), Dp(12.0));
    }
}
