//! Foundation types for the pagemenu widgets.
//!
//! This crate carries no widget logic. It provides the pixel units and
//! rectangles every frame is expressed in, the global dp scale factor, the
//! rectangle animation primitive, and the tracing bootstrap used by demos.
//!
//! ```
//! use std::time::Duration;
//!
//! use pagemenu_ui::{Px, PxRect, RectAnimator, TweenAnimator};
//!
//! let mut animator = TweenAnimator::new();
//! let from = PxRect::new(Px(0), Px(40), Px(80), Px(4));
//! let to = PxRect::new(Px(120), Px(40), Px(60), Px(4));
//! let mut completion = animator.animate(from, to, Duration::from_millis(200));
//! assert!(!completion.is_resolved());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod dp;
pub mod logging;
pub mod px;

pub use crate::{
    animation::{
        AnimationCompletion, AnimationOutcome, CompletionSignal, RectAnimator, TweenAnimator,
        completion_pair, easing,
    },
    dp::Dp,
    px::{Px, PxPosition, PxRect, PxSize},
};
