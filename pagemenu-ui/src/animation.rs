//! Rectangle animation primitive.
//!
//! ## Usage
//!
//! Widgets hand the geometry they want to reach to a [`RectAnimator`]. A
//! platform backend can forward it to a native animation system. The
//! bundled [`TweenAnimator`] interpolates on its own when the host calls
//! [`RectAnimator::tick`] once per frame.
//!
//! Every animation hands back an [`AnimationCompletion`], a future that
//! resolves once the animation finishes or is superseded by a newer one.
//! Nothing is ever cancelled explicitly: starting a new animation or snapping
//! the rectangle retires the previous one.
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll, ready},
    time::{Duration, Instant},
};

use futures::channel::oneshot;

use crate::px::PxRect;

/// Cubic ease-in-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub fn easing(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// How an animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The animation reached its target.
    Finished,
    /// A newer animation or snap took over before the target was reached.
    Superseded,
}

/// Future side of an animation's completion.
///
/// Await it to chain work after an indicator transition, or poll it
/// synchronously with [`outcome`](Self::outcome).
#[must_use = "dropping the completion only discards the notification, the animation keeps running"]
pub struct AnimationCompletion {
    receiver: oneshot::Receiver<AnimationOutcome>,
    outcome: Option<AnimationOutcome>,
}

/// Resolving side of an [`AnimationCompletion`].
///
/// Dropping an unresolved signal resolves the completion as
/// [`AnimationOutcome::Superseded`], so awaiting code never hangs.
pub struct CompletionSignal {
    sender: oneshot::Sender<AnimationOutcome>,
}

/// Creates a connected signal/completion pair.
pub fn completion_pair() -> (CompletionSignal, AnimationCompletion) {
    let (sender, receiver) = oneshot::channel();
    (
        CompletionSignal { sender },
        AnimationCompletion {
            receiver,
            outcome: None,
        },
    )
}

impl AnimationCompletion {
    /// A completion that has already resolved with `outcome`.
    pub fn resolved(outcome: AnimationOutcome) -> Self {
        let (signal, completion) = completion_pair();
        signal.resolve(outcome);
        completion
    }

    /// The outcome, if the animation has ended.
    pub fn outcome(&mut self) -> Option<AnimationOutcome> {
        if self.outcome.is_none() {
            self.outcome = match self.receiver.try_recv() {
                Ok(outcome) => outcome,
                Err(oneshot::Canceled) => Some(AnimationOutcome::Superseded),
            };
        }
        self.outcome
    }

    /// Whether the animation has ended.
    pub fn is_resolved(&mut self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for AnimationCompletion {
    type Output = AnimationOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(outcome) = self.outcome {
            return Poll::Ready(outcome);
        }
        let outcome =
            ready!(Pin::new(&mut self.receiver).poll(cx)).unwrap_or(AnimationOutcome::Superseded);
        self.outcome = Some(outcome);
        Poll::Ready(outcome)
    }
}

impl CompletionSignal {
    /// Resolves the completion.
    pub fn resolve(self, outcome: AnimationOutcome) {
        // The completion may already be gone; nobody is listening then.
        let _ = self.sender.send(outcome);
    }
}

/// The animation primitive widgets use to move a rectangle.
pub trait RectAnimator {
    /// Interpolates from `from` to `to` over `duration`, superseding any
    /// animation still in flight.
    fn animate(&mut self, from: PxRect, to: PxRect, duration: Duration) -> AnimationCompletion;

    /// Applies `rect` immediately, superseding any animation still in flight.
    fn snap(&mut self, rect: PxRect);

    /// Advances time-driven implementations. Platform-driven ones ignore it.
    fn tick(&mut self, _now: Instant) {}

    /// The rectangle currently on screen, when the implementation tracks it.
    fn presentation(&self) -> Option<PxRect> {
        None
    }
}

struct RectTween {
    from: PxRect,
    to: PxRect,
    duration: Duration,
    started_at: Option<Instant>,
    signal: CompletionSignal,
}

/// Frame-driven [`RectAnimator`] with cubic ease-in-out.
///
/// The clock starts on the first [`tick`](RectAnimator::tick) after
/// [`animate`](RectAnimator::animate), so the first frame always shows the
/// starting rectangle.
#[derive(Default)]
pub struct TweenAnimator {
    current: Option<PxRect>,
    tween: Option<RectTween>,
}

impl TweenAnimator {
    /// Creates an idle animator with no rectangle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    fn supersede(&mut self) {
        if let Some(tween) = self.tween.take() {
            tween.signal.resolve(AnimationOutcome::Superseded);
        }
    }
}

impl RectAnimator for TweenAnimator {
    fn animate(&mut self, from: PxRect, to: PxRect, duration: Duration) -> AnimationCompletion {
        self.supersede();
        if duration.is_zero() || from == to {
            self.current = Some(to);
            return AnimationCompletion::resolved(AnimationOutcome::Finished);
        }

        let (signal, completion) = completion_pair();
        self.current = Some(from);
        self.tween = Some(RectTween {
            from,
            to,
            duration,
            started_at: None,
            signal,
        });
        completion
    }

    fn snap(&mut self, rect: PxRect) {
        self.supersede();
        self.current = Some(rect);
    }

    fn tick(&mut self, now: Instant) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        let started_at = *tween.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let fraction = (elapsed.as_secs_f32() / tween.duration.as_secs_f32()).min(1.0);
        self.current = Some(tween.from.lerp(&tween.to, easing(fraction)));

        if fraction >= 1.0
            && let Some(tween) = self.tween.take()
        {
            self.current = Some(tween.to);
            tween.signal.resolve(AnimationOutcome::Finished);
        }
    }

    fn presentation(&self) -> Option<PxRect> {
        self.current
    }
}
