//! Wraparound index arithmetic over a fixed page count.

/// Horizontal direction of travel relative to the centre slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward the left slot, the previous page.
    Backward,
    /// Toward the right slot, the next page.
    Forward,
}

impl Direction {
    /// `-1` for [`Backward`](Self::Backward), `1` for [`Forward`](Self::Forward).
    pub fn sign(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// The other direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
        }
    }

    /// Direction implied by a signed delta. Zero has no direction.
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Forward)
        } else if delta < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

/// Maps any index into `[0, count)`, wrapping in both directions.
///
/// `count` must be non-zero. Zero is a caller bug, caught in debug builds;
/// release builds return `0`.
///
/// ```
/// use pagemenu_components::index::relative;
///
/// assert_eq!(relative(-1, 5), 4);
/// assert_eq!(relative(5, 5), 0);
/// ```
pub fn relative(index: isize, count: usize) -> usize {
    debug_assert!(count > 0, "relative() needs a non-empty page list");
    if count == 0 {
        return 0;
    }
    index.rem_euclid(count as isize) as usize
}

/// The page next to `index` in `direction`, with wraparound.
pub fn neighbor(index: usize, direction: Direction, count: usize) -> usize {
    relative(index as isize + direction.sign() as isize, count)
}
