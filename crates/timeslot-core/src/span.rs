//! Immutable `[start, end)` snapshots.
//!
//! The schedule keeps one `Span` per stored item, captured at insertion, and
//! runs every predicate against it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::schedulable::Schedulable;

/// A time interval `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Span {
    /// Create a span, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the frame is negative.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(ScheduleError::invalid(
                "end",
                format!("{end} is earlier than start {start}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Create a span from a start and a non-negative duration.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `duration` is negative or the end
    /// cannot be represented.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Result<Self> {
        if duration < Duration::zero() {
            return Err(ScheduleError::invalid("duration", "is negative"));
        }
        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| ScheduleError::invalid("duration", "end is out of range"))?;
        Ok(Self { start, end })
    }

    /// Snapshot the current bounds of an item.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the item reports `end < start`.
    pub fn of<T: Schedulable + ?Sized>(item: &T) -> Result<Self> {
        Self::new(item.start(), item.end())
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether this span lies inside `frame`, bounds inclusive.
    #[inline]
    pub fn is_within(&self, frame: &Span) -> bool {
        self.start >= frame.start && self.end <= frame.end
    }

    /// Whether the two spans share an instant of positive length.
    /// Touching spans do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `moment` lies strictly inside the span.
    #[inline]
    pub fn surrounds(&self, moment: DateTime<Utc>) -> bool {
        self.start < moment && self.end > moment
    }

    /// Whether `moment` lies inside the span, bounds inclusive.
    #[inline]
    pub fn covers(&self, moment: DateTime<Utc>) -> bool {
        self.start <= moment && moment <= self.end
    }
}

impl Schedulable for Span {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}
