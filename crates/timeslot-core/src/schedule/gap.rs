//! Free time detection between scheduled items.
//!
//! Finds the open slots inside a window that a new item could take.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Schedule;
use crate::error::Result;
use crate::span::Span;

/// A free slot between scheduled items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl FreeSlot {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Check if this slot can fit an item of the given duration
    pub fn can_fit(&self, duration: Duration) -> bool {
        self.duration() >= duration
    }
}

impl<T> Schedule<T> {
    /// Find free slots inside `[window_start, window_end)`.
    ///
    /// Slots are sorted, disjoint and computed from the union of stored
    /// spans. A zero-length item occupies its instant: adjacent slots stop
    /// one nanosecond short of it, so every reported slot passes
    /// [`is_time_frame_free`](Schedule::is_time_frame_free). Slots shorter
    /// than the configured `min_gap_minutes` (whole minutes) are dropped;
    /// with the default of zero every non-empty gap is reported.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `window_start > window_end`.
    pub fn free_slots(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<FreeSlot>> {
        let window = Span::new(window_start, window_end)?;
        let instants: Vec<DateTime<Utc>> = self
            .spans()
            .filter(|s| s.duration().is_zero() && window.covers(s.start()))
            .map(|s| s.start())
            .collect();

        let mut gaps = Vec::new();
        let mut cursor = window.start();

        // entries are sorted by start, so a single sweep suffices
        for span in self.spans() {
            if span.end() <= cursor {
                continue;
            }
            if span.start() >= window.end() {
                break;
            }
            if span.start() > cursor {
                gaps.push((cursor, span.start()));
            }
            cursor = span.end().min(window.end());
        }

        if cursor < window.end() {
            gaps.push((cursor, window.end()));
        }

        let tick = Duration::nanoseconds(1);
        let mut slots = Vec::with_capacity(gaps.len());
        for (mut start, mut end) in gaps {
            // start < end here, so neither shift can leave the representable range
            if instants.binary_search(&start).is_ok() {
                start += tick;
            }
            if instants.binary_search(&end).is_ok() {
                end -= tick;
            }
            if end > start && (end - start).num_minutes() >= self.config.min_gap_minutes {
                slots.push(FreeSlot {
                    start_time: start,
                    end_time: end,
                });
            }
        }

        Ok(slots)
    }

    /// Earliest start `>= from` at which a frame of `duration` is free
    /// under the active conflict policy.
    ///
    /// Candidates are `from` itself and every stored end after it, in
    /// ascending order. Returns `None` if no candidate fits.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `duration` is negative.
    pub fn next_free_slot(&self, from: DateTime<Utc>, duration: Duration) -> Result<Option<DateTime<Utc>>> {
        Span::from_duration(from, duration)?;

        let mut candidates: Vec<DateTime<Utc>> = self
            .spans()
            .map(|s| s.end())
            .filter(|end| *end > from)
            .collect();
        candidates.sort();
        candidates.dedup();

        for candidate in std::iter::once(from).chain(candidates) {
            let Ok(frame) = Span::from_duration(candidate, duration) else {
                continue;
            };
            if self.is_span_free(&frame) {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }
}
