//! The ordered, conflict-free schedule.
//!
//! A [`Schedule`] keeps its items sorted ascending by start and only accepts
//! an item whose frame is free under the configured [`ConflictPolicy`].
//! Items are never removed or mutated by the schedule. Each item is stored
//! together with a [`Span`] snapshot of its bounds taken at insertion, so
//! later changes to a shared item cannot reorder or overlap the schedule.
//!
//! Positional insertion is deliberately unsupported; see [`Schedule::insert`].

mod gap;

pub use gap::FreeSlot;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::config::{ConflictPolicy, ScheduleConfig};
use crate::error::{ConflictError, Result, ScheduleError};
use crate::schedulable::Schedulable;
use crate::span::Span;

const RANGE_CONFLICT: &str = "an item in the collection conflicted with the schedule";

#[derive(Debug, Clone)]
struct Entry<T> {
    span: Span,
    item: T,
}

/// An always-sorted (earlier to later) list of schedulable items.
#[derive(Debug, Clone)]
pub struct Schedule<T> {
    entries: Vec<Entry<T>>,
    config: ScheduleConfig,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self::with_config(ScheduleConfig::default())
    }
}

impl<T> Schedule<T> {
    /// Create an empty schedule with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty schedule bound to `config`.
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Create an empty schedule using `policy` for conflict detection.
    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self::with_config(ScheduleConfig::default().with_policy(policy))
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.config.conflict_policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item at `index` in start order.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|e| &e.item)
    }

    /// Earliest-starting item.
    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.item)
    }

    /// Latest-starting item.
    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|e| &e.item)
    }

    /// Items in ascending start order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Bounds recorded for each item at insertion, in start order.
    pub fn spans(&self) -> impl DoubleEndedIterator<Item = Span> + ExactSizeIterator + '_ {
        self.entries.iter().map(|e| e.span)
    }

    /// Consume the schedule, returning its items in start order.
    pub fn into_items(self) -> Vec<T> {
        self.entries.into_iter().map(|e| e.item).collect()
    }

    /// Earliest start in the schedule.
    ///
    /// # Errors
    /// Returns `Empty` if nothing is scheduled.
    pub fn start(&self) -> Result<DateTime<Utc>> {
        self.entries
            .first()
            .map(|e| e.span.start())
            .ok_or(ScheduleError::Empty)
    }

    /// Latest end in the schedule.
    ///
    /// # Errors
    /// Returns `Empty` if nothing is scheduled.
    pub fn end(&self) -> Result<DateTime<Utc>> {
        self.entries
            .iter()
            .map(|e| e.span.end())
            .max()
            .ok_or(ScheduleError::Empty)
    }

    /// Checks if nothing is scheduled at `moment`.
    ///
    /// A moment counts as occupied only when it lies strictly inside an
    /// item; an item's own start and end instants are free.
    pub fn is_moment_free(&self, moment: DateTime<Utc>) -> bool {
        !self.entries.iter().any(|e| e.span.surrounds(moment))
    }

    /// Checks if the frame `[start, end]` is free of scheduled items under
    /// the active conflict policy.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `start > end`.
    pub fn is_time_frame_free(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<bool> {
        let frame = Span::new(start, end)?;
        Ok(self.is_span_free(&frame))
    }

    /// Checks if the frame starting at `start` and lasting `duration` is free.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `duration` is negative.
    pub fn is_time_frame_free_for(&self, start: DateTime<Utc>, duration: Duration) -> Result<bool> {
        let frame = Span::from_duration(start, duration)?;
        Ok(self.is_span_free(&frame))
    }

    fn is_span_free(&self, frame: &Span) -> bool {
        let policy = self.config.conflict_policy;
        let free = !self.entries.iter().any(|e| policy.conflicts(&e.span, frame));
        trace!(
            start = %frame.start(),
            end = %frame.end(),
            policy = policy.as_str(),
            free,
            "time frame checked"
        );
        free
    }

    /// First item, in start order, whose bounds include `moment`.
    ///
    /// Items that merely touch at `moment` both cover it; the earlier one is
    /// returned.
    pub fn get_scheduled(&self, moment: DateTime<Utc>) -> Option<&T> {
        self.entries
            .iter()
            .take_while(|e| e.span.start() <= moment)
            .find(|e| e.span.covers(moment))
            .map(|e| &e.item)
    }

    /// Positional insertion is not supported.
    ///
    /// Placing an item at an arbitrary index would break start ordering.
    /// Use [`add`](Self::add).
    ///
    /// # Errors
    /// Always returns `NotSupported`.
    pub fn insert(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(ScheduleError::not_supported("insert"))
    }

    /// Positional range insertion is not supported.
    ///
    /// # Errors
    /// Always returns `NotSupported`.
    pub fn insert_range<I>(&mut self, _index: usize, _items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        Err(ScheduleError::not_supported("insert_range"))
    }
}

impl<T: Schedulable> Schedule<T> {
    /// Add an item, keeping the schedule sorted by start.
    ///
    /// Items with equal starts keep their insertion order.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the item reports `end < start`, or
    /// `Conflict` if its frame is not free. The schedule is unchanged on
    /// error.
    pub fn add(&mut self, item: T) -> Result<()> {
        let span = Span::of(&item)?;

        if !self.is_span_free(&span) {
            let description = item.describe();
            debug!(item = %description, "rejected conflicting item");
            return Err(ConflictError::with_message(format!(
                "{description} conflicts with the schedule"
            ))
            .into());
        }

        let index = self
            .entries
            .partition_point(|e| e.span.start() <= span.start());
        self.entries.insert(index, Entry { span, item });

        debug!(
            index,
            start = %span.start(),
            end = %span.end(),
            len = self.entries.len(),
            "scheduled item"
        );
        Ok(())
    }

    /// Add items one by one in the given order.
    ///
    /// Stops at the first failure. Items added before it stay scheduled.
    ///
    /// # Errors
    /// A conflict is re-raised wrapped in a `Conflict` whose cause is the
    /// original conflict. Other errors are returned unchanged.
    pub fn add_range<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for (added, item) in items.into_iter().enumerate() {
            match self.add(item) {
                Ok(()) => {}
                Err(ScheduleError::Conflict(cause)) => {
                    debug!(added, "bulk insertion stopped at conflicting item");
                    return Err(ConflictError::wrapping(RANGE_CONFLICT, cause).into());
                }
                Err(err) => {
                    debug!(added, error = %err, "bulk insertion stopped at invalid item");
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the items of a [`Schedule`] in start order.
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| &e.item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Schedule<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
