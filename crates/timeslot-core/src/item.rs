//! A ready-made schedulable item.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};
use crate::schedulable::Schedulable;
use crate::span::Span;

/// A titled block of time, e.g. a meeting or a booking.
///
/// Moving the start keeps the duration: the end follows the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl Appointment {
    /// Create an appointment from a start and a duration.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `duration` is negative or the end is
    /// out of range.
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>, duration: Duration) -> Result<Self> {
        let span = Span::from_duration(start_time, duration)?;
        Ok(Self::build(title.into(), span.start(), span.end()))
    }

    /// Create an appointment from explicit bounds.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `end_time < start_time`.
    pub fn from_range(
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        if end_time < start_time {
            return Err(ScheduleError::invalid(
                "end_time",
                format!("{end_time} is earlier than start_time {start_time}"),
            ));
        }
        Ok(Self::build(title.into(), start_time, end_time))
    }

    fn build(title: String, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            start_time,
            end_time,
        }
    }

    /// Set the id (builder style).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Move the appointment, keeping its duration.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the shifted end is out of range; the
    /// appointment is left unchanged.
    pub fn set_start(&mut self, start_time: DateTime<Utc>) -> Result<()> {
        let end_time = start_time
            .checked_add_signed(self.duration())
            .ok_or_else(|| ScheduleError::invalid("start_time", "shifted end is out of range"))?;
        self.start_time = start_time;
        self.end_time = end_time;
        Ok(())
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

impl Schedulable for Appointment {
    fn start(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}) [{}, {})",
            self.title,
            self.id,
            self.start_time.format("%Y-%m-%d %H:%M"),
            self.end_time.format("%Y-%m-%d %H:%M"),
        )
    }
}
