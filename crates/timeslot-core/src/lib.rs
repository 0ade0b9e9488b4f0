//! # Timeslot Core Library
//!
//! An always-ordered collection of time-bounded items that never lets two
//! stored items conflict. It is a building block for calendar, booking and
//! resource-allocation code that needs to answer "is this moment free?" and
//! "add this only if it does not clash".
//!
//! ## Architecture
//!
//! - **Schedulable**: the capability an item exposes (start, end, duration)
//! - **Schedule**: sorted container owning the no-conflict invariant, with
//!   free-time queries, point lookup and free-slot detection
//! - **Config**: TOML-loadable conflict policy and gap settings
//! - **Errors**: invalid-argument, conflict (with wrapped cause),
//!   not-supported and empty-schedule conditions
//!
//! ## Key Components
//!
//! - [`Schedule`]: the ordered, conflict-free container
//! - [`Schedulable`]: trait implemented by anything that can be scheduled
//! - [`Appointment`]: a ready-made schedulable item
//! - [`ScheduleConfig`]: conflict policy selection

pub mod config;
pub mod error;
pub mod item;
pub mod schedulable;
pub mod schedule;
pub mod span;

pub use config::{ConflictPolicy, ScheduleConfig};
pub use error::{ConfigError, ConflictError, Result, ScheduleError};
pub use item::Appointment;
pub use schedulable::{by_start, compare_starts, Schedulable};
pub use schedule::{FreeSlot, Iter, Schedule};
pub use span::Span;
