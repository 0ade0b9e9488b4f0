//! The capability an item must expose to be stored in a [`Schedule`].
//!
//! [`Schedule`]: crate::Schedule

use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Result, ScheduleError};

/// A value with a start instant, an end instant and a duration.
///
/// Implementations must keep `end() >= start()`. Only the start is meant to
/// be moved by the item's owner; end and duration are derived from it.
/// A [`Schedule`](crate::Schedule) snapshots `start`/`end` when the item is
/// added and never reads them again for its own bookkeeping.
pub trait Schedulable {
    /// Scheduled start.
    fn start(&self) -> DateTime<Utc>;

    /// Scheduled end.
    fn end(&self) -> DateTime<Utc>;

    /// Scheduled duration, `end - start`.
    fn duration(&self) -> Duration {
        self.end() - self.start()
    }

    /// Human-readable identity used in conflict messages.
    fn describe(&self) -> String {
        format!("[{}, {})", self.start().to_rfc3339(), self.end().to_rfc3339())
    }
}

macro_rules! forward_schedulable {
    ($($ptr:ty),*) => {
        $(
            impl<T: Schedulable + ?Sized> Schedulable for $ptr {
                fn start(&self) -> DateTime<Utc> {
                    (**self).start()
                }

                fn end(&self) -> DateTime<Utc> {
                    (**self).end()
                }

                fn duration(&self) -> Duration {
                    (**self).duration()
                }

                fn describe(&self) -> String {
                    (**self).describe()
                }
            }
        )*
    };
}

forward_schedulable!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

/// Orders two items by start instant.
///
/// Equal starts compare as [`Ordering::Equal`]; a stable sort keeps such
/// items in their existing relative order.
pub fn by_start<T: Schedulable + ?Sized>(a: &T, b: &T) -> Ordering {
    a.start().cmp(&b.start())
}

/// Checked start comparison.
///
/// Returns `Less` if `a` starts earlier, `Equal` if both start together and
/// `Greater` if `b` starts earlier.
///
/// # Errors
/// Returns `InvalidArgument` if either operand is absent.
pub fn compare_starts<T: Schedulable + ?Sized>(a: Option<&T>, b: Option<&T>) -> Result<Ordering> {
    let a = a.ok_or_else(|| ScheduleError::invalid("a", "item to compare is missing"))?;
    let b = b.ok_or_else(|| ScheduleError::invalid("b", "item to compare is missing"))?;
    Ok(by_start(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Slot {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    }

    impl Schedulable for Slot {
        fn start(&self) -> DateTime<Utc> {
            self.start
        }

        fn end(&self) -> DateTime<Utc> {
            self.end
        }
    }

    fn slot(start_h: u32, end_h: u32) -> Slot {
        Slot {
            start: Utc.with_ymd_and_hms(2024, 3, 1, start_h, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 1, end_h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn duration_is_derived() {
        assert_eq!(slot(9, 11).duration(), Duration::hours(2));
        assert_eq!(slot(9, 9).duration(), Duration::zero());
    }

    #[test]
    fn compare_starts_orders_by_start() {
        let earlier = slot(10, 11);
        let later = slot(11, 12);

        assert_eq!(compare_starts(Some(&earlier), Some(&earlier)).unwrap(), Ordering::Equal);
        assert_eq!(compare_starts(Some(&earlier), Some(&later)).unwrap(), Ordering::Less);
        assert_eq!(compare_starts(Some(&later), Some(&earlier)).unwrap(), Ordering::Greater);
    }

    #[test]
    fn compare_starts_ignores_end() {
        let short = slot(10, 11);
        let long = slot(10, 15);
        assert_eq!(by_start(&short, &long), Ordering::Equal);
    }

    #[test]
    fn compare_starts_rejects_missing_operand() {
        let s = slot(10, 11);
        assert!(compare_starts(None, Some(&s)).unwrap_err().is_invalid_argument());
        assert!(compare_starts(Some(&s), None).unwrap_err().is_invalid_argument());
        assert!(compare_starts::<Slot>(None, None).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn smart_pointers_forward_the_capability() {
        let shared = Rc::new(slot(8, 9));
        let boxed: Box<dyn Schedulable> = Box::new(slot(8, 10));

        assert_eq!(shared.duration(), Duration::hours(1));
        assert_eq!(boxed.duration(), Duration::hours(2));
        assert!(boxed.describe().starts_with("[2024-03-01T08:00:00"));
    }
}
