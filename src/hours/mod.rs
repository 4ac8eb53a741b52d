//! Opening-hours evaluation.
//!
//! Takes a vendor's weekly schedule plus a wall-clock reading and decides
//! whether the vendor is open, about to close, or closed.

pub mod clock;
pub mod evaluator;
pub mod types;

pub use clock::weekday_of;
pub use evaluator::{
    DEFAULT_CLOSING_SOON_MINUTES, HoursEvaluator, VendorStatus, is_closing_soon, is_open_now,
    vendor_status,
};
pub use types::{Day, DayWindow, WeeklyHours};
