//! Domain values shared by every layer of the reservation system.
//!
//! A [`Reservation`] books a room for a half-open range of calendar dates.
//! Clients submit a [`ReservationDraft`], the service decides the
//! [`ReservationStatus`].
pub mod range;
pub mod reservation;
pub mod status;

pub use range::DateRange;
pub use reservation::{Reservation, ReservationDraft};
pub use status::ReservationStatus;

use chrono::NaiveDate;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("end date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown reservation status '{0}'")]
    UnknownStatus(String),
}
