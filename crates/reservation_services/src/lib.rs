pub mod conflict;
pub mod error;
mod mapping;
pub mod reservation;

pub use conflict::{ConflictCheck, FullScanConflictCheck};
pub use error::ReservationServiceError;
pub use reservation::ReservationService;
