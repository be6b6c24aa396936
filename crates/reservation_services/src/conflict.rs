//! Approval conflict detection.
//!
//! Approving a reservation must not leave two approved reservations for the
//! same room with overlapping dates. The check and the following write are
//! separate storage calls, concurrent approvals can both pass the check.
use std::sync::Arc;

use reservation_domain::Reservation;
use reservation_store::ReservationRepository;
use tracing::debug;

use crate::mapping::to_domain;
use crate::ReservationServiceError;

pub trait ConflictCheck: Send + Sync {
    /// Whether approving `candidate` would overlap an already approved
    /// reservation of the same room.
    fn has_conflict(&self, candidate: &Reservation) -> Result<bool, ReservationServiceError>;
}

/// Scans every stored reservation on each check.
pub struct FullScanConflictCheck {
    repository: Arc<dyn ReservationRepository>,
}

impl FullScanConflictCheck {
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }
}

impl ConflictCheck for FullScanConflictCheck {
    fn has_conflict(&self, candidate: &Reservation) -> Result<bool, ReservationServiceError> {
        let existing = self.repository.find_all()?;
        debug!(
            id = candidate.id,
            room_id = candidate.room_id,
            scanned = existing.len(),
            "checking approval conflicts"
        );

        for entity in existing {
            if candidate.conflicts_with(&to_domain(entity)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reservation_domain::ReservationStatus;
    use reservation_store::{InMemoryReservationRepository, ReservationEntity};

    fn seed(
        repo: &InMemoryReservationRepository,
        room_id: i64,
        start: &str,
        end: &str,
        status: &str,
    ) -> Reservation {
        let saved = repo
            .save(&ReservationEntity {
                id: None,
                user_id: 1,
                room_id,
                start_date: start.parse().unwrap(),
                end_date: end.parse().unwrap(),
                status: status.to_owned(),
            })
            .unwrap();
        to_domain(saved).unwrap()
    }

    #[test]
    fn test_detects_overlap_with_approved() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        seed(&repo, 1, "2024-01-01", "2024-01-10", "APPROVED");
        let candidate = seed(&repo, 1, "2024-01-05", "2024-01-15", "PENDING");

        let check = FullScanConflictCheck::new(repo);

        assert!(check.has_conflict(&candidate).unwrap());
    }

    #[test]
    fn test_no_conflict_for_touching_or_pending() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        seed(&repo, 1, "2024-01-01", "2024-01-10", "APPROVED");
        seed(&repo, 1, "2024-01-12", "2024-01-18", "PENDING");
        let candidate = seed(&repo, 1, "2024-01-10", "2024-01-20", "PENDING");

        let check = FullScanConflictCheck::new(repo);

        assert!(!check.has_conflict(&candidate).unwrap());
    }

    #[test]
    fn test_approved_candidate_does_not_conflict_with_itself() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let candidate = seed(&repo, 1, "2024-01-01", "2024-01-10", "APPROVED");
        assert_eq!(candidate.status, ReservationStatus::Approved);

        let check = FullScanConflictCheck::new(repo);

        assert!(!check.has_conflict(&candidate).unwrap());
    }
}
