use std::sync::Arc;

use reservation_domain::{DateRange, Reservation, ReservationDraft, ReservationStatus};
use reservation_store::{ReservationEntity, ReservationRepository};
use tracing::{info, info_span, warn, Span};

use crate::conflict::{ConflictCheck, FullScanConflictCheck};
use crate::mapping::{to_domain, to_entity};
use crate::ReservationServiceError;

/// Reservation workflow: creation, edits, cancellation and approval.
///
/// Every log event of the service is emitted inside its `span`.
#[derive(Clone)]
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    conflicts: Arc<dyn ConflictCheck>,
    span: Span,
}

impl ReservationService {
    /// Service over `repository`, checking approval conflicts with a full scan.
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self {
            conflicts: Arc::new(FullScanConflictCheck::new(repository.clone())),
            repository,
            span: info_span!("reservation_service"),
        }
    }

    pub fn with_conflict_check(mut self, conflicts: Arc<dyn ConflictCheck>) -> Self {
        self.conflicts = conflicts;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn get(&self, id: i64) -> Result<Reservation, ReservationServiceError> {
        self.find_existing(id)
    }

    pub fn list(&self) -> Result<Vec<Reservation>, ReservationServiceError> {
        self.repository
            .find_all()?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub fn create(&self, draft: ReservationDraft) -> Result<Reservation, ReservationServiceError> {
        if draft.status.is_some() {
            return Err(ReservationServiceError::InvalidArgument(
                "Status should be empty".to_owned(),
            ));
        }
        DateRange::validated(draft.start_date, draft.end_date)
            .map_err(|e| ReservationServiceError::InvalidArgument(e.to_string()))?;

        let saved = self.repository.save(&ReservationEntity {
            id: None,
            user_id: draft.user_id,
            room_id: draft.room_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: ReservationStatus::Pending.as_str().to_owned(),
        })?;
        let reservation = to_domain(saved)?;

        self.span.in_scope(|| {
            info!(
                id = reservation.id,
                room_id = reservation.room_id,
                "created reservation"
            )
        });
        Ok(reservation)
    }

    /// Replaces the booking details of a pending reservation. The date order
    /// of `draft` is not checked here, unlike [`ReservationService::create`].
    pub fn update(
        &self,
        id: i64,
        draft: ReservationDraft,
    ) -> Result<Reservation, ReservationServiceError> {
        let existing = self.find_existing(id)?;

        if !existing.status.is_pending() {
            return Err(ReservationServiceError::InvalidArgument(format!(
                "Cannot modify reservation with status = {}",
                existing.status
            )));
        }

        let updated = Reservation {
            id,
            user_id: draft.user_id,
            room_id: draft.room_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: ReservationStatus::Pending,
        };
        let affected = self.repository.update_all_fields(
            id,
            updated.user_id,
            updated.room_id,
            updated.start_date,
            updated.end_date,
            updated.status.as_str(),
        )?;
        if affected == 0 {
            return Err(ReservationServiceError::NotFound(id));
        }

        self.span.in_scope(|| info!(id, "updated reservation"));
        Ok(updated)
    }

    pub fn cancel(&self, id: i64) -> Result<(), ReservationServiceError> {
        let existing = self.find_existing(id)?;

        if !existing.status.is_pending() {
            return Err(ReservationServiceError::InvalidState(
                "Cannot cancel approved or already cancelled reservation".to_owned(),
            ));
        }

        self.repository.delete_by_id(id)?;
        self.span
            .in_scope(|| info!("Successfully cancelled reservation: id={}", id));
        Ok(())
    }

    /// Approves a pending reservation unless an approved reservation of the
    /// same room overlaps its dates.
    pub fn approve(&self, id: i64) -> Result<Reservation, ReservationServiceError> {
        let existing = self.find_existing(id)?;

        if !existing.status.is_pending() {
            return Err(ReservationServiceError::InvalidArgument(format!(
                "Can not approve reservation with status = {}",
                existing.status
            )));
        }

        if self.conflicts.has_conflict(&existing)? {
            self.span.in_scope(|| {
                warn!(
                    id,
                    room_id = existing.room_id,
                    "approval rejected, room already booked for overlapping dates"
                )
            });
            return Err(ReservationServiceError::InvalidArgument(
                "Can not approve reservation because of conflict".to_owned(),
            ));
        }

        let approved = existing.with_status(ReservationStatus::Approved);
        let saved = to_domain(self.repository.save(&to_entity(&approved))?)?;

        self.span.in_scope(|| info!(id, "approved reservation"));
        Ok(saved)
    }

    fn find_existing(&self, id: i64) -> Result<Reservation, ReservationServiceError> {
        self.repository
            .find_by_id(id)?
            .map(to_domain)
            .transpose()?
            .ok_or(ReservationServiceError::NotFound(id))
    }
}
