use reservation_domain::{Reservation, ReservationStatus};
use reservation_store::ReservationEntity;

use crate::ReservationServiceError;

pub(crate) fn to_domain(entity: ReservationEntity) -> Result<Reservation, ReservationServiceError> {
    let id = entity.id.ok_or_else(|| {
        ReservationServiceError::CorruptRecord("stored reservation without id".to_owned())
    })?;
    let status = entity
        .status
        .parse::<ReservationStatus>()
        .map_err(|e| ReservationServiceError::CorruptRecord(format!("reservation {id}: {e}")))?;

    Ok(Reservation {
        id,
        user_id: entity.user_id,
        room_id: entity.room_id,
        start_date: entity.start_date,
        end_date: entity.end_date,
        status,
    })
}

pub(crate) fn to_entity(reservation: &Reservation) -> ReservationEntity {
    ReservationEntity {
        id: Some(reservation.id),
        user_id: reservation.user_id,
        room_id: reservation.room_id,
        start_date: reservation.start_date,
        end_date: reservation.end_date,
        status: reservation.status.as_str().to_owned(),
    }
}
