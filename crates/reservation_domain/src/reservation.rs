use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DateRange, ReservationStatus};

/// A persisted reservation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Whether an approved `other` blocks this reservation from being approved.
    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        self.id != other.id
            && self.room_id == other.room_id
            && other.status == ReservationStatus::Approved
            && self.range().overlaps(&other.range())
    }

    pub fn with_status(self, status: ReservationStatus) -> Self {
        Self { status, ..self }
    }
}

/// Reservation as submitted by a client.
///
/// `id` is accepted for wire compatibility and otherwise ignored. `status`
/// must be left empty on creation, the service assigns it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

impl ReservationDraft {
    pub fn new(user_id: i64, room_id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            room_id,
            start_date,
            end_date,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(
        id: i64,
        room_id: i64,
        start: &str,
        end: &str,
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            id,
            user_id: 7,
            room_id,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            status,
        }
    }

    #[test]
    fn test_conflicts_with_approved_overlap_in_same_room() {
        let approved = reservation(1, 1, "2024-01-01", "2024-01-10", ReservationStatus::Approved);
        let candidate = reservation(2, 1, "2024-01-05", "2024-01-15", ReservationStatus::Pending);

        assert!(candidate.conflicts_with(&approved));
    }

    #[test]
    fn test_ignores_pending_other_room_and_itself() {
        let pending = reservation(1, 1, "2024-01-01", "2024-01-10", ReservationStatus::Pending);
        let other_room = reservation(3, 2, "2024-01-01", "2024-01-10", ReservationStatus::Approved);
        let candidate = reservation(2, 1, "2024-01-05", "2024-01-15", ReservationStatus::Pending);

        assert!(!candidate.conflicts_with(&pending));
        assert!(!candidate.conflicts_with(&other_room));

        let approved_self = candidate.clone().with_status(ReservationStatus::Approved);
        assert!(!candidate.conflicts_with(&approved_self));
    }

    #[test]
    fn test_touching_approved_reservation_is_no_conflict() {
        let approved = reservation(1, 1, "2024-01-01", "2024-01-10", ReservationStatus::Approved);
        let candidate = reservation(3, 1, "2024-01-10", "2024-01-20", ReservationStatus::Pending);

        assert!(!candidate.conflicts_with(&approved));
    }

    #[test]
    fn test_draft_wire_format() {
        let draft: ReservationDraft = serde_json::from_str(
            r#"{"userId": 4, "roomId": 9, "startDate": "2024-05-01", "endDate": "2024-05-03"}"#,
        )
        .unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.status, None);
        assert_eq!(draft.room_id, 9);
        assert_eq!(draft.end_date, "2024-05-03".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_reservation_serializes_camel_case() {
        let r = reservation(5, 2, "2024-01-01", "2024-01-02", ReservationStatus::Pending);
        let value = serde_json::to_value(&r).unwrap();

        assert_eq!(value["roomId"], 2);
        assert_eq!(value["startDate"], "2024-01-01");
        assert_eq!(value["status"], "PENDING");
    }
}
