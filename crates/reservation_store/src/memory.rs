//! In-process reservation storage, used by tests and throwaway runs.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::{Error, ReservationEntity, ReservationRepository};

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, ReservationEntity>,
}

/// [`ReservationRepository`] kept in memory, ids start at 1.
#[derive(Default)]
pub struct InMemoryReservationRepository {
    rows: RwLock<Rows>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationRepository for InMemoryReservationRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<ReservationEntity>, Error> {
        Ok(self.rows.read().by_id.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<ReservationEntity>, Error> {
        Ok(self.rows.read().by_id.values().cloned().collect())
    }

    fn save(&self, entity: &ReservationEntity) -> Result<ReservationEntity, Error> {
        let mut rows = self.rows.write();
        let id = match entity.id {
            Some(id) if rows.by_id.contains_key(&id) => id,
            Some(id) => return Err(Error::MissingRow(id)),
            None => {
                rows.last_id += 1;
                rows.last_id
            }
        };
        let saved = ReservationEntity {
            id: Some(id),
            ..entity.clone()
        };
        rows.by_id.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_by_id(&self, id: i64) -> Result<(), Error> {
        self.rows.write().by_id.remove(&id);
        Ok(())
    }

    fn update_all_fields(
        &self,
        id: i64,
        user_id: i64,
        room_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: &str,
    ) -> Result<usize, Error> {
        let mut rows = self.rows.write();
        match rows.by_id.get_mut(&id) {
            Some(row) => {
                *row = ReservationEntity {
                    id: Some(id),
                    user_id,
                    room_id,
                    start_date,
                    end_date,
                    status: status.to_owned(),
                };
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> ReservationEntity {
        ReservationEntity {
            id: None,
            user_id: 1,
            room_id: 1,
            start_date: "2024-01-01".parse().unwrap(),
            end_date: "2024-01-02".parse().unwrap(),
            status: "PENDING".to_owned(),
        }
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryReservationRepository::new();
        let first = repo.save(&entity()).unwrap();
        let second = repo.save(&entity()).unwrap();
        repo.delete_by_id(2).unwrap();
        let third = repo.save(&entity()).unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(third.id, Some(3));
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_all_fields_on_missing_row() {
        let repo = InMemoryReservationRepository::new();
        let day = "2024-01-01".parse().unwrap();

        assert_eq!(repo.update_all_fields(5, 1, 1, day, day, "PENDING").unwrap(), 0);
        assert!(repo.find_by_id(5).unwrap().is_none());
    }

    #[test]
    fn test_save_existing_replaces() {
        let repo = InMemoryReservationRepository::new();
        let mut saved = repo.save(&entity()).unwrap();
        saved.status = "APPROVED".to_owned();

        repo.save(&saved).unwrap();

        assert_eq!(repo.find_by_id(1).unwrap(), Some(saved));
    }
}
